//! Candidate extraction and validation
//!
//! Consumes a binarized mask and produces scored card regions:
//! - Flood-fill contour tracing over the mask
//! - Convex hull and rectangularity analysis per contour
//! - Aspect/area/rectangularity validation and confidence scoring

pub mod contours;
pub mod shape;
pub mod validate;

pub use validate::OrientationMatch;
