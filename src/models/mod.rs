pub mod config;
pub mod contour;
pub mod point;
pub mod region;

pub use config::DetectionConfig;
pub use contour::{BoundingBox, Contour};
pub use point::{Point, PointI};
pub use region::{DetectedRegion, Orientation};
