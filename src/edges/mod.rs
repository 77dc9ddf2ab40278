//! Edge extraction: Canny-style detection, morphology, and binarization
//!
//! One sensitivity tier runs these stages in order over the preprocessed
//! buffer:
//! - Sobel gradients (magnitude + direction)
//! - Non-maximum suppression (ridge thinning)
//! - Hysteresis thresholding (tier-specific low/high thresholds)
//! - Morphological closing plus an extra dilation (bridge and thicken edges)
//! - Adaptive binarization (statistics-driven local threshold)

pub mod binarize;
pub mod gradient;
pub mod hysteresis;
pub mod morphology;
pub mod nms;

pub use gradient::GradientField;
