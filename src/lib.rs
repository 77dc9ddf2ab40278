//! card_scan - ID card region detection for flatbed scans
//!
//! A pure Rust computer-vision pipeline that finds rectangular card-shaped
//! regions in scanned images. Built for gray A4 scans where cards blend into
//! the background: contrast enhancement, Canny-style edge extraction, and a
//! multi-pass sensitivity schedule recover cards a single fixed threshold
//! would miss.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Region extraction from the source image
pub mod crop;
mod debug;
/// Contour tracing, shape analysis, and candidate validation
pub mod detector;
/// Sobel/NMS/hysteresis edge extraction, morphology, binarization
pub mod edges;
/// Library error types
pub mod error;
/// Core data structures (DetectedRegion, DetectionConfig, Contour, points)
pub mod models;
/// Multi-pass detection orchestration
pub mod pipeline;
/// Grayscale conversion, contrast enhancement, denoising
pub mod preprocess;

pub use crop::{crop_region, CroppedImage};
pub use error::DetectError;
pub use models::{BoundingBox, DetectedRegion, DetectionConfig, Orientation};

use error::check_buffer;
use preprocess::grayscale::{rgba_to_luma, rgba_to_luma_parallel};

/// Pixel count above which grayscale conversion runs in parallel
const PARALLEL_LUMA_THRESHOLD: usize = 1 << 20;

/// Detect card regions in an RGBA image.
///
/// # Arguments
/// * `rgba` - Raw RGBA bytes (4 bytes per pixel)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `config` - Aspect ratio and area expectations for one card
///
/// # Returns
/// Deduplicated regions sorted by descending confidence. An image with no
/// plausible cards yields an empty vector, not an error.
pub fn detect_cards(
    rgba: &[u8],
    width: usize,
    height: usize,
    config: &DetectionConfig,
) -> Result<Vec<DetectedRegion>, DetectError> {
    config.validate()?;
    check_buffer(rgba.len(), width, height, 4)?;

    let gray = if width * height >= PARALLEL_LUMA_THRESHOLD {
        rgba_to_luma_parallel(rgba, width, height)
    } else {
        rgba_to_luma(rgba, width, height)
    };
    Ok(pipeline::detect(&gray, width, height, config))
}

/// Detect card regions in an 8-bit grayscale image.
///
/// Skips the color conversion for callers that already hold intensity data.
pub fn detect_cards_gray(
    gray: &[u8],
    width: usize,
    height: usize,
    config: &DetectionConfig,
) -> Result<Vec<DetectedRegion>, DetectError> {
    config.validate()?;
    check_buffer(gray.len(), width, height, 1)?;
    Ok(pipeline::detect(gray, width, height, config))
}

/// Reusable detector holding a fixed configuration.
///
/// Thin wrapper over [`detect_cards`] for callers scanning many images with
/// the same card expectations.
#[derive(Debug, Clone)]
pub struct CardDetector {
    config: DetectionConfig,
}

impl CardDetector {
    /// Create a detector; fails if the configuration is inconsistent
    pub fn new(config: DetectionConfig) -> Result<Self, DetectError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this detector runs with
    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Detect card regions in an RGBA image
    pub fn detect(
        &self,
        rgba: &[u8],
        width: usize,
        height: usize,
    ) -> Result<Vec<DetectedRegion>, DetectError> {
        detect_cards(rgba, width, height, &self.config)
    }

    /// Detect card regions in a grayscale image
    pub fn detect_gray(
        &self,
        gray: &[u8],
        width: usize,
        height: usize,
    ) -> Result<Vec<DetectedRegion>, DetectError> {
        detect_cards_gray(gray, width, height, &self.config)
    }
}

impl Default for CardDetector {
    fn default() -> Self {
        Self {
            config: DetectionConfig::default(),
        }
    }
}
