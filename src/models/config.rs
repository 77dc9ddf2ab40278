use crate::error::DetectError;

/// Caller-supplied detection configuration, immutable for one detection call.
///
/// Every threshold inside the pipeline is derived from this configuration
/// plus per-image statistics; the only fixed constants are the multi-pass
/// sensitivity table entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionConfig {
    /// Expected width/height ratio of a card in its natural orientation
    pub target_aspect_ratio: f32,
    /// Fractional tolerance on the aspect ratio, in (0, 1]
    pub aspect_ratio_tolerance: f32,
    /// Minimum candidate bounding-box area in pixels
    pub min_card_area: u32,
    /// Maximum candidate bounding-box area in pixels
    pub max_card_area: u32,
}

impl DetectionConfig {
    /// Reject configurations the pipeline cannot interpret
    pub fn validate(&self) -> Result<(), DetectError> {
        if !(self.target_aspect_ratio > 0.0) {
            return Err(DetectError::InvalidConfig(
                "target_aspect_ratio must be positive".into(),
            ));
        }
        if !(self.aspect_ratio_tolerance > 0.0 && self.aspect_ratio_tolerance <= 1.0) {
            return Err(DetectError::InvalidConfig(
                "aspect_ratio_tolerance must be in (0, 1]".into(),
            ));
        }
        if self.min_card_area == 0 {
            return Err(DetectError::InvalidConfig(
                "min_card_area must be positive".into(),
            ));
        }
        if self.max_card_area <= self.min_card_area {
            return Err(DetectError::InvalidConfig(
                "max_card_area must exceed min_card_area".into(),
            ));
        }
        Ok(())
    }

    /// Midpoint of the configured area range, used by confidence scoring
    pub fn expected_area(&self) -> f32 {
        (self.min_card_area as f32 + self.max_card_area as f32) / 2.0
    }
}

impl Default for DetectionConfig {
    /// ID-1 card (85.60 x 53.98 mm) scanned at roughly 300 DPI
    fn default() -> Self {
        Self {
            target_aspect_ratio: 85.60 / 53.98,
            aspect_ratio_tolerance: 0.15,
            min_card_area: 20_000,
            max_card_area: 200_000,
        }
    }
}
