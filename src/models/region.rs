/// Card orientation relative to the configured aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Width-major (width / height matches the target ratio)
    Landscape,
    /// Height-major (height / width matches the target ratio)
    Portrait,
}

impl Orientation {
    /// Default orientation for a box when neither ratio matched outright
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if width >= height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// One detected card-shaped region, the externally visible output record.
///
/// Never mutated by the pipeline after creation; the orchestrator may drop a
/// region during overlap deduplication but never rewrites one. The two UI
/// flags are owned by the caller once returned.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedRegion {
    /// Stable identifier, deterministic for a given image and configuration
    pub id: String,
    /// Left edge of the bounding box
    pub x: u32,
    /// Top edge of the bounding box
    pub y: u32,
    /// Bounding-box width
    pub width: u32,
    /// Bounding-box height
    pub height: u32,
    /// Rotation in degrees; this pipeline does not estimate skew, always 0
    pub rotation: f32,
    /// Detection confidence in [0, 1]
    pub confidence: f32,
    /// Matched orientation
    pub orientation: Orientation,
    /// Caller-owned UI flag, always false on creation
    pub is_manually_adjusted: bool,
    /// Caller-owned UI flag, always true on creation
    pub is_selected: bool,
}

impl DetectedRegion {
    /// Bounding-box area in pixels
    pub fn area(&self) -> u32 {
        self.width * self.height
    }
}
