//! Candidate validation and confidence scoring
//!
//! Contours surviving the tracer are filtered on area, rectangularity, and
//! aspect ratio (both orientations), then scored into [`DetectedRegion`]s.
//! Gates are deliberately looser than the configured bounds because edge
//! detection inflates and erodes boundaries unevenly.

use crate::models::{Contour, DetectedRegion, DetectionConfig, Orientation};

/// Lower area gate as a fraction of the configured minimum
const AREA_MIN_FACTOR: f32 = 0.3;
/// Upper area gate as a multiple of the configured maximum
const AREA_MAX_FACTOR: f32 = 3.0;
/// A candidate must fill at least this fraction of its bounding box
const MIN_RECTANGULARITY: f32 = 0.4;
/// Aspect tolerance widening applied during validation
const TOLERANCE_RELAXATION: f32 = 1.5;

/// Confidence weight for the aspect-ratio score
const WEIGHT_RATIO: f32 = 0.3;
/// Confidence weight for the area score
const WEIGHT_AREA: f32 = 0.2;
/// Confidence weight for the rectangularity score
const WEIGHT_RECTANGULARITY: f32 = 0.5;

/// How a candidate's bounding box relates to the target aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationMatch {
    /// Neither orientation fits within the relaxed tolerance
    NoMatch,
    /// Width/height matches the target ratio
    Landscape,
    /// Height/width matches the target ratio
    Portrait,
}

/// Classify a bounding box against the target ratio in both orientations.
///
/// The strict checks require the box to actually lean the matched way
/// (landscape needs width > height); a square-ish box can fail both and
/// still be acceptable if its normalized long/short ratio is close enough,
/// which callers handle via [`is_valid_candidate`].
pub fn match_orientation(width: u32, height: u32, config: &DetectionConfig) -> OrientationMatch {
    if width == 0 || height == 0 {
        return OrientationMatch::NoMatch;
    }

    let w = width as f32;
    let h = height as f32;
    let target = config.target_aspect_ratio;
    let tolerance = config.aspect_ratio_tolerance * TOLERANCE_RELAXATION;

    if (w / h - target).abs() <= target * tolerance && width > height {
        OrientationMatch::Landscape
    } else if (h / w - target).abs() <= target * tolerance && height > width {
        OrientationMatch::Portrait
    } else {
        OrientationMatch::NoMatch
    }
}

/// Gate a contour on area, rectangularity, and aspect ratio, resolving its
/// orientation on success.
///
/// Returns false for contours that cannot be a card; on true the contour's
/// `orientation` field is populated (falling back to whichever way the box
/// leans when only the normalized ratio matched).
pub fn is_valid_candidate(contour: &mut Contour, config: &DetectionConfig) -> bool {
    let width = contour.bounds.width;
    let height = contour.bounds.height;
    if width == 0 || height == 0 {
        return false;
    }

    let min_area = config.min_card_area as f32 * AREA_MIN_FACTOR;
    let max_area = config.max_card_area as f32 * AREA_MAX_FACTOR;
    let area = contour.area as f32;
    if area < min_area || area > max_area {
        return false;
    }

    if contour.rectangularity < MIN_RECTANGULARITY {
        return false;
    }

    let matched = match_orientation(width, height, config);
    if matched == OrientationMatch::NoMatch {
        let w = width as f32;
        let h = height as f32;
        let normalized_ratio = w.max(h) / w.min(h);
        let target = config.target_aspect_ratio;
        let normalized_target = target.max(1.0 / target);
        let tolerance = config.aspect_ratio_tolerance * TOLERANCE_RELAXATION;
        if (normalized_ratio - normalized_target).abs() > normalized_target * tolerance {
            return false;
        }
    }

    contour.orientation = Some(match matched {
        OrientationMatch::Landscape => Orientation::Landscape,
        OrientationMatch::Portrait => Orientation::Portrait,
        OrientationMatch::NoMatch => Orientation::from_dimensions(width, height),
    });

    true
}

/// Convert a validated contour into a scored region.
///
/// Confidence combines aspect fit (0.3), area fit against the midpoint of
/// the configured range (0.2), and rectangularity (0.5), scaled by the
/// sensitivity tier's multiplier and clamped to [0, 1]. Region ids are
/// deterministic: `card-{tier}-{index}` for a given pass.
pub fn score_region(
    contour: &Contour,
    config: &DetectionConfig,
    tier_label: &str,
    confidence_scale: f32,
    index: usize,
) -> DetectedRegion {
    let width = contour.bounds.width;
    let height = contour.bounds.height;
    let orientation = contour
        .orientation
        .unwrap_or_else(|| Orientation::from_dimensions(width, height));

    let aspect_ratio = match orientation {
        Orientation::Landscape => width as f32 / height as f32,
        Orientation::Portrait => height as f32 / width as f32,
    };
    let target = config.target_aspect_ratio;
    let ratio_score = 1.0 - (aspect_ratio - target).abs() / target;

    let expected_area = config.expected_area();
    let area_score = 1.0 - ((contour.area as f32 - expected_area).abs() / expected_area).min(1.0);

    let confidence = ((ratio_score * WEIGHT_RATIO
        + area_score * WEIGHT_AREA
        + contour.rectangularity * WEIGHT_RECTANGULARITY)
        * confidence_scale)
        .clamp(0.0, 1.0);

    DetectedRegion {
        id: format!("card-{tier_label}-{index}"),
        x: contour.bounds.x,
        y: contour.bounds.y,
        width,
        height,
        rotation: 0.0,
        confidence,
        orientation,
        is_manually_adjusted: false,
        is_selected: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BoundingBox;

    fn contour_with_bounds(width: u32, height: u32, rectangularity: f32) -> Contour {
        let mut c = Contour::new(
            Vec::new(),
            Vec::new(),
            BoundingBox {
                x: 10,
                y: 10,
                width,
                height,
            },
        );
        c.rectangularity = rectangularity;
        c
    }

    fn config() -> DetectionConfig {
        DetectionConfig {
            target_aspect_ratio: 1.586,
            aspect_ratio_tolerance: 0.1,
            min_card_area: 20_000,
            max_card_area: 80_000,
        }
    }

    #[test]
    fn test_orientation_match_both_ways() {
        let config = config();
        assert_eq!(
            match_orientation(317, 200, &config),
            OrientationMatch::Landscape
        );
        assert_eq!(
            match_orientation(200, 317, &config),
            OrientationMatch::Portrait
        );
        assert_eq!(match_orientation(200, 200, &config), OrientationMatch::NoMatch);
        assert_eq!(match_orientation(0, 200, &config), OrientationMatch::NoMatch);
    }

    #[test]
    fn test_valid_landscape_card() {
        let mut c = contour_with_bounds(317, 200, 0.95);
        assert!(is_valid_candidate(&mut c, &config()));
        assert_eq!(c.orientation, Some(Orientation::Landscape));
    }

    #[test]
    fn test_rejects_low_rectangularity() {
        let mut c = contour_with_bounds(317, 200, 0.39);
        assert!(!is_valid_candidate(&mut c, &config()));

        let mut c = contour_with_bounds(317, 200, 0.40);
        assert!(is_valid_candidate(&mut c, &config()));
    }

    #[test]
    fn test_rejects_area_out_of_gate() {
        // below 0.3 * min_card_area = 6000
        let mut c = contour_with_bounds(95, 60, 0.95);
        assert!(!is_valid_candidate(&mut c, &config()));

        // above 3 * max_card_area = 240000
        let mut c = contour_with_bounds(700, 440, 0.95);
        assert!(!is_valid_candidate(&mut c, &config()));
    }

    #[test]
    fn test_rejects_wrong_aspect() {
        // 3:1 is far outside tolerance in either orientation
        let mut c = contour_with_bounds(600, 200, 0.95);
        assert!(!is_valid_candidate(&mut c, &config()));
    }

    #[test]
    fn test_square_passes_normalized_fallback_only_when_close() {
        // normalized ratio 1.0 vs target 1.586: rejected
        let mut c = contour_with_bounds(250, 250, 0.95);
        assert!(!is_valid_candidate(&mut c, &config()));
    }

    #[test]
    fn test_score_perfect_candidate() {
        let mut c = contour_with_bounds(317, 200, 1.0);
        // area 63400, expected 50000: areaScore = 1 - 13400/50000 = 0.732
        assert!(is_valid_candidate(&mut c, &config()));
        let region = score_region(&c, &config(), "high", 1.0, 0);

        assert_eq!(region.id, "card-high-0");
        assert_eq!(region.x, 10);
        assert_eq!(region.width, 317);
        assert_eq!(region.orientation, Orientation::Landscape);
        assert_eq!(region.rotation, 0.0);
        assert!(!region.is_manually_adjusted);
        assert!(region.is_selected);

        let ratio_score = 1.0 - (317.0 / 200.0 - 1.586f32).abs() / 1.586;
        let expected = (ratio_score * 0.3 + 0.732 * 0.2 + 0.5).clamp(0.0, 1.0);
        assert!((region.confidence - expected).abs() < 0.001);
    }

    #[test]
    fn test_tier_scale_derates_confidence() {
        let mut c = contour_with_bounds(317, 200, 1.0);
        assert!(is_valid_candidate(&mut c, &config()));
        let high = score_region(&c, &config(), "high", 1.0, 0);
        let medium = score_region(&c, &config(), "medium", 0.85, 0);
        let low = score_region(&c, &config(), "low", 0.7, 0);

        assert!((medium.confidence / high.confidence - 0.85).abs() < 0.001);
        assert!((low.confidence / high.confidence - 0.7).abs() < 0.001);
    }

    #[test]
    fn test_confidence_clamped_to_unit_interval() {
        let mut c = contour_with_bounds(600, 200, 0.95);
        c.orientation = Some(Orientation::Landscape);
        // ratio 3.0 vs target 1.586: ratio score is negative, result stays >= 0
        let region = score_region(&c, &config(), "low", 0.7, 3);
        assert!(region.confidence >= 0.0 && region.confidence <= 1.0);
        assert_eq!(region.id, "card-low-3");
    }
}
