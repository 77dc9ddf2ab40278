//! Multi-pass detection orchestration
//!
//! One detection call runs:
//! - preprocessing once (contrast stretch, local equalization, bilateral
//!   filter, two Gaussian blur passes)
//! - up to three sensitivity tiers of edge extraction and candidate
//!   validation, escalating to a more sensitive tier only when the previous
//!   tiers found too few candidates
//! - a final confidence sort plus greedy overlap removal

use crate::debug::debug_enabled;
use crate::detector::contours::trace_contours;
use crate::detector::shape::analyze_shape;
use crate::detector::validate::{is_valid_candidate, score_region};
use crate::edges::{binarize, gradient, hysteresis, morphology, nms};
use crate::models::{DetectedRegion, DetectionConfig};
use crate::preprocess::{contrast, denoise};

/// Two regions are duplicates when their intersection covers more than this
/// fraction of the smaller one
const OVERLAP_THRESHOLD: f32 = 0.5;

/// One entry of the sensitivity schedule
#[derive(Debug, Clone, Copy)]
pub struct SensitivityPass {
    /// Tier name, used in region ids and diagnostics
    pub label: &'static str,
    /// Hysteresis low threshold
    pub low_threshold: u8,
    /// Hysteresis high threshold
    pub high_threshold: u8,
    /// Confidence derating for regions found by this tier
    pub confidence_scale: f32,
    /// Run this tier only when earlier tiers produced fewer candidates
    pub run_below: usize,
}

/// Tier schedule, most selective first. The first tier always runs; more
/// sensitive tiers only run while the candidate count stays below their
/// escalation bound.
pub const SENSITIVITY_PASSES: [SensitivityPass; 3] = [
    SensitivityPass {
        label: "high",
        low_threshold: 30,
        high_threshold: 80,
        confidence_scale: 1.0,
        run_below: usize::MAX,
    },
    SensitivityPass {
        label: "medium",
        low_threshold: 15,
        high_threshold: 50,
        confidence_scale: 0.85,
        run_below: 2,
    },
    SensitivityPass {
        label: "low",
        low_threshold: 8,
        high_threshold: 25,
        confidence_scale: 0.7,
        run_below: 1,
    },
];

/// Run the full detection pipeline over a grayscale buffer.
///
/// `gray` must hold `width * height` intensity values. Returns deduplicated
/// regions sorted by descending confidence.
pub fn detect(gray: &[u8], width: usize, height: usize, config: &DetectionConfig) -> Vec<DetectedRegion> {
    let stretched = contrast::stretch_contrast(gray, width, height);
    let equalized = contrast::equalize_local_contrast(&stretched, width, height);
    let filtered = denoise::bilateral_filter(&equalized, width, height);
    let blurred = denoise::gaussian_blur(&filtered, width, height);
    let blurred = denoise::gaussian_blur(&blurred, width, height);

    let mut regions: Vec<DetectedRegion> = Vec::new();
    for pass in SENSITIVITY_PASSES {
        if regions.len() >= pass.run_below {
            continue;
        }
        let found = run_pass(&blurred, gray, width, height, config, &pass);
        if debug_enabled() {
            eprintln!(
                "pass {}: thresholds {}/{}, {} region(s)",
                pass.label,
                pass.low_threshold,
                pass.high_threshold,
                found.len()
            );
        }
        regions.extend(found);
    }

    regions.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    remove_overlaps(regions)
}

/// Run one sensitivity tier: edge extraction, contour tracing, validation,
/// scoring.
fn run_pass(
    blurred: &[u8],
    original_gray: &[u8],
    width: usize,
    height: usize,
    config: &DetectionConfig,
    pass: &SensitivityPass,
) -> Vec<DetectedRegion> {
    let field = gradient::sobel_gradients(blurred, width, height);
    let suppressed = nms::non_maximum_suppression(&field, width, height);
    let edges = hysteresis::hysteresis_threshold(
        &suppressed,
        width,
        height,
        pass.low_threshold,
        pass.high_threshold,
    );

    let closed = morphology::close(&edges, width, height);
    let thickened = morphology::dilate(&closed, width, height);
    let binary = binarize::adaptive_binarize(&thickened, width, height, original_gray);

    let mut contours = trace_contours(&binary, width, height);
    if debug_enabled() {
        eprintln!("pass {}: {} contour(s) traced", pass.label, contours.len());
    }

    let mut regions = Vec::new();
    for contour in &mut contours {
        analyze_shape(contour);
        if is_valid_candidate(contour, config) {
            let index = regions.len();
            regions.push(score_region(
                contour,
                config,
                pass.label,
                pass.confidence_scale,
                index,
            ));
        }
    }
    regions
}

/// Intersection area over the smaller region's area, in [0, 1]
pub fn overlap_ratio(a: &DetectedRegion, b: &DetectedRegion) -> f32 {
    let x_overlap = (a.x + a.width).min(b.x + b.width).saturating_sub(a.x.max(b.x));
    let y_overlap = (a.y + a.height).min(b.y + b.height).saturating_sub(a.y.max(b.y));
    let overlap_area = (x_overlap * y_overlap) as f32;
    let min_area = a.area().min(b.area()) as f32;
    if min_area == 0.0 {
        return 0.0;
    }
    overlap_area / min_area
}

/// Greedy duplicate suppression over a confidence-sorted list: keep a region
/// only if it does not overlap an already kept one beyond the threshold.
pub fn remove_overlaps(regions: Vec<DetectedRegion>) -> Vec<DetectedRegion> {
    let mut result: Vec<DetectedRegion> = Vec::new();

    for region in regions {
        let duplicate = result
            .iter()
            .any(|kept| overlap_ratio(&region, kept) > OVERLAP_THRESHOLD);
        if !duplicate {
            result.push(region);
        }
    }

    result
}
