//! Adaptive binarization with an integral-image local mean
//!
//! The threshold offset is not fixed: it is derived from the ORIGINAL
//! grayscale image's global standard deviation, so low-contrast scans get a
//! gentler offset and do not vanish entirely.

/// Local mean window edge length
const BLOCK_SIZE: usize = 31;
/// Offset bounds: C = clamp(0.15 * sigma, 2, 15)
const OFFSET_SCALE: f32 = 0.15;
const OFFSET_MIN: f32 = 2.0;
const OFFSET_MAX: f32 = 15.0;

/// Threshold offset derived from global image statistics
pub fn threshold_offset(original_gray: &[u8]) -> f32 {
    if original_gray.is_empty() {
        return OFFSET_MIN;
    }

    let n = original_gray.len() as f64;
    let mean = original_gray.iter().map(|&v| v as f64).sum::<f64>() / n;
    let variance = original_gray
        .iter()
        .map(|&v| {
            let diff = v as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    let std_dev = variance.sqrt() as f32;

    (OFFSET_SCALE * std_dev).clamp(OFFSET_MIN, OFFSET_MAX)
}

/// Binarize against a 31x31 local mean: foreground where value > mean - C.
///
/// `original_gray` supplies the statistics for C; `data` is the buffer being
/// thresholded (the thickened edge map in the detection pipeline). Output
/// elements are exactly 0 or 255.
pub fn adaptive_binarize(
    data: &[u8],
    width: usize,
    height: usize,
    original_gray: &[u8],
) -> Vec<u8> {
    let c = threshold_offset(original_gray);
    let mut result = vec![0u8; data.len()];

    // Summed-area table with a zero row/column of padding
    let mut integral = vec![0f64; (width + 1) * (height + 1)];
    for y in 0..height {
        let mut row_sum = 0f64;
        for x in 0..width {
            row_sum += data[y * width + x] as f64;
            integral[(y + 1) * (width + 1) + (x + 1)] = row_sum + integral[y * (width + 1) + (x + 1)];
        }
    }

    let half_block = BLOCK_SIZE / 2;
    for y in 0..height {
        let y1 = y.saturating_sub(half_block);
        let y2 = (y + half_block).min(height - 1);
        for x in 0..width {
            let x1 = x.saturating_sub(half_block);
            let x2 = (x + half_block).min(width - 1);

            let count = ((x2 - x1 + 1) * (y2 - y1 + 1)) as f64;
            let sum = integral[(y2 + 1) * (width + 1) + (x2 + 1)]
                - integral[(y2 + 1) * (width + 1) + x1]
                - integral[y1 * (width + 1) + (x2 + 1)]
                + integral[y1 * (width + 1) + x1];

            let local_mean = (sum / count) as f32;
            if data[y * width + x] as f32 > local_mean - c {
                result[y * width + x] = 255;
            }
        }
    }

    result
}
