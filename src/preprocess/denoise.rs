//! Scan-noise suppression that keeps card boundaries sharp
//!
//! The bilateral-style filter runs first so grain is removed without smearing
//! true edges; the pipeline then applies the small Gaussian kernel twice to
//! stabilize gradient estimation.

use rayon::prelude::*;

/// Bilateral neighborhood radius
const RADIUS: usize = 3;
/// Spatial Gaussian sigma
const SPATIAL_SIGMA: f32 = 3.0;
/// Intensity-difference Gaussian sigma
const RANGE_SIGMA: f32 = 30.0;

/// Edge-preserving smoothing combining spatial and intensity weights.
///
/// Pixels within `RADIUS` of the border are passed through unchanged. Rows
/// are processed in parallel; the output is deterministic.
pub fn bilateral_filter(gray: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut result = gray.to_vec();
    if width <= 2 * RADIUS || height <= 2 * RADIUS {
        return result;
    }

    // Spatial weights are fixed per offset, compute them once
    let mut spatial_weights = Vec::with_capacity((2 * RADIUS + 1) * (2 * RADIUS + 1));
    for dy in -(RADIUS as i32)..=RADIUS as i32 {
        for dx in -(RADIUS as i32)..=RADIUS as i32 {
            let dist_sq = (dx * dx + dy * dy) as f32;
            spatial_weights.push((-dist_sq / (2.0 * SPATIAL_SIGMA * SPATIAL_SIGMA)).exp());
        }
    }

    result[RADIUS * width..(height - RADIUS) * width]
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, out_row)| {
            let y = row + RADIUS;
            for x in RADIUS..width - RADIUS {
                let center = gray[y * width + x] as f32;
                let mut weight_sum = 0.0f32;
                let mut value_sum = 0.0f32;
                let mut kernel_idx = 0;

                for dy in -(RADIUS as i32)..=RADIUS as i32 {
                    let ny = (y as i32 + dy) as usize;
                    for dx in -(RADIUS as i32)..=RADIUS as i32 {
                        let nx = (x as i32 + dx) as usize;
                        let neighbor = gray[ny * width + nx] as f32;
                        let range_dist = neighbor - center;
                        let range_weight =
                            (-(range_dist * range_dist) / (2.0 * RANGE_SIGMA * RANGE_SIGMA)).exp();
                        let weight = spatial_weights[kernel_idx] * range_weight;

                        weight_sum += weight;
                        value_sum += neighbor * weight;
                        kernel_idx += 1;
                    }
                }

                out_row[x] = (value_sum / weight_sum).round() as u8;
            }
        });

    result
}

/// 3x3 Gaussian blur, kernel [1,2,1, 2,4,2, 1,2,1] / 16.
///
/// The 1-pixel border is left at zero; the pipeline runs this twice.
pub fn gaussian_blur(gray: &[u8], width: usize, height: usize) -> Vec<u8> {
    const KERNEL: [u32; 9] = [1, 2, 1, 2, 4, 2, 1, 2, 1];
    let mut result = vec![0u8; gray.len()];
    if width < 3 || height < 3 {
        return result;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut sum = 0u32;
            for ky in 0..3 {
                for kx in 0..3 {
                    let idx = (y + ky - 1) * width + (x + kx - 1);
                    sum += gray[idx] as u32 * KERNEL[ky * 3 + kx];
                }
            }
            result[y * width + x] = ((sum as f32) / 16.0).round() as u8;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bilateral_preserves_border() {
        let width = 20;
        let height = 20;
        let gray: Vec<u8> = (0..width * height).map(|i| (i % 251) as u8).collect();
        let out = bilateral_filter(&gray, width, height);
        assert_eq!(out.len(), gray.len());
        for y in 0..height {
            for x in 0..width {
                if y < RADIUS || y >= height - RADIUS || x < RADIUS || x >= width - RADIUS {
                    assert_eq!(out[y * width + x], gray[y * width + x]);
                }
            }
        }
    }

    #[test]
    fn test_bilateral_keeps_step_edge() {
        // A strong step edge should survive: range weights suppress
        // cross-edge averaging
        let width = 20;
        let height = 10;
        let mut gray = vec![0u8; width * height];
        for y in 0..height {
            for x in 10..width {
                gray[y * width + x] = 200;
            }
        }
        let out = bilateral_filter(&gray, width, height);
        let mid = 5 * width;
        assert!(out[mid + 5] < 30, "dark side stays dark, got {}", out[mid + 5]);
        assert!(out[mid + 14] > 170, "bright side stays bright, got {}", out[mid + 14]);
    }

    #[test]
    fn test_bilateral_small_image_passthrough() {
        let gray = vec![10u8; 5 * 5];
        assert_eq!(bilateral_filter(&gray, 5, 5), gray);
    }

    #[test]
    fn test_gaussian_uniform_interior() {
        let gray = vec![100u8; 10 * 10];
        let out = gaussian_blur(&gray, 10, 10);
        // interior stays at the uniform value, border is zeroed
        assert_eq!(out[5 * 10 + 5], 100);
        assert_eq!(out[0], 0);
        assert_eq!(out.len(), gray.len());
    }

    #[test]
    fn test_gaussian_smooths_spike() {
        let mut gray = vec![0u8; 9];
        gray[4] = 160; // center of 3x3
        let out = gaussian_blur(&gray, 3, 3);
        assert_eq!(out[4], 40); // 160 * 4/16
    }
}
