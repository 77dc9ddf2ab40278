//! Sobel gradient computation

/// Parallel gradient magnitude and direction buffers.
///
/// Magnitude is clamped to 0..=255; direction is `atan2(gy, gx)` in radians.
/// The 1-pixel border is left uncomputed (zero).
pub struct GradientField {
    /// Gradient magnitude per pixel, min(255, sqrt(gx^2 + gy^2))
    pub magnitude: Vec<u8>,
    /// Gradient direction per pixel in radians
    pub direction: Vec<f32>,
}

const SOBEL_X: [i32; 9] = [-1, 0, 1, -2, 0, 2, -1, 0, 1];
const SOBEL_Y: [i32; 9] = [-1, -2, -1, 0, 0, 0, 1, 2, 1];

/// Convolve both 3x3 Sobel kernels over a smoothed intensity buffer
pub fn sobel_gradients(gray: &[u8], width: usize, height: usize) -> GradientField {
    let mut magnitude = vec![0u8; gray.len()];
    let mut direction = vec![0f32; gray.len()];
    if width < 3 || height < 3 {
        return GradientField { magnitude, direction };
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut gx = 0i32;
            let mut gy = 0i32;

            for ky in 0..3 {
                for kx in 0..3 {
                    let v = gray[(y + ky - 1) * width + (x + kx - 1)] as i32;
                    gx += v * SOBEL_X[ky * 3 + kx];
                    gy += v * SOBEL_Y[ky * 3 + kx];
                }
            }

            let idx = y * width + x;
            let mag = ((gx * gx + gy * gy) as f32).sqrt();
            magnitude[idx] = mag.min(255.0) as u8;
            direction[idx] = (gy as f32).atan2(gx as f32);
        }
    }

    GradientField { magnitude, direction }
}
