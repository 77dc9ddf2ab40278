//! Region extraction from the source image
//!
//! Cuts a detected region out of the original RGBA buffer, optionally
//! resampling to target dimensions and honoring a manual rotation. Sampling
//! is bilinear; pixels mapped outside the source come back transparent.

use crate::error::{check_buffer, DetectError};
use crate::models::DetectedRegion;

/// A cropped RGBA image
#[derive(Debug, Clone)]
pub struct CroppedImage {
    /// Tightly packed RGBA pixels, row-major
    pub pixels: Vec<u8>,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
}

/// Extract `region` from an RGBA image.
///
/// When `target` is given the crop is resampled to those dimensions;
/// otherwise the output matches the region size. A non-zero
/// `region.rotation` (degrees, counter-clockwise) rotates the sampling
/// window about the region center, so manually adjusted regions come out
/// straightened.
pub fn crop_region(
    rgba: &[u8],
    width: u32,
    height: u32,
    region: &DetectedRegion,
    target: Option<(u32, u32)>,
) -> Result<CroppedImage, DetectError> {
    check_buffer(rgba.len(), width as usize, height as usize, 4)?;

    let (out_width, out_height) = target.unwrap_or((region.width, region.height));
    if region.width == 0 || region.height == 0 || out_width == 0 || out_height == 0 {
        return Err(DetectError::EmptyCrop {
            width: out_width as usize,
            height: out_height as usize,
        });
    }

    let scale_x = region.width as f32 / out_width as f32;
    let scale_y = region.height as f32 / out_height as f32;
    let center_x = region.x as f32 + region.width as f32 / 2.0;
    let center_y = region.y as f32 + region.height as f32 / 2.0;
    let angle = -region.rotation.to_radians();
    let (sin, cos) = angle.sin_cos();

    let mut pixels = vec![0u8; out_width as usize * out_height as usize * 4];
    for out_y in 0..out_height {
        for out_x in 0..out_width {
            // map the output pixel into the unrotated region, then rotate
            // the offset about the region center
            let rx = (out_x as f32 + 0.5) * scale_x + region.x as f32 - center_x;
            let ry = (out_y as f32 + 0.5) * scale_y + region.y as f32 - center_y;
            let src_x = center_x + rx * cos - ry * sin - 0.5;
            let src_y = center_y + rx * sin + ry * cos - 0.5;

            let out_idx = (out_y as usize * out_width as usize + out_x as usize) * 4;
            if let Some(rgba_px) = sample_bilinear(rgba, width, height, src_x, src_y) {
                pixels[out_idx..out_idx + 4].copy_from_slice(&rgba_px);
            }
        }
    }

    Ok(CroppedImage {
        pixels,
        width: out_width,
        height: out_height,
    })
}

/// Bilinear RGBA sample at a fractional coordinate; None when the 2x2
/// neighborhood falls fully outside the image
fn sample_bilinear(rgba: &[u8], width: u32, height: u32, x: f32, y: f32) -> Option<[u8; 4]> {
    if x <= -1.0 || y <= -1.0 || x >= width as f32 || y >= height as f32 {
        return None;
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let fetch = |px: i64, py: i64| -> [f32; 4] {
        let cx = px.clamp(0, width as i64 - 1) as usize;
        let cy = py.clamp(0, height as i64 - 1) as usize;
        let idx = (cy * width as usize + cx) * 4;
        [
            rgba[idx] as f32,
            rgba[idx + 1] as f32,
            rgba[idx + 2] as f32,
            rgba[idx + 3] as f32,
        ]
    };

    let p00 = fetch(x0, y0);
    let p10 = fetch(x0 + 1, y0);
    let p01 = fetch(x0, y0 + 1);
    let p11 = fetch(x0 + 1, y0 + 1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] * (1.0 - fx) + p10[c] * fx;
        let bottom = p01[c] * (1.0 - fx) + p11[c] * fx;
        out[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Orientation;

    fn region(x: u32, y: u32, width: u32, height: u32) -> DetectedRegion {
        DetectedRegion {
            id: "card-test-0".into(),
            x,
            y,
            width,
            height,
            rotation: 0.0,
            confidence: 1.0,
            orientation: Orientation::from_dimensions(width, height),
            is_manually_adjusted: false,
            is_selected: true,
        }
    }

    fn gradient_image(width: u32, height: u32) -> Vec<u8> {
        let mut rgba = vec![0u8; (width * height * 4) as usize];
        for y in 0..height {
            for x in 0..width {
                let idx = ((y * width + x) * 4) as usize;
                rgba[idx] = x as u8;
                rgba[idx + 1] = y as u8;
                rgba[idx + 2] = 0;
                rgba[idx + 3] = 255;
            }
        }
        rgba
    }

    #[test]
    fn test_identity_crop_copies_pixels() {
        let rgba = gradient_image(40, 30);
        let out = crop_region(&rgba, 40, 30, &region(10, 5, 16, 12), None).unwrap();
        assert_eq!(out.width, 16);
        assert_eq!(out.height, 12);
        // scale 1, no rotation: pixel (0,0) samples source (10,5) exactly
        assert_eq!(out.pixels[0], 10);
        assert_eq!(out.pixels[1], 5);
        assert_eq!(out.pixels[3], 255);
    }

    #[test]
    fn test_resize_to_target_dimensions() {
        let rgba = gradient_image(40, 30);
        let out = crop_region(&rgba, 40, 30, &region(0, 0, 20, 10), Some((40, 20))).unwrap();
        assert_eq!(out.width, 40);
        assert_eq!(out.height, 20);
        assert_eq!(out.pixels.len(), 40 * 20 * 4);
    }

    #[test]
    fn test_rotation_180_reverses_gradient() {
        let rgba = gradient_image(41, 31);
        let mut r = region(10, 10, 21, 11);
        r.rotation = 180.0;
        let out = crop_region(&rgba, 41, 31, &r, None).unwrap();
        // first output pixel samples the opposite corner of the region
        assert_eq!(out.pixels[0], 30);
        assert_eq!(out.pixels[1], 20);
    }

    #[test]
    fn test_out_of_bounds_is_transparent() {
        let rgba = gradient_image(20, 20);
        // region hanging off the right edge
        let out = crop_region(&rgba, 20, 20, &region(15, 0, 10, 10), None).unwrap();
        let last = (5 * 10 + 9) * 4;
        assert_eq!(out.pixels[last + 3], 0, "outside pixels stay transparent");
        assert_eq!(out.pixels[3], 255, "inside pixels keep their alpha");
    }

    #[test]
    fn test_rejects_empty_and_mismatched_inputs() {
        let rgba = gradient_image(20, 20);
        assert!(matches!(
            crop_region(&rgba, 20, 20, &region(0, 0, 0, 10), None),
            Err(DetectError::EmptyCrop { .. })
        ));
        assert!(matches!(
            crop_region(&rgba, 20, 20, &region(0, 0, 10, 10), Some((0, 5))),
            Err(DetectError::EmptyCrop { .. })
        ));
        assert!(crop_region(&rgba[..100], 20, 20, &region(0, 0, 10, 10), None).is_err());
    }
}
