//! RGBA to luminance conversion
//!
//! Y = round(0.299*R + 0.587*G + 0.114*B), computed with integer arithmetic
//! so the result is bit-exact across platforms. Alpha is ignored.

use rayon::prelude::*;

/// Per-mille luminance coefficients: Y = (299*R + 587*G + 114*B + 500) / 1000
const COEF_R: u32 = 299;
const COEF_G: u32 = 587;
const COEF_B: u32 = 114;

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32 + 500) / 1000) as u8
}

/// Convert an RGBA buffer (4 bytes per pixel) to a luminance buffer
pub fn rgba_to_luma(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    let pixel_count = width * height;
    let mut gray = vec![0u8; pixel_count];

    for (i, px) in rgba.chunks_exact(4).take(pixel_count).enumerate() {
        gray[i] = luma(px[0], px[1], px[2]);
    }

    gray
}

/// Convert an RGB buffer (3 bytes per pixel) to a luminance buffer
pub fn rgb_to_luma(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let pixel_count = width * height;
    let mut gray = vec![0u8; pixel_count];

    for (i, px) in rgb.chunks_exact(3).take(pixel_count).enumerate() {
        gray[i] = luma(px[0], px[1], px[2]);
    }

    gray
}

/// Convert RGBA to luminance processing rows in parallel
pub fn rgba_to_luma_parallel(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];

    gray.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let row_start = y * width * 4;
        for (x, out) in row.iter_mut().enumerate() {
            let idx = row_start + x * 4;
            *out = luma(rgba[idx], rgba[idx + 1], rgba[idx + 2]);
        }
    });

    gray
}
