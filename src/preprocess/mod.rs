//! Image preprocessing stages run once per detection call
//!
//! Each stage is a pure function that takes an intensity buffer and returns a
//! freshly allocated buffer of the same dimensions:
//! - Grayscale conversion (RGBA/RGB to luminance)
//! - Contrast enhancement (global percentile stretch, tiled local equalization)
//! - Denoising (edge-preserving bilateral filter, Gaussian smoothing)

pub mod contrast;
pub mod denoise;
pub mod grayscale;
