//! Contrast enhancement for flat, low-contrast scans
//!
//! Two stages run back to back in the pipeline:
//! - global percentile stretch, which rescues "gray scan" images where cards
//!   blend into the background
//! - tiled local equalization (CLAHE-style), which evens out varying lighting
//!   across the sheet so card edges stay visible everywhere

/// Tile edge length for local equalization
const TILE_SIZE: usize = 64;
/// Histogram clip limit, as a multiple of the mean bin height
const CLIP_LIMIT: f32 = 3.0;

/// Stretch intensities so the 1st..99th percentile range maps onto 0..255.
///
/// The outermost percentiles are ignored so a handful of specular or dead
/// pixels cannot pin the range. A degenerate range (< 1) is treated as 1.
pub fn stretch_contrast(gray: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut histogram = [0u32; 256];
    for &v in gray {
        histogram[v as usize] += 1;
    }

    let total_pixels = width * height;
    let lower_bound = (total_pixels as f64 * 0.01).floor() as u32;
    let upper_bound = (total_pixels as f64 * 0.99).floor() as u32;

    let mut count = 0u32;
    let mut min_val = 0u32;
    for (i, &bin) in histogram.iter().enumerate() {
        count += bin;
        if count >= lower_bound {
            min_val = i as u32;
            break;
        }
    }

    let mut count = 0u32;
    let mut max_val = 255u32;
    for (i, &bin) in histogram.iter().enumerate().rev() {
        count += bin;
        if count >= total_pixels as u32 - upper_bound {
            max_val = i as u32;
            break;
        }
    }

    let range = (max_val.saturating_sub(min_val)).max(1) as f32;
    let min_val = min_val as f32;

    gray.iter()
        .map(|&v| {
            let normalized = (v as f32 - min_val) / range;
            (normalized * 255.0).round().clamp(0.0, 255.0) as u8
        })
        .collect()
}

/// Equalize contrast within fixed-size tiles (CLAHE-style).
///
/// Per tile: build a histogram, clip bins above `CLIP_LIMIT` times the mean
/// bin height, redistribute the clipped excess uniformly, then remap each
/// pixel through the tile's normalized CDF. Tiles are clipped at the image
/// border rather than padded.
pub fn equalize_local_contrast(gray: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut result = vec![0u8; gray.len()];

    let mut ty = 0;
    while ty < height {
        let tile_h = TILE_SIZE.min(height - ty);
        let mut tx = 0;
        while tx < width {
            let tile_w = TILE_SIZE.min(width - tx);
            equalize_tile(gray, &mut result, width, tx, ty, tile_w, tile_h);
            tx += TILE_SIZE;
        }
        ty += TILE_SIZE;
    }

    result
}

fn equalize_tile(
    gray: &[u8],
    result: &mut [u8],
    width: usize,
    tx: usize,
    ty: usize,
    tile_w: usize,
    tile_h: usize,
) {
    let mut histogram = [0u32; 256];
    let tile_pixels = (tile_w * tile_h) as u32;

    for y in ty..ty + tile_h {
        for x in tx..tx + tile_w {
            histogram[gray[y * width + x] as usize] += 1;
        }
    }

    // Clip tall bins and spread the excess uniformly
    let avg_bin = tile_pixels as f32 / 256.0;
    let clip_threshold = (CLIP_LIMIT * avg_bin).floor() as u32;
    let mut excess = 0u32;
    for bin in histogram.iter_mut() {
        if *bin > clip_threshold {
            excess += *bin - clip_threshold;
            *bin = clip_threshold;
        }
    }
    let redistribution = excess / 256;
    for bin in histogram.iter_mut() {
        *bin += redistribution;
    }

    let mut cdf = [0u32; 256];
    cdf[0] = histogram[0];
    for i in 1..256 {
        cdf[i] = cdf[i - 1] + histogram[i];
    }

    let cdf_min = cdf.iter().copied().find(|&v| v > 0).unwrap_or(0);
    let cdf_range = (cdf[255].saturating_sub(cdf_min)).max(1) as f32;

    for y in ty..ty + tile_h {
        for x in tx..tx + tile_w {
            let idx = y * width + x;
            let v = gray[idx] as usize;
            let mapped = (cdf[v].saturating_sub(cdf_min)) as f32 / cdf_range * 255.0;
            result[idx] = mapped.round() as u8;
        }
    }
}
