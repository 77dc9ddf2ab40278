//! 3x3 morphological operators over {0, 255} masks

/// Dilation: 3x3 max filter. Bridges small gaps by growing foreground.
pub fn dilate(mask: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut result = vec![0u8; mask.len()];
    if width < 3 || height < 3 {
        return result;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut max_val = 0u8;
            for dy in 0..3 {
                for dx in 0..3 {
                    max_val = max_val.max(mask[(y + dy - 1) * width + (x + dx - 1)]);
                }
            }
            result[y * width + x] = max_val;
        }
    }

    result
}

/// Erosion: 3x3 min filter
pub fn erode(mask: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut result = vec![0u8; mask.len()];
    if width < 3 || height < 3 {
        return result;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut min_val = 255u8;
            for dy in 0..3 {
                for dx in 0..3 {
                    min_val = min_val.min(mask[(y + dy - 1) * width + (x + dx - 1)]);
                }
            }
            result[y * width + x] = min_val;
        }
    }

    result
}

/// Closing: dilate then erode. Connects broken edge segments without growing
/// the boundary long-term.
pub fn close(mask: &[u8], width: usize, height: usize) -> Vec<u8> {
    let dilated = dilate(mask, width, height);
    erode(&dilated, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_dot(width: usize, height: usize, x: usize, y: usize) -> Vec<u8> {
        let mut mask = vec![0u8; width * height];
        mask[y * width + x] = 255;
        mask
    }

    #[test]
    fn test_dilate_grows_dot() {
        let mask = single_dot(7, 7, 3, 3);
        let out = dilate(&mask, 7, 7);
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                let idx = ((3 + dy) * 7 + (3 + dx)) as usize;
                assert_eq!(out[idx], 255);
            }
        }
        assert_eq!(out[7 + 1], 0);
    }

    #[test]
    fn test_erode_removes_dot() {
        let mask = single_dot(7, 7, 3, 3);
        let out = erode(&mask, 7, 7);
        assert!(out.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_close_bridges_one_pixel_gap() {
        // two segments of a horizontal line with a single-pixel gap
        let width = 11;
        let height = 5;
        let mut mask = vec![0u8; width * height];
        for x in 1..5 {
            mask[2 * width + x] = 255;
        }
        for x in 6..10 {
            mask[2 * width + x] = 255;
        }
        let out = close(&mask, width, height);
        assert_eq!(out[2 * width + 5], 255, "gap should be bridged");
    }

    #[test]
    fn test_masks_stay_binary() {
        let mask = single_dot(9, 9, 4, 4);
        for out in [dilate(&mask, 9, 9), erode(&mask, 9, 9), close(&mask, 9, 9)] {
            assert!(out.iter().all(|&v| v == 0 || v == 255));
        }
    }
}
