//! Two-threshold hysteresis edge classification

const STRONG: u8 = 255;
const WEAK: u8 = 128;

/// 8-neighbor offsets shared by hysteresis and contour tracing
pub(crate) const NEIGHBORS_8: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
];

/// Classify suppressed magnitudes as strong/weak/none, then promote weak
/// pixels 8-connected to strong ones until a fixed point is reached.
///
/// The iteration (rather than a single pass) is what joins long, curving,
/// variable-contrast boundaries. Surviving weak pixels are demoted to
/// background, so the result is a proper {0, 255} mask.
pub fn hysteresis_threshold(
    suppressed: &[u8],
    width: usize,
    height: usize,
    low: u8,
    high: u8,
) -> Vec<u8> {
    let mut result = vec![0u8; suppressed.len()];

    for (out, &v) in result.iter_mut().zip(suppressed) {
        if v >= high {
            *out = STRONG;
        } else if v >= low {
            *out = WEAK;
        }
    }

    if width >= 3 && height >= 3 {
        let mut changed = true;
        while changed {
            changed = false;
            for y in 1..height - 1 {
                for x in 1..width - 1 {
                    let idx = y * width + x;
                    if result[idx] != WEAK {
                        continue;
                    }
                    for (dx, dy) in NEIGHBORS_8 {
                        let nidx = ((y as i32 + dy) as usize) * width + (x as i32 + dx) as usize;
                        if result[nidx] == STRONG {
                            result[idx] = STRONG;
                            changed = true;
                            break;
                        }
                    }
                }
            }
        }
    }

    for v in result.iter_mut() {
        if *v == WEAK {
            *v = 0;
        }
    }

    result
}
