//! Connected-component extraction over a binary mask

use crate::edges::hysteresis::NEIGHBORS_8;
use crate::models::{BoundingBox, Contour, PointI};

/// Components smaller than this many pixels are discarded as noise
pub(crate) const MIN_CONTOUR_POINTS: usize = 50;
/// Per-component trace cap; a component hitting the cap is kept as-is
pub(crate) const MAX_COMPONENT_POINTS: usize = 100_000;

/// Trace every connected foreground component with 8-connected flood fill.
///
/// Uses an explicit stack so component size cannot overflow the call stack.
/// A pixel counts as an edge point when at least one of its 8 neighbors is
/// background; out-of-bounds neighbors do not count.
pub fn trace_contours(mask: &[u8], width: usize, height: usize) -> Vec<Contour> {
    let mut visited = vec![false; mask.len()];
    let mut contours = Vec::new();
    if width < 3 || height < 3 {
        return contours;
    }

    for start_y in 1..height - 1 {
        for start_x in 1..width - 1 {
            let start_idx = start_y * width + start_x;
            if mask[start_idx] != 255 || visited[start_idx] {
                continue;
            }

            if let Some(contour) =
                flood_fill(mask, &mut visited, width, height, start_x, start_y)
            {
                contours.push(contour);
            }
        }
    }

    contours
}

fn flood_fill(
    mask: &[u8],
    visited: &mut [bool],
    width: usize,
    height: usize,
    start_x: usize,
    start_y: usize,
) -> Option<Contour> {
    let mut points = Vec::new();
    let mut edge_points = Vec::new();
    let mut stack = vec![(start_x as i32, start_y as i32)];

    let mut min_x = start_x as u32;
    let mut max_x = start_x as u32;
    let mut min_y = start_y as u32;
    let mut max_y = start_y as u32;

    while let Some((cx, cy)) = stack.pop() {
        if points.len() >= MAX_COMPONENT_POINTS {
            break;
        }
        let cidx = cy as usize * width + cx as usize;
        if visited[cidx] || mask[cidx] != 255 {
            continue;
        }

        visited[cidx] = true;
        points.push(PointI::new(cx, cy));

        min_x = min_x.min(cx as u32);
        max_x = max_x.max(cx as u32);
        min_y = min_y.min(cy as u32);
        max_y = max_y.max(cy as u32);

        let mut is_edge = false;
        for (dx, dy) in NEIGHBORS_8 {
            let nx = cx + dx;
            let ny = cy + dy;
            if nx < 0 || nx >= width as i32 || ny < 0 || ny >= height as i32 {
                continue;
            }
            let nidx = ny as usize * width + nx as usize;
            if mask[nidx] != 255 {
                is_edge = true;
            } else if !visited[nidx] {
                stack.push((nx, ny));
            }
        }
        if is_edge {
            edge_points.push(PointI::new(cx, cy));
        }
    }

    if points.len() < MIN_CONTOUR_POINTS {
        return None;
    }

    let bounds = BoundingBox::from_extent(min_x, min_y, max_x, max_y);
    Some(Contour::new(points, edge_points, bounds))
}
