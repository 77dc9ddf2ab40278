//! Contour shape analysis: convex hull, corners, rectangularity

use crate::models::{Contour, Point, PointI};

/// Douglas-Peucker epsilon as a fraction of the hull perimeter
const CORNER_EPSILON_FRACTION: f32 = 0.02;
/// Prefer edge points for the hull once there are enough of them
const MIN_EDGE_POINTS_FOR_HULL: usize = 10;

/// Enrich a traced contour with hull, perimeter, corner and rectangularity
/// metrics.
///
/// Edge points are used when available (cheaper and equally accurate for a
/// boundary); sparse contours fall back to the full interior point set.
pub fn analyze_shape(contour: &mut Contour) {
    let analyze_points = if contour.edge_points.len() > MIN_EDGE_POINTS_FOR_HULL {
        &contour.edge_points
    } else {
        &contour.points
    };

    let hull = convex_hull(analyze_points);
    let hull_area = polygon_area(&hull);
    let perimeter = polygon_perimeter(&hull);
    let corners = approximate_corners(&hull);

    let bounding_area = contour.bounds.area() as f32;
    let rectangularity = if bounding_area > 0.0 {
        hull_area / bounding_area
    } else {
        0.0
    };

    contour.hull = hull;
    contour.hull_area = hull_area;
    contour.perimeter = perimeter;
    contour.corners = corners;
    contour.rectangularity = rectangularity;
}

/// Graham-scan convex hull.
///
/// Pivot is the bottom-most point (largest y in image coordinates, ties
/// broken by smallest x); remaining points are sorted by polar angle around
/// it, ties by distance. Inputs with fewer than 3 points are returned
/// unchanged.
pub fn convex_hull(points: &[PointI]) -> Vec<PointI> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut pts = points.to_vec();
    let mut start = 0;
    for (i, p) in pts.iter().enumerate().skip(1) {
        if p.y > pts[start].y || (p.y == pts[start].y && p.x < pts[start].x) {
            start = i;
        }
    }
    pts.swap(0, start);
    let pivot = pts[0];

    pts[1..].sort_by(|a, b| {
        let angle_a = ((a.y - pivot.y) as f32).atan2((a.x - pivot.x) as f32);
        let angle_b = ((b.y - pivot.y) as f32).atan2((b.x - pivot.x) as f32);
        angle_a
            .partial_cmp(&angle_b)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| pivot.distance_squared(a).cmp(&pivot.distance_squared(b)))
    });

    let mut stack: Vec<PointI> = vec![pivot];
    for &point in &pts[1..] {
        while stack.len() > 1 {
            let top = stack[stack.len() - 1];
            let next_to_top = stack[stack.len() - 2];
            // pop unless the last three points make a strict left turn
            if PointI::cross(&next_to_top, &top, &point) <= 0 {
                stack.pop();
            } else {
                break;
            }
        }
        stack.push(point);
    }

    stack
}

/// Polygon area via the shoelace formula; under 3 vertices yields 0
pub fn polygon_area(points: &[PointI]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut doubled = 0i64;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        doubled += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    doubled.abs() as f32 / 2.0
}

/// Closed polygon perimeter; under 2 vertices yields 0
pub fn polygon_perimeter(points: &[PointI]) -> f32 {
    if points.len() < 2 {
        return 0.0;
    }

    let mut perimeter = 0.0f32;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        perimeter += p.distance(q);
    }
    perimeter
}

/// Simplify a hull down to its approximate corner points.
///
/// Douglas-Peucker with epsilon at 2% of the hull perimeter lands near four
/// corners for a true rectangle. Hulls under 4 points are already corners.
pub fn approximate_corners(hull: &[PointI]) -> Vec<PointI> {
    if hull.len() < 4 {
        return hull.to_vec();
    }

    let epsilon = polygon_perimeter(hull) * CORNER_EPSILON_FRACTION;
    douglas_peucker(hull, epsilon)
}

/// Recursive max-deviation polyline simplification
fn douglas_peucker(points: &[PointI], epsilon: f32) -> Vec<PointI> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let start = points[0];
    let end = points[points.len() - 1];
    let mut max_dist = 0.0f32;
    let mut max_idx = 0;

    for (i, p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let dist = point_to_segment_distance(p, &start, &end);
        if dist > max_dist {
            max_dist = dist;
            max_idx = i;
        }
    }

    if max_dist > epsilon {
        let left = douglas_peucker(&points[..=max_idx], epsilon);
        let right = douglas_peucker(&points[max_idx..], epsilon);
        let mut result = left[..left.len() - 1].to_vec();
        result.extend(right);
        result
    } else {
        vec![start, end]
    }
}

/// Distance from a point to a line segment via projection-and-clamp
fn point_to_segment_distance(point: &PointI, seg_start: &PointI, seg_end: &PointI) -> f32 {
    let p = Point::new(point.x as f32, point.y as f32);
    let a = Point::new(seg_start.x as f32, seg_start.y as f32);
    let b = Point::new(seg_end.x as f32, seg_end.y as f32);

    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_squared = dx * dx + dy * dy;

    if length_squared == 0.0 {
        return p.distance(&a);
    }

    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / length_squared).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * dx, a.y + t * dy);
    p.distance(&proj)
}
