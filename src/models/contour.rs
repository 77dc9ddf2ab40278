use super::{Orientation, PointI};

/// Axis-aligned bounding box in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Box width
    pub width: u32,
    /// Box height
    pub height: u32,
}

impl BoundingBox {
    /// Create a bounding box from min/max pixel coordinates
    pub fn from_extent(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Box area in pixels
    pub fn area(&self) -> u32 {
        self.width * self.height
    }
}

/// One traced connected foreground component plus its derived shape metrics.
///
/// Created by the contour tracer with the point sets and bounding box filled
/// in; the shape analyzer enriches it in place with hull, corner and
/// rectangularity data before validation consumes it.
#[derive(Debug, Clone)]
pub struct Contour {
    /// Every pixel of the connected component
    pub points: Vec<PointI>,
    /// Subset of `points` with at least one non-foreground 8-neighbor
    pub edge_points: Vec<PointI>,
    /// Axis-aligned bounding box of the component
    pub bounds: BoundingBox,
    /// Bounding-box area, used as the first-pass size filter
    pub area: u32,
    /// Convex hull vertices (empty until shape analysis runs)
    pub hull: Vec<PointI>,
    /// Convex hull area (shoelace)
    pub hull_area: f32,
    /// Convex hull perimeter
    pub perimeter: f32,
    /// Approximate corner points after Douglas-Peucker simplification
    pub corners: Vec<PointI>,
    /// Hull area divided by bounding-box area, in [0, 1]
    pub rectangularity: f32,
    /// Orientation resolved by the validator, if the contour matched
    pub orientation: Option<Orientation>,
}

impl Contour {
    /// Create a freshly traced contour with no shape metrics yet
    pub fn new(points: Vec<PointI>, edge_points: Vec<PointI>, bounds: BoundingBox) -> Self {
        let area = bounds.area();
        Self {
            points,
            edge_points,
            bounds,
            area,
            hull: Vec::new(),
            hull_area: 0.0,
            perimeter: 0.0,
            corners: Vec::new(),
            rectangularity: 0.0,
            orientation: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_extent() {
        let b = BoundingBox::from_extent(10, 20, 40, 50);
        assert_eq!(b.x, 10);
        assert_eq!(b.y, 20);
        assert_eq!(b.width, 30);
        assert_eq!(b.height, 30);
        assert_eq!(b.area(), 900);
    }

    #[test]
    fn test_contour_area_from_bounds() {
        let c = Contour::new(Vec::new(), Vec::new(), BoundingBox::from_extent(0, 0, 10, 5));
        assert_eq!(c.area, 50);
        assert!(c.orientation.is_none());
    }
}
