/// 2D point with floating point coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point
    pub fn distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Integer point for pixel-grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointI {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl PointI {
    /// Create a new integer point
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point (no sqrt, used for tie-breaking)
    pub fn distance_squared(&self, other: &PointI) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// Distance to another point
    pub fn distance(&self, other: &PointI) -> f32 {
        (self.distance_squared(other) as f32).sqrt()
    }

    /// Z component of the cross product (self - origin) x (other - origin).
    ///
    /// Positive means `other` lies to the left of the ray origin->self
    /// (counter-clockwise turn in mathematical coordinates).
    pub fn cross(origin: &PointI, a: &PointI, b: &PointI) -> i64 {
        let ax = (a.x - origin.x) as i64;
        let ay = (a.y - origin.y) as i64;
        let bx = (b.x - origin.x) as i64;
        let by = (b.y - origin.y) as i64;
        ax * by - ay * bx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let p1 = PointI::new(0, 0);
        let p2 = PointI::new(3, 4);
        assert!((p1.distance(&p2) - 5.0).abs() < 0.001);
        assert_eq!(p1.distance_squared(&p2), 25);
    }

    #[test]
    fn test_cross_sign() {
        let o = PointI::new(0, 0);
        let a = PointI::new(1, 0);
        let b = PointI::new(0, 1);
        assert!(PointI::cross(&o, &a, &b) > 0);
        assert!(PointI::cross(&o, &b, &a) < 0);
        assert_eq!(PointI::cross(&o, &a, &PointI::new(2, 0)), 0);
    }
}
