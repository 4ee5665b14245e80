//! Planar geometry over landmarks

use crate::Landmark;

/// 2D point in normalized image coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<&Landmark> for Point2 {
    fn from(lm: &Landmark) -> Self {
        Point2::new(lm.x, lm.y)
    }
}

/// Midpoint of two landmarks (image plane)
pub fn midpoint(a: &Landmark, b: &Landmark) -> Point2 {
    Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Angle at `vertex` formed by `a` and `c`, in degrees folded into [0, 180]
pub fn angle_at(a: Point2, vertex: Point2, c: Point2) -> f32 {
    let radians = (c.y - vertex.y).atan2(c.x - vertex.x) - (a.y - vertex.y).atan2(a.x - vertex.x);
    let mut angle = radians.to_degrees().abs();
    if angle > 180.0 {
        angle = 360.0 - angle;
    }
    angle
}

/// Smallest absolute difference between two angles in degrees
#[inline]
pub fn angle_delta(measured: f32, expected: f32) -> f32 {
    let d = (measured - expected).abs() % 360.0;
    if d > 180.0 {
        360.0 - d
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint() {
        let a = Landmark::visible(0.2, 0.4);
        let b = Landmark::visible(0.6, 0.8);
        let m = midpoint(&a, &b);
        assert!((m.x - 0.4).abs() < 1e-6);
        assert!((m.y - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_right_angle() {
        let angle = angle_at(Point2::new(0.0, 1.0), Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
        assert!((angle - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_straight_angle() {
        let angle = angle_at(Point2::new(0.0, 0.0), Point2::new(0.5, 0.5), Point2::new(1.0, 1.0));
        assert!((angle - 180.0).abs() < 0.01);
    }

    #[test]
    fn test_angle_is_folded() {
        // Reflex configuration must still report the interior angle
        let angle = angle_at(Point2::new(1.0, 0.1), Point2::new(0.0, 0.0), Point2::new(1.0, -0.1));
        assert!(angle <= 180.0);
        assert!(angle < 20.0);
    }

    #[test]
    fn test_angle_delta_wraps() {
        assert!((angle_delta(350.0, 10.0) - 20.0).abs() < 1e-4);
        assert!((angle_delta(90.0, 75.0) - 15.0).abs() < 1e-4);
    }
}
