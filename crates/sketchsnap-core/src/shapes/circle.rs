//! Circle shape.

use super::{ShapeTrait, is_positive_extent};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A circle anchored at its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center point.
    pub center: Point,
    /// Radius.
    pub radius: f64,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl ShapeTrait for Circle {
    fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    fn center(&self) -> Point {
        self.center
    }

    fn anchor(&self) -> Point {
        self.center
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point.distance(self.center) - self.radius).abs() <= tolerance
    }

    fn is_valid(&self) -> bool {
        self.center.is_finite() && is_positive_extent(self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let circle = Circle::new(Point::new(10.0, 20.0), 5.0);
        assert_eq!(circle.bounds(), Rect::new(5.0, 15.0, 15.0, 25.0));
    }

    #[test]
    fn test_hit_test_ring() {
        let circle = Circle::new(Point::new(0.0, 0.0), 50.0);
        assert!(circle.hit_test(Point::new(50.0, 0.0), 5.0));
        assert!(circle.hit_test(Point::new(0.0, -54.0), 5.0));
        assert!(!circle.hit_test(Point::new(10.0, 10.0), 5.0));
        assert!(!circle.hit_test(Point::new(60.0, 0.0), 5.0));
    }

    #[test]
    fn test_validity() {
        assert!(Circle::new(Point::ZERO, 1.0).is_valid());
        assert!(!Circle::new(Point::ZERO, 0.0).is_valid());
        assert!(!Circle::new(Point::ZERO, -3.0).is_valid());
    }
}
