//! Rectangle shape.

use super::{ShapeTrait, is_positive_extent};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Top-left corner position.
    pub position: Point,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            position,
            width,
            height,
        }
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }
}

impl ShapeTrait for Rectangle {
    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn center(&self) -> Point {
        Point::new(
            self.position.x + self.width / 2.0,
            self.position.y + self.height / 2.0,
        )
    }

    fn anchor(&self) -> Point {
        self.position
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        outline_hit(self.as_rect(), point, tolerance)
    }

    fn is_valid(&self) -> bool {
        self.position.is_finite() && is_positive_extent(self.width) && is_positive_extent(self.height)
    }
}

/// Hit on the border band of an unfilled box.
pub(super) fn outline_hit(rect: Rect, point: Point, tolerance: f64) -> bool {
    let outer = rect.inflate(tolerance, tolerance);
    let inner = rect.inflate(-tolerance, -tolerance);
    outer.contains(point) && !inner.contains(point)
}
