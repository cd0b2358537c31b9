//! Square shape.

use super::rectangle::outline_hit;
use super::{ShapeTrait, is_positive_extent};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A square anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Square {
    /// Top-left corner position.
    pub position: Point,
    /// Length of every side.
    pub side_length: f64,
}

impl Square {
    /// Create a new square.
    pub fn new(position: Point, side_length: f64) -> Self {
        Self {
            position,
            side_length,
        }
    }

    /// Create a square of the given side centered on `center`.
    pub fn centered(center: Point, side_length: f64) -> Self {
        let half = side_length / 2.0;
        Self::new(Point::new(center.x - half, center.y - half), side_length)
    }
}

impl ShapeTrait for Square {
    fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.side_length,
            self.position.y + self.side_length,
        )
    }

    fn center(&self) -> Point {
        let half = self.side_length / 2.0;
        Point::new(self.position.x + half, self.position.y + half)
    }

    fn anchor(&self) -> Point {
        self.position
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        outline_hit(self.bounds(), point, tolerance)
    }

    fn is_valid(&self) -> bool {
        self.position.is_finite() && is_positive_extent(self.side_length)
    }
}
