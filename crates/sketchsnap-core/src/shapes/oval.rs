//! Oval shape.

use super::{ShapeTrait, is_positive_extent};
use kurbo::{Ellipse as KurboEllipse, Point, Rect};
use serde::{Deserialize, Serialize};

/// An axis-aligned ellipse anchored at its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Oval {
    /// Center point.
    pub center: Point,
    /// Full horizontal extent.
    pub width: f64,
    /// Full vertical extent.
    pub height: f64,
}

impl Oval {
    /// Create a new oval.
    pub fn new(center: Point, width: f64, height: f64) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    /// Get as a kurbo Ellipse.
    pub fn as_kurbo(&self) -> KurboEllipse {
        KurboEllipse::new(self.center, (self.width / 2.0, self.height / 2.0), 0.0)
    }
}

impl ShapeTrait for Oval {
    fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, (self.width, self.height))
    }

    fn center(&self) -> Point {
        self.center
    }

    fn anchor(&self) -> Point {
        self.center
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let radii = self.as_kurbo().radii();
        let d = point - self.center;
        let norm = |rx: f64, ry: f64| (d.x / rx).powi(2) + (d.y / ry).powi(2);

        if norm(radii.x + tolerance, radii.y + tolerance) > 1.0 {
            return false;
        }
        // Outline only: reject if inside inner ellipse
        let inner_rx = radii.x - tolerance;
        let inner_ry = radii.y - tolerance;
        if inner_rx < f64::EPSILON || inner_ry < f64::EPSILON {
            return true;
        }
        norm(inner_rx, inner_ry) > 1.0
    }

    fn is_valid(&self) -> bool {
        self.center.is_finite() && is_positive_extent(self.width) && is_positive_extent(self.height)
    }
}
