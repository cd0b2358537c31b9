//! Shape definitions for the drawing surface.

mod circle;
mod freehand;
mod oval;
mod rectangle;
mod square;

pub use circle::Circle;
pub use freehand::Freehand;
pub use oval::Oval;
pub use rectangle::Rectangle;
pub use square::Square;

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = kurbo::Vec2::new(b.x - a.x, b.y - a.y);
    let pv = kurbo::Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    point.distance(proj)
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Bounding box of a point set, `None` when empty.
pub fn bounding_box(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    Some(
        rest.iter()
            .fold(Rect::from_points(*first, *first), |bbox, p| bbox.union_pt(*p)),
    )
}

/// Finite and strictly positive.
pub(crate) fn is_positive_extent(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Geometry shared by every shape variant.
pub trait ShapeTrait {
    /// Get the axis-aligned bounding box.
    fn bounds(&self) -> Rect;

    /// Get the logical center used for hit testing, labels and the action buttons.
    fn center(&self) -> Point;

    /// Get the point a drag moves: top-left for box-anchored shapes, center for
    /// center-anchored ones, first point for strokes.
    fn anchor(&self) -> Point;

    /// Check whether `point` lies on the drawn outline, within `tolerance`.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Whether the geometry is finite and non-degenerate.
    fn is_valid(&self) -> bool;
}

/// The kind of a shape, without its geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Freehand,
    Rectangle,
    Oval,
    Circle,
    Square,
}

impl ShapeKind {
    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Freehand => "freehand",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Oval => "oval",
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A shape on the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Freehand(Freehand),
    Rectangle(Rectangle),
    Oval(Oval),
    Circle(Circle),
    Square(Square),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Freehand(_) => ShapeKind::Freehand,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Oval(_) => ShapeKind::Oval,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Square(_) => ShapeKind::Square,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Freehand(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
            Shape::Oval(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
            Shape::Square(s) => s.bounds(),
        }
    }

    pub fn center(&self) -> Point {
        match self {
            Shape::Freehand(s) => s.center(),
            Shape::Rectangle(s) => s.center(),
            Shape::Oval(s) => s.center(),
            Shape::Circle(s) => s.center(),
            Shape::Square(s) => s.center(),
        }
    }

    pub fn anchor(&self) -> Point {
        match self {
            Shape::Freehand(s) => s.anchor(),
            Shape::Rectangle(s) => s.anchor(),
            Shape::Oval(s) => s.anchor(),
            Shape::Circle(s) => s.anchor(),
            Shape::Square(s) => s.anchor(),
        }
    }

    /// Check whether `point` lies on the drawn outline (or stroke path).
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Shape::Freehand(s) => s.hit_test(point, tolerance),
            Shape::Rectangle(s) => s.hit_test(point, tolerance),
            Shape::Oval(s) => s.hit_test(point, tolerance),
            Shape::Circle(s) => s.hit_test(point, tolerance),
            Shape::Square(s) => s.hit_test(point, tolerance),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Shape::Freehand(s) => s.is_valid(),
            Shape::Rectangle(s) => s.is_valid(),
            Shape::Oval(s) => s.is_valid(),
            Shape::Circle(s) => s.is_valid(),
            Shape::Square(s) => s.is_valid(),
        }
    }

    /// Check if this shape is a raw stroke.
    pub fn is_freehand(&self) -> bool {
        matches!(self, Shape::Freehand(_))
    }

    /// Get the stroke if this shape is freehand.
    pub fn as_freehand(&self) -> Option<&Freehand> {
        match self {
            Shape::Freehand(f) => Some(f),
            _ => None,
        }
    }

    /// Get the mutable stroke if this shape is freehand.
    pub fn as_freehand_mut(&mut self) -> Option<&mut Freehand> {
        match self {
            Shape::Freehand(f) => Some(f),
            _ => None,
        }
    }
}

impl From<Freehand> for Shape {
    fn from(shape: Freehand) -> Self {
        Shape::Freehand(shape)
    }
}

impl From<Rectangle> for Shape {
    fn from(shape: Rectangle) -> Self {
        Shape::Rectangle(shape)
    }
}

impl From<Oval> for Shape {
    fn from(shape: Oval) -> Self {
        Shape::Oval(shape)
    }
}

impl From<Circle> for Shape {
    fn from(shape: Circle) -> Self {
        Shape::Circle(shape)
    }
}

impl From<Square> for Shape {
    fn from(shape: Square) -> Self {
        Shape::Square(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((point_to_segment_dist(Point::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-10);
        assert!((point_to_segment_dist(Point::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-10);
        // Zero-length segment
        assert!((point_to_segment_dist(Point::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_polyline_distance() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
        assert!((point_to_polyline_dist(Point::new(12.0, 5.0), &points) - 2.0).abs() < 1e-10);
        assert_eq!(point_to_polyline_dist(Point::ZERO, &points[..1]), f64::INFINITY);
    }

    #[test]
    fn test_bounding_box() {
        assert_eq!(bounding_box(&[]), None);
        assert_eq!(
            bounding_box(&[Point::new(3.0, 4.0)]),
            Some(Rect::new(3.0, 4.0, 3.0, 4.0))
        );
        let points = [Point::new(10.0, -2.0), Point::new(-5.0, 8.0), Point::new(0.0, 0.0)];
        assert_eq!(bounding_box(&points), Some(Rect::new(-5.0, -2.0, 10.0, 8.0)));
    }

    #[test]
    fn test_outline_hit_ignores_interior() {
        let shapes: [Shape; 4] = [
            Rectangle::new(Point::new(0.0, 0.0), 200.0, 100.0).into(),
            Oval::new(Point::new(100.0, 50.0), 200.0, 100.0).into(),
            Square::new(Point::new(50.0, 0.0), 100.0).into(),
            Circle::new(Point::new(100.0, 50.0), 50.0).into(),
        ];
        for shape in &shapes {
            let b = shape.bounds();
            assert!(shape.hit_test(Point::new(b.center().x, b.y0 + 2.0), 5.0), "{:?}", shape);
            assert!(!shape.hit_test(Point::new(b.center().x, b.y0 + 20.0), 5.0), "{:?}", shape);
            assert!(!shape.hit_test(Point::new(b.center().x, b.y0 - 20.0), 5.0), "{:?}", shape);
        }
    }

    #[test]
    fn test_centers_by_anchor_kind() {
        let rect: Shape = Rectangle::new(Point::new(0.0, 0.0), 40.0, 20.0).into();
        let oval: Shape = Oval::new(Point::new(20.0, 10.0), 40.0, 20.0).into();
        assert_eq!(rect.center(), oval.center());
        assert_eq!(rect.bounds(), oval.bounds());
        assert_eq!(rect.anchor(), Point::new(0.0, 0.0));
        assert_eq!(oval.anchor(), Point::new(20.0, 10.0));
    }

    #[test]
    fn test_kind() {
        let square: Shape = Square::new(Point::ZERO, 4.0).into();
        assert_eq!(square.kind(), ShapeKind::Square);
        assert_eq!(square.kind().to_string(), "square");
        assert!(!square.is_freehand());
        assert!(Shape::from(Freehand::new()).as_freehand().is_some());
    }
}
