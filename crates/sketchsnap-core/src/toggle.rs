//! Toggle a shape to its paired alternate type.
//!
//! Rectangle ↔ Oval and Circle ↔ Square. The bounding box (and therefore
//! the center) is preserved, so toggling twice returns the original geometry.

use crate::shapes::{Circle, Oval, Rectangle, Shape, ShapeKind, Square};
use kurbo::Point;

/// The kind a shape of `kind` toggles into, if it has a pair.
pub fn paired_kind(kind: ShapeKind) -> Option<ShapeKind> {
    match kind {
        ShapeKind::Rectangle => Some(ShapeKind::Oval),
        ShapeKind::Oval => Some(ShapeKind::Rectangle),
        ShapeKind::Circle => Some(ShapeKind::Square),
        ShapeKind::Square => Some(ShapeKind::Circle),
        ShapeKind::Freehand => None,
    }
}

/// Convert a shape into its paired type, keeping its center.
///
/// Freehand strokes have no pair and are returned unchanged.
pub fn toggle(shape: &Shape) -> Shape {
    match shape {
        Shape::Rectangle(r) => Shape::Oval(Oval::new(
            Point::new(r.position.x + r.width / 2.0, r.position.y + r.height / 2.0),
            r.width,
            r.height,
        )),
        Shape::Oval(o) => Shape::Rectangle(Rectangle::new(
            Point::new(o.center.x - o.width / 2.0, o.center.y - o.height / 2.0),
            o.width,
            o.height,
        )),
        Shape::Circle(c) => Shape::Square(Square::new(
            Point::new(c.center.x - c.radius, c.center.y - c.radius),
            2.0 * c.radius,
        )),
        Shape::Square(s) => {
            let half = s.side_length / 2.0;
            Shape::Circle(Circle::new(
                Point::new(s.position.x + half, s.position.y + half),
                half,
            ))
        }
        Shape::Freehand(_) => shape.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Freehand;
    use kurbo::Rect;

    fn assert_rect_eq(a: Rect, b: Rect) {
        assert!((a.x0 - b.x0).abs() < 1e-9, "{:?} != {:?}", a, b);
        assert!((a.y0 - b.y0).abs() < 1e-9, "{:?} != {:?}", a, b);
        assert!((a.x1 - b.x1).abs() < 1e-9, "{:?} != {:?}", a, b);
        assert!((a.y1 - b.y1).abs() < 1e-9, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_rectangle_to_oval() {
        let rect = Shape::Rectangle(Rectangle::new(Point::new(10.0, 20.0), 100.0, 40.0));
        let oval = toggle(&rect);
        assert_eq!(oval, Shape::Oval(Oval::new(Point::new(60.0, 40.0), 100.0, 40.0)));
    }

    #[test]
    fn test_oval_to_rectangle() {
        let oval = Shape::Oval(Oval::new(Point::new(60.0, 40.0), 100.0, 40.0));
        assert_eq!(
            toggle(&oval),
            Shape::Rectangle(Rectangle::new(Point::new(10.0, 20.0), 100.0, 40.0))
        );
    }

    #[test]
    fn test_circle_to_square() {
        let circle = Shape::Circle(Circle::new(Point::new(50.0, 50.0), 25.0));
        assert_eq!(
            toggle(&circle),
            Shape::Square(Square::new(Point::new(25.0, 25.0), 50.0))
        );
    }

    #[test]
    fn test_square_to_circle() {
        let square = Shape::Square(Square::new(Point::new(25.0, 25.0), 50.0));
        assert_eq!(
            toggle(&square),
            Shape::Circle(Circle::new(Point::new(50.0, 50.0), 25.0))
        );
    }

    #[test]
    fn test_freehand_unchanged() {
        let stroke = Shape::Freehand(Freehand::from_points(vec![Point::ZERO, Point::new(1.0, 2.0)]));
        assert_eq!(toggle(&stroke), stroke);
    }

    #[test]
    fn test_toggle_preserves_center_and_bounds() {
        let shapes = [
            Shape::Rectangle(Rectangle::new(Point::new(-3.5, 7.25), 13.0, 99.0)),
            Shape::Oval(Oval::new(Point::new(0.1, 0.2), 0.3, 1234.5)),
            Shape::Circle(Circle::new(Point::new(1e5, -1e5), 0.7)),
            Shape::Square(Square::new(Point::new(33.3, 44.4), 55.5)),
        ];
        for shape in &shapes {
            let once = toggle(shape);
            assert_ne!(once.kind(), shape.kind());
            assert_eq!(Some(once.kind()), paired_kind(shape.kind()));
            assert_rect_eq(once.bounds(), shape.bounds());

            let twice = toggle(&once);
            assert_eq!(twice.kind(), shape.kind());
            assert_rect_eq(twice.bounds(), shape.bounds());
            assert!(twice.center().distance(shape.center()) < 1e-9);
        }
    }

    #[test]
    fn test_paired_kind() {
        assert_eq!(paired_kind(ShapeKind::Freehand), None);
        assert_eq!(paired_kind(ShapeKind::Circle), Some(ShapeKind::Square));
    }
}
