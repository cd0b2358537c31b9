//! Shape recognition: turn a raw stroke into a typed shape.
//!
//! Classification looks only at the stroke's bounding box. The aspect ratio
//! `min(w, h) / max(w, h)` decides between the "round" and the "boxy"
//! member of a pair:
//!
//! | constrain | aspect within tolerance of 1 | otherwise  |
//! |-----------|------------------------------|------------|
//! | no        | [`Oval`]                     | [`Rectangle`] |
//! | yes       | [`Square`]                   | [`Circle`] |
//!
//! Anything that cannot produce a non-degenerate box stays [`Freehand`].

use crate::config::RecognitionConfig;
use crate::shapes::{Circle, Freehand, Oval, Rectangle, Shape, Square, bounding_box};
use kurbo::Point;

/// Classify a stroke with the default tolerances.
pub fn classify(points: &[Point], constrain: bool) -> Shape {
    Recognizer::default().classify(points, constrain)
}

/// Stroke classifier with configurable tolerances.
#[derive(Debug, Clone, Default)]
pub struct Recognizer {
    config: RecognitionConfig,
}

impl Recognizer {
    /// Create a recognizer from its configuration.
    pub fn new(config: RecognitionConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &RecognitionConfig {
        &self.config
    }

    /// Classify a stroke.
    ///
    /// Never fails: fewer than two points, a non-finite coordinate, or a
    /// zero-width/zero-height bounding box yield `Freehand` with the points
    /// untouched.
    pub fn classify(&self, points: &[Point], constrain: bool) -> Shape {
        let fallback = || Shape::Freehand(Freehand::from_points(points.to_vec()));

        if points.len() < 2 {
            log::warn!("Not enough points to form a shape: {}", points.len());
            return fallback();
        }
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            log::warn!("Invalid coordinate in stroke: {:?}", bad);
            return fallback();
        }

        let Some(bbox) = bounding_box(points) else {
            return fallback();
        };
        let (width, height) = (bbox.width(), bbox.height());
        if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
            log::warn!("Degenerate stroke bounds: {}x{}", width, height);
            return fallback();
        }

        let aspect = width.min(height) / width.max(height);
        let center = bbox.center();
        let shape = if constrain {
            if within_tolerance(aspect, self.config.square_tolerance) {
                Shape::Square(Square::centered(center, width.max(height)))
            } else {
                Shape::Circle(Circle::new(center, width.max(height) / 2.0))
            }
        } else if within_tolerance(aspect, self.config.oval_tolerance) {
            Shape::Oval(Oval::new(center, width, height))
        } else {
            Shape::Rectangle(Rectangle::new(Point::new(bbox.x0, bbox.y0), width, height))
        };

        // Finite inputs can still overflow to an infinite extent.
        if !shape.is_valid() {
            log::warn!("Recognized {} is degenerate, keeping stroke", shape.kind());
            return fallback();
        }

        log::debug!(
            "Recognized {} from {} points (aspect {:.3}, constrain {})",
            shape.kind(),
            points.len(),
            aspect,
            constrain
        );
        shape
    }
}

/// Open interval `(1 - tolerance, 1 + tolerance)`.
fn within_tolerance(aspect: f64, tolerance: f64) -> bool {
    aspect > 1.0 - tolerance && aspect < 1.0 + tolerance
}
