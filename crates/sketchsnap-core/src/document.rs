//! The shape store: the live editing document and its transition rules.
//!
//! Shapes are addressed by index (creation order, which is also z-order).
//! Behind every index sits a stable [`ShapeId`], and all per-shape side
//! state (labels, cached button positions, selection, drag, label session)
//! is keyed by that id. Removing a shape therefore shifts the indices of
//! later shapes without re-attaching any state to the wrong shape.
//!
//! Every operation tolerates bad input: out-of-range indices and missing
//! preconditions are ignored rather than reported.

use crate::config::{DragConfig, EngineConfig, SelectionConfig};
use crate::hit_test::HitTester;
use crate::label::LabelSession;
use crate::recognize::Recognizer;
use crate::shapes::{Freehand, Shape, ShapeId};
use crate::toggle;
use kurbo::Point;
use std::collections::HashMap;
use uuid::Uuid;

/// The live editing state.
#[derive(Debug, Clone)]
pub struct Document {
    /// All shapes, keyed by ID.
    shapes: HashMap<ShapeId, Shape>,
    /// Creation order of shapes (back to front).
    z_order: Vec<ShapeId>,
    /// Shape showing the toggle/delete buttons.
    selected: Option<ShapeId>,
    /// Shape being dragged.
    dragging: Option<ShapeId>,
    /// Whether the last shape is a stroke still being drawn.
    drawing: bool,
    /// User annotations, only for labeled shapes.
    labels: HashMap<ShapeId, String>,
    /// Active label editor.
    label_session: LabelSession,
    /// Button positions, computed the first time a shape is selected.
    button_positions: HashMap<ShapeId, Point>,
    /// Live state of the constrain (square/circle) modifier.
    constrain_modifier: bool,
    recognizer: Recognizer,
    hit_tester: HitTester,
    selection_config: SelectionConfig,
    drag_config: DragConfig,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an empty document.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            shapes: HashMap::new(),
            z_order: Vec::new(),
            selected: None,
            dragging: None,
            drawing: false,
            labels: HashMap::new(),
            label_session: LabelSession::default(),
            button_positions: HashMap::new(),
            constrain_modifier: false,
            recognizer: Recognizer::new(config.recognition),
            hit_tester: HitTester::new(config.hit_test),
            selection_config: config.selection,
            drag_config: config.drag,
        }
    }

    // --- Queries ---

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.z_order.len()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.z_order.is_empty()
    }

    /// Stable ID of the shape at `index`.
    pub fn id_at(&self, index: usize) -> Option<ShapeId> {
        self.z_order.get(index).copied()
    }

    /// Current index of the shape with `id`.
    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.z_order.iter().position(|&shape_id| shape_id == id)
    }

    /// Get the shape at `index`.
    pub fn shape(&self, index: usize) -> Option<&Shape> {
        self.id_at(index).and_then(|id| self.shapes.get(&id))
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected.and_then(|id| self.index_of(id))
    }

    pub fn drag_index(&self) -> Option<usize> {
        self.dragging.and_then(|id| self.index_of(id))
    }

    /// Index of the shape whose label is being edited.
    pub fn editing_index(&self) -> Option<usize> {
        self.label_session.shape().and_then(|id| self.index_of(id))
    }

    pub fn label_session(&self) -> &LabelSession {
        &self.label_session
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.id_at(index)
            .and_then(|id| self.labels.get(&id))
            .map(String::as_str)
    }

    /// All labels as `(index, text)`, in z-order.
    pub fn labels(&self) -> impl Iterator<Item = (usize, &str)> {
        self.z_order
            .iter()
            .enumerate()
            .filter_map(|(index, id)| self.labels.get(id).map(|text| (index, text.as_str())))
    }

    /// Cached toggle/delete button position for the shape at `index`.
    pub fn button_position(&self, index: usize) -> Option<Point> {
        self.id_at(index)
            .and_then(|id| self.button_positions.get(&id))
            .copied()
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    pub fn constrain_modifier(&self) -> bool {
        self.constrain_modifier
    }

    pub fn set_constrain_modifier(&mut self, held: bool) {
        self.constrain_modifier = held;
    }

    pub fn hit_tester(&self) -> &HitTester {
        &self.hit_tester
    }

    /// Topmost shape under `point`.
    ///
    /// Shapes are drawn unfilled, so a shape is only under the pointer on its
    /// outline (or stroke path) or within its click threshold of the center.
    /// The rest of a primitive's interior is empty canvas.
    pub fn shape_at(&self, point: Point) -> Option<usize> {
        let tolerance = self.hit_tester.config().freehand_tolerance;
        self.z_order.iter().enumerate().rev().find_map(|(index, id)| {
            let shape = self.shapes.get(id)?;
            let under = shape.hit_test(point, tolerance) || self.hit_tester.is_hit(shape, point);
            under.then_some(index)
        })
    }

    // --- Strokes ---

    /// Start a new stroke at `point`. Ignored while dragging.
    pub fn begin_stroke(&mut self, point: Point) {
        if self.dragging.is_some() {
            log::trace!("begin_stroke ignored: drag in progress");
            return;
        }
        if self.drawing {
            log::debug!("begin_stroke while drawing, finishing previous stroke");
            self.end_stroke();
        }

        let id = Uuid::new_v4();
        self.z_order.push(id);
        self.shapes
            .insert(id, Shape::Freehand(Freehand::from_points(vec![point])));
        self.drawing = true;
        log::debug!("Began stroke {} at index {}", id, self.z_order.len() - 1);
    }

    /// Append `point` to the stroke being drawn.
    pub fn extend_stroke(&mut self, point: Point) {
        if !self.drawing || self.dragging.is_some() {
            log::trace!("extend_stroke ignored: not drawing");
            return;
        }
        if let Some(stroke) = self.last_shape_mut().and_then(Shape::as_freehand_mut) {
            stroke.add_point(point);
        }
    }

    /// Finish the stroke being drawn and replace it with its classification.
    pub fn end_stroke(&mut self) {
        if !self.drawing {
            log::trace!("end_stroke ignored: not drawing");
            return;
        }
        self.drawing = false;

        let constrain = self.constrain_modifier;
        let simplify_tolerance = self.recognizer.config().simplify_tolerance;
        let Some(id) = self.z_order.last().copied() else {
            return;
        };
        let Some(stroke) = self.shapes.get(&id).and_then(Shape::as_freehand) else {
            return;
        };
        if stroke.is_empty() {
            return;
        }

        let mut classified = self.recognizer.classify(&stroke.points, constrain);
        if simplify_tolerance > 0.0 {
            if let Some(freehand) = classified.as_freehand_mut() {
                freehand.simplify(simplify_tolerance);
            }
        }
        log::debug!("Stroke {} recognized as {}", id, classified.kind());
        self.shapes.insert(id, classified);
    }

    /// Remove the most recently added shape.
    ///
    /// This is not a general undo: drags, toggles, deletes and labels are not
    /// reverted.
    pub fn undo_last(&mut self) {
        let Some(id) = self.z_order.pop() else {
            log::trace!("undo_last ignored: document is empty");
            return;
        };
        self.shapes.remove(&id);
        self.drawing = false;
        self.forget(id);
        log::debug!("Undid shape {}", id);
    }

    // --- Selection ---

    /// Select the shape at `index` if `point` hits it. Returns whether it did.
    pub fn select(&mut self, index: usize, point: Point) -> bool {
        let Some(id) = self.id_at(index) else {
            return false;
        };
        let Some(shape) = self.shapes.get(&id) else {
            return false;
        };
        if !self.hit_tester.is_hit(shape, point) {
            log::trace!("Click at {:?} missed shape {}", point, index);
            return false;
        }

        let button = shape.center() + self.selection_config.button_offset;
        self.button_positions.entry(id).or_insert(button);
        self.selected = Some(id);
        log::debug!("Selected shape {} ({})", index, shape.kind());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Remove the selected shape.
    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected.take() else {
            log::trace!("delete_selected ignored: nothing selected");
            return;
        };
        if self.last_id() == Some(id) {
            self.drawing = false;
        }
        self.z_order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id);
        self.forget(id);
        log::debug!("Deleted shape {}", id);
    }

    /// Replace the shape at `index` with its paired type.
    pub fn toggle(&mut self, index: usize) {
        let Some(id) = self.id_at(index) else {
            return;
        };
        if self.drawing && self.last_id() == Some(id) {
            log::trace!("toggle ignored: stroke still being drawn");
            return;
        }
        if let Some(shape) = self.shapes.get_mut(&id) {
            let toggled = toggle::toggle(shape);
            log::debug!("Toggled shape {}: {} -> {}", index, shape.kind(), toggled.kind());
            *shape = toggled;
        }
    }

    /// Toggle the selected shape.
    pub fn toggle_selected(&mut self) {
        if let Some(index) = self.selected_index() {
            self.toggle(index);
        }
    }

    // --- Dragging ---

    /// Start dragging the shape at `index`, cancelling any stroke in progress.
    pub fn start_drag(&mut self, index: usize) {
        let Some(id) = self.id_at(index) else {
            return;
        };
        if self.drawing {
            log::debug!("Drag cancels stroke in progress");
            self.drawing = false;
        }
        self.dragging = Some(id);
        log::debug!("Started drag of shape {}", index);
    }

    /// Move the dragged shape's anchor to `(x, y)`.
    ///
    /// Rectangles move their top-left corner and ovals their center. Circles
    /// and squares only move when `DragConfig::move_all_shapes` is set;
    /// strokes never move.
    pub fn update_drag(&mut self, index: usize, x: f64, y: f64) {
        let Some(id) = self.id_at(index) else {
            return;
        };
        if self.dragging != Some(id) {
            log::trace!("update_drag ignored: shape {} is not being dragged", index);
            return;
        }
        if !(x.is_finite() && y.is_finite()) {
            return;
        }

        let move_all = self.drag_config.move_all_shapes;
        let Some(shape) = self.shapes.get_mut(&id) else {
            return;
        };
        let position = Point::new(x, y);
        match shape {
            Shape::Rectangle(r) => r.position = position,
            Shape::Oval(o) => o.center = position,
            Shape::Circle(c) if move_all => c.center = position,
            Shape::Square(s) if move_all => s.position = position,
            Shape::Circle(_) | Shape::Square(_) | Shape::Freehand(_) => {}
        }
    }

    pub fn end_drag(&mut self) {
        if let Some(id) = self.dragging.take() {
            log::debug!("Ended drag of shape {}", id);
        }
    }

    // --- Labels ---

    /// Begin editing the label of the shape at `index`.
    ///
    /// Returns the text to seed the editor with. A session already open on
    /// another shape is committed with its last draft first.
    pub fn open_label(&mut self, index: usize) -> Option<String> {
        let id = self.id_at(index)?;
        if self.label_session.shape() == Some(id) {
            return self.label_session.draft().map(str::to_string);
        }

        let seed = self.labels.get(&id).cloned().unwrap_or_default();
        if let Some((previous, draft)) = self.label_session.open(id, seed.clone()) {
            log::debug!("Opening a label implicitly commits the label of {}", previous);
            self.set_label(previous, draft);
        }
        log::debug!("Editing label of shape {}", index);
        Some(seed)
    }

    /// Record the text currently in the label editor.
    pub fn update_label_draft(&mut self, text: impl Into<String>) {
        self.label_session.set_draft(text);
    }

    /// Set the label of the shape at `index`, ending its editing session.
    pub fn commit_label(&mut self, index: usize, text: impl Into<String>) {
        let Some(id) = self.id_at(index) else {
            return;
        };
        self.set_label(id, text.into());
        if self.label_session.shape() == Some(id) {
            self.label_session.close();
        }
    }

    /// Commit the active session's draft (Enter or blur).
    pub fn commit_active_label(&mut self) {
        if let Some((id, draft)) = self.label_session.close() {
            self.set_label(id, draft);
        }
    }

    /// End the active session without changing the label.
    pub fn cancel_label(&mut self) {
        if let Some((id, _)) = self.label_session.close() {
            log::debug!("Cancelled label edit of {}", id);
        }
    }

    // --- Internals ---

    fn last_id(&self) -> Option<ShapeId> {
        self.z_order.last().copied()
    }

    fn last_shape_mut(&mut self) -> Option<&mut Shape> {
        let id = self.last_id()?;
        self.shapes.get_mut(&id)
    }

    /// Store a label; an empty label removes it.
    fn set_label(&mut self, id: ShapeId, text: String) {
        if !self.shapes.contains_key(&id) {
            return;
        }
        if text.is_empty() {
            self.labels.remove(&id);
        } else {
            self.labels.insert(id, text);
        }
    }

    /// Drop all side state of a removed shape.
    fn forget(&mut self, id: ShapeId) {
        self.labels.remove(&id);
        self.button_positions.remove(&id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.dragging == Some(id) {
            self.dragging = None;
        }
        if self.label_session.shape() == Some(id) {
            self.label_session.close();
        }
    }
}
