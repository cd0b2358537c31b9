//! Event handling: translate host pointer/key events into document operations.

use crate::config::EngineConfig;
use crate::document::Document;
use crate::input::{Action, InputState, KeyEvent, PointerEvent};
use kurbo::{Point, Vec2};
use std::time::{Duration, Instant};

/// A press that landed on an existing shape.
#[derive(Debug, Clone, Copy)]
struct Press {
    /// Shape under the press.
    index: usize,
    /// Shape anchor at press time.
    anchor: Point,
    /// Whether the press has turned into a drag.
    dragging: bool,
}

/// Owns the document and routes input to it.
///
/// A press on empty canvas, including the empty interior of an outlined
/// shape, draws a stroke. A press on a shape's outline or near its center is
/// a click (selection through the hit tester) unless the pointer travels
/// further than the click threshold, in which case it drags the shape. A
/// double click on a shape opens its label editor.
#[derive(Debug, Clone)]
pub struct Editor {
    document: Document,
    input: InputState,
    press: Option<Press>,
    click_threshold: f64,
    /// Origin for events delivered without an explicit time.
    clock: Instant,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Editor {
    /// Create an editor over an empty document.
    pub fn new(config: EngineConfig) -> Self {
        let click_threshold = config.drag.click_threshold;
        Self {
            document: Document::with_config(config),
            input: InputState::new(),
            press: None,
            click_threshold,
            clock: Instant::now(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Process a pointer event happening now.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.handle_pointer_at(event, self.clock.elapsed());
    }

    /// Process a pointer event that happened at `time`.
    ///
    /// `time` is measured from any fixed origin; a host delivering recorded
    /// events should use this for every pointer event rather than mixing it
    /// with [`Editor::handle_pointer`].
    pub fn handle_pointer_at(&mut self, event: PointerEvent, time: Duration) {
        self.input.handle_pointer_event(event, time);
        match event {
            PointerEvent::Down { position } => self.pointer_down(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { position } => self.pointer_up(position),
        }
    }

    fn pointer_down(&mut self, position: Point) {
        // Clicking anywhere blurs the label editor
        if self.document.label_session().is_editing() {
            self.document.commit_active_label();
        }

        let Some(index) = self.document.shape_at(position) else {
            self.document.clear_selection();
            self.document.begin_stroke(position);
            return;
        };

        if self.input.is_double_click() {
            self.press = None;
            self.document.open_label(index);
            return;
        }

        let anchor = self
            .document
            .shape(index)
            .map(|shape| shape.anchor())
            .unwrap_or(position);
        self.press = Some(Press {
            index,
            anchor,
            dragging: false,
        });
    }

    fn pointer_move(&mut self, position: Point) {
        let Some(press) = self.press.as_mut() else {
            self.document.extend_stroke(position);
            return;
        };

        let delta = self.input.drag_delta().unwrap_or(Vec2::ZERO);
        if !press.dragging && delta.hypot() >= self.click_threshold {
            press.dragging = true;
            self.document.start_drag(press.index);
        }
        if press.dragging {
            let target = press.anchor + delta;
            self.document.update_drag(press.index, target.x, target.y);
        }
    }

    fn pointer_up(&mut self, position: Point) {
        match self.press.take() {
            Some(press) if press.dragging => self.document.end_drag(),
            Some(press) => {
                self.document.select(press.index, position);
            }
            None => self.document.end_stroke(),
        }
    }

    /// Process a key event. Returns the action it triggered, if any.
    pub fn handle_key(&mut self, event: KeyEvent) -> Option<Action> {
        self.input.handle_key_event(&event);
        self.document
            .set_constrain_modifier(self.input.modifiers.shift);

        let KeyEvent::Pressed(key) = &event else {
            return None;
        };
        let action = self.input.action_for_key(key)?;
        self.perform(action).then_some(action)
    }

    /// Run an action. Returns false if it does not apply in the current state.
    pub fn perform(&mut self, action: Action) -> bool {
        let editing = self.document.label_session().is_editing();
        match action {
            // While a label is open these keys belong to the text widget
            Action::Undo | Action::DeleteSelected if editing => false,
            Action::Undo => {
                self.document.undo_last();
                true
            }
            Action::DeleteSelected => {
                self.document.delete_selected();
                true
            }
            Action::CommitLabel if editing => {
                self.document.commit_active_label();
                true
            }
            Action::CancelLabel if editing => {
                self.document.cancel_label();
                true
            }
            Action::CommitLabel | Action::CancelLabel => false,
        }
    }

    /// Toggle button on the selection affordance.
    pub fn toggle_selected(&mut self) {
        self.document.toggle_selected();
    }

    /// Delete button on the selection affordance.
    pub fn delete_selected(&mut self) {
        self.document.delete_selected();
    }

    /// The label widget's text changed.
    pub fn set_label_text(&mut self, text: impl Into<String>) {
        self.document.update_label_draft(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DragConfig;
    use crate::shapes::{Oval, Rectangle, Shape, ShapeKind};

    fn down(editor: &mut Editor, x: f64, y: f64) {
        editor.handle_pointer(PointerEvent::Down {
            position: Point::new(x, y),
        });
    }

    fn move_to(editor: &mut Editor, x: f64, y: f64) {
        editor.handle_pointer(PointerEvent::Move {
            position: Point::new(x, y),
        });
    }

    fn up(editor: &mut Editor, x: f64, y: f64) {
        editor.handle_pointer(PointerEvent::Up {
            position: Point::new(x, y),
        });
    }

    fn press(editor: &mut Editor, key: &str) -> Option<Action> {
        editor.handle_key(KeyEvent::Pressed(key.to_string()))
    }

    fn release(editor: &mut Editor, key: &str) {
        editor.handle_key(KeyEvent::Released(key.to_string()));
    }

    /// Draw a closed stroke around (x0,y0)-(x1,y1) through pointer events.
    fn draw_box(editor: &mut Editor, x0: f64, y0: f64, x1: f64, y1: f64) {
        down(editor, x0, y0);
        move_to(editor, x1, y0);
        move_to(editor, x1, y1);
        move_to(editor, x0, y1);
        move_to(editor, x0, y0);
        up(editor, x0, y0);
    }

    #[test]
    fn test_draw_rectangle() {
        let mut editor = Editor::default();
        draw_box(&mut editor, 10.0, 10.0, 210.0, 60.0);
        assert_eq!(
            editor.document().shape(0),
            Some(&Shape::Rectangle(Rectangle::new(Point::new(10.0, 10.0), 200.0, 50.0)))
        );
        assert!(!editor.document().is_drawing());
    }

    #[test]
    fn test_shift_constrains_stroke() {
        let mut editor = Editor::default();
        press(&mut editor, "Shift");
        draw_box(&mut editor, 0.0, 0.0, 100.0, 95.0);
        release(&mut editor, "Shift");
        draw_box(&mut editor, 300.0, 0.0, 400.0, 95.0);

        assert_eq!(editor.document().shape(0).unwrap().kind(), ShapeKind::Square);
        assert_eq!(editor.document().shape(1).unwrap().kind(), ShapeKind::Oval);
    }

    #[test]
    fn test_click_selects() {
        let mut editor = Editor::default();
        draw_box(&mut editor, 0.0, 0.0, 200.0, 50.0);

        down(&mut editor, 100.0, 25.0);
        up(&mut editor, 100.0, 25.0);
        assert_eq!(editor.document().selected_index(), Some(0));
        assert_eq!(editor.document().len(), 1);
    }

    #[test]
    fn test_click_far_from_center_does_not_select() {
        let mut editor = Editor::default();
        draw_box(&mut editor, 0.0, 0.0, 400.0, 100.0);

        // On the outline, but too far from the center to select
        down(&mut editor, 398.0, 50.0);
        up(&mut editor, 398.0, 50.0);
        assert_eq!(editor.document().selected_index(), None);
        assert_eq!(editor.document().len(), 1);
    }

    #[test]
    fn test_stroke_inside_rectangle_draws() {
        let mut editor = Editor::default();
        draw_box(&mut editor, 0.0, 0.0, 400.0, 300.0);
        let before = editor.document().shape(0).cloned();

        down(&mut editor, 50.0, 50.0);
        move_to(&mut editor, 150.0, 50.0);
        move_to(&mut editor, 150.0, 100.0);
        up(&mut editor, 150.0, 100.0);

        assert_eq!(editor.document().len(), 2);
        assert_eq!(editor.document().shape(0).cloned(), before);
        assert!(!editor.document().is_dragging());
        assert_eq!(
            editor.document().shape(1),
            Some(&Shape::Rectangle(Rectangle::new(Point::new(50.0, 50.0), 100.0, 50.0)))
        );
    }

    #[test]
    fn test_drag_by_outline() {
        let mut editor = Editor::default();
        draw_box(&mut editor, 0.0, 0.0, 400.0, 300.0);

        down(&mut editor, 0.0, 150.0);
        move_to(&mut editor, 20.0, 160.0);
        up(&mut editor, 20.0, 160.0);
        assert_eq!(editor.document().len(), 1);
        assert_eq!(
            editor.document().shape(0),
            Some(&Shape::Rectangle(Rectangle::new(Point::new(20.0, 10.0), 400.0, 300.0)))
        );
    }

    #[test]
    fn test_slow_clicks_do_not_open_label() {
        let mut editor = Editor::default();
        let click = |editor: &mut Editor, at_ms: u64| {
            let position = Point::new(100.0, 25.0);
            let time = Duration::from_millis(at_ms);
            editor.handle_pointer_at(PointerEvent::Down { position }, time);
            editor.handle_pointer_at(PointerEvent::Up { position }, time + Duration::from_millis(50));
        };
        let stroke = [(0.0, 0.0), (200.0, 0.0), (200.0, 50.0), (0.0, 50.0)];
        for (i, &(x, y)) in stroke.iter().enumerate() {
            let position = Point::new(x, y);
            let event = match i {
                0 => PointerEvent::Down { position },
                _ => PointerEvent::Move { position },
            };
            editor.handle_pointer_at(event, Duration::from_millis(10 * i as u64));
        }
        editor.handle_pointer_at(
            PointerEvent::Up {
                position: Point::new(0.0, 50.0),
            },
            Duration::from_millis(40),
        );

        click(&mut editor, 1000);
        click(&mut editor, 2000);
        assert_eq!(editor.document().selected_index(), Some(0));
        assert_eq!(editor.document().editing_index(), None);

        click(&mut editor, 2200);
        assert_eq!(editor.document().editing_index(), Some(0));
    }

    #[test]
    fn test_press_on_empty_canvas_clears_selection() {
        let mut editor = Editor::default();
        draw_box(&mut editor, 0.0, 0.0, 200.0, 50.0);
        down(&mut editor, 100.0, 25.0);
        up(&mut editor, 100.0, 25.0);

        down(&mut editor, 600.0, 600.0);
        assert_eq!(editor.document().selected_index(), None);
        up(&mut editor, 600.0, 600.0);
        assert_eq!(editor.document().len(), 2);
    }

    #[test]
    fn test_drag_moves_shape() {
        let mut editor = Editor::default();
        draw_box(&mut editor, 0.0, 0.0, 200.0, 50.0);

        down(&mut editor, 100.0, 25.0);
        move_to(&mut editor, 101.0, 25.0);
        assert!(!editor.document().is_dragging());
        move_to(&mut editor, 150.0, 75.0);
        assert_eq!(editor.document().drag_index(), Some(0));
        up(&mut editor, 150.0, 75.0);

        assert!(!editor.document().is_dragging());
        assert_eq!(
            editor.document().shape(0),
            Some(&Shape::Rectangle(Rectangle::new(Point::new(50.0, 50.0), 200.0, 50.0)))
        );
        // A drag is not a click
        assert_eq!(editor.document().selected_index(), None);
    }

    #[test]
    fn test_drag_moves_oval_center() {
        let mut editor = Editor::default();
        draw_box(&mut editor, 0.0, 0.0, 100.0, 90.0);

        down(&mut editor, 50.0, 45.0);
        move_to(&mut editor, 60.0, 45.0);
        move_to(&mut editor, 70.0, 55.0);
        up(&mut editor, 70.0, 55.0);
        assert_eq!(
            editor.document().shape(0),
            Some(&Shape::Oval(Oval::new(Point::new(70.0, 55.0), 100.0, 90.0)))
        );
    }

    #[test]
    fn test_circle_drag_moves_when_configured() {
        let config = EngineConfig {
            drag: DragConfig {
                move_all_shapes: true,
                ..DragConfig::default()
            },
            ..EngineConfig::default()
        };
        let mut editor = Editor::new(config);
        press(&mut editor, "Shift");
        draw_box(&mut editor, 0.0, 0.0, 100.0, 40.0);
        release(&mut editor, "Shift");

        down(&mut editor, 50.0, 20.0);
        move_to(&mut editor, 80.0, 20.0);
        up(&mut editor, 80.0, 20.0);
        assert_eq!(editor.document().shape(0).unwrap().center(), Point::new(80.0, 20.0));
    }

    #[test]
    fn test_double_click_opens_label() {
        let mut editor = Editor::default();
        draw_box(&mut editor, 0.0, 0.0, 200.0, 50.0);

        down(&mut editor, 100.0, 25.0);
        up(&mut editor, 100.0, 25.0);
        down(&mut editor, 100.0, 25.0);
        up(&mut editor, 100.0, 25.0);
        assert_eq!(editor.document().editing_index(), Some(0));

        editor.set_label_text("Start");
        assert_eq!(press(&mut editor, "Enter"), Some(Action::CommitLabel));
        assert_eq!(editor.document().label(0), Some("Start"));
        assert_eq!(editor.document().editing_index(), None);
    }

    #[test]
    fn test_click_elsewhere_commits_label() {
        let mut editor = Editor::default();
        draw_box(&mut editor, 0.0, 0.0, 200.0, 50.0);
        editor.document_mut().open_label(0);
        editor.set_label_text("Blurred");

        down(&mut editor, 500.0, 500.0);
        up(&mut editor, 500.0, 500.0);
        assert_eq!(editor.document().label(0), Some("Blurred"));
    }

    #[test]
    fn test_escape_cancels_label() {
        let mut editor = Editor::default();
        draw_box(&mut editor, 0.0, 0.0, 200.0, 50.0);
        editor.document_mut().open_label(0);
        editor.set_label_text("nope");

        assert_eq!(press(&mut editor, "Escape"), Some(Action::CancelLabel));
        assert_eq!(editor.document().label(0), None);
        assert_eq!(press(&mut editor, "Escape"), None);
    }

    #[test]
    fn test_undo_shortcut() {
        let mut editor = Editor::default();
        draw_box(&mut editor, 0.0, 0.0, 200.0, 50.0);
        draw_box(&mut editor, 300.0, 0.0, 500.0, 50.0);

        assert_eq!(press(&mut editor, "z"), None);
        press(&mut editor, "Control");
        assert_eq!(press(&mut editor, "z"), Some(Action::Undo));
        release(&mut editor, "z");
        release(&mut editor, "Control");
        assert_eq!(editor.document().len(), 1);
    }

    #[test]
    fn test_delete_key() {
        let mut editor = Editor::default();
        draw_box(&mut editor, 0.0, 0.0, 200.0, 50.0);
        down(&mut editor, 100.0, 25.0);
        up(&mut editor, 100.0, 25.0);

        assert_eq!(press(&mut editor, "Delete"), Some(Action::DeleteSelected));
        assert!(editor.document().is_empty());
    }

    #[test]
    fn test_delete_key_ignored_while_labeling() {
        let mut editor = Editor::default();
        draw_box(&mut editor, 0.0, 0.0, 200.0, 50.0);
        down(&mut editor, 100.0, 25.0);
        up(&mut editor, 100.0, 25.0);
        editor.document_mut().open_label(0);

        assert_eq!(press(&mut editor, "Backspace"), None);
        assert_eq!(editor.document().len(), 1);
    }

    #[test]
    fn test_toggle_button() {
        let mut editor = Editor::default();
        draw_box(&mut editor, 0.0, 0.0, 200.0, 50.0);
        down(&mut editor, 100.0, 25.0);
        up(&mut editor, 100.0, 25.0);

        editor.toggle_selected();
        assert_eq!(editor.document().shape(0).unwrap().kind(), ShapeKind::Oval);
        editor.delete_selected();
        assert!(editor.document().is_empty());
    }
}
