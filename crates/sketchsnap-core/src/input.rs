//! Input state management for pointer and keyboard events.
//!
//! Key names follow the DOM `KeyboardEvent.key` convention
//! (`"Shift"`, `"Control"`, `"Meta"`, `"z"`, `"Delete"`, `"Enter"`, ...).

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// The platform command modifier (Ctrl, or Cmd on macOS).
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => *position,
        }
    }
}

/// Keyboard event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Discrete editing actions triggered from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Remove the most recently added shape.
    Undo,
    /// Remove the selected shape.
    DeleteSelected,
    /// Commit the label being edited.
    CommitLabel,
    /// Abandon the label being edited.
    CancelLabel,
}

/// Double-click detection constants.
const DOUBLE_CLICK_TIME: Duration = Duration::from_millis(500);
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Tracks pointer and modifier state across events.
///
/// Event times are supplied by the caller as offsets from any fixed origin,
/// so recorded input replays with the timing it was recorded with.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current pointer position.
    pub pointer_position: Point,
    /// Where the current press started.
    pub press_start: Option<Point>,
    /// Current modifier keys state.
    pub modifiers: Modifiers,
    /// Last click time for double-click detection.
    last_click_time: Option<Duration>,
    /// Last click position for double-click detection.
    last_click_position: Option<Point>,
    /// Whether the latest press completed a double-click.
    double_click_detected: bool,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a pointer event that happened at `time`.
    pub fn handle_pointer_event(&mut self, event: PointerEvent, time: Duration) {
        match event {
            PointerEvent::Down { position } => {
                self.pointer_position = position;
                self.press_start = Some(position);
                self.double_click_detected = false;

                if let (Some(last_time), Some(last_pos)) =
                    (self.last_click_time, self.last_click_position)
                {
                    let quick = time
                        .checked_sub(last_time)
                        .is_some_and(|elapsed| elapsed < DOUBLE_CLICK_TIME);
                    let distance = position.distance(last_pos);

                    if quick && distance < DOUBLE_CLICK_DISTANCE {
                        self.double_click_detected = true;
                        // Reset so a triple click is not a second double-click
                        self.last_click_time = None;
                        self.last_click_position = None;
                        return;
                    }
                }
                self.last_click_time = Some(time);
                self.last_click_position = Some(position);
            }
            PointerEvent::Move { position } => {
                self.pointer_position = position;
            }
            PointerEvent::Up { position } => {
                self.pointer_position = position;
                self.press_start = None;
            }
        }
    }

    /// Process a key event.
    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        match event {
            KeyEvent::Pressed(key) => self.set_modifier(key, true),
            KeyEvent::Released(key) => self.set_modifier(key, false),
        }
    }

    fn set_modifier(&mut self, key: &str, held: bool) {
        match key {
            "Shift" => self.modifiers.shift = held,
            "Control" => self.modifiers.ctrl = held,
            "Alt" => self.modifiers.alt = held,
            "Meta" => self.modifiers.meta = held,
            _ => {}
        }
    }

    /// Map a pressed key to an editing action under the current modifiers.
    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        match key {
            "z" | "Z" if self.modifiers.command() && !self.modifiers.shift => Some(Action::Undo),
            "Delete" | "Backspace" => Some(Action::DeleteSelected),
            "Enter" => Some(Action::CommitLabel),
            "Escape" => Some(Action::CancelLabel),
            _ => None,
        }
    }

    /// Check if the latest press was the second click of a double-click.
    pub fn is_double_click(&self) -> bool {
        self.double_click_detected
    }

    /// Get the pointer travel since the press started, if pressed.
    pub fn drag_delta(&self) -> Option<Vec2> {
        self.press_start.map(|start| self.pointer_position - start)
    }
}
