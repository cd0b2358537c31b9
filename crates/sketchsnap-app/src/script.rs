//! Input event scripts.
//!
//! A script is a JSON array of events replayed in order through an
//! [`Editor`], standing in for a live window's event loop:
//!
//! ```json
//! [
//!   { "event": "key_down", "key": "Shift" },
//!   { "event": "down", "x": 0, "y": 0 },
//!   { "event": "move", "x": 100, "y": 95 },
//!   { "event": "up", "x": 100, "y": 95 },
//!   { "event": "toggle" }
//! ]
//! ```
//!
//! Pointer events may carry a time `t` in milliseconds. Untimed pointer
//! events are spaced [`UNTIMED_POINTER_INTERVAL`] after the previous one,
//! which is too slow for a double-click: a double-click needs explicit
//! times.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use sketchsnap_core::{Editor, KeyEvent, PointerEvent};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Gap between consecutive pointer events that carry no time.
pub const UNTIMED_POINTER_INTERVAL: Duration = Duration::from_millis(250);

/// Script loading errors.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type for script operations.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// One recorded host event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    Down {
        x: f64,
        y: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        t: Option<u64>,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        t: Option<u64>,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        t: Option<u64>,
    },
    KeyDown { key: String },
    KeyUp { key: String },
    /// Toggle button of the selection affordance.
    Toggle,
    /// Delete button of the selection affordance.
    Delete,
    /// The label widget's text changed.
    LabelText { text: String },
    /// The label widget lost focus.
    CommitLabel,
    CancelLabel,
}

impl ScriptEvent {
    /// The pointer event and its recorded time in milliseconds, if this is one.
    pub fn pointer(&self) -> Option<(PointerEvent, Option<u64>)> {
        match *self {
            ScriptEvent::Down { x, y, t } => Some((
                PointerEvent::Down {
                    position: Point::new(x, y),
                },
                t,
            )),
            ScriptEvent::Move { x, y, t } => Some((
                PointerEvent::Move {
                    position: Point::new(x, y),
                },
                t,
            )),
            ScriptEvent::Up { x, y, t } => Some((
                PointerEvent::Up {
                    position: Point::new(x, y),
                },
                t,
            )),
            _ => None,
        }
    }
}

/// A sequence of events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub fn from_json(json: &str) -> ScriptResult<Self> {
        serde_json::from_str(json).map_err(|e| ScriptError::Parse(e.to_string()))
    }

    /// Read a script from a file.
    pub fn load(path: &Path) -> ScriptResult<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| ScriptError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let script = Self::from_json(&json)?;
        log::info!("Loaded {} events from {}", script.events.len(), path.display());
        Ok(script)
    }

    /// Feed every event to `editor` in order, on the script's own clock.
    pub fn replay(&self, editor: &mut Editor) {
        let mut clock = Duration::ZERO;
        for event in &self.events {
            if let Some((_, t)) = event.pointer() {
                clock = match t {
                    Some(millis) => Duration::from_millis(millis),
                    None => clock + UNTIMED_POINTER_INTERVAL,
                };
            }
            apply(editor, event, clock);
        }
    }
}

/// Deliver a single event. `time` stamps pointer events.
pub fn apply(editor: &mut Editor, event: &ScriptEvent, time: Duration) {
    log::trace!("Replaying {:?} at {:?}", event, time);
    match event {
        ScriptEvent::Down { .. } | ScriptEvent::Move { .. } | ScriptEvent::Up { .. } => {
            if let Some((pointer, _)) = event.pointer() {
                editor.handle_pointer_at(pointer, time);
            }
        }
        ScriptEvent::KeyDown { key } => {
            if let Some(action) = editor.handle_key(KeyEvent::Pressed(key.clone())) {
                log::debug!("{} -> {:?}", key, action);
            }
        }
        ScriptEvent::KeyUp { key } => {
            editor.handle_key(KeyEvent::Released(key.clone()));
        }
        ScriptEvent::Toggle => editor.toggle_selected(),
        ScriptEvent::Delete => editor.delete_selected(),
        ScriptEvent::LabelText { text } => editor.set_label_text(text.as_str()),
        ScriptEvent::CommitLabel => editor.document_mut().commit_active_label(),
        ScriptEvent::CancelLabel => editor.document_mut().cancel_label(),
    }
}
