//! Label editing session.
//!
//! The host owns the actual text widget; this state machine only tracks
//! which shape is being labeled and the last text the widget reported.

use crate::shapes::ShapeId;

/// State of the label editor.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LabelSession {
    /// No label is being edited.
    #[default]
    Idle,
    /// A label is being edited.
    Editing {
        /// Shape the label belongs to.
        id: ShapeId,
        /// Last text reported by the input widget.
        draft: String,
    },
}

impl LabelSession {
    /// Check if a session is active.
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// Shape owning the active session.
    pub fn shape(&self) -> Option<ShapeId> {
        match self {
            Self::Editing { id, .. } => Some(*id),
            Self::Idle => None,
        }
    }

    /// Current draft text.
    pub fn draft(&self) -> Option<&str> {
        match self {
            Self::Editing { draft, .. } => Some(draft),
            Self::Idle => None,
        }
    }

    /// Start editing `id`. Returns the session that was active before, if any,
    /// so the caller can commit it.
    pub fn open(&mut self, id: ShapeId, draft: String) -> Option<(ShapeId, String)> {
        std::mem::replace(self, Self::Editing { id, draft }).finish()
    }

    /// Replace the draft. Ignored when idle.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let Self::Editing { draft, .. } = self {
            *draft = text.into();
        }
    }

    /// End the session, returning what was being edited.
    pub fn close(&mut self) -> Option<(ShapeId, String)> {
        std::mem::take(self).finish()
    }

    fn finish(self) -> Option<(ShapeId, String)> {
        match self {
            Self::Editing { id, draft } => Some((id, draft)),
            Self::Idle => None,
        }
    }
}
