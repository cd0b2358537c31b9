//! SketchSnap Core Library
//!
//! Platform-agnostic document model and logic for a sketch canvas that snaps
//! freehand strokes into clean geometric primitives.

pub mod config;
pub mod document;
pub mod editor;
pub mod input;
pub mod label;
pub mod recognize;
pub mod shapes;
pub mod toggle;

pub use config::{
    ConfigError, ConfigResult, DragConfig, EngineConfig, HitTestConfig, RecognitionConfig,
    SelectionConfig,
};
pub use document::Document;
pub use editor::Editor;
pub use hit_test::{HitTester, hit_threshold, is_hit};
pub use input::{Action, InputState, KeyEvent, Modifiers, PointerEvent};
pub use label::LabelSession;
pub use recognize::{Recognizer, classify};
pub use shapes::{Circle, Freehand, Oval, Rectangle, Shape, ShapeId, ShapeKind, ShapeTrait, Square};
pub use toggle::{paired_kind, toggle};
