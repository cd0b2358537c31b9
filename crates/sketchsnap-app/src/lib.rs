//! SketchSnap Application
//!
//! Headless host: replays recorded input through the editor and reports
//! the resulting document.

pub mod report;
pub mod script;
mod shortcuts;

pub use report::describe;
pub use script::{Script, ScriptError, ScriptEvent, ScriptResult};
pub use shortcuts::{Shortcut, ShortcutRegistry};
