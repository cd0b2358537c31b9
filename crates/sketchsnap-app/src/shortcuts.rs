//! Keyboard shortcut registry and documentation.

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }
}

/// Registry of all keyboard and pointer shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Z", true, false, "Remove the last shape (Cmd+Z on macOS)"),
            Shortcut::new("Delete", false, false, "Delete selected shape"),
            Shortcut::new("Backspace", false, false, "Delete selected shape"),
            Shortcut::new("Enter", false, false, "Commit label"),
            Shortcut::new("Escape", false, false, "Cancel label edit"),
            Shortcut::new("Draw", false, true, "Snap to square or circle"),
            Shortcut::new("Double-click", false, false, "Edit shape label"),
            Shortcut::new("Drag", false, false, "Move shape"),
        ]
    }

    /// Render the shortcut table.
    pub fn table() -> String {
        let mut out = String::from("\n=== Keyboard Shortcuts ===\n");
        for shortcut in Self::all() {
            out.push_str(&format!("  {:20} {}\n", shortcut.format(), shortcut.description));
        }
        out
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("{}", Self::table());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(Shortcut::new("Z", true, false, "").format(), "Ctrl+Z");
        assert_eq!(Shortcut::new("Draw", false, true, "").format(), "Shift+Draw");
        assert_eq!(Shortcut::new("Delete", false, false, "").format(), "Delete");
    }

    #[test]
    fn test_table_lists_every_shortcut() {
        let table = ShortcutRegistry::table();
        assert_eq!(table.lines().filter(|l| l.starts_with("  ")).count(), ShortcutRegistry::all().len());
        assert!(table.contains("Ctrl+Z"));
    }
}
