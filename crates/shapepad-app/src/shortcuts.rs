//! Keyboard shortcut registry and key-to-command mapping.

use shapepad_core::tools::Mode;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, description: &'static str) -> Self {
        Self { key, description }
    }
}

/// Something a key press asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetMode(Mode),
    DeleteSelected,
    CycleGrid,
    ToggleClock,
}

/// Map a key name to its command.
///
/// Letters match case-insensitively; named keys use winit's spelling
/// (`Escape`, `Delete`, `Backspace`).
pub fn command_for_key(key: &str) -> Option<Command> {
    let command = match key {
        "1" => Command::SetMode(Mode::Draw),
        "2" => Command::SetMode(Mode::Select),
        "3" => Command::SetMode(Mode::Drag),
        "0" | "Escape" => Command::SetMode(Mode::None),
        "Delete" | "Backspace" => Command::DeleteSelected,
        k if k.eq_ignore_ascii_case("d") => Command::SetMode(Mode::Draw),
        k if k.eq_ignore_ascii_case("s") => Command::SetMode(Mode::Select),
        k if k.eq_ignore_ascii_case("g") => Command::CycleGrid,
        k if k.eq_ignore_ascii_case("c") => Command::ToggleClock,
        _ => return None,
    };
    Some(command)
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("1", "Draw mode"),
            Shortcut::new("D", "Draw mode"),
            Shortcut::new("2", "Select mode"),
            Shortcut::new("S", "Select mode"),
            Shortcut::new("3", "Drag mode"),
            Shortcut::new("0", "Ignore pointer input"),
            Shortcut::new("Escape", "Ignore pointer input"),
            Shortcut::new("Delete", "Delete selected ellipse"),
            Shortcut::new("Backspace", "Delete selected ellipse"),
            Shortcut::new("G", "Cycle grid style"),
            Shortcut::new("C", "Show or hide the clock"),
        ]
    }

    /// Log all shortcuts at info level.
    pub fn log_all() {
        log::info!("Keyboard shortcuts:");
        for shortcut in Self::all() {
            log::info!("  {:12} {}", shortcut.key, shortcut.description);
        }
    }
}
