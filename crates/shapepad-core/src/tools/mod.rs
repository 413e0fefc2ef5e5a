//! Interaction modes and gesture state.

use crate::shapes::{SerializableColor, palette_color};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// What a mouse-down does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Mode {
    /// Pointer input is ignored.
    None,
    /// Click-drag creates and sizes a new ellipse.
    #[default]
    Draw,
    /// Click picks the topmost ellipse; dragging moves it.
    Select,
    /// Same gesture as `Select`; entered while a shape is being moved.
    Drag,
}

/// Mouse cursor to show for a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorKind {
    Arrow,
    Crosshair,
    Hand,
}

impl Mode {
    /// Cursor shown while this mode is active.
    pub fn cursor(self) -> CursorKind {
        match self {
            Mode::None | Mode::Select => CursorKind::Arrow,
            Mode::Draw => CursorKind::Crosshair,
            Mode::Drag => CursorKind::Hand,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::None => "None",
            Mode::Draw => "Draw",
            Mode::Select => "Select",
            Mode::Drag => "Drag",
        }
    }

    /// Whether a mouse-down hit-tests existing shapes.
    pub fn picks_shapes(self) -> bool {
        matches!(self, Mode::Select | Mode::Drag)
    }
}

/// State of the gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ToolState {
    /// No button held.
    #[default]
    Idle,
    /// A freshly inserted ellipse follows the cursor.
    Sizing {
        /// Where the button went down; the ellipse stays centered here.
        anchor: Point,
    },
    /// The selected ellipse follows the cursor.
    Dragging {
        /// Last cursor sample applied to the shape.
        last: Point,
        /// Mode to restore when the drag ends.
        return_to: Mode,
    },
}

/// Tracks the current mode and gesture.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected mode.
    pub mode: Mode,
    /// Current state of the gesture.
    pub state: ToolState,
    /// Palette slot for the next drawn ellipse.
    fill_index: usize,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tool manager starting in `mode`.
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Replace the mode and drop any gesture in progress.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.state = ToolState::Idle;
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, ToolState::Idle)
    }

    /// Pointer capture is held exactly while a gesture is active.
    pub fn is_capturing(&self) -> bool {
        self.is_active()
    }

    /// Start sizing a new shape anchored at `anchor`.
    pub fn begin_sizing(&mut self, anchor: Point) {
        self.state = ToolState::Sizing { anchor };
    }

    /// Start dragging from `point`, switching to `Mode::Drag` until release.
    pub fn begin_drag(&mut self, point: Point) {
        let return_to = self.mode;
        self.mode = Mode::Drag;
        self.state = ToolState::Dragging {
            last: point,
            return_to,
        };
    }

    /// End the gesture; a drag returns to the mode it started from.
    pub fn end(&mut self) {
        if let ToolState::Dragging { return_to, .. } = self.state {
            self.mode = return_to;
        }
        self.state = ToolState::Idle;
    }

    /// Fill color for the next drawn ellipse.
    pub fn next_fill(&mut self) -> SerializableColor {
        let color = palette_color(self.fill_index);
        self.fill_index = self.fill_index.wrapping_add(1);
        color
    }
}
