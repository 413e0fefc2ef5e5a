//! Input state management for mouse events.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event in device-independent units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
}

impl PointerEvent {
    /// Position carried by the event.
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position } => *position,
        }
    }
}

/// Ratio between physical pixels and device-independent units.
///
/// A scale of 1.0 corresponds to 96 DPI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DpiScale(pub f64);

impl Default for DpiScale {
    fn default() -> Self {
        Self(1.0)
    }
}

impl DpiScale {
    /// Non-positive or non-finite factors fall back to 1.0.
    pub fn new(factor: f64) -> Self {
        if factor.is_finite() && factor > 0.0 {
            Self(factor)
        } else {
            Self(1.0)
        }
    }

    pub fn factor(self) -> f64 {
        self.0
    }

    /// Convert a physical pixel position to device-independent units.
    pub fn to_dips(self, physical: Point) -> Point {
        Point::new(physical.x / self.0, physical.y / self.0)
    }
}

/// Tracks pointer state across events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current pointer position in device-independent units.
    pub pointer_position: Point,
    /// Whether the pointer is captured by an active gesture.
    captured: bool,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        self.pointer_position = event.position();
    }

    /// Route all following pointer events to the active gesture.
    pub fn capture(&mut self) {
        self.captured = true;
    }

    pub fn release_capture(&mut self) {
        self.captured = false;
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }
}
