//! Translates window input into canvas operations.

use crate::shortcuts::{Command, command_for_key};
use kurbo::Point;
use shapepad_core::canvas::Canvas;
use shapepad_core::input::{DpiScale, InputState, MouseButton, PointerEvent};
use shapepad_render::GridStyle;

/// View options toggled from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub grid_style: GridStyle,
    pub show_clock: bool,
}

/// Handles window events and forwards them to the canvas.
///
/// Positions arrive in physical pixels and are converted to
/// device-independent units before anything else sees them.
pub struct EventHandler {
    input: InputState,
    scale: DpiScale,
}

impl EventHandler {
    /// Create a new event handler for a window with `scale_factor`.
    pub fn new(scale_factor: f64) -> Self {
        Self {
            input: InputState::new(),
            scale: DpiScale::new(scale_factor),
        }
    }

    pub fn scale(&self) -> DpiScale {
        self.scale
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale = DpiScale::new(scale_factor);
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Pointer moved to `physical`. Returns true if a repaint is needed.
    pub fn handle_cursor_moved(&mut self, canvas: &mut Canvas, physical: Point) -> bool {
        let position = self.scale.to_dips(physical);
        self.input
            .handle_pointer_event(PointerEvent::Move { position });
        canvas.pointer_move(position)
    }

    /// Button pressed at the last known pointer position.
    pub fn handle_press(&mut self, canvas: &mut Canvas, button: MouseButton) -> bool {
        let position = self.input.pointer_position;
        self.input
            .handle_pointer_event(PointerEvent::Down { position, button });
        if button != MouseButton::Left {
            return false;
        }

        let changed = canvas.pointer_down(position);
        if canvas.tool_manager.is_capturing() {
            self.input.capture();
        }
        changed
    }

    /// Button released at the last known pointer position.
    pub fn handle_release(&mut self, canvas: &mut Canvas, button: MouseButton) -> bool {
        let position = self.input.pointer_position;
        self.input
            .handle_pointer_event(PointerEvent::Up { position, button });
        if button != MouseButton::Left {
            return false;
        }

        self.input.release_capture();
        canvas.pointer_up(position)
    }

    /// Abort the gesture in progress, e.g. when the window loses focus.
    /// Returns true if a repaint is needed.
    pub fn cancel(&mut self, canvas: &mut Canvas) -> bool {
        if self.input.is_captured() {
            log::debug!("Gesture cancelled");
        }
        self.input.release_capture();
        canvas.cancel_gesture()
    }

    /// Key pressed. Returns true if a repaint is needed.
    pub fn handle_key(&mut self, canvas: &mut Canvas, view: &mut ViewState, key: &str) -> bool {
        match command_for_key(key) {
            Some(command) => self.apply_command(canvas, view, command),
            None => false,
        }
    }

    /// Apply `command`. Returns true if a repaint is needed.
    pub fn apply_command(
        &mut self,
        canvas: &mut Canvas,
        view: &mut ViewState,
        command: Command,
    ) -> bool {
        match command {
            Command::SetMode(mode) => {
                self.input.release_capture();
                canvas.set_mode(mode)
            }
            Command::DeleteSelected => {
                self.input.release_capture();
                canvas.delete_selected()
            }
            Command::CycleGrid => {
                view.grid_style = view.grid_style.next();
                log::info!("Grid: {}", view.grid_style.name());
                true
            }
            Command::ToggleClock => {
                view.show_clock = !view.show_clock;
                true
            }
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(1.0)
    }
}
