//! shapepad Application
//!
//! The application shell providing windowing, input handling
//! and presentation of the sketch pad.

mod app;
mod event_handler;
mod shortcuts;

pub use app::{App, AppConfig, AppError, SurfaceBackend};
pub use event_handler::{EventHandler, ViewState};
pub use shortcuts::{Command, Shortcut, ShortcutRegistry, command_for_key};
