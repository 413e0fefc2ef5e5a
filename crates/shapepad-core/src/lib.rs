//! shapepad Core Library
//!
//! Platform-agnostic data structures and interaction logic for the shapepad
//! sketch pad: ellipse shapes, the shape collection with its selection, the
//! interaction mode state machine and the clock-face geometry.

pub mod canvas;
pub mod clock;
pub mod geometry;
pub mod input;
pub mod shapes;
pub mod tools;

pub use canvas::{Canvas, CanvasDocument};
pub use clock::{ClockTime, LocalClock, WallClock};
pub use input::{DpiScale, InputState, MouseButton, PointerEvent};
pub use shapes::{Ellipse, SerializableColor, ShapeId, ShapeStyle};
pub use tools::{CursorKind, Mode, ToolManager, ToolState};
