//! Renderer trait abstraction and the draw-command model.

use kurbo::{Point, Rect, Size, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use shapepad_core::canvas::Canvas;
use shapepad_core::clock::ClockTime;
use shapepad_core::shapes::SerializableColor;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    /// The drawing surface became invalid and must be recreated.
    #[error("Surface lost")]
    SurfaceLost,
    /// The drawing surface no longer matches the window and was reconfigured.
    #[error("Surface outdated")]
    SurfaceOutdated,
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GridStyle {
    /// No grid (plain background).
    None,
    /// Full grid lines.
    #[default]
    Lines,
    /// Only intersection dots (.).
    Dots,
}

impl GridStyle {
    /// Cycle to the next grid style.
    pub fn next(self) -> Self {
        match self {
            GridStyle::None => GridStyle::Lines,
            GridStyle::Lines => GridStyle::Dots,
            GridStyle::Dots => GridStyle::None,
        }
    }

    /// Get display name for this grid style.
    pub fn name(self) -> &'static str {
        match self {
            GridStyle::None => "None",
            GridStyle::Lines => "Lines",
            GridStyle::Dots => "Dots",
        }
    }
}

/// A single primitive issued to a backend. Coordinates are in
/// device-independent units.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(SerializableColor),
    Line {
        from: Point,
        to: Point,
        color: SerializableColor,
        width: f64,
    },
    FillRect {
        rect: Rect,
        color: SerializableColor,
    },
    StrokeRect {
        rect: Rect,
        color: SerializableColor,
        width: f64,
    },
    FillEllipse {
        center: Point,
        radii: Vec2,
        color: SerializableColor,
    },
    StrokeEllipse {
        center: Point,
        radii: Vec2,
        color: SerializableColor,
        width: f64,
    },
}

/// Default grid pitch in device-independent units.
pub const DEFAULT_GRID_PITCH: f64 = 20.0;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Surface size in device-independent units.
    pub viewport_size: Size,
    /// Physical pixels per device-independent unit.
    pub scale_factor: f64,
    /// Background color.
    pub background_color: SerializableColor,
    /// Grid display style.
    pub grid_style: GridStyle,
    /// Distance between grid lines.
    pub grid_pitch: f64,
    /// Time shown on the clock face; no clock is drawn when `None`.
    pub clock: Option<ClockTime>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(canvas: &'a Canvas, viewport_size: Size) -> Self {
        Self {
            canvas,
            viewport_size,
            scale_factor: 1.0,
            background_color: SerializableColor::white(),
            grid_style: GridStyle::Lines,
            grid_pitch: DEFAULT_GRID_PITCH,
            clock: None,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: SerializableColor) -> Self {
        self.background_color = color;
        self
    }

    /// Set the grid style.
    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }

    /// Set the grid pitch.
    pub fn with_grid_pitch(mut self, pitch: f64) -> Self {
        self.grid_pitch = pitch;
        self
    }

    /// Show the clock face at `time`.
    pub fn with_clock(mut self, time: Option<ClockTime>) -> Self {
        self.clock = time;
        self
    }
}

/// Trait for rendering backends that build a retained scene per frame.
pub trait Renderer {
    /// Build the scene/command buffer for a frame from the output of
    /// [`build_frame`](crate::build_frame).
    ///
    /// This method is called once per frame and replaces whatever the
    /// previous frame encoded.
    fn build_scene(&mut self, ctx: &RenderContext, commands: &[DrawCommand]);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color.into()
    }
}
