//! shapepad Render Library
//!
//! The per-frame render pass, the drawing-surface lifecycle and the
//! renderer implementations for shapepad.
//! The default implementation uses Vello for GPU-accelerated rendering.

pub mod frame;
mod renderer;
pub mod surface;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use frame::{ClockFace, MIN_GRID_PITCH, build_frame};
pub use renderer::{
    DEFAULT_GRID_PITCH, DrawCommand, GridStyle, RenderContext, RenderResult, Renderer,
    RendererError,
};
pub use surface::{FramePresenter, FrameOutcome, RenderBackend};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
