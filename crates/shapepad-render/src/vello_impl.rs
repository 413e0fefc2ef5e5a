//! Vello-based renderer implementation.

use crate::renderer::{DrawCommand, RenderContext, Renderer};
use kurbo::{Affine, Ellipse, Line, Rect, Size, Stroke};
use peniko::{Color, Fill};
use vello::Scene;

/// Vello-based renderer for GPU-accelerated 2D graphics.
///
/// Draw commands are given in device-independent units; the scene is encoded
/// in physical pixels by scaling with the frame's scale factor.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    fn encode_command(&mut self, command: &DrawCommand, viewport: Size, transform: Affine) {
        match *command {
            DrawCommand::Clear(color) => {
                let rect = Rect::from_origin_size((0.0, 0.0), viewport);
                self.scene
                    .fill(Fill::NonZero, transform, Color::from(color), None, &rect);
            }
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => {
                self.scene.stroke(
                    &Stroke::new(width),
                    transform,
                    Color::from(color),
                    None,
                    &Line::new(from, to),
                );
            }
            DrawCommand::FillRect { rect, color } => {
                self.scene
                    .fill(Fill::NonZero, transform, Color::from(color), None, &rect);
            }
            DrawCommand::StrokeRect { rect, color, width } => {
                self.scene
                    .stroke(&Stroke::new(width), transform, Color::from(color), None, &rect);
            }
            DrawCommand::FillEllipse {
                center,
                radii,
                color,
            } => {
                let ellipse = Ellipse::new(center, radii, 0.0);
                self.scene
                    .fill(Fill::NonZero, transform, Color::from(color), None, &ellipse);
            }
            DrawCommand::StrokeEllipse {
                center,
                radii,
                color,
                width,
            } => {
                let ellipse = Ellipse::new(center, radii, 0.0);
                self.scene.stroke(
                    &Stroke::new(width),
                    transform,
                    Color::from(color),
                    None,
                    &ellipse,
                );
            }
        }
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext, commands: &[DrawCommand]) {
        self.scene.reset();

        let scale = if ctx.scale_factor.is_finite() && ctx.scale_factor > 0.0 {
            ctx.scale_factor
        } else {
            1.0
        };
        let transform = Affine::scale(scale);

        for command in commands {
            self.encode_command(command, ctx.viewport_size, transform);
        }
    }
}
