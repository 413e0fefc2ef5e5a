//! The per-frame render pass.
//!
//! [`build_frame`] turns a [`RenderContext`] into the ordered list of
//! primitives a backend has to issue. It holds no state, so it can be called
//! as often as the host repaints.

use crate::renderer::{DrawCommand, GridStyle, RenderContext};
use kurbo::{Point, Rect, Size, Vec2};
use shapepad_core::clock::ClockTime;
use shapepad_core::geometry::clock_hand_endpoint;
use shapepad_core::shapes::SerializableColor;

/// Smallest grid pitch drawn; finer positive pitches are raised to it.
pub const MIN_GRID_PITCH: f64 = 4.0;
/// Grid line width.
pub const GRID_STROKE_WIDTH: f64 = 0.5;
/// Radius of a grid dot.
pub const GRID_DOT_RADIUS: f64 = 1.0;
/// Half the side of the clock body.
pub const CLOCK_BODY_HALF_SIZE: f64 = 75.0;
/// Radius of the clock face.
pub const CLOCK_FACE_RADIUS: f64 = 50.0;
/// Hour hand length as a fraction of the face radius.
pub const HOUR_HAND_LENGTH: f64 = 0.4;
/// Minute hand length as a fraction of the face radius.
pub const MINUTE_HAND_LENGTH: f64 = 0.7;
/// Stroke width of both hands.
pub const HAND_STROKE_WIDTH: f64 = 3.5;

const GRID_COLOR: SerializableColor = SerializableColor::light_slate_gray();
const OUTLINE_COLOR: SerializableColor = SerializableColor::black();

/// Geometry of the clock drawn in the middle of the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockFace {
    pub center: Point,
    pub body: Rect,
    pub face_radius: f64,
}

impl ClockFace {
    /// Clock centered on a surface of `viewport` size.
    pub fn centered(viewport: Size) -> Self {
        let center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        Self {
            center,
            body: Rect::from_center_size(
                center,
                Size::new(CLOCK_BODY_HALF_SIZE * 2.0, CLOCK_BODY_HALF_SIZE * 2.0),
            ),
            face_radius: CLOCK_FACE_RADIUS,
        }
    }

    /// Tip of the hour hand at `time`.
    pub fn hour_hand_tip(&self, time: ClockTime) -> Point {
        clock_hand_endpoint(self.center, self.face_radius, HOUR_HAND_LENGTH, time.hour_angle())
    }

    /// Tip of the minute hand at `time`.
    pub fn minute_hand_tip(&self, time: ClockTime) -> Point {
        clock_hand_endpoint(self.center, self.face_radius, MINUTE_HAND_LENGTH, time.minute_angle())
    }
}

/// Build the draw commands for one frame.
pub fn build_frame(ctx: &RenderContext) -> Vec<DrawCommand> {
    let mut commands = vec![DrawCommand::Clear(ctx.background_color)];

    push_grid(&mut commands, ctx.grid_style, ctx.viewport_size, ctx.grid_pitch);

    for shape in ctx.canvas.document.shapes_ordered() {
        let radii = Vec2::new(shape.radius_x, shape.radius_y);
        commands.push(DrawCommand::FillEllipse {
            center: shape.center,
            radii,
            color: shape.style.fill_color,
        });
        commands.push(DrawCommand::StrokeEllipse {
            center: shape.center,
            radii,
            color: shape.style.stroke_color,
            width: shape.style.stroke_width,
        });
    }

    if let Some(time) = ctx.clock {
        push_clock(&mut commands, ClockFace::centered(ctx.viewport_size), time);
    }

    commands
}

/// Offsets `0, pitch, 2*pitch, ...` strictly below `extent`.
fn grid_offsets(extent: f64, pitch: f64) -> impl Iterator<Item = f64> {
    let valid = pitch.is_finite() && pitch > 0.0 && extent.is_finite() && extent > 0.0;
    let pitch = pitch.max(MIN_GRID_PITCH);
    let count = if valid { (extent / pitch).ceil() as usize } else { 0 };
    (0..count)
        .map(move |i| i as f64 * pitch)
        .filter(move |&offset| offset < extent)
}

fn push_grid(commands: &mut Vec<DrawCommand>, style: GridStyle, size: Size, pitch: f64) {
    match style {
        GridStyle::None => {}
        GridStyle::Lines => {
            for x in grid_offsets(size.width, pitch) {
                commands.push(DrawCommand::Line {
                    from: Point::new(x, 0.0),
                    to: Point::new(x, size.height),
                    color: GRID_COLOR,
                    width: GRID_STROKE_WIDTH,
                });
            }
            for y in grid_offsets(size.height, pitch) {
                commands.push(DrawCommand::Line {
                    from: Point::new(0.0, y),
                    to: Point::new(size.width, y),
                    color: GRID_COLOR,
                    width: GRID_STROKE_WIDTH,
                });
            }
        }
        GridStyle::Dots => {
            for y in grid_offsets(size.height, pitch) {
                for x in grid_offsets(size.width, pitch) {
                    commands.push(DrawCommand::FillEllipse {
                        center: Point::new(x, y),
                        radii: Vec2::new(GRID_DOT_RADIUS, GRID_DOT_RADIUS),
                        color: GRID_COLOR,
                    });
                }
            }
        }
    }
}

fn push_clock(commands: &mut Vec<DrawCommand>, face: ClockFace, time: ClockTime) {
    let radii = Vec2::new(face.face_radius, face.face_radius);

    // Body
    commands.push(DrawCommand::FillRect {
        rect: face.body,
        color: SerializableColor::light_slate_gray(),
    });
    commands.push(DrawCommand::StrokeRect {
        rect: face.body,
        color: OUTLINE_COLOR,
        width: 1.0,
    });

    // Face
    commands.push(DrawCommand::FillEllipse {
        center: face.center,
        radii,
        color: SerializableColor::cornflower_blue(),
    });
    commands.push(DrawCommand::StrokeEllipse {
        center: face.center,
        radii,
        color: OUTLINE_COLOR,
        width: 1.0,
    });

    // Hands
    for tip in [face.hour_hand_tip(time), face.minute_hand_tip(time)] {
        commands.push(DrawCommand::Line {
            from: face.center,
            to: tip,
            color: OUTLINE_COLOR,
            width: HAND_STROKE_WIDTH,
        });
    }
}
