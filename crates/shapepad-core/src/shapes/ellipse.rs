//! Ellipse shape.

use super::{SerializableColor, ShapeId, ShapeStyle};
use crate::geometry::hit_test_ellipse;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A filled, outlined, axis-aligned ellipse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Horizontal radius (never negative).
    pub radius_x: f64,
    /// Vertical radius (never negative).
    pub radius_y: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Ellipse {
    /// Create a new ellipse. Negative radii are clamped to zero.
    pub fn new(center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius_x: radius_x.max(0.0),
            radius_y: radius_y.max(0.0),
            style: ShapeStyle::default(),
        }
    }

    /// Create a circle.
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(center, radius, radius)
    }

    /// Ellipse centered on `anchor` whose radii reach `cursor` on each axis.
    pub fn from_anchor(anchor: Point, cursor: Point) -> Self {
        let mut ellipse = Self::new(anchor, 0.0, 0.0);
        ellipse.fit_to_anchor(anchor, cursor);
        ellipse
    }

    /// Set the fill color (builder style).
    pub fn with_fill(mut self, color: SerializableColor) -> Self {
        self.style.fill_color = color;
        self
    }

    /// Get the unique identifier.
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Check if a point lies on or inside the ellipse.
    pub fn hit_test(&self, point: Point) -> bool {
        hit_test_ellipse(self.center, self.radius_x, self.radius_y, point)
    }

    /// Replace both radii, clamping to zero.
    pub fn set_radii(&mut self, radius_x: f64, radius_y: f64) {
        self.radius_x = radius_x.max(0.0);
        self.radius_y = radius_y.max(0.0);
    }

    /// Center on `anchor` and stretch the radii to reach `cursor` on each axis.
    pub fn fit_to_anchor(&mut self, anchor: Point, cursor: Point) {
        self.center = anchor;
        self.set_radii((cursor.x - anchor.x).abs(), (cursor.y - anchor.y).abs());
    }

    /// Move the center by `offset`; radii are untouched.
    pub fn translate(&mut self, offset: Vec2) {
        self.center += offset;
    }

    /// Whether either radius is zero.
    pub fn is_degenerate(&self) -> bool {
        self.radius_x <= 0.0 || self.radius_y <= 0.0
    }
}
