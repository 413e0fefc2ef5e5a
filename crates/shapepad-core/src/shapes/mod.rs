//! Shape definitions for the sketch pad.

mod ellipse;

pub use ellipse::Ellipse;

use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn light_slate_gray() -> Self {
        Self::rgb(119, 136, 153)
    }

    pub const fn cornflower_blue() -> Self {
        Self::rgb(100, 149, 237)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Fill colors handed out to newly drawn ellipses, in order.
pub const FILL_PALETTE: [SerializableColor; 6] = [
    SerializableColor::rgb(255, 215, 0),   // gold
    SerializableColor::rgb(100, 149, 237), // cornflower blue
    SerializableColor::rgb(240, 128, 128), // light coral
    SerializableColor::rgb(144, 238, 144), // light green
    SerializableColor::rgb(221, 160, 221), // plum
    SerializableColor::rgb(255, 165, 0),   // orange
];

/// Palette color for the `index`-th shape (wraps around).
pub fn palette_color(index: usize) -> SerializableColor {
    FILL_PALETTE[index % FILL_PALETTE.len()]
}

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Interior color.
    pub fill_color: SerializableColor,
    /// Outline color.
    pub stroke_color: SerializableColor,
    /// Outline width in device-independent units.
    pub stroke_width: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill_color: palette_color(0),
            stroke_color: SerializableColor::black(),
            stroke_width: 1.0,
        }
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_round_trip_through_peniko() {
        let c = SerializableColor::cornflower_blue();
        let peniko: Color = c.into();
        assert_eq!(SerializableColor::from(peniko), c);
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(palette_color(0), palette_color(FILL_PALETTE.len()));
        assert_ne!(palette_color(0), palette_color(1));
    }

    #[test]
    fn test_default_style_outline() {
        let style = ShapeStyle::default();
        assert_eq!(style.stroke_color, SerializableColor::black());
        assert!((style.stroke_width - 1.0).abs() < f64::EPSILON);
    }
}
