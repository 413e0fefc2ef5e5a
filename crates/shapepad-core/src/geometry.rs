//! Closed-form geometry used by hit testing and the clock face.

use kurbo::{Point, Vec2};

/// Degrees per hour mark on a 12-hour dial.
pub const DEGREES_PER_HOUR: f64 = 360.0 / 12.0;
/// Degrees the hour hand advances per minute.
pub const HOUR_HAND_DEGREES_PER_MINUTE: f64 = DEGREES_PER_HOUR / 60.0;
/// Degrees per minute mark.
pub const DEGREES_PER_MINUTE: f64 = 360.0 / 60.0;

/// Check whether `point` lies on or inside the axis-aligned ellipse.
///
/// Uses the normalized inequality `(dx/rx)² + (dy/ry)² <= 1`. An ellipse with
/// a zero (or negative) radius on either axis has no area and never hits.
pub fn hit_test_ellipse(center: Point, radius_x: f64, radius_y: f64, point: Point) -> bool {
    if radius_x <= 0.0 || radius_y <= 0.0 {
        return false;
    }
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    (dx * dx) / (radius_x * radius_x) + (dy * dy) / (radius_y * radius_y) <= 1.0
}

/// Normalize an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Angle of the hour hand in degrees, clockwise from 12 o'clock.
pub fn hour_hand_angle(hour: u32, minute: u32) -> f64 {
    wrap_degrees(DEGREES_PER_HOUR * hour as f64 + HOUR_HAND_DEGREES_PER_MINUTE * minute as f64)
}

/// Angle of the minute hand in degrees, clockwise from 12 o'clock.
pub fn minute_hand_angle(minute: u32) -> f64 {
    wrap_degrees(DEGREES_PER_MINUTE * minute as f64)
}

/// Unit direction of a clock hand pointing at `angle_degrees`.
///
/// Screen space has y growing downward, so 12 o'clock is `(0, -1)` and
/// 3 o'clock is `(1, 0)`.
pub fn clock_direction(angle_degrees: f64) -> Vec2 {
    let radians = angle_degrees.to_radians();
    Vec2::new(radians.sin(), -radians.cos())
}

/// Tip of a clock hand of `length_fraction * radius_y` rotated about `center`.
pub fn clock_hand_endpoint(
    center: Point,
    radius_y: f64,
    length_fraction: f64,
    angle_degrees: f64,
) -> Point {
    center + clock_direction(angle_degrees) * (radius_y * length_fraction)
}
