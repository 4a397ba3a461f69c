// Math utilities and helper functions

use glam::Vec2;

/// Map an analog axis value onto {-1, 0, 1}
///
/// Values whose magnitude does not exceed `deadzone` map to 0.
pub fn discretize_axis(value: f32, deadzone: f32) -> i32 {
    if value.abs() > deadzone {
        value.signum() as i32
    } else {
        0
    }
}

/// Snap a direction onto the 8-way unit grid (components in {-1, 0, 1})
pub fn round_direction(direction: Vec2) -> Vec2 {
    direction.normalize_or_zero().round()
}

/// Signed angle in degrees from `from` to `to`, counter-clockwise positive
pub fn signed_angle_deg(from: Vec2, to: Vec2) -> f32 {
    from.perp_dot(to).atan2(from.dot(to)).to_degrees()
}
