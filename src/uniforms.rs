//! Per-frame uniform values derived from elapsed time.

use std::f32::consts::PI;

use glam::{Mat4, Vec3};

/// Phase of the blue channel relative to red.
const BLUE_PHASE: f32 = 4.0 * PI / 3.0;

/// Maps `sin`-like input in `[-1, 1]` onto `[0, 1]`.
fn unit(v: f32) -> f32 {
    (v + 1.0) / 2.0
}

/// Color cycling smoothly through hues, `t` in seconds.
pub fn oscillating_color(t: f32) -> Vec3 {
    Vec3::new(unit(t.sin()), unit(t.cos()), unit((t + BLUE_PHASE).sin()))
}

/// Rigid rotation about Z for `t` seconds at the given angular speed.
pub fn rotation_z(t: f32, radians_per_second: f32) -> Mat4 {
    Mat4::from_rotation_z(t * radians_per_second)
}

/// Grey level for the pulsing background, kept dark so the triangle stands out.
pub fn pulse_grey(t: f32) -> f32 {
    unit(t.sin()) * 0.25
}
