//! Planar geometry helpers.
//!
//! Agents move on the ground plane: distances and headings ignore the
//! vertical (Y) axis.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Projects `v` onto the ground plane.
#[inline]
pub fn planar(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Distance between `a` and `b` on the ground plane.
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    planar(b - a).length()
}

/// Unit facing vector for a yaw angle (zero faces +Z).
#[inline]
pub fn forward(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Yaw that faces from `from` toward `to`, or `None` when they coincide.
pub fn yaw_towards(from: Vec3, to: Vec3) -> Option<f32> {
    let delta = planar(to - from);
    if delta.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(delta.x.atan2(delta.z))
}

/// Wraps an angle into `(-PI, PI]`.
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Turns `current` toward `target` by at most `max_step` radians.
pub fn rotate_towards(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = wrap_angle(target - current);
    if delta.abs() <= max_step {
        wrap_angle(target)
    } else {
        wrap_angle(current + max_step.max(0.0) * delta.signum())
    }
}
