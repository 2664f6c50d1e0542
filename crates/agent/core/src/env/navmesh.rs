//! Navigable-point sampling.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use rand::{Rng, RngCore};

/// Answers "where can an agent stand near here?".
///
/// Path following itself belongs to the navigation service; the decision
/// engine only needs random reachable points for retreats.
pub trait NavMesh {
    /// A navigable point within `radius` of `center`, or `None` if there is
    /// none.
    fn sample_point(&self, center: Vec3, radius: f32, rng: &mut dyn RngCore) -> Option<Vec3>;
}

/// Flat, obstacle-free ground, optionally bounded by a rectangle on the
/// X/Z plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OpenGround {
    bounds: Option<(Vec2, Vec2)>,
}

impl OpenGround {
    /// Unbounded ground.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ground limited to `min..=max` on the X/Z plane.
    pub fn bounded(min: Vec2, max: Vec2) -> Self {
        Self {
            bounds: Some((min.min(max), min.max(max))),
        }
    }
}

impl NavMesh for OpenGround {
    fn sample_point(&self, center: Vec3, radius: f32, rng: &mut dyn RngCore) -> Option<Vec3> {
        if radius.is_nan() || radius <= 0.0 {
            return None;
        }

        // sqrt keeps the samples uniform over the disc area
        let angle = rng.gen_range(0.0..TAU);
        let distance = radius * rng.r#gen::<f32>().sqrt();
        let mut point = center + Vec3::new(angle.sin(), 0.0, angle.cos()) * distance;

        if let Some((min, max)) = self.bounds {
            point.x = point.x.clamp(min.x, max.x);
            point.z = point.z.clamp(min.y, max.y);
        }
        Some(point)
    }
}
