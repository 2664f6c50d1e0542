//! Spatial query contract used for perception and line-of-sight tests.

use std::fmt;

use bitflags::bitflags;
use glam::Vec3;

bitflags! {
    /// Collision categories. Used both as a collider's own layer and as a
    /// query mask (e.g. the occlusion mask of a line-of-sight test).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Layers: u32 {
        const ENVIRONMENT = 1 << 0;
        const AGENTS      = 1 << 1;
        const PLAYER      = 1 << 2;
        const PROPS       = 1 << 3;
        const PROJECTILES = 1 << 4;
    }
}

impl Layers {
    /// Walls block sight; the player is what the ray should reach.
    pub const DEFAULT_OCCLUSION: Self = Self::ENVIRONMENT.union(Self::PLAYER);
}

impl Default for Layers {
    fn default() -> Self {
        Self::DEFAULT_OCCLUSION
    }
}

/// Handle of a collider inside the spatial backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColliderId(pub u32);

impl fmt::Display for ColliderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "collider#{}", self.0)
    }
}

/// First collider hit by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub collider: ColliderId,
    pub point: Vec3,
    /// Distance from the ray origin to `point`.
    pub distance: f32,
}

/// Overlap and raycast queries answered by the physics backend.
///
/// Queries are pure: they never change the scene. `sync_collider` is how the
/// world mirrors agent and target movement into the backend; engines that own
/// their colliders may implement it as a no-op.
pub trait SpatialQuery {
    /// Every collider on `mask` that overlaps the sphere.
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: Layers) -> Vec<ColliderId>;

    /// The nearest collider on `mask` crossed by the segment `from → to`,
    /// skipping `exclude` (usually the caster's own body).
    fn raycast(
        &self,
        from: Vec3,
        to: Vec3,
        mask: Layers,
        exclude: Option<ColliderId>,
    ) -> Option<RayHit>;

    /// Moves `collider` to `position`.
    fn sync_collider(&mut self, collider: ColliderId, position: Vec3);
}

/// Returns `true` when nothing on `mask` sits between `from` and `target`.
///
/// A ray that reaches `target` first, or hits nothing at all, counts as clear.
/// The `source` collider the ray starts inside never blocks it.
pub fn line_of_sight(
    spatial: &dyn SpatialQuery,
    from: Vec3,
    to: Vec3,
    source: Option<ColliderId>,
    target: ColliderId,
    mask: Layers,
) -> bool {
    match spatial.raycast(from, to, mask, source) {
        Some(hit) => hit.collider == target,
        None => true,
    }
}
