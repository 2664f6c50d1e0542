//! Brute-force in-process spatial backend.
//!
//! [`ColliderSet`] answers [`SpatialQuery`] calls over a flat list of spheres
//! and axis-aligned boxes. It is what the headless runner and the test suite
//! use; an engine integration supplies its own physics-backed implementation.

use glam::Vec3;

use crate::env::{ColliderId, Layers, RayHit, SpatialQuery};

/// Collider geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
}

#[derive(Clone, Debug)]
struct Collider {
    shape: Shape,
    position: Vec3,
    layer: Layers,
}

/// A flat list of colliders.
#[derive(Clone, Debug, Default)]
pub struct ColliderSet {
    colliders: Vec<Option<Collider>>,
}

impl ColliderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collider and returns its handle. Handles are never reused.
    pub fn insert(&mut self, shape: Shape, position: Vec3, layer: Layers) -> ColliderId {
        let id = ColliderId(self.colliders.len() as u32);
        self.colliders.push(Some(Collider {
            shape,
            position,
            layer,
        }));
        id
    }

    pub fn remove(&mut self, id: ColliderId) -> bool {
        self.colliders
            .get_mut(id.0 as usize)
            .and_then(Option::take)
            .is_some()
    }

    pub fn position(&self, id: ColliderId) -> Option<Vec3> {
        self.get(id).map(|collider| collider.position)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.get(id.0 as usize).and_then(Option::as_ref)
    }

    fn iter(&self) -> impl Iterator<Item = (ColliderId, &Collider)> {
        self.colliders
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|c| (ColliderId(index as u32), c)))
    }
}

impl SpatialQuery for ColliderSet {
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: Layers) -> Vec<ColliderId> {
        self.iter()
            .filter(|(_, collider)| mask.intersects(collider.layer))
            .filter(|(_, collider)| match collider.shape {
                Shape::Sphere { radius: r } => {
                    collider.position.distance_squared(center) <= (radius + r) * (radius + r)
                }
                Shape::Box { half_extents } => {
                    let min = collider.position - half_extents;
                    let max = collider.position + half_extents;
                    center.clamp(min, max).distance_squared(center) <= radius * radius
                }
            })
            .map(|(id, _)| id)
            .collect()
    }

    fn raycast(
        &self,
        from: Vec3,
        to: Vec3,
        mask: Layers,
        exclude: Option<ColliderId>,
    ) -> Option<RayHit> {
        let direction = to - from;
        let length = direction.length();

        self.iter()
            .filter(|(id, collider)| mask.intersects(collider.layer) && Some(*id) != exclude)
            .filter_map(|(id, collider)| {
                let t = match collider.shape {
                    Shape::Sphere { radius } => {
                        segment_sphere(from, direction, collider.position, radius)
                    }
                    Shape::Box { half_extents } => segment_box(
                        from,
                        direction,
                        collider.position - half_extents,
                        collider.position + half_extents,
                    ),
                }?;
                Some((id, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(collider, t)| RayHit {
                collider,
                point: from + direction * t,
                distance: length * t,
            })
    }

    fn sync_collider(&mut self, collider: ColliderId, position: Vec3) {
        if let Some(Some(entry)) = self.colliders.get_mut(collider.0 as usize) {
            entry.position = position;
        }
    }
}

/// Entry parameter in `[0, 1]` of the segment `origin + t * direction`
/// against a sphere. An origin inside the sphere hits at `t = 0`.
fn segment_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let offset = origin - center;
    let c = offset.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }

    let a = direction.length_squared();
    if a <= f32::EPSILON {
        return None;
    }
    let b = offset.dot(direction);
    let discriminant = b * b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / a;
    (0.0..=1.0).contains(&t).then_some(t)
}

/// Slab test of the segment against an axis-aligned box.
fn segment_box(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_enter = 0.0_f32;
    let mut t_exit = 1.0_f32;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        if d.abs() <= f32::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t0 = (min[axis] - o) * inv;
        let mut t1 = (max[axis] - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_enter = t_enter.max(t0);
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    Some(t_enter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> (ColliderSet, ColliderId, ColliderId) {
        let mut set = ColliderSet::new();
        let wall = set.insert(
            Shape::Box {
                half_extents: Vec3::new(0.5, 2.0, 3.0),
            },
            Vec3::new(5.0, 0.0, 0.0),
            Layers::ENVIRONMENT,
        );
        let player = set.insert(
            Shape::Sphere { radius: 0.5 },
            Vec3::new(10.0, 0.0, 0.0),
            Layers::PLAYER,
        );
        (set, wall, player)
    }

    #[test]
    fn raycast_reports_nearest_hit() {
        let (set, wall, _) = scene();
        let hit = set
            .raycast(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Layers::DEFAULT_OCCLUSION, None)
            .unwrap();

        assert_eq!(hit.collider, wall);
        assert!((hit.distance - 4.5).abs() < 1e-4);
    }

    #[test]
    fn raycast_respects_mask() {
        let (set, _, player) = scene();
        let hit = set
            .raycast(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Layers::PLAYER, None)
            .unwrap();

        assert_eq!(hit.collider, player);
    }

    #[test]
    fn moved_wall_no_longer_blocks() {
        let (mut set, wall, player) = scene();
        set.sync_collider(wall, Vec3::new(5.0, 0.0, 20.0));

        let hit = set
            .raycast(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Layers::DEFAULT_OCCLUSION, None)
            .unwrap();
        assert_eq!(hit.collider, player);
    }

    #[test]
    fn excluded_collider_does_not_block() {
        let (mut set, _, player) = scene();
        let body = set.insert(Shape::Sphere { radius: 0.4 }, Vec3::ZERO, Layers::AGENTS);
        let mask = Layers::DEFAULT_OCCLUSION | Layers::AGENTS;
        let to = Vec3::new(10.0, 0.0, 0.0);

        assert_eq!(set.raycast(Vec3::ZERO, to, mask, None).unwrap().collider, body);
        assert_ne!(set.raycast(Vec3::ZERO, to, mask, Some(body)).unwrap().collider, body);
        assert_eq!(
            set.raycast(Vec3::ZERO, to, Layers::PLAYER | Layers::AGENTS, Some(body))
                .unwrap()
                .collider,
            player
        );
    }

    #[test]
    fn overlap_sphere_finds_colliders_in_radius() {
        let (set, wall, player) = scene();

        assert_eq!(set.overlap_sphere(Vec3::ZERO, 5.0, Layers::all()), vec![wall]);
        assert_eq!(
            set.overlap_sphere(Vec3::ZERO, 12.0, Layers::PLAYER),
            vec![player]
        );
        assert!(set.overlap_sphere(Vec3::ZERO, 2.0, Layers::all()).is_empty());
    }

    #[test]
    fn removed_collider_is_ignored() {
        let (mut set, wall, _) = scene();
        assert!(set.remove(wall));
        assert!(!set.remove(wall));
        assert_eq!(set.len(), 1);
    }
}
