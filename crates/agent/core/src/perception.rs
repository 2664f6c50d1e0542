//! Field-of-view target detection.
//!
//! A [`Detector`] is a one-shot trigger: once armed it reports the target the
//! first tick it is seen, then disables itself until re-armed.
//!
//! ```text
//! Disabled --arm()--> Armed --seen--> Triggered --next tick--> Disabled
//!                       ^                 |
//!                       +------arm()------+
//! ```

use crate::config::{AgentConfig, DetectorConfig};
use crate::env::{Layers, line_of_sight};
use crate::math::planar;
use crate::{AgentId, TargetId, World};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DetectorState {
    Disabled,
    Armed,
    Triggered,
}

/// A view cone of bounded radius watching for one target.
#[derive(Clone, Debug)]
pub struct Detector {
    target: TargetId,
    radius: f32,
    half_angle: f32,
    state: DetectorState,
}

impl Detector {
    /// Creates an armed detector.
    pub fn new(target: TargetId, radius: f32, half_angle_degrees: f32) -> Self {
        Self {
            target,
            radius,
            half_angle: half_angle_degrees.to_radians(),
            state: DetectorState::Armed,
        }
    }

    pub fn from_config(target: TargetId, config: &DetectorConfig) -> Self {
        let mut detector = Self::new(target, config.radius, config.half_angle_degrees);
        if !config.armed_on_spawn {
            detector.state = DetectorState::Disabled;
        }
        detector
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    /// Whether the detector reported the target on its last tick.
    pub fn is_found(&self) -> bool {
        self.state == DetectorState::Triggered
    }

    /// Enables detection again, including on a detector that fired this
    /// tick.
    pub fn arm(&mut self) {
        self.state = DetectorState::Armed;
    }

    /// Advances the detector by one tick on behalf of `agent`.
    ///
    /// Returns `true` only on the tick the target is first seen. The target
    /// is seen when its collider is within the radius, inside the view cone
    /// around the agent's heading and nothing in the agent's occlusion mask
    /// blocks the line to it.
    pub fn tick(&mut self, world: &World, agent: AgentId) -> bool {
        match self.state {
            DetectorState::Disabled => false,
            DetectorState::Triggered => {
                self.state = DetectorState::Disabled;
                false
            }
            DetectorState::Armed => {
                if self.sees_target(world, agent) {
                    self.state = DetectorState::Triggered;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn sees_target(&self, world: &World, agent: AgentId) -> bool {
        let Some(target) = world.target(self.target) else {
            return false;
        };
        let (Some(body), Some(board)) = (world.body(agent), world.board(agent)) else {
            return false;
        };
        let origin = body.pose.position;

        let in_radius = world
            .spatial()
            .overlap_sphere(origin, self.radius, Layers::all())
            .contains(&target.collider);
        if !in_radius {
            return false;
        }

        let offset = planar(target.position - origin);
        if offset.length_squared() > f32::EPSILON
            && body.pose.forward().angle_between(offset) > self.half_angle
        {
            return false;
        }

        line_of_sight(
            world.spatial(),
            origin,
            target.position,
            body.collider,
            target.collider,
            board.occlusion_mask(),
        )
    }
}

/// All detectors of one agent.
#[derive(Clone, Debug, Default)]
pub struct Perception {
    detectors: Vec<Detector>,
}

impl Perception {
    pub fn new(detectors: Vec<Detector>) -> Self {
        Self { detectors }
    }

    /// Builds one detector per configured cone, all watching `target`.
    /// Without a target the agent perceives nothing.
    pub fn from_config(config: &AgentConfig, target: Option<TargetId>) -> Self {
        let detectors = match target {
            Some(target) => config
                .detectors
                .iter()
                .map(|detector| Detector::from_config(target, detector))
                .collect(),
            None => Vec::new(),
        };
        Self { detectors }
    }

    pub fn detectors(&self) -> &[Detector] {
        &self.detectors
    }

    /// Ticks every detector and raises `targetFound` if any of them fired.
    ///
    /// `targetFound` is never cleared here; losing a target is a host
    /// decision.
    pub fn tick(&mut self, world: &mut World, agent: AgentId) -> bool {
        let mut found = false;
        for detector in &mut self.detectors {
            found |= detector.tick(world, agent);
        }

        if !found {
            return false;
        }
        if let Some(board) = world.board_mut(agent) {
            if !board.target_found() {
                tracing::debug!("{} acquired its target", agent);
            }
            board.set_target_found(true);
        }
        true
    }

    /// Arms every detector.
    pub fn rearm(&mut self) {
        for detector in &mut self.detectors {
            detector.arm();
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::env::{ColliderSet, OpenGround, Shape};
    use crate::state::RoomId;
    use crate::world::SpawnParams;

    fn world_with_player(player_at: Vec3) -> (World, AgentId, TargetId) {
        let mut colliders = ColliderSet::new();
        let player = colliders.insert(Shape::Sphere { radius: 0.5 }, player_at, Layers::PLAYER);
        let mut world = World::new(colliders, OpenGround::new(), 2);
        let target = world.add_target(player, player_at);
        let agent = world.spawn_agent(
            &AgentConfig::default(),
            SpawnParams::new(Vec3::ZERO, RoomId(0)).with_target(target),
        );
        (world, agent, target)
    }

    #[test]
    fn fires_once_then_disables() {
        let (world, agent, target) = world_with_player(Vec3::new(0.0, 0.0, 8.0));
        let mut detector = Detector::new(target, 15.0, 60.0);

        assert!(detector.tick(&world, agent));
        assert!(detector.is_found());
        assert!(!detector.tick(&world, agent));
        assert_eq!(detector.state(), DetectorState::Disabled);
        assert!(!detector.tick(&world, agent));

        detector.arm();
        assert!(detector.tick(&world, agent));
    }

    #[test]
    fn arm_right_after_a_trigger_is_kept() {
        let (world, agent, target) = world_with_player(Vec3::new(0.0, 0.0, 8.0));
        let mut detector = Detector::new(target, 15.0, 60.0);

        assert!(detector.tick(&world, agent));
        detector.arm();
        assert_eq!(detector.state(), DetectorState::Armed);
        assert!(detector.tick(&world, agent));
        assert!(!detector.tick(&world, agent));
        assert_eq!(detector.state(), DetectorState::Disabled);
    }

    #[test]
    fn ignores_targets_behind_or_out_of_range() {
        let (world, agent, target) = world_with_player(Vec3::new(0.0, 0.0, -8.0));
        let mut detector = Detector::new(target, 15.0, 60.0);
        assert!(!detector.tick(&world, agent));
        assert_eq!(detector.state(), DetectorState::Armed);

        let (world, agent, target) = world_with_player(Vec3::new(0.0, 0.0, 30.0));
        let mut detector = Detector::new(target, 15.0, 60.0);
        assert!(!detector.tick(&world, agent));
    }

    #[test]
    fn stale_target_is_never_detected() {
        let (mut world, agent, target) = world_with_player(Vec3::new(0.0, 0.0, 8.0));
        world.remove_target(target).unwrap();

        assert!(!Detector::new(target, 15.0, 60.0).tick(&world, agent));
    }

    #[test]
    fn perception_raises_target_found() {
        let (mut world, agent, target) = world_with_player(Vec3::new(0.0, 0.0, 8.0));
        let mut perception = Perception::from_config(&AgentConfig::default(), Some(target));

        assert!(perception.tick(&mut world, agent));
        assert!(world.board(agent).unwrap().target_found());

        // The latch survives the detector disabling itself.
        assert!(!perception.tick(&mut world, agent));
        assert!(world.board(agent).unwrap().target_found());
    }

    #[test]
    fn unarmed_on_spawn_waits_for_rearm() {
        let (mut world, agent, target) = world_with_player(Vec3::new(0.0, 0.0, 8.0));
        let config = AgentConfig {
            detectors: vec![DetectorConfig {
                armed_on_spawn: false,
                ..DetectorConfig::default()
            }],
            ..AgentConfig::default()
        };
        let mut perception = Perception::from_config(&config, Some(target));

        assert!(!perception.tick(&mut world, agent));
        perception.rearm();
        assert!(perception.tick(&mut world, agent));
    }
}
