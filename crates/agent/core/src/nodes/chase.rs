//! Chase-and-shoot branch.
//!
//! ```text
//! ChaseAttackSelector (Sequence)
//!   ├─ Inverter
//!   │    └─ NavigateToTarget   true while in transit
//!   └─ AttackTarget            only once stopped in range with a clear line
//! ```

use behavior_tree::Behavior;
use behavior_tree::builder::{inverter, sequence};

use crate::env::line_of_sight;
use crate::math::{planar_distance, rotate_towards, yaw_towards};
use crate::nodes::Node;
use crate::{AgentId, World};

/// Walks toward the target until it is within weapon range and visible.
///
/// A destination request is issued on every evaluation so the navigation
/// service tracks a moving target.
///
/// # Returns
///
/// - `true`: still in transit (out of range, or in range but occluded)
/// - `false`: stopped in range with a clear line of fire, or nothing to chase
pub struct NavigateToTarget {
    agent: AgentId,
}

impl NavigateToTarget {
    pub fn new(agent: AgentId) -> Self {
        Self { agent }
    }
}

impl Behavior<World> for NavigateToTarget {
    fn evaluate(&mut self, world: &mut World) -> bool {
        let target = match world.target_of(self.agent) {
            Some(target) => *target,
            None => return false,
        };
        let (position, own_collider) = match world.body(self.agent) {
            Some(body) => (body.pose.position, body.collider),
            None => return false,
        };
        let distance = planar_distance(position, target.position);

        let Some(board) = world.board_mut(self.agent) else {
            return false;
        };
        board.nav_mut().set_destination(target.position);

        if distance > board.weapon_range() {
            board.nav_mut().resume();
            board.animator_mut().set_walking(true);
            return true;
        }

        board.nav_mut().stop();
        let mask = board.occlusion_mask();
        let clear = line_of_sight(
            world.spatial(),
            position,
            target.position,
            own_collider,
            target.collider,
            mask,
        );

        let Some(board) = world.board_mut(self.agent) else {
            return false;
        };
        if clear {
            board.animator_mut().set_walking(false);
            false
        } else {
            tracing::trace!("{} in range but occluded, repositioning", self.agent);
            board.nav_mut().resume();
            board.animator_mut().set_walking(true);
            true
        }
    }

    fn blackboard(&self) -> AgentId {
        self.agent
    }
}

/// Turns toward the target and pulls the trigger while attacking is allowed.
///
/// Turning is rate-limited to `turn_speed` radians per second of tick time.
pub struct AttackTarget {
    agent: AgentId,
    turn_speed: f32,
}

impl AttackTarget {
    pub fn new(agent: AgentId, turn_speed: f32) -> Self {
        Self { agent, turn_speed }
    }
}

impl Behavior<World> for AttackTarget {
    fn evaluate(&mut self, world: &mut World) -> bool {
        let target = match world.target_of(self.agent) {
            Some(target) => target.position,
            None => return false,
        };
        let max_step = self.turn_speed * world.dt();

        let Some((body, board)) = world.agent_mut(self.agent) else {
            return false;
        };
        if let Some(facing) = yaw_towards(body.pose.position, target) {
            body.pose.yaw = rotate_towards(body.pose.yaw, facing, max_step);
        }

        if board.can_attack() {
            board.weapon_mut().fire();
            tracing::trace!("{} fired", self.agent);
        }
        true
    }

    fn blackboard(&self) -> AgentId {
        self.agent
    }
}

/// Attacks only once navigation reports it has arrived.
///
/// Built as `Sequence[Inverter(navigate), attack]`: an in-transit navigate
/// fails the inverter and the attack is never evaluated.
///
/// # Returns
///
/// - `false` while `navigate` is in transit (attack is not evaluated)
/// - otherwise `attack`'s result
pub struct ChaseAttackSelector {
    agent: AgentId,
    sequence: Node,
}

impl ChaseAttackSelector {
    pub fn new(agent: AgentId, navigate: Node, attack: Node) -> Self {
        Self {
            agent,
            sequence: sequence::<World>(agent, vec![inverter(navigate), attack]),
        }
    }

    /// The default pairing of [`NavigateToTarget`] and [`AttackTarget`].
    pub fn standard(agent: AgentId, turn_speed: f32) -> Self {
        Self::new(
            agent,
            Box::new(NavigateToTarget::new(agent)),
            Box::new(AttackTarget::new(agent, turn_speed)),
        )
    }
}

impl Behavior<World> for ChaseAttackSelector {
    fn evaluate(&mut self, world: &mut World) -> bool {
        self.sequence.evaluate(world)
    }

    fn blackboard(&self) -> AgentId {
        self.agent
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::config::AgentConfig;
    use crate::env::{ColliderSet, Layers, OpenGround, Shape};
    use crate::state::RoomId;
    use crate::world::SpawnParams;

    fn arena(target_at: Vec3) -> (World, AgentId) {
        let mut colliders = ColliderSet::new();
        let player = colliders.insert(Shape::Sphere { radius: 0.5 }, target_at, Layers::PLAYER);
        let mut world = World::new(colliders, OpenGround::new(), 7);
        let target = world.add_target(player, target_at);
        let agent = world.spawn_agent(
            &AgentConfig::default(),
            SpawnParams::new(Vec3::ZERO, RoomId(0)).with_target(target),
        );
        world.begin_tick(0.1);
        (world, agent)
    }

    #[test]
    fn navigate_reports_transit_beyond_range() {
        let (mut world, agent) = arena(Vec3::new(0.0, 0.0, 20.0));
        let mut navigate = NavigateToTarget::new(agent);

        assert!(navigate.evaluate(&mut world));
        let board = world.board(agent).unwrap();
        assert!(!board.nav().is_stopped());
        assert!(board.animator().is_walking());
        assert_eq!(board.nav().destination(), Some(Vec3::new(0.0, 0.0, 20.0)));
    }

    #[test]
    fn navigate_stops_in_clear_range() {
        let (mut world, agent) = arena(Vec3::new(0.0, 0.0, 3.0));
        let mut navigate = NavigateToTarget::new(agent);

        assert!(!navigate.evaluate(&mut world));
        assert!(world.board(agent).unwrap().nav().is_stopped());
    }

    #[test]
    fn navigate_without_target_has_nothing_to_chase() {
        let mut world = World::new(ColliderSet::new(), OpenGround::new(), 7);
        let agent = world.spawn_agent(
            &AgentConfig::default(),
            SpawnParams::new(Vec3::ZERO, RoomId(0)),
        );

        assert!(!NavigateToTarget::new(agent).evaluate(&mut world));
        assert_eq!(world.board(agent).unwrap().nav().requests(), 0);
    }

    #[test]
    fn attack_turns_at_limited_rate_and_fires() {
        let (mut world, agent) = arena(Vec3::new(3.0, 0.0, 0.0));
        let mut attack = AttackTarget::new(agent, 1.0);

        assert!(attack.evaluate(&mut world));
        // Target is a quarter turn away; one 0.1 s tick turns 0.1 rad.
        assert!((world.body(agent).unwrap().pose.yaw - 0.1).abs() < 1e-5);
        assert_eq!(world.board(agent).unwrap().weapon().shots(), 1);
    }

    #[test]
    fn attack_holds_fire_when_attacking_is_cleared() {
        let (mut world, agent) = arena(Vec3::new(0.0, 0.0, 3.0));
        world.board_mut(agent).unwrap().set_can_attack(false);

        assert!(AttackTarget::new(agent, 1.0).evaluate(&mut world));
        assert_eq!(world.board(agent).unwrap().weapon().shots(), 0);
    }

    #[test]
    fn selector_does_not_attack_in_transit() {
        let (mut world, agent) = arena(Vec3::new(0.0, 0.0, 20.0));
        let mut chase = ChaseAttackSelector::standard(agent, 1.0);

        assert!(!chase.evaluate(&mut world));
        assert_eq!(world.board(agent).unwrap().weapon().shots(), 0);

        world.set_agent_position(agent, Vec3::new(0.0, 0.0, 16.0)).unwrap();
        assert!(chase.evaluate(&mut world));
        assert_eq!(world.board(agent).unwrap().weapon().shots(), 1);
    }
}
