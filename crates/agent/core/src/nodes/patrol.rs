//! Waypoint patrol branch.
//!
//! The preset wires these as
//!
//! ```text
//! Sequence
//!   ├─ IdleOnArrival                 pause at each waypoint, then advance
//!   └─ ArrivalActivator
//!        └─ NavigateToWaypoint       issued once per new waypoint
//! ```

use behavior_tree::Behavior;

use crate::math::planar_distance;
use crate::nodes::Node;
use crate::{AgentId, World};

/// Requests movement to the current waypoint.
///
/// Returns `false` only when the agent has no route.
pub struct NavigateToWaypoint {
    agent: AgentId,
}

impl NavigateToWaypoint {
    pub fn new(agent: AgentId) -> Self {
        Self { agent }
    }
}

impl Behavior<World> for NavigateToWaypoint {
    fn evaluate(&mut self, world: &mut World) -> bool {
        let Some(board) = world.board_mut(self.agent) else {
            return false;
        };
        let Some(waypoint) = board.current_waypoint_position() else {
            return false;
        };

        board.nav_mut().set_destination(waypoint);
        board.nav_mut().resume();
        board.animator_mut().set_walking(true);
        tracing::trace!(
            "{} heading to waypoint {}",
            self.agent,
            board.current_waypoint()
        );
        true
    }

    fn blackboard(&self) -> AgentId {
        self.agent
    }
}

/// Evaluates its child only when the waypoint index changed since the last
/// evaluation, so a destination is requested once per waypoint rather than
/// every tick.
///
/// The request is also re-issued when the navigation agent no longer heads
/// for the current waypoint, which happens after another branch (a stun, a
/// chase) took over the nav agent in between.
///
/// Returns `true` whenever the agent has a route.
pub struct ArrivalActivator {
    agent: AgentId,
    last_index: Option<usize>,
    child: Node,
}

impl ArrivalActivator {
    pub fn new(agent: AgentId, child: Node) -> Self {
        Self {
            agent,
            last_index: None,
            child,
        }
    }
}

impl Behavior<World> for ArrivalActivator {
    fn evaluate(&mut self, world: &mut World) -> bool {
        let (index, on_route) = match world.board(self.agent) {
            Some(board) if !board.waypoints().is_empty() => {
                let nav = board.nav();
                let on_route = !nav.is_stopped()
                    && nav.destination().is_some()
                    && nav.destination() == board.current_waypoint_position();
                (board.current_waypoint(), on_route)
            }
            _ => return false,
        };

        if self.last_index != Some(index) || !on_route {
            self.last_index = Some(index);
            self.child.evaluate(world);
        }
        true
    }

    fn blackboard(&self) -> AgentId {
        self.agent
    }
}

/// Pauses for `idle_time` seconds at each reached waypoint, then moves on.
///
/// # Returns
///
/// - `true`: not arrived yet, or the pause just ended and the route advanced
/// - `false`: pausing at the waypoint, or the agent has no route
pub struct IdleOnArrival {
    agent: AgentId,
    idle_time: f32,
    remaining: Option<f32>,
}

impl IdleOnArrival {
    pub fn new(agent: AgentId, idle_time: f32) -> Self {
        Self {
            agent,
            idle_time,
            remaining: None,
        }
    }

    /// Seconds left in the current pause, if pausing.
    pub fn remaining(&self) -> Option<f32> {
        self.remaining
    }
}

impl Behavior<World> for IdleOnArrival {
    fn evaluate(&mut self, world: &mut World) -> bool {
        let dt = world.dt();
        let Some((body, board)) = world.agent_mut(self.agent) else {
            return false;
        };
        let Some(waypoint) = board.current_waypoint_position() else {
            return false;
        };

        if planar_distance(body.pose.position, waypoint) > board.waypoint_offset() {
            return true;
        }

        let remaining = match self.remaining {
            Some(remaining) => remaining,
            None => {
                tracing::debug!(
                    "{} idling at waypoint {} for {}s",
                    self.agent,
                    board.current_waypoint(),
                    self.idle_time
                );
                self.idle_time
            }
        } - dt;

        if remaining > 0.0 {
            self.remaining = Some(remaining);
            board.nav_mut().stop();
            board.animator_mut().set_walking(false);
            return false;
        }

        self.remaining = None;
        board.advance_waypoint();
        board.nav_mut().resume();
        true
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
    use crate::env::{ColliderSet, OpenGround};
    use crate::state::RoomId;
    use crate::world::SpawnParams;

    fn patroller(waypoints: Vec<Vec3>) -> (World, AgentId) {
        let mut world = World::new(ColliderSet::new(), OpenGround::new(), 3);
        let agent = world.spawn_agent(
            &AgentConfig::default(),
            SpawnParams::new(Vec3::ZERO, RoomId(0)).with_waypoints(waypoints),
        );
        world.begin_tick(0.5);
        (world, agent)
    }

    #[test]
    fn navigate_to_waypoint_requires_a_route() {
        let (mut world, agent) = patroller(Vec::new());
        assert!(!NavigateToWaypoint::new(agent).evaluate(&mut world));

        let (mut world, agent) = patroller(vec![Vec3::new(4.0, 0.0, 0.0)]);
        assert!(NavigateToWaypoint::new(agent).evaluate(&mut world));
        let board = world.board(agent).unwrap();
        assert_eq!(board.nav().destination(), Some(Vec3::new(4.0, 0.0, 0.0)));
        assert!(board.animator().is_walking());
    }

    #[test]
    fn arrival_activator_fires_once_per_index() {
        let (mut world, agent) = patroller(vec![Vec3::X * 4.0, Vec3::Z * 4.0]);
        let mut activator = ArrivalActivator::new(agent, Box::new(NavigateToWaypoint::new(agent)));

        assert!(activator.evaluate(&mut world));
        assert!(activator.evaluate(&mut world));
        assert!(activator.evaluate(&mut world));
        assert_eq!(world.board(agent).unwrap().nav().requests(), 1);

        world.board_mut(agent).unwrap().advance_waypoint();
        assert!(activator.evaluate(&mut world));
        assert_eq!(world.board(agent).unwrap().nav().requests(), 2);
    }

    #[test]
    fn arrival_activator_reissues_after_another_branch_took_the_nav_agent() {
        let (mut world, agent) = patroller(vec![Vec3::X * 4.0, Vec3::Z * 4.0]);
        let mut activator = ArrivalActivator::new(agent, Box::new(NavigateToWaypoint::new(agent)));
        assert!(activator.evaluate(&mut world));

        world.set_stunned(agent, true).unwrap();
        world.set_stunned(agent, false).unwrap();
        assert!(activator.evaluate(&mut world));
        let nav = world.board(agent).unwrap().nav();
        assert_eq!(nav.requests(), 2);
        assert!(!nav.is_stopped());

        // A chase left the destination on the player.
        world
            .board_mut(agent)
            .unwrap()
            .nav_mut()
            .set_destination(Vec3::new(-9.0, 0.0, 3.0));
        assert!(activator.evaluate(&mut world));
        let nav = world.board(agent).unwrap().nav();
        assert_eq!(nav.destination(), Some(Vec3::X * 4.0));
        assert_eq!(nav.requests(), 4);
    }

    #[test]
    fn idle_on_arrival_pauses_then_advances() {
        let (mut world, agent) = patroller(vec![Vec3::ZERO, Vec3::X * 4.0]);
        let mut idle = IdleOnArrival::new(agent, 1.0);

        // 0.5 s ticks: paused on the first, done on the second.
        assert!(!idle.evaluate(&mut world));
        assert!(world.board(agent).unwrap().nav().is_stopped());
        assert!(!world.board(agent).unwrap().animator().is_walking());

        assert!(idle.evaluate(&mut world));
        assert_eq!(idle.remaining(), None);
        let board = world.board(agent).unwrap();
        assert_eq!(board.current_waypoint(), 1);
        assert!(!board.nav().is_stopped());
    }

    #[test]
    fn idle_on_arrival_passes_while_travelling() {
        let (mut world, agent) = patroller(vec![Vec3::X * 4.0]);
        let mut idle = IdleOnArrival::new(agent, 1.0);

        assert!(idle.evaluate(&mut world));
        assert_eq!(idle.remaining(), None);
    }
}
