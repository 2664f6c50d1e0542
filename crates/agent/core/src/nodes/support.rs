//! Low-health retreat and ally protection.

use behavior_tree::Behavior;

use crate::config::{FallbackConfig, HealthBasis};
use crate::math::{rotate_towards, yaw_towards};
use crate::nodes::Node;
use crate::{AgentId, World};

/// Retreats to a random nearby point when health drops below a threshold.
///
/// The retreat is rolled once per tick with probability `chance`. On success
/// the agent is sent to a navigable point within `radius` and attacking is
/// suppressed for the rest of the tick.
pub struct Fallback {
    agent: AgentId,
    chance: f32,
    radius: f32,
    threshold: f32,
    basis: HealthBasis,
}

impl Fallback {
    pub fn new(agent: AgentId, config: &FallbackConfig) -> Self {
        Self {
            agent,
            chance: config.chance,
            radius: config.radius,
            threshold: config.threshold,
            basis: config.basis,
        }
    }
}

impl Behavior<World> for Fallback {
    fn evaluate(&mut self, world: &mut World) -> bool {
        let (position, health) = match world.body(self.agent) {
            Some(body) => (body.pose.position, body.health),
            None => return false,
        };

        let limit = match self.basis {
            HealthBasis::Current => self.threshold * health.current,
            HealthBasis::Maximum => self.threshold * health.maximum,
        };
        if health.current > limit || !world.roll(self.chance) {
            return false;
        }

        let Some(retreat) = world.sample_navigable_point(position, self.radius) else {
            return false;
        };
        let Some(board) = world.board_mut(self.agent) else {
            return false;
        };
        board.nav_mut().set_destination(retreat);
        board.nav_mut().resume();
        board.animator_mut().set_walking(true);
        board.set_can_attack(false);

        tracing::debug!("{} falling back to {:?}", self.agent, retreat);
        true
    }

    fn blackboard(&self) -> AgentId {
        self.agent
    }
}

/// Records the lowest-health living ally in the agent's room.
///
/// Always returns `false` so the protection selector moves on to acting.
pub struct FindMostVulnerable {
    agent: AgentId,
}

impl FindMostVulnerable {
    pub fn new(agent: AgentId) -> Self {
        Self { agent }
    }
}

impl Behavior<World> for FindMostVulnerable {
    fn evaluate(&mut self, world: &mut World) -> bool {
        let weakest = world
            .living_allies(self.agent)
            .filter_map(|ally| world.body(ally).map(|body| (ally, body.health.current)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(ally, _)| ally);

        if let Some(board) = world.board_mut(self.agent) {
            board.set_most_vulnerable(weakest);
        }
        false
    }

    fn blackboard(&self) -> AgentId {
        self.agent
    }
}

/// Stands between the target and the recorded ally, facing the target.
pub struct ProtectVulnerable {
    agent: AgentId,
    turn_speed: f32,
}

impl ProtectVulnerable {
    pub fn new(agent: AgentId, turn_speed: f32) -> Self {
        Self { agent, turn_speed }
    }
}

impl Behavior<World> for ProtectVulnerable {
    fn evaluate(&mut self, world: &mut World) -> bool {
        let Some(ally) = world.board(self.agent).and_then(|board| board.most_vulnerable()) else {
            return false;
        };
        if !world.is_alive(ally) {
            return false;
        }
        let ally_position = match world.body(ally) {
            Some(body) => body.pose.position,
            None => return false,
        };
        let target = match world.target_of(self.agent) {
            Some(target) => target.position,
            None => return false,
        };
        let cover = ally_position.lerp(target, 0.5);
        let max_step = self.turn_speed * world.dt();

        let Some((body, board)) = world.agent_mut(self.agent) else {
            return false;
        };
        board.nav_mut().set_destination(cover);
        board.nav_mut().resume();
        board.animator_mut().set_walking(true);
        if let Some(facing) = yaw_towards(body.pose.position, target) {
            body.pose.yaw = rotate_towards(body.pose.yaw, facing, max_step);
        }

        tracing::trace!("{} covering {} at {:?}", self.agent, ally, cover);
        true
    }

    fn blackboard(&self) -> AgentId {
        self.agent
    }
}

/// Protects the weakest ally while the agent can protect and has allies.
///
/// # Returns
///
/// - `false` if the agent cannot protect or no living ally shares its room
/// - otherwise `protect`'s result, after `find` has refreshed the ally
pub struct ProtectionSelector {
    agent: AgentId,
    find: Node,
    protect: Node,
}

impl ProtectionSelector {
    pub fn new(agent: AgentId, find: Node, protect: Node) -> Self {
        Self {
            agent,
            find,
            protect,
        }
    }

    /// The default pairing of [`FindMostVulnerable`] and [`ProtectVulnerable`].
    pub fn standard(agent: AgentId, turn_speed: f32) -> Self {
        Self::new(
            agent,
            Box::new(FindMostVulnerable::new(agent)),
            Box::new(ProtectVulnerable::new(agent, turn_speed)),
        )
    }
}

impl Behavior<World> for ProtectionSelector {
    fn evaluate(&mut self, world: &mut World) -> bool {
        let can_protect = world
            .board(self.agent)
            .is_some_and(|board| board.can_protect());
        if !can_protect || world.living_allies(self.agent).next().is_none() {
            return false;
        }

        if self.find.evaluate(world) {
            return true;
        }
        self.protect.evaluate(world)
    }

    fn blackboard(&self) -> AgentId {
        self.agent
    }
}
