use behavior_tree::Behavior;

use crate::{AgentId, World};

/// Stands still. Always claims the tick while the agent exists.
pub struct Idle {
    agent: AgentId,
}

impl Idle {
    pub fn new(agent: AgentId) -> Self {
        Self { agent }
    }
}

impl Behavior<World> for Idle {
    fn evaluate(&mut self, world: &mut World) -> bool {
        let Some(board) = world.board_mut(self.agent) else {
            return false;
        };
        board.nav_mut().stop();
        board.animator_mut().set_walking(false);
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

    #[test]
    fn idle_stops_and_claims_the_tick() {
        let mut world = World::new(ColliderSet::new(), OpenGround::new(), 0);
        let agent = world.spawn_agent(
            &AgentConfig::default(),
            SpawnParams::new(Vec3::ZERO, RoomId(0)),
        );
        let board = world.board_mut(agent).unwrap();
        board.nav_mut().resume();
        board.animator_mut().set_walking(true);

        assert!(Idle::new(agent).evaluate(&mut world));
        let board = world.board(agent).unwrap();
        assert!(board.nav().is_stopped());
        assert!(!board.animator().is_walking());
    }

    #[test]
    fn despawned_agent_yields() {
        let mut world = World::new(ColliderSet::new(), OpenGround::new(), 0);
        let agent = world.spawn_agent(
            &AgentConfig::default(),
            SpawnParams::new(Vec3::ZERO, RoomId(0)),
        );
        world.despawn_agent(agent).unwrap();

        assert!(!Idle::new(agent).evaluate(&mut world));
    }
}
