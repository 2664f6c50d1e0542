//! Player time abilities applied to every agent in a room.
//!
//! Effects rewrite the agents' navigation speeds and animation playback rate
//! in place. Stopping time also clears `canShoot`, which makes the chase
//! branch freeze rather than fall through to patrol or idle.

use crate::{RoomId, World};

/// A room-wide time effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimeEffect {
    /// Scales speed, turning, acceleration and animation by `factor`.
    Slow { factor: f32 },
    /// Freezes movement and animation and suppresses shooting.
    Stop,
}

impl TimeEffect {
    fn factor(self) -> f32 {
        match self {
            TimeEffect::Slow { factor } => factor.max(0.0),
            TimeEffect::Stop => 0.0,
        }
    }

    /// Applies the effect to every agent registered in `room`.
    ///
    /// Stale registry entries are skipped. Returns the number of agents
    /// affected.
    pub fn apply(self, world: &mut World, room: RoomId) -> usize {
        let factor = self.factor();
        let members = world.rooms().agents_in_room(room).to_vec();

        let mut affected = 0;
        for agent in members {
            let Some(board) = world.board_mut(agent) else {
                continue;
            };
            board.nav_mut().scale_motion(factor);
            board.animator_mut().set_playback_speed(factor);
            if self == TimeEffect::Stop {
                board.set_can_shoot(false);
            }
            affected += 1;
        }

        tracing::info!("Applied {:?} to {} agents in {}", self, affected, room);
        affected
    }

    /// Lifts any time effect from `room`, restoring spawn speeds.
    pub fn release(world: &mut World, room: RoomId) -> usize {
        let members = world.rooms().agents_in_room(room).to_vec();

        let mut affected = 0;
        for agent in members {
            let Some(board) = world.board_mut(agent) else {
                continue;
            };
            board.nav_mut().restore_motion();
            board.animator_mut().set_playback_speed(1.0);
            board.set_can_shoot(true);
            affected += 1;
        }

        tracing::info!("Released time effects on {} agents in {}", affected, room);
        affected
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::config::AgentConfig;
    use crate::env::{ColliderSet, OpenGround};
    use crate::world::SpawnParams;

    fn room_of_three() -> (World, Vec<crate::AgentId>) {
        let mut world = World::new(ColliderSet::new(), OpenGround::new(), 9);
        let config = AgentConfig::default();
        let agents = (0..3)
            .map(|i| world.spawn_agent(&config, SpawnParams::new(Vec3::X * i as f32, RoomId(4))))
            .collect();
        (world, agents)
    }

    #[test]
    fn slow_scales_motion_and_animation() {
        let (mut world, agents) = room_of_three();

        assert_eq!(TimeEffect::Slow { factor: 0.5 }.apply(&mut world, RoomId(4)), 3);
        let board = world.board(agents[0]).unwrap();
        assert_eq!(board.nav().motion.speed, AgentConfig::DEFAULT_MOVE_SPEED * 0.5);
        assert_eq!(board.animator().playback_speed(), 0.5);
        assert!(board.can_shoot());
    }

    #[test]
    fn stop_suppresses_shooting_until_released() {
        let (mut world, agents) = room_of_three();
        TimeEffect::Stop.apply(&mut world, RoomId(4));
        assert!(agents.iter().all(|&a| !world.board(a).unwrap().can_shoot()));

        assert_eq!(TimeEffect::release(&mut world, RoomId(4)), 3);
        let board = world.board(agents[1]).unwrap();
        assert!(board.can_shoot());
        assert_eq!(board.nav().motion, board.nav().base_motion());
        assert_eq!(board.animator().playback_speed(), 1.0);
    }

    #[test]
    fn despawned_members_are_skipped() {
        let (mut world, agents) = room_of_three();
        world.despawn_agent(agents[2]).unwrap();

        assert_eq!(TimeEffect::Stop.apply(&mut world, RoomId(4)), 2);
        assert_eq!(TimeEffect::Stop.apply(&mut world, RoomId(5)), 0);
    }
}
