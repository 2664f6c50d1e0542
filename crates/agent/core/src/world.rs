//! Arena owning every agent's body and blackboard.
//!
//! The [`World`] is the context behavior trees are evaluated against. Nodes
//! hold an [`AgentId`] and look their blackboard up here, so every mutation
//! is traceable to one arena and no blackboard is ever shared between agents.

use behavior_tree::Context;
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::AgentConfig;
use crate::env::{ColliderId, NavMesh, RoomRegistry, SpatialQuery};
use crate::error::WorldError;
use crate::state::{AgentBody, AgentId, Blackboard, Health, Pose, RoomId, Target, TargetId};

/// Where and how a new agent enters the world.
#[derive(Clone, Debug, Default)]
pub struct SpawnParams {
    pub pose: Pose,
    pub room: RoomId,
    pub collider: Option<ColliderId>,
    pub target: Option<TargetId>,
    /// Patrol route. A non-empty route marks the agent as a patroller.
    pub waypoints: Vec<Vec3>,
}

impl SpawnParams {
    pub fn new(position: Vec3, room: RoomId) -> Self {
        Self {
            pose: Pose::new(position, 0.0),
            room,
            ..Self::default()
        }
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.pose.yaw = yaw;
        self
    }

    pub fn with_collider(mut self, collider: ColliderId) -> Self {
        self.collider = Some(collider);
        self
    }

    pub fn with_target(mut self, target: TargetId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_waypoints(mut self, waypoints: Vec<Vec3>) -> Self {
        self.waypoints = waypoints;
        self
    }
}

struct AgentSlot {
    body: AgentBody,
    board: Blackboard,
}

/// All per-agent state plus the shared services nodes query.
pub struct World {
    agents: Vec<Option<AgentSlot>>,
    targets: Vec<Option<Target>>,
    rooms: RoomRegistry,
    spatial: Box<dyn SpatialQuery>,
    navmesh: Box<dyn NavMesh>,
    rng: ChaCha8Rng,
    dt: f32,
    tick: u64,
}

impl Context for World {
    type Blackboard = AgentId;
}

impl World {
    /// Creates an empty world backed by the given query services.
    ///
    /// `seed` drives every random roll made by nodes, so a fixed seed and a
    /// fixed tick sequence reproduce the same decisions.
    pub fn new(
        spatial: impl SpatialQuery + 'static,
        navmesh: impl NavMesh + 'static,
        seed: u64,
    ) -> Self {
        Self {
            agents: Vec::new(),
            targets: Vec::new(),
            rooms: RoomRegistry::new(),
            spatial: Box::new(spatial),
            navmesh: Box::new(navmesh),
            rng: ChaCha8Rng::seed_from_u64(seed),
            dt: 0.0,
            tick: 0,
        }
    }

    // ========================================================================
    // Tick bookkeeping
    // ========================================================================

    /// Seconds simulated by the current tick.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Number of ticks started so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Starts a new tick lasting `dt` seconds.
    ///
    /// `canAttack` only ever stays cleared for the tick it was cleared on, so
    /// it is restored here for every living agent.
    pub fn begin_tick(&mut self, dt: f32) {
        self.dt = dt.max(0.0);
        self.tick += 1;
        for slot in self.agents.iter_mut().flatten() {
            if !slot.board.is_dead() {
                slot.board.set_can_attack(true);
            }
        }
    }

    // ========================================================================
    // Agents
    // ========================================================================

    /// Adds an agent, creating its blackboard and registering it in its room.
    pub fn spawn_agent(&mut self, config: &AgentConfig, params: SpawnParams) -> AgentId {
        let id = AgentId(self.agents.len() as u32);

        let mut board = Blackboard::new(id, config);
        board.set_target(params.target);
        board.set_patroller(!params.waypoints.is_empty());
        board.set_waypoints(params.waypoints);

        let body = AgentBody {
            pose: params.pose,
            health: Health::full(config.max_health),
            room: params.room,
            collider: params.collider,
        };

        if let Some(collider) = body.collider {
            self.spatial.sync_collider(collider, body.pose.position);
        }
        self.rooms.register(params.room, id);
        self.agents.push(Some(AgentSlot { body, board }));

        tracing::info!(
            "Spawned {} ({}) in {} at {:?}",
            id,
            config.archetype,
            params.room,
            params.pose.position
        );
        id
    }

    /// Removes an agent. Its room entry is left behind until
    /// [`World::prune_rooms`]; room readers skip it in the meantime.
    pub fn despawn_agent(&mut self, id: AgentId) -> Result<(), WorldError> {
        let slot = self
            .agents
            .get_mut(id.0 as usize)
            .and_then(Option::take)
            .ok_or_else(|| stale_agent(id))?;
        tracing::info!("Despawned {} from {}", id, slot.body.room);
        Ok(())
    }

    /// Drops room entries that no longer refer to a live agent.
    pub fn prune_rooms(&mut self) {
        let agents = &self.agents;
        self.rooms.retain(|id| {
            agents
                .get(id.0 as usize)
                .is_some_and(|slot| slot.is_some())
        });
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.slot(id).is_some()
    }

    /// Ids of every agent currently in the world.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| AgentId(index as u32))
    }

    pub fn body(&self, id: AgentId) -> Option<&AgentBody> {
        self.slot(id).map(|slot| &slot.body)
    }

    pub fn body_mut(&mut self, id: AgentId) -> Option<&mut AgentBody> {
        self.slot_mut(id).map(|slot| &mut slot.body)
    }

    pub fn board(&self, id: AgentId) -> Option<&Blackboard> {
        self.slot(id).map(|slot| &slot.board)
    }

    pub fn board_mut(&mut self, id: AgentId) -> Option<&mut Blackboard> {
        self.slot_mut(id).map(|slot| &mut slot.board)
    }

    /// Body and blackboard of one agent, borrowed together.
    pub fn agent_mut(&mut self, id: AgentId) -> Option<(&mut AgentBody, &mut Blackboard)> {
        self.slot_mut(id)
            .map(|slot| (&mut slot.body, &mut slot.board))
    }

    /// Whether `id` is present and not dead.
    pub fn is_alive(&self, id: AgentId) -> bool {
        self.slot(id)
            .is_some_and(|slot| !slot.board.is_dead() && !slot.body.health.is_depleted())
    }

    /// Living agents sharing `id`'s room, excluding `id` itself.
    ///
    /// Stale registry entries (despawned or dead agents) are skipped.
    pub fn living_allies(&self, id: AgentId) -> impl Iterator<Item = AgentId> + '_ {
        let members = self
            .body(id)
            .map(|body| self.rooms.agents_in_room(body.room))
            .unwrap_or(&[]);
        members
            .iter()
            .copied()
            .filter(move |&ally| ally != id && self.is_alive(ally))
    }

    /// Teleports an agent and mirrors the move into the spatial backend.
    pub fn set_agent_position(&mut self, id: AgentId, position: Vec3) -> Result<(), WorldError> {
        let body = self.body_mut(id).ok_or_else(|| stale_agent(id))?;
        body.pose.position = position;
        if let Some(collider) = body.collider {
            self.spatial.sync_collider(collider, position);
        }
        Ok(())
    }

    pub fn set_agent_yaw(&mut self, id: AgentId, yaw: f32) -> Result<(), WorldError> {
        let body = self.body_mut(id).ok_or_else(|| stale_agent(id))?;
        body.pose.yaw = yaw;
        Ok(())
    }

    /// Applies damage. Returns `true` if this hit killed the agent.
    ///
    /// A living agent that gets hit knows where the shot came from: its
    /// `targetFound` flag is raised even if no detector saw the shooter.
    pub fn apply_damage(&mut self, id: AgentId, amount: f32) -> Result<bool, WorldError> {
        let (body, board) = self.agent_mut(id).ok_or_else(|| stale_agent(id))?;
        if board.is_dead() {
            return Ok(false);
        }

        body.health.current = (body.health.current - amount.max(0.0)).max(0.0);
        if body.health.is_depleted() {
            board.set_dead(true);
            board.set_can_attack(false);
            board.nav_mut().stop();
            board.animator_mut().set_walking(false);
            tracing::debug!("{} killed", id);
            return Ok(true);
        }

        if !board.target_found() {
            tracing::debug!("{} alerted by damage", id);
        }
        board.set_target_found(true);
        Ok(false)
    }

    /// Stuns or releases an agent. A stunned agent stops in place.
    pub fn set_stunned(&mut self, id: AgentId, stunned: bool) -> Result<(), WorldError> {
        let board = self.board_mut(id).ok_or_else(|| stale_agent(id))?;
        board.set_stunned(stunned);
        board.animator_mut().set_stunned(stunned);
        if stunned {
            board.nav_mut().stop();
            board.animator_mut().set_walking(false);
        }
        Ok(())
    }

    fn slot(&self, id: AgentId) -> Option<&AgentSlot> {
        self.agents.get(id.0 as usize).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, id: AgentId) -> Option<&mut AgentSlot> {
        self.agents.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    // ========================================================================
    // Targets
    // ========================================================================

    pub fn add_target(&mut self, collider: ColliderId, position: Vec3) -> TargetId {
        let id = TargetId(self.targets.len() as u32);
        self.spatial.sync_collider(collider, position);
        self.targets.push(Some(Target { collider, position }));
        id
    }

    pub fn remove_target(&mut self, id: TargetId) -> Result<(), WorldError> {
        self.targets
            .get_mut(id.0 as usize)
            .and_then(Option::take)
            .map(|_| ())
            .ok_or_else(|| stale_target(id))
    }

    pub fn target(&self, id: TargetId) -> Option<&Target> {
        self.targets.get(id.0 as usize).and_then(Option::as_ref)
    }

    /// The target `agent`'s blackboard refers to, if both still exist.
    pub fn target_of(&self, agent: AgentId) -> Option<&Target> {
        self.board(agent)?.target().and_then(|id| self.target(id))
    }

    pub fn set_target_position(&mut self, id: TargetId, position: Vec3) -> Result<(), WorldError> {
        let target = self
            .targets
            .get_mut(id.0 as usize)
            .and_then(Option::as_mut)
            .ok_or_else(|| stale_target(id))?;
        target.position = position;
        self.spatial.sync_collider(target.collider, position);
        Ok(())
    }

    // ========================================================================
    // Shared services
    // ========================================================================

    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    pub fn spatial(&self) -> &dyn SpatialQuery {
        self.spatial.as_ref()
    }

    /// Moves any collider (e.g. a door or a pushed crate) in the backend.
    pub fn move_collider(&mut self, collider: ColliderId, position: Vec3) {
        self.spatial.sync_collider(collider, position);
    }

    /// A random navigable point within `radius` of `center`.
    pub fn sample_navigable_point(&mut self, center: Vec3, radius: f32) -> Option<Vec3> {
        self.navmesh.sample_point(center, radius, &mut self.rng)
    }

    /// Returns `true` with probability `chance`.
    pub fn roll(&mut self, chance: f32) -> bool {
        self.rng.r#gen::<f32>() < chance
    }
}

pub(crate) fn stale_agent(id: AgentId) -> WorldError {
    tracing::warn!("Stale agent handle {}", id);
    WorldError::UnknownAgent(id)
}

fn stale_target(id: TargetId) -> WorldError {
    tracing::warn!("Stale target handle {}", id);
    WorldError::UnknownTarget(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ColliderSet, OpenGround};

    fn world() -> World {
        World::new(ColliderSet::new(), OpenGround::new(), 42)
    }

    #[test]
    fn spawn_creates_one_blackboard_per_agent() {
        let mut world = world();
        let config = AgentConfig::default();
        let a = world.spawn_agent(&config, SpawnParams::new(Vec3::ZERO, RoomId(1)));
        let b = world.spawn_agent(&config, SpawnParams::new(Vec3::X, RoomId(1)));

        assert_ne!(a, b);
        assert_eq!(world.board(a).map(Blackboard::owner), Some(a));
        assert_eq!(world.board(b).map(Blackboard::owner), Some(b));
        assert_eq!(world.rooms().agents_in_room(RoomId(1)), &[a, b]);
    }

    #[test]
    fn waypoints_make_a_patroller() {
        let mut world = world();
        let config = AgentConfig::default();
        let guard = world.spawn_agent(
            &config,
            SpawnParams::new(Vec3::ZERO, RoomId(1)).with_waypoints(vec![Vec3::X, Vec3::Z]),
        );
        let idler = world.spawn_agent(&config, SpawnParams::new(Vec3::ZERO, RoomId(1)));

        assert!(world.board(guard).unwrap().is_patroller());
        assert!(!world.board(idler).unwrap().is_patroller());
    }

    #[test]
    fn living_allies_skip_self_dead_and_despawned() {
        let mut world = world();
        let config = AgentConfig::default();
        let me = world.spawn_agent(&config, SpawnParams::new(Vec3::ZERO, RoomId(1)));
        let dead = world.spawn_agent(&config, SpawnParams::new(Vec3::ZERO, RoomId(1)));
        let gone = world.spawn_agent(&config, SpawnParams::new(Vec3::ZERO, RoomId(1)));
        let ally = world.spawn_agent(&config, SpawnParams::new(Vec3::ZERO, RoomId(1)));
        let elsewhere = world.spawn_agent(&config, SpawnParams::new(Vec3::ZERO, RoomId(2)));

        assert_eq!(world.apply_damage(dead, 1_000.0), Ok(true));
        world.despawn_agent(gone).unwrap();

        let allies: Vec<_> = world.living_allies(me).collect();
        assert_eq!(allies, vec![ally]);
        assert!(!allies.contains(&elsewhere));

        // Stale entry is still registered until pruned.
        assert_eq!(world.rooms().agents_in_room(RoomId(1)).len(), 4);
        world.prune_rooms();
        assert_eq!(world.rooms().agents_in_room(RoomId(1)).len(), 3);
    }

    #[test]
    fn damage_alerts_then_kills() {
        let mut world = world();
        let id = world.spawn_agent(
            &AgentConfig::default(),
            SpawnParams::new(Vec3::ZERO, RoomId(0)),
        );

        assert_eq!(world.apply_damage(id, 40.0), Ok(false));
        assert!(world.board(id).unwrap().target_found());

        assert_eq!(world.apply_damage(id, 60.0), Ok(true));
        assert!(world.board(id).unwrap().is_dead());
        assert!(!world.is_alive(id));

        // Already dead: further hits change nothing.
        assert_eq!(world.apply_damage(id, 10.0), Ok(false));
    }

    #[test]
    fn begin_tick_restores_attack_for_the_living_only() {
        let mut world = world();
        let config = AgentConfig::default();
        let alive = world.spawn_agent(&config, SpawnParams::new(Vec3::ZERO, RoomId(0)));
        let dead = world.spawn_agent(&config, SpawnParams::new(Vec3::ZERO, RoomId(0)));
        world.apply_damage(dead, 1_000.0).unwrap();
        world.board_mut(alive).unwrap().set_can_attack(false);

        world.begin_tick(0.1);

        assert!(world.board(alive).unwrap().can_attack());
        assert!(!world.board(dead).unwrap().can_attack());
        assert_eq!(world.tick(), 1);
    }

    #[test]
    fn stale_handles_are_reported() {
        let mut world = world();
        assert_eq!(
            world.apply_damage(AgentId(9), 1.0),
            Err(WorldError::UnknownAgent(AgentId(9)))
        );
        assert_eq!(
            world.set_target_position(TargetId(0), Vec3::ZERO),
            Err(WorldError::UnknownTarget(TargetId(0)))
        );
    }
}
