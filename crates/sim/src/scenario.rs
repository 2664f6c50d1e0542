//! Demo arena: a player circling a walled yard guarded by every archetype.
//!
//! The runner plays the host engine's part. After each simulation tick it
//! moves agents along their navigation requests and lets the player take a
//! shot at the nearest agent now and then.

use std::f32::consts::{FRAC_PI_2, PI};

use agent_content::ArchetypeCatalog;
use agent_core::math::planar_distance;
use agent_core::{
    AgentId, ColliderSet, Layers, OpenGround, RoomId, Shape, Simulation, SpawnParams, TargetId,
    TimeEffect, World,
};
use anyhow::{Context, Result};
use glam::{Vec2, Vec3};

const YARD: RoomId = RoomId(0);
const BARRACKS: RoomId = RoomId(1);

const PLAYER_ORBIT: f32 = 14.0;
const PLAYER_ANGULAR_SPEED: f32 = 0.3;
const PLAYER_RANGE: f32 = 10.0;
const PLAYER_DAMAGE: f32 = 25.0;
/// Ticks between player shots.
const PLAYER_FIRE_INTERVAL: u64 = 10;

/// Summary of one agent at the end of a run.
#[derive(Clone, Debug)]
pub struct AgentReport {
    pub name: String,
    pub id: AgentId,
    pub alive: bool,
    pub health: f32,
    pub shots: u64,
    pub target_found: bool,
}

pub struct Arena {
    sim: Simulation,
    target: TargetId,
    roster: Vec<(String, AgentId)>,
    elapsed: f32,
}

impl Arena {
    /// Builds the yard, resolving each guard's tuning from `catalog`.
    pub fn build(catalog: &ArchetypeCatalog, seed: u64) -> Result<Self> {
        let mut colliders = ColliderSet::new();
        let player_at = player_position(0.0);
        let player = colliders.insert(Shape::Sphere { radius: 0.5 }, player_at, Layers::PLAYER);
        colliders.insert(
            Shape::Box {
                half_extents: Vec3::new(4.0, 2.0, 0.5),
            },
            Vec3::new(0.0, 1.0, 6.0),
            Layers::ENVIRONMENT,
        );
        colliders.insert(
            Shape::Box {
                half_extents: Vec3::new(0.5, 2.0, 4.0),
            },
            Vec3::new(-6.0, 1.0, 0.0),
            Layers::ENVIRONMENT,
        );

        let guards = [
            ("grunt", Vec3::new(-10.0, 0.0, -10.0), 0.0, YARD, Vec::new()),
            (
                "patroller",
                Vec3::new(8.0, 0.0, -8.0),
                -FRAC_PI_2,
                YARD,
                vec![
                    Vec3::new(8.0, 0.0, -8.0),
                    Vec3::new(-8.0, 0.0, -8.0),
                    Vec3::new(-8.0, 0.0, 8.0),
                    Vec3::new(8.0, 0.0, 8.0),
                ],
            ),
            ("sentry", Vec3::new(0.0, 0.0, 0.0), 0.0, YARD, Vec::new()),
            ("boss", Vec3::new(12.0, 0.0, 12.0), PI, BARRACKS, Vec::new()),
            ("support", Vec3::new(10.0, 0.0, 14.0), PI, BARRACKS, Vec::new()),
            ("grunt", Vec3::new(14.0, 0.0, 10.0), PI, BARRACKS, Vec::new()),
        ];

        let mut agent_colliders = Vec::with_capacity(guards.len());
        for (_, position, ..) in &guards {
            agent_colliders.push(colliders.insert(
                Shape::Sphere { radius: 0.4 },
                *position,
                Layers::AGENTS,
            ));
        }

        let navmesh = OpenGround::bounded(Vec2::splat(-20.0), Vec2::splat(20.0));
        let mut world = World::new(colliders, navmesh, seed);
        let target = world.add_target(player, player_at);
        let mut sim = Simulation::new(world);

        let mut roster = Vec::with_capacity(guards.len());
        for ((name, position, yaw, room, route), collider) in
            guards.into_iter().zip(agent_colliders)
        {
            let config = catalog
                .resolve(name)
                .with_context(|| format!("Unknown archetype '{}'", name))?;
            let params = SpawnParams::new(position, room)
                .with_yaw(yaw)
                .with_collider(collider)
                .with_target(target)
                .with_waypoints(route);
            let id = sim
                .spawn(&config, params)
                .with_context(|| format!("Failed to spawn '{}'", name))?;
            roster.push((name.to_string(), id));
        }

        Ok(Self {
            sim,
            target,
            roster,
            elapsed: 0.0,
        })
    }

    /// Advances the arena by one tick of `dt` seconds.
    pub fn step(&mut self, dt: f32) -> Result<usize> {
        self.elapsed += dt;
        let player_at = player_position(self.elapsed);
        self.sim
            .world_mut()
            .set_target_position(self.target, player_at)?;

        let active = self.sim.tick(dt);

        self.move_agents(dt)?;
        if self.sim.world().tick() % PLAYER_FIRE_INTERVAL == 0 {
            self.player_fires(player_at)?;
        }
        Ok(active)
    }

    /// Slows time in every room.
    pub fn slow_time(&mut self, factor: f32) {
        for room in [YARD, BARRACKS] {
            TimeEffect::Slow { factor }.apply(self.sim.world_mut(), room);
        }
    }

    pub fn report(&self) -> Vec<AgentReport> {
        let world = self.sim.world();
        self.roster
            .iter()
            .filter_map(|(name, id)| {
                let body = world.body(*id)?;
                let board = world.board(*id)?;
                Some(AgentReport {
                    name: name.clone(),
                    id: *id,
                    alive: world.is_alive(*id),
                    health: body.health.current,
                    shots: board.weapon().shots(),
                    target_found: board.target_found(),
                })
            })
            .collect()
    }

    /// Host-side movement: walk each agent toward its nav destination.
    fn move_agents(&mut self, dt: f32) -> Result<()> {
        let world = self.sim.world_mut();
        let ids: Vec<AgentId> = world.agent_ids().collect();
        for id in ids {
            let (Some(body), Some(board)) = (world.body(id), world.board(id)) else {
                continue;
            };
            let nav = board.nav();
            let Some(destination) = nav.destination() else {
                continue;
            };
            if nav.is_stopped() || !world.is_alive(id) {
                continue;
            }

            let from = body.pose.position;
            let step = nav.motion.speed * dt;
            let offset = Vec3::new(destination.x - from.x, 0.0, destination.z - from.z);
            let next = if offset.length() <= step {
                Vec3::new(destination.x, from.y, destination.z)
            } else {
                from + offset.normalize() * step
            };
            world.set_agent_position(id, next)?;
        }
        Ok(())
    }

    fn player_fires(&mut self, player_at: Vec3) -> Result<()> {
        let world = self.sim.world_mut();
        let nearest = world
            .agent_ids()
            .filter(|&id| world.is_alive(id))
            .filter_map(|id| {
                let distance = planar_distance(world.body(id)?.pose.position, player_at);
                (distance <= PLAYER_RANGE).then_some((id, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((id, _)) = nearest {
            let killed = world.apply_damage(id, PLAYER_DAMAGE)?;
            tracing::info!(
                "Player hit {}{}",
                id,
                if killed { " (killed)" } else { "" }
            );
        }
        Ok(())
    }
}

fn player_position(elapsed: f32) -> Vec3 {
    let angle = elapsed * PLAYER_ANGULAR_SPEED;
    Vec3::new(angle.cos() * PLAYER_ORBIT, 0.0, angle.sin() * PLAYER_ORBIT)
}

#[cfg(test)]
mod tests {
    use agent_content::ArchetypeLoader;

    use super::*;

    #[test]
    fn arena_spawns_every_guard() {
        let catalog = ArchetypeLoader::embedded().unwrap();
        let arena = Arena::build(&catalog, 0).unwrap();

        let report = arena.report();
        assert_eq!(report.len(), 6);
        assert!(report.iter().all(|agent| agent.alive && agent.shots == 0));
    }

    #[test]
    fn unknown_guard_is_an_error() {
        let arena = Arena::build(&ArchetypeCatalog::new(), 0);
        // Built-in archetypes still resolve, but "sentry" only exists in the catalog.
        assert!(arena.is_err());
    }

    #[test]
    fn same_seed_same_outcome() {
        let catalog = ArchetypeLoader::embedded().unwrap();
        let run = || {
            let mut arena = Arena::build(&catalog, 99).unwrap();
            for _ in 0..200 {
                arena.step(0.1).unwrap();
            }
            arena
                .report()
                .into_iter()
                .map(|agent| (agent.health, agent.shots, agent.target_found))
                .collect::<Vec<_>>()
        };

        assert_eq!(run(), run());
    }
}
