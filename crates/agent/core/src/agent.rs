//! Tick driver.
//!
//! [`Simulation`] owns the [`World`] and one [`Agent`] per spawned body, and
//! advances them in lockstep: perception first, then exactly one tree
//! evaluation per agent per tick.

use behavior_tree::BehaviorTree;

use crate::config::{AgentConfig, ConfigError};
use crate::error::WorldError;
use crate::nodes::Node;
use crate::perception::Perception;
use crate::presets;
use crate::world::{SpawnParams, stale_agent};
use crate::{AgentId, World};

/// Decision-making parts of one agent. Its state lives in the [`World`].
pub struct Agent {
    id: AgentId,
    tree: BehaviorTree<World>,
    perception: Perception,
}

impl Agent {
    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn perception(&self) -> &Perception {
        &self.perception
    }

    pub fn perception_mut(&mut self) -> &mut Perception {
        &mut self.perception
    }
}

pub struct Simulation {
    world: World,
    agents: Vec<Agent>,
}

impl Simulation {
    pub fn new(world: World) -> Self {
        Self {
            world,
            agents: Vec::new(),
        }
    }

    /// Validates `config`, then spawns an agent running its archetype's
    /// preset tree.
    pub fn spawn(
        &mut self,
        config: &AgentConfig,
        params: SpawnParams,
    ) -> Result<AgentId, ConfigError> {
        config.validate()?;
        Ok(self.spawn_with(config, params, |id| presets::root(id, config)))
    }

    /// Spawns an agent running a custom tree produced by `build`.
    pub fn spawn_with(
        &mut self,
        config: &AgentConfig,
        params: SpawnParams,
        build: impl FnOnce(AgentId) -> Node,
    ) -> AgentId {
        let perception = Perception::from_config(config, params.target);
        let id = self.world.spawn_agent(config, params);
        self.agents.push(Agent {
            id,
            tree: BehaviorTree::new(build(id)),
            perception,
        });
        id
    }

    pub fn despawn(&mut self, id: AgentId) -> Result<(), WorldError> {
        self.world.despawn_agent(id)?;
        self.agents.retain(|agent| agent.id != id);
        Ok(())
    }

    /// Advances every agent by `dt` seconds.
    ///
    /// Returns how many trees claimed the tick.
    pub fn tick(&mut self, dt: f32) -> usize {
        self.world.begin_tick(dt);

        let mut active = 0;
        for agent in &mut self.agents {
            if self.world.is_alive(agent.id) {
                agent.perception.tick(&mut self.world, agent.id);
            }
            if agent.tree.evaluate(&mut self.world) {
                active += 1;
            }
        }

        tracing::trace!(
            "Tick {}: {}/{} agents active",
            self.world.tick(),
            active,
            self.agents.len()
        );
        active
    }

    /// Ends a stun and re-arms the agent's detectors.
    pub fn recover(&mut self, id: AgentId) -> Result<(), WorldError> {
        self.world.set_stunned(id, false)?;
        self.agent_mut(id)?.perception.rearm();
        Ok(())
    }

    /// Forgets the target and re-arms the agent's detectors so it can be
    /// spotted again.
    pub fn lose_target(&mut self, id: AgentId) -> Result<(), WorldError> {
        self.world
            .board_mut(id)
            .ok_or_else(|| stale_agent(id))?
            .set_target_found(false);
        self.agent_mut(id)?.perception.rearm();
        tracing::debug!("{} lost its target", id);
        Ok(())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.id == id)
    }

    fn agent_mut(&mut self, id: AgentId) -> Result<&mut Agent, WorldError> {
        self.agents
            .iter_mut()
            .find(|agent| agent.id == id)
            .ok_or_else(|| stale_agent(id))
    }
}
