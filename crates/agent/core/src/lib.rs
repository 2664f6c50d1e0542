//! Per-agent decision engine for real-time enemy AI.
//!
//! `agent-core` evaluates one two-state behavior tree per agent per tick. All
//! agent state lives in the [`World`] arena and is addressed by [`AgentId`];
//! movement, animation and shooting are left as intent records on each
//! agent's [`Blackboard`] for the host engine to consume. [`Simulation`]
//! drives perception and tree evaluation in lockstep.
pub mod abilities;
pub mod agent;
pub mod config;
pub mod env;
pub mod error;
pub mod math;
pub mod nodes;
pub mod perception;
pub mod presets;
pub mod state;
pub mod world;

pub use abilities::TimeEffect;
pub use agent::{Agent, Simulation};
pub use config::{AgentConfig, Archetype, ConfigError, DetectorConfig, FallbackConfig, HealthBasis};
pub use env::{
    ColliderId, ColliderSet, Layers, NavMesh, OpenGround, RayHit, RoomRegistry, Shape,
    SpatialQuery, line_of_sight,
};
pub use error::WorldError;
pub use nodes::Node;
pub use perception::{Detector, DetectorState, Perception};
pub use state::{
    AgentBody, AgentFlags, AgentId, Animator, Blackboard, FireCallback, Health, Motion, NavAgent,
    Pose, RoomId, Target, TargetId, Weapon,
};
pub use world::{SpawnParams, World};
