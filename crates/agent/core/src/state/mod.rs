//! Per-agent state: identifiers, bodies, blackboards and collaborator handles.
//!
//! Everything here is plain data. Behavior nodes and host callbacks mutate it
//! through the [`World`](crate::World) arena.
pub mod blackboard;
pub mod common;
pub mod handles;

pub use blackboard::{AgentFlags, Blackboard};
pub use common::{AgentBody, AgentId, Health, Pose, RoomId, Target, TargetId};
pub use handles::{Animator, FireCallback, Motion, NavAgent, Weapon};
