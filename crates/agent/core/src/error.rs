//! Errors surfaced to the host when it hands the world a stale handle.
//!
//! Behavior nodes never fail: a missing agent or target makes the node yield.
//! Host-facing operations (damage, stun, teleport, despawn) report stale
//! handles instead so integration bugs do not go unnoticed.

use crate::state::{AgentId, TargetId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("unknown or despawned agent {0}")]
    UnknownAgent(AgentId),

    #[error("unknown or removed target {0}")]
    UnknownTarget(TargetId),
}
