//! Agent-specific behavior tree nodes.
//!
//! Every node holds the [`AgentId`](crate::AgentId) of the agent it belongs to
//! and reads or writes that agent's blackboard through the [`World`]. Nodes
//! are grouped by the branch of the preset tree they serve:
//!
//! - `gates`: guards and activators built from generic decorators
//! - `chase`: navigate-to-target, attack, and the selector sequencing them
//! - `patrol`: waypoint walking with idle pauses
//! - `support`: low-health fallback and ally protection
//! - `idle`: the do-nothing branch
//!
//! Nodes never fail loudly: a stale agent, target or ally makes them yield.

pub mod chase;
pub mod gates;
pub mod idle;
pub mod patrol;
pub mod support;

pub use chase::{AttackTarget, ChaseAttackSelector, NavigateToTarget};
pub use gates::{
    chase_target_activator, check_if_dead, idle_activator, patrol_activator, shoot_gate, stun_gate,
};
pub use idle::Idle;
pub use patrol::{ArrivalActivator, IdleOnArrival, NavigateToWaypoint};
pub use support::{Fallback, FindMostVulnerable, ProtectVulnerable, ProtectionSelector};

use behavior_tree::Behavior;

use crate::World;

/// A boxed node evaluated against the [`World`].
pub type Node = Box<dyn Behavior<World>>;
