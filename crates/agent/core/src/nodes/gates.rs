//! Guards and activators.
//!
//! These are generic [`Gate`](behavior_tree::Gate)s with agent conditions. A
//! fail gate lets the parent selector fall through to the next branch; a
//! freeze gate keeps the tick so nothing below it takes over.

use behavior_tree::builder::{always_succeed, fail_gate, freeze_gate};

use crate::nodes::Node;
use crate::state::Blackboard;
use crate::{AgentId, World};

fn flag(world: &World, agent: AgentId, test: impl Fn(&Blackboard) -> bool) -> bool {
    world.board(agent).is_some_and(test)
}

/// Yields while the agent is dead. A despawned agent counts as dead.
pub fn check_if_dead(agent: AgentId, child: Node) -> Node {
    fail_gate(
        agent,
        |world: &World, agent| flag(world, agent, |board| !board.is_dead()),
        child,
    )
}

/// Holds the tick without acting while the agent is stunned.
pub fn stun_gate(agent: AgentId, child: Node) -> Node {
    freeze_gate(
        agent,
        |world: &World, agent| !flag(world, agent, Blackboard::is_stunned),
        child,
    )
}

/// Holds the tick while shooting is suppressed (e.g. time is stopped).
pub fn shoot_gate(agent: AgentId, child: Node) -> Node {
    freeze_gate(
        agent,
        |world: &World, agent| flag(world, agent, Blackboard::can_shoot),
        child,
    )
}

/// Chase branch: yields until a target is found, freezes while shooting is
/// suppressed, otherwise runs `chase` and claims the tick.
pub fn chase_target_activator(agent: AgentId, chase: Node) -> Node {
    shoot_gate(
        agent,
        fail_gate(
            agent,
            |world: &World, agent| flag(world, agent, Blackboard::target_found),
            always_succeed(chase),
        ),
    )
}

/// Patrol branch: claims the tick for a patroller that has not found a target.
pub fn patrol_activator(agent: AgentId, patrol: Node) -> Node {
    fail_gate(
        agent,
        |world: &World, agent| {
            flag(world, agent, |board| {
                board.is_patroller() && !board.target_found()
            })
        },
        always_succeed(patrol),
    )
}

/// Idle branch: claims the tick for a non-patroller that has not found a target.
pub fn idle_activator(agent: AgentId, idle: Node) -> Node {
    fail_gate(
        agent,
        |world: &World, agent| {
            flag(world, agent, |board| {
                !board.is_patroller() && !board.target_found()
            })
        },
        always_succeed(idle),
    )
}
