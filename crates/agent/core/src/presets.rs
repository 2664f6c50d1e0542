//! Complete behavior trees for agent archetypes.
//!
//! Every archetype shares one layout; the [`AgentConfig`] decides which
//! optional branches are present:
//!
//! ```text
//! check_if_dead
//!   └─ stun_gate
//!       └─ Selector
//!           ├─ Fallback                      (config.fallback)
//!           ├─ protection_branch             (config.can_protect)
//!           ├─ chase_branch
//!           ├─ patrol_branch
//!           └─ idle_branch
//! ```
//!
//! Branches are tried top to bottom and the first to claim the tick wins.
//!
//! # Usage
//!
//! ```rust,ignore
//! let id = world.spawn_agent(&config, params);
//! let mut tree = presets::behavior_tree(id, &config);
//! tree.evaluate(&mut world);
//! ```

use behavior_tree::BehaviorTree;
use behavior_tree::builder::{fail_gate, selector, sequence};

use crate::config::AgentConfig;
use crate::nodes::{
    ArrivalActivator, ChaseAttackSelector, Fallback, Idle, IdleOnArrival, NavigateToWaypoint, Node,
    ProtectionSelector, chase_target_activator, check_if_dead, idle_activator, patrol_activator,
    stun_gate,
};
use crate::{AgentId, World};

/// Builds the full tree for `agent`.
pub fn behavior_tree(agent: AgentId, config: &AgentConfig) -> BehaviorTree<World> {
    BehaviorTree::new(root(agent, config))
}

/// The root node of [`behavior_tree`], for callers that wrap it further.
pub fn root(agent: AgentId, config: &AgentConfig) -> Node {
    let mut branches: Vec<Node> = Vec::with_capacity(5);

    if let Some(fallback) = &config.fallback {
        branches.push(Box::new(Fallback::new(agent, fallback)));
    }
    if config.can_protect {
        branches.push(protection_branch(agent, config));
    }
    branches.push(chase_branch(agent, config));
    branches.push(patrol_branch(agent, config));
    branches.push(idle_branch(agent));

    check_if_dead(agent, stun_gate(agent, selector(agent, branches)))
}

/// Shields the weakest ally once the target is known.
pub fn protection_branch(agent: AgentId, config: &AgentConfig) -> Node {
    fail_gate::<World, _>(
        agent,
        |world: &World, agent| world.board(agent).is_some_and(|board| board.target_found()),
        Box::new(ProtectionSelector::standard(agent, config.turn_speed)),
    )
}

/// Closes in on a found target and shoots once in clear range.
pub fn chase_branch(agent: AgentId, config: &AgentConfig) -> Node {
    chase_target_activator(
        agent,
        Box::new(ChaseAttackSelector::standard(agent, config.turn_speed)),
    )
}

/// Walks the waypoint route, pausing `idle_time` seconds at each stop.
pub fn patrol_branch(agent: AgentId, config: &AgentConfig) -> Node {
    patrol_activator(
        agent,
        sequence::<World>(
            agent,
            vec![
                Box::new(IdleOnArrival::new(agent, config.idle_time)),
                Box::new(ArrivalActivator::new(
                    agent,
                    Box::new(NavigateToWaypoint::new(agent)),
                )),
            ],
        ),
    )
}

/// Stands still when there is nothing else to do.
pub fn idle_branch(agent: AgentId) -> Node {
    idle_activator(agent, Box::new(Idle::new(agent)))
}
