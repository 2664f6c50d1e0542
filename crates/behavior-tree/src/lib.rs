//! Lightweight behavior tree library for tick-driven real-time agents.
//!
//! This library provides a minimal behavior tree implementation where every
//! node reports a single boolean signal per tick:
//!
//! - **Two states only**: `true` means "this branch handles the tick",
//!   `false` means "this branch yields"
//! - **No Running state**: continuous behaviors keep re-evaluating each tick
//! - **Blackboard by handle**: nodes address per-agent state through a
//!   [`Context::Blackboard`] handle instead of holding shared pointers
//! - **Zero dependencies**: Pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Context`]: The state a tree is evaluated against
//! - Composite nodes: [`Selector`], [`Sequence`]
//! - Decorator nodes: [`Gate`], [`Inverter`], [`AlwaysSucceed`]
//! - [`BehaviorTree`]: Root wrapper evaluated once per tick

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod tree;

// Re-export core types for ergonomic API
pub use behavior::{Behavior, Context};
pub use composite::{Selector, Sequence};
pub use decorator::{AlwaysSucceed, Gate, GateCondition, GateMode, Inverter};
pub use tree::BehaviorTree;
