//! Builder utilities for ergonomic behavior tree construction.
//!
//! This module provides helper functions to reduce boilerplate when building
//! behavior trees. Instead of writing verbose `Box::new(Sequence::new(...))`,
//! you can use shorter functions like `sequence(board, vec![...])`.

use crate::{AlwaysSucceed, Behavior, Context, Gate, GateMode, Inverter, Selector, Sequence};

/// Creates a sequence node.
///
/// Shorthand for `Box::new(Sequence::new(blackboard, children))`.
#[inline]
pub fn sequence<C: Context + 'static>(
    blackboard: C::Blackboard,
    children: Vec<Box<dyn Behavior<C>>>,
) -> Box<dyn Behavior<C>> {
    Box::new(Sequence::new(blackboard, children))
}

/// Creates a selector node.
///
/// Shorthand for `Box::new(Selector::new(blackboard, children))`.
#[inline]
pub fn selector<C: Context + 'static>(
    blackboard: C::Blackboard,
    children: Vec<Box<dyn Behavior<C>>>,
) -> Box<dyn Behavior<C>> {
    Box::new(Selector::new(blackboard, children))
}

/// Creates an inverter node.
#[inline]
pub fn inverter<C: Context + 'static>(child: Box<dyn Behavior<C>>) -> Box<dyn Behavior<C>> {
    Box::new(Inverter::new(child))
}

/// Creates an always-succeed node.
#[inline]
pub fn always_succeed<C: Context + 'static>(child: Box<dyn Behavior<C>>) -> Box<dyn Behavior<C>> {
    Box::new(AlwaysSucceed::new(child))
}

/// Creates a gate that yields (`false`) while `condition` does not hold.
#[inline]
pub fn fail_gate<C, F>(
    blackboard: C::Blackboard,
    condition: F,
    child: Box<dyn Behavior<C>>,
) -> Box<dyn Behavior<C>>
where
    C: Context + 'static,
    F: Fn(&C, C::Blackboard) -> bool + Send + Sync + 'static,
{
    Box::new(Gate::new(blackboard, GateMode::Fail, Box::new(condition), child))
}

/// Creates a gate that holds the tick (`true`) while `condition` does not hold.
#[inline]
pub fn freeze_gate<C, F>(
    blackboard: C::Blackboard,
    condition: F,
    child: Box<dyn Behavior<C>>,
) -> Box<dyn Behavior<C>>
where
    C: Context + 'static,
    F: Fn(&C, C::Blackboard) -> bool + Send + Sync + 'static,
{
    Box::new(Gate::new(blackboard, GateMode::Freeze, Box::new(condition), child))
}
