//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, which is the fundamental
//! abstraction for all behavior tree nodes, and the [`Context`] trait that
//! names the blackboard handle type a node is built against.

use core::fmt::Debug;

/// The state a tree is evaluated against.
///
/// Blackboards are not owned by nodes. They live in the context (usually an
/// arena of per-agent state) and nodes address their own blackboard through
/// a small `Copy` handle.
pub trait Context {
    /// Handle that identifies one blackboard inside the context.
    type Blackboard: Copy + Eq + Debug + Send + Sync + 'static;
}

/// A behavior tree node that can be evaluated against a context.
///
/// # Return convention
///
/// - `true`: this branch is actively handling the tick. Parents stop trying
///   siblings (selector) or keep walking this branch (sequence).
/// - `false`: this branch yields and the parent should try the next option.
///
/// There is no "running" state. Long-lived behaviors simply keep returning the
/// same signal on every tick, and the meaning of each signal is documented on
/// the node itself.
pub trait Behavior<C: Context>: Send + Sync {
    /// Evaluate this node once for the current tick.
    ///
    /// Nodes may have side effects on the context (movement requests, flag
    /// flips, firing a weapon) and may update their own small bookkeeping,
    /// hence `&mut self`.
    fn evaluate(&mut self, ctx: &mut C) -> bool;

    /// The blackboard this node was constructed against.
    fn blackboard(&self) -> C::Blackboard;
}

/// Blanket implementation for boxed behaviors.
///
/// This allows `Box<dyn Behavior<C>>` to also implement `Behavior<C>`,
/// enabling dynamic dispatch and heterogeneous collections of nodes.
impl<C: Context> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn evaluate(&mut self, ctx: &mut C) -> bool {
        (**self).evaluate(ctx)
    }

    #[inline]
    fn blackboard(&self) -> C::Blackboard {
        (**self).blackboard()
    }
}
