//! Decorator behavior nodes.
//!
//! Decorators wrap a single child behavior and modify its result or execution.
//! This module provides [`Inverter`] (NOT logic), [`AlwaysSucceed`] (claim the
//! tick regardless of the child) and [`Gate`] (guard a child behind a
//! condition).

use crate::{Behavior, Context};

/// Inverts the signal of its child behavior.
///
/// This is analogous to a logical NOT (!) operation.
pub struct Inverter<C: Context> {
    child: Box<dyn Behavior<C>>,
}

impl<C: Context> Inverter<C> {
    /// Creates a new inverter that wraps the given child behavior.
    pub fn new(child: Box<dyn Behavior<C>>) -> Self {
        Self { child }
    }
}

impl<C: Context> Behavior<C> for Inverter<C> {
    fn evaluate(&mut self, ctx: &mut C) -> bool {
        !self.child.evaluate(ctx)
    }

    fn blackboard(&self) -> C::Blackboard {
        self.child.blackboard()
    }
}

/// Always returns `true`, regardless of the child's signal.
///
/// Useful for activators: once the branch is chosen it owns the tick even
/// when the child itself yields (e.g. an agent still walking toward its
/// target should not fall through to idling).
pub struct AlwaysSucceed<C: Context> {
    child: Box<dyn Behavior<C>>,
}

impl<C: Context> AlwaysSucceed<C> {
    /// Creates a new always-succeed wrapper around the given child behavior.
    pub fn new(child: Box<dyn Behavior<C>>) -> Self {
        Self { child }
    }
}

impl<C: Context> Behavior<C> for AlwaysSucceed<C> {
    fn evaluate(&mut self, ctx: &mut C) -> bool {
        // Execute child but ignore the result
        let _ = self.child.evaluate(ctx);
        true
    }

    fn blackboard(&self) -> C::Blackboard {
        self.child.blackboard()
    }
}

/// What a [`Gate`] reports when its condition does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateMode {
    /// Return `false` without evaluating the child. Failure propagates so a
    /// parent selector may try lower-priority siblings.
    Fail,

    /// Return `true` without evaluating the child. The branch keeps the tick,
    /// so siblings cannot take over while the agent is merely paused.
    Freeze,
}

impl GateMode {
    /// The signal reported when the gate is closed.
    #[inline]
    pub fn closed_signal(self) -> bool {
        matches!(self, GateMode::Freeze)
    }
}

/// Condition evaluated by a [`Gate`] against the context and its blackboard.
pub type GateCondition<C> =
    Box<dyn Fn(&C, <C as Context>::Blackboard) -> bool + Send + Sync>;

/// Guards a single child behind a blackboard condition.
///
/// # Semantics
///
/// - Condition holds: evaluates the child and returns its signal
/// - Condition fails: returns [`GateMode::closed_signal`] and the child is
///   **not** evaluated
///
/// A [`GateMode::Fail`] gate lets the parent move on, while a
/// [`GateMode::Freeze`] gate holds the branch.
pub struct Gate<C: Context> {
    blackboard: C::Blackboard,
    mode: GateMode,
    condition: GateCondition<C>,
    child: Box<dyn Behavior<C>>,
}

impl<C: Context> Gate<C> {
    /// Creates a gate that only opens while `condition` holds.
    pub fn new(
        blackboard: C::Blackboard,
        mode: GateMode,
        condition: GateCondition<C>,
        child: Box<dyn Behavior<C>>,
    ) -> Self {
        Self {
            blackboard,
            mode,
            condition,
            child,
        }
    }

    /// The behavior of this gate when closed.
    pub fn mode(&self) -> GateMode {
        self.mode
    }
}

impl<C: Context> Behavior<C> for Gate<C> {
    fn evaluate(&mut self, ctx: &mut C) -> bool {
        if (self.condition)(ctx, self.blackboard) {
            self.child.evaluate(ctx)
        } else {
            self.mode.closed_signal()
        }
    }

    fn blackboard(&self) -> C::Blackboard {
        self.blackboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestContext {
        open: bool,
        calls: u32,
    }

    impl Context for TestContext {
        type Blackboard = ();
    }

    struct Count {
        signal: bool,
    }

    impl Behavior<TestContext> for Count {
        fn evaluate(&mut self, ctx: &mut TestContext) -> bool {
            ctx.calls += 1;
            self.signal
        }

        fn blackboard(&self) {}
    }

    fn gate(mode: GateMode, signal: bool) -> Gate<TestContext> {
        Gate::new(
            (),
            mode,
            Box::new(|ctx: &TestContext, _: ()| ctx.open),
            Box::new(Count { signal }),
        )
    }

    #[test]
    fn inverter_flips_the_signal() {
        let mut inverter = Inverter::new(Box::new(Count { signal: true }));

        let mut ctx = TestContext { open: true, calls: 0 };
        assert!(!inverter.evaluate(&mut ctx));
        assert_eq!(ctx.calls, 1);
    }

    #[test]
    fn always_succeed_still_runs_the_child() {
        let mut always = AlwaysSucceed::new(Box::new(Count { signal: false }));

        let mut ctx = TestContext { open: true, calls: 0 };
        assert!(always.evaluate(&mut ctx));
        assert_eq!(ctx.calls, 1);
    }

    #[test]
    fn open_gate_passes_the_child_signal_through() {
        let mut ctx = TestContext { open: true, calls: 0 };
        assert!(!gate(GateMode::Freeze, false).evaluate(&mut ctx));
        assert!(gate(GateMode::Fail, true).evaluate(&mut ctx));
        assert_eq!(ctx.calls, 2);
    }

    #[test]
    fn closed_fail_gate_yields_without_child() {
        let mut ctx = TestContext { open: false, calls: 0 };
        assert!(!gate(GateMode::Fail, true).evaluate(&mut ctx));
        assert_eq!(ctx.calls, 0);
    }

    #[test]
    fn closed_freeze_gate_holds_without_child() {
        let mut ctx = TestContext { open: false, calls: 0 };
        assert!(gate(GateMode::Freeze, false).evaluate(&mut ctx));
        assert_eq!(ctx.calls, 0);
    }
}
