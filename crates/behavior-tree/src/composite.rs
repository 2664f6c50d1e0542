//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors.
//! This module provides the fundamental building blocks for creating priority
//! lists and step-by-step routines: [`Selector`] (OR logic) and [`Sequence`]
//! (AND logic).

use crate::{Behavior, Context};

/// Tries child behaviors in priority order until one takes control.
///
/// # Semantics
///
/// A `Selector` node evaluates its children from first to last:
/// - If a child returns `true`, the selector **stops immediately** and returns `true`
/// - If a child returns `false`, the selector **continues** to the next child
/// - If all children return `false`, the selector returns `false`
///
/// Children are listed highest priority first, so this implements
/// "first applicable behavior wins" policies such as fallback > protect > idle.
pub struct Selector<C: Context> {
    blackboard: C::Blackboard,
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C: Context> Selector<C> {
    /// Creates a new selector with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A selector with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(blackboard: C::Blackboard, children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Selector must have at least one child"
        );
        Self {
            blackboard,
            children,
        }
    }
}

impl<C: Context> Behavior<C> for Selector<C> {
    fn evaluate(&mut self, ctx: &mut C) -> bool {
        for child in &mut self.children {
            if child.evaluate(ctx) {
                return true; // Short-circuit
            }
        }
        false
    }

    fn blackboard(&self) -> C::Blackboard {
        self.blackboard
    }
}

/// Executes child behaviors in order until one yields.
///
/// # Semantics
///
/// A `Sequence` node evaluates its children from first to last:
/// - If a child returns `false`, the sequence **stops immediately** and returns `false`
/// - If a child returns `true`, the sequence **continues** to the next child
/// - If all children return `true`, the sequence returns `true`
///
/// This is analogous to a short-circuited logical AND (&&) operation.
pub struct Sequence<C: Context> {
    blackboard: C::Blackboard,
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C: Context> Sequence<C> {
    /// Creates a new sequence with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(blackboard: C::Blackboard, children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self {
            blackboard,
            children,
        }
    }
}

impl<C: Context> Behavior<C> for Sequence<C> {
    fn evaluate(&mut self, ctx: &mut C) -> bool {
        for child in &mut self.children {
            if !child.evaluate(ctx) {
                return false; // Short-circuit
            }
        }
        true
    }

    fn blackboard(&self) -> C::Blackboard {
        self.blackboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct TestContext {
        visited: Vec<&'static str>,
    }

    impl Context for TestContext {
        type Blackboard = ();
    }

    struct Fixed {
        name: &'static str,
        signal: bool,
    }

    fn fixed(name: &'static str, signal: bool) -> Box<dyn Behavior<TestContext>> {
        Box::new(Fixed { name, signal })
    }

    impl Behavior<TestContext> for Fixed {
        fn evaluate(&mut self, ctx: &mut TestContext) -> bool {
            ctx.visited.push(self.name);
            self.signal
        }

        fn blackboard(&self) {}
    }

    #[test]
    fn selector_stops_at_first_active_child() {
        let mut sel = Selector::new(
            (),
            vec![fixed("a", false), fixed("b", true), fixed("c", true)],
        );

        let mut ctx = TestContext::default();
        assert!(sel.evaluate(&mut ctx));
        assert_eq!(ctx.visited, vec!["a", "b"]); // "c" never evaluated
    }

    #[test]
    fn selector_yields_when_all_children_yield() {
        let mut sel = Selector::new((), vec![fixed("a", false), fixed("b", false)]);

        let mut ctx = TestContext::default();
        assert!(!sel.evaluate(&mut ctx));
        assert_eq!(ctx.visited, vec!["a", "b"]);
    }

    #[test]
    fn sequence_runs_all_when_every_child_is_active() {
        let mut seq = Sequence::new((), vec![fixed("a", true), fixed("b", true)]);

        let mut ctx = TestContext::default();
        assert!(seq.evaluate(&mut ctx));
        assert_eq!(ctx.visited, vec!["a", "b"]);
    }

    #[test]
    fn sequence_stops_at_first_yield() {
        let mut seq = Sequence::new(
            (),
            vec![fixed("a", true), fixed("b", false), fixed("c", true)],
        );

        let mut ctx = TestContext::default();
        assert!(!seq.evaluate(&mut ctx));
        assert_eq!(ctx.visited, vec!["a", "b"]);
    }

    #[test]
    #[should_panic(expected = "Selector must have at least one child")]
    fn selector_rejects_empty_children() {
        let _ = Selector::<TestContext>::new((), Vec::new());
    }
}
