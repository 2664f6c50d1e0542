//! Root wrapper tying a node hierarchy to one blackboard.

use crate::{Behavior, Context};

/// A complete behavior tree: one root node and the blackboard it drives.
///
/// A tree is built once when its owner spawns and evaluated exactly once per
/// tick through [`BehaviorTree::evaluate`]. Evaluating the same tree twice in
/// one tick is not guarded against.
pub struct BehaviorTree<C: Context> {
    root: Box<dyn Behavior<C>>,
    blackboard: C::Blackboard,
}

impl<C: Context> BehaviorTree<C> {
    /// Wraps `root`, taking the blackboard handle from the root itself.
    pub fn new(root: Box<dyn Behavior<C>>) -> Self {
        let blackboard = root.blackboard();
        Self { root, blackboard }
    }

    /// Evaluates the whole tree for the current tick.
    ///
    /// Returns the root's signal: `true` if some branch handled the tick.
    #[inline]
    pub fn evaluate(&mut self, ctx: &mut C) -> bool {
        self.root.evaluate(ctx)
    }

    /// The blackboard this tree drives.
    #[inline]
    pub fn blackboard(&self) -> C::Blackboard {
        self.blackboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::selector;

    struct Board {
        ticks: u32,
    }

    impl Context for Board {
        type Blackboard = u8;
    }

    struct Tick(u8);

    impl Behavior<Board> for Tick {
        fn evaluate(&mut self, ctx: &mut Board) -> bool {
            ctx.ticks += 1;
            true
        }

        fn blackboard(&self) -> u8 {
            self.0
        }
    }

    #[test]
    fn tree_reports_root_blackboard_and_signal() {
        let mut tree = BehaviorTree::new(selector(7, vec![Box::new(Tick(7))]));
        let mut ctx = Board { ticks: 0 };

        assert_eq!(tree.blackboard(), 7);
        assert!(tree.evaluate(&mut ctx));
        assert!(tree.evaluate(&mut ctx));
        assert_eq!(ctx.ticks, 2);
    }
}
