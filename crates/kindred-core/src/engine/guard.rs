//! Cycle protection for the walk in progress.
//!
//! Before descending into a pair of composite values the engine registers
//! the pair here; meeting the same pair again while it is still on the walk
//! stack means the graphs cycle in step, and the pair is treated as equal
//! so the walk can unwind. Pairs are keyed order-insensitively, which keeps
//! the verdict symmetric.

use std::collections::HashSet;

use crate::reflect::ValueId;

pub(crate) struct PairGuard {
    active: HashSet<(ValueId, ValueId)>,
}

impl PairGuard {
    pub(crate) fn new() -> Self {
        PairGuard {
            active: HashSet::new(),
        }
    }

    /// Registers a pair about to be descended into. Returns `false` when the
    /// pair is already on the walk stack.
    pub(crate) fn enter(&mut self, a: ValueId, b: ValueId) -> bool {
        self.active.insert(Self::ordered(a, b))
    }

    /// Unregisters a pair on the way back out. Must mirror every successful
    /// `enter`, including on error paths.
    pub(crate) fn leave(&mut self, a: ValueId, b: ValueId) {
        self.active.remove(&Self::ordered(a, b));
    }

    fn ordered(a: ValueId, b: ValueId) -> (ValueId, ValueId) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}
