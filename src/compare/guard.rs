//! Cycle detection over paired object graphs.

use std::collections::HashSet;
use tracing::trace;

/// Identity of one side of a comparison. The type label disambiguates a
/// struct from its first field, which share an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeKey {
    pub identity: usize,
    pub type_name: &'static str,
}

impl NodeKey {
    pub const fn new(identity: usize, type_name: &'static str) -> Self {
        Self {
            identity,
            type_name,
        }
    }
}

/// Pairs of nodes currently on the active comparison path.
///
/// A pair that is already active is a cycle; the caller treats it as equal
/// and does not descend again.
#[derive(Debug, Default)]
pub(crate) struct CycleGuard {
    active: HashSet<(NodeKey, NodeKey)>,
}

impl CycleGuard {
    /// Mark a pair active. Returns `false` if it already was.
    pub fn enter(&mut self, left: NodeKey, right: NodeKey) -> bool {
        let inserted = self.active.insert((left, right));
        if !inserted {
            trace!(
                "cycle detected at {}@{:#x} / {}@{:#x}",
                left.type_name,
                left.identity,
                right.type_name,
                right.identity
            );
        }
        inserted
    }

    pub fn exit(&mut self, left: NodeKey, right: NodeKey) {
        self.active.remove(&(left, right));
    }

    pub fn depth(&self) -> usize {
        self.active.len()
    }
}
