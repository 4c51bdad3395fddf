//! Node identifier type.

use std::fmt;

/// Handle to a node slot in the tree's node pool.
///
/// A `NodeId` never owns the node it names. Children are reached top-down
/// through the ids stored in their parent, and the parent id stored in a
/// child is only used to walk back up during split and rebalance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Create a node id from a pool slot index
    pub(crate) fn from_index(index: usize) -> Self {
        let raw = u32::try_from(index).unwrap_or_else(|_| {
            panic!("node pool exceeded {} slots", u32::MAX)
        });
        Self(raw)
    }

    /// Get the pool slot index this id refers to
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw id value
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
