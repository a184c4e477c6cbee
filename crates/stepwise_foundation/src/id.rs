//! Stable node identifiers.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier for a heap node.
///
/// Ids survive restructuring: a node keeps its id when a merge rebuilds the
/// path above it, so focus marks stay meaningful across snapshots.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic allocator for [`NodeId`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeIdGen {
    next: u64,
}

impl NodeIdGen {
    /// Creates an allocator starting at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocates the next id.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    /// Returns the number of ids handed out so far.
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.next
    }
}
