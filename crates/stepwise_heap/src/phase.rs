//! Step kinds shared by the heap engines.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use stepwise_trace::Phase;

/// Phase of a heap operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HeapPhase {
    /// A new singleton is about to join the heap.
    Insert,
    /// Two roots are compared.
    Compare,
    /// A subtree was merged below a root.
    Merge,
    /// A skew heap node's children were exchanged.
    Swap,
    /// Two binomial trees of equal rank were linked.
    Link,
    /// A linked tree moves up to the next rank.
    Carry,
    /// The merged forest is final.
    Assemble,
    /// The minimum root was removed.
    Extract,
    /// The minimum was located without changing the heap.
    Found,
    /// The operation finished.
    Complete,
    /// The operation failed a precondition.
    Error,
}

impl Phase for HeapPhase {
    fn name(&self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Compare => "compare",
            Self::Merge => "merge",
            Self::Swap => "swap",
            Self::Link => "link",
            Self::Carry => "carry",
            Self::Assemble => "assemble",
            Self::Extract => "extract",
            Self::Found => "found",
            Self::Complete => "complete",
            Self::Error => "error",
        }
    }

    fn error() -> Self {
        Self::Error
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Error)
    }
}

impl fmt::Display for HeapPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
