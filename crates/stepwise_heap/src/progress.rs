//! Partial answer carried by heap snapshots.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What an observer knows about the operation's answer at one snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeapProgress {
    /// Number of values in the heap being built.
    pub size: usize,
    /// Minimum of the heap being built, once known.
    pub min: Option<i64>,
    /// Value removed or located by the operation.
    pub answer: Option<i64>,
}

impl HeapProgress {
    /// Creates progress for a heap of `size` values with minimum `min`.
    #[must_use]
    pub const fn new(size: usize, min: Option<i64>) -> Self {
        Self {
            size,
            min,
            answer: None,
        }
    }

    /// Records the operation's answer.
    #[must_use]
    pub const fn with_answer(mut self, value: i64) -> Self {
        self.answer = Some(value);
        self
    }
}

impl fmt::Display for HeapProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "size {}", self.size)?;
        if let Some(min) = self.min {
            write!(f, ", min {min}")?;
        }
        if let Some(answer) = self.answer {
            write!(f, ", answer {answer}")?;
        }
        Ok(())
    }
}
