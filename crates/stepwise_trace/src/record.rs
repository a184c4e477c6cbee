//! Snapshot and focus types.
//!
//! This module defines the immutable records an engine writes while it runs.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use stepwise_foundation::NodeId;

// =============================================================================
// Phase
// =============================================================================

/// A closed set of step kinds for one engine family.
///
/// Each family defines its own enum so that renderers can match
/// exhaustively on it.
pub trait Phase: Copy + Eq + fmt::Debug + fmt::Display {
    /// Returns a short kebab-case name for the phase.
    fn name(&self) -> &'static str;

    /// The phase used for one-step error traces.
    fn error() -> Self;

    /// Returns true if this phase ends a trace.
    fn is_terminal(&self) -> bool;

    /// Returns true if this is the error phase.
    fn is_error(&self) -> bool {
        *self == Self::error()
    }
}

// =============================================================================
// Focus
// =============================================================================

/// One thing a renderer should highlight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mark {
    /// A cell of a two-dimensional table.
    Cell {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },
    /// A position in a one-dimensional table or input list.
    Index(usize),
    /// A heap node.
    Node(NodeId),
    /// A rank slot of a binomial forest.
    Rank(usize),
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell { row, col } => write!(f, "({row},{col})"),
            Self::Index(i) => write!(f, "[{i}]"),
            Self::Node(id) => write!(f, "{id}"),
            Self::Rank(r) => write!(f, "B{r}"),
        }
    }
}

/// The set of marks to highlight for a snapshot. May be empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Focus(Vec<Mark>);

impl Focus {
    /// No highlight.
    #[must_use]
    pub const fn none() -> Self {
        Self(Vec::new())
    }

    /// Highlights a single table cell.
    #[must_use]
    pub fn cell(row: usize, col: usize) -> Self {
        Self(vec![Mark::Cell { row, col }])
    }

    /// Highlights a single index.
    #[must_use]
    pub fn index(index: usize) -> Self {
        Self(vec![Mark::Index(index)])
    }

    /// Highlights a single node.
    #[must_use]
    pub fn node(id: NodeId) -> Self {
        Self(vec![Mark::Node(id)])
    }

    /// Highlights a rank slot.
    #[must_use]
    pub fn rank(rank: usize) -> Self {
        Self(vec![Mark::Rank(rank)])
    }

    /// Builder method to add another mark.
    #[must_use]
    pub fn with(mut self, mark: Mark) -> Self {
        self.0.push(mark);
        self
    }

    /// Builder method to add another cell.
    #[must_use]
    pub fn with_cell(self, row: usize, col: usize) -> Self {
        self.with(Mark::Cell { row, col })
    }

    /// Builder method to add another node, if present.
    #[must_use]
    pub fn with_node(self, id: Option<NodeId>) -> Self {
        match id {
            Some(id) => self.with(Mark::Node(id)),
            None => self,
        }
    }

    /// Returns the marks.
    #[must_use]
    pub fn marks(&self) -> &[Mark] {
        &self.0
    }

    /// Returns true if nothing is highlighted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the given mark is highlighted.
    #[must_use]
    pub fn contains(&self, mark: &Mark) -> bool {
        self.0.contains(mark)
    }
}

impl FromIterator<Mark> for Focus {
    fn from_iter<I: IntoIterator<Item = Mark>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mark) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{mark}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// One recorded moment of an algorithm's execution.
///
/// Fields are private: once a snapshot has been appended to a trace there is
/// no way to change it. The state view and partial result are persistent
/// values, so the engine's later writes cannot reach them either.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Snapshot<P, V, R> {
    sequence_index: usize,
    phase: P,
    state_view: V,
    focus: Focus,
    narrative: String,
    result_so_far: R,
}

impl<P: Phase, V, R> Snapshot<P, V, R> {
    pub(crate) fn new(
        sequence_index: usize,
        phase: P,
        state_view: V,
        focus: Focus,
        narrative: String,
        result_so_far: R,
    ) -> Self {
        Self {
            sequence_index,
            phase,
            state_view,
            focus,
            narrative,
            result_so_far,
        }
    }

    /// Returns the position of this snapshot in its trace.
    #[must_use]
    pub const fn sequence_index(&self) -> usize {
        self.sequence_index
    }

    /// Returns the step kind.
    #[must_use]
    pub const fn phase(&self) -> P {
        self.phase
    }

    /// Returns the structure as it was at this step.
    #[must_use]
    pub const fn state_view(&self) -> &V {
        &self.state_view
    }

    /// Returns the highlight marks.
    #[must_use]
    pub const fn focus(&self) -> &Focus {
        &self.focus
    }

    /// Returns the human-readable description of the step.
    #[must_use]
    pub fn narrative(&self) -> &str {
        &self.narrative
    }

    /// Returns the partial or final answer at this step.
    #[must_use]
    pub const fn result_so_far(&self) -> &R {
        &self.result_so_far
    }

    /// Returns true if this is an error snapshot.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.phase.is_error()
    }
}
