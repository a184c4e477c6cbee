//! Step kinds shared by the DP engines.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use stepwise_trace::Phase;

/// Phase of a DP run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DpPhase {
    /// Table allocated and base cases filled.
    Initialize,
    /// Two candidate values are about to be compared.
    Comparing,
    /// Characters matched; the diagonal was extended.
    Match,
    /// A cell received its final value.
    DecisionMade,
    /// The item does not fit; the cell copies the row above.
    TooHeavy,
    /// No combination reaches this cell.
    Unreachable,
    /// Reconstruction begins at the answer cell.
    BacktrackStart,
    /// One backward reconstruction step.
    Backtracking,
    /// The answer is final.
    Complete,
    /// The run failed a precondition.
    Error,
}

impl Phase for DpPhase {
    fn name(&self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::Comparing => "comparing",
            Self::Match => "match",
            Self::DecisionMade => "decision-made",
            Self::TooHeavy => "too-heavy",
            Self::Unreachable => "unreachable",
            Self::BacktrackStart => "backtrack-start",
            Self::Backtracking => "backtracking",
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

impl fmt::Display for DpPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
