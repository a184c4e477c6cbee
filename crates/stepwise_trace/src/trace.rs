//! Sealed traces and run results.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use stepwise_foundation::{Error, Result};

use crate::record::{Focus, Phase, Snapshot};

// =============================================================================
// Trace
// =============================================================================

/// The complete, ordered sequence of snapshots for one algorithm run.
///
/// A trace is only ever produced by [`TraceRecorder::finish`], so it always
/// holds at least one snapshot and its sequence indices run `0..len`.
///
/// [`TraceRecorder::finish`]: crate::TraceRecorder::finish
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trace<P, V, R> {
    label: String,
    snapshots: Vec<Snapshot<P, V, R>>,
}

impl<P: Phase, V, R> Trace<P, V, R> {
    pub(crate) fn new(label: String, snapshots: Vec<Snapshot<P, V, R>>) -> Self {
        Self { label, snapshots }
    }

    /// Returns the name of the operation that produced this trace.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the number of snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns true if the trace holds no snapshots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Returns the index of the final snapshot.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.snapshots.len().saturating_sub(1)
    }

    /// Gets a snapshot by sequence index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Snapshot<P, V, R>> {
        self.snapshots.get(index)
    }

    /// Returns the first snapshot.
    #[must_use]
    pub fn first(&self) -> Option<&Snapshot<P, V, R>> {
        self.snapshots.first()
    }

    /// Returns the final snapshot.
    #[must_use]
    pub fn last(&self) -> Option<&Snapshot<P, V, R>> {
        self.snapshots.last()
    }

    /// Returns an iterator over all snapshots in order.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot<P, V, R>> {
        self.snapshots.iter()
    }

    /// Returns snapshots of a given phase.
    #[must_use]
    pub fn by_phase(&self, phase: P) -> Vec<&Snapshot<P, V, R>> {
        self.snapshots.iter().filter(|s| s.phase() == phase).collect()
    }

    /// Returns true if this is a one-step error trace.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.snapshots.len() == 1 && self.snapshots[0].is_error()
    }

    /// Returns the `(phase, focus, narrative)` outline of the trace.
    ///
    /// Two runs of the same engine on the same input have equal outlines.
    #[must_use]
    pub fn outline(&self) -> Vec<(P, &Focus, &str)> {
        self.snapshots
            .iter()
            .map(|s| (s.phase(), s.focus(), s.narrative()))
            .collect()
    }

    /// Returns statistics about the trace.
    #[must_use]
    pub fn stats(&self) -> TraceStats {
        let mut phase_counts = HashMap::new();
        for snapshot in &self.snapshots {
            *phase_counts.entry(snapshot.phase().name()).or_insert(0) += 1;
        }

        TraceStats {
            snapshot_count: self.snapshots.len(),
            phase_counts,
            failed: self.is_failure(),
        }
    }
}

// =============================================================================
// Trace Statistics
// =============================================================================

/// Statistics about a trace.
#[derive(Clone, Debug)]
pub struct TraceStats {
    /// Number of snapshots.
    pub snapshot_count: usize,
    /// Count of each phase, keyed by phase name.
    pub phase_counts: HashMap<&'static str, usize>,
    /// Whether the trace is a one-step error trace.
    pub failed: bool,
}

impl TraceStats {
    /// Returns the count for a phase name.
    #[must_use]
    pub fn count(&self, phase: &str) -> usize {
        self.phase_counts.get(phase).copied().unwrap_or(0)
    }
}

impl std::fmt::Display for TraceStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut phases: Vec<_> = self.phase_counts.iter().collect();
        phases.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));

        write!(f, "{} steps", self.snapshot_count)?;
        for (name, count) in phases {
            write!(f, ", {count} {name}")?;
        }
        if self.failed {
            write!(f, " (failed)")?;
        }
        Ok(())
    }
}

// =============================================================================
// Traced
// =============================================================================

/// The outcome of one engine operation together with its trace.
///
/// Precondition failures (e.g. extracting from an empty heap) still produce
/// a trace: a single `error` snapshot, with the error in `outcome`.
#[derive(Debug)]
pub struct Traced<T, P, V, R> {
    /// The operation's answer, or the precondition that failed.
    pub outcome: Result<T>,
    /// The recorded steps.
    pub trace: Trace<P, V, R>,
}

impl<T, P: Phase, V, R> Traced<T, P, V, R> {
    /// Creates a successful result.
    #[must_use]
    pub fn ok(value: T, trace: Trace<P, V, R>) -> Self {
        Self {
            outcome: Ok(value),
            trace,
        }
    }

    /// Creates a failed result around a one-step error trace.
    #[must_use]
    pub fn failed(error: Error, trace: Trace<P, V, R>) -> Self {
        Self {
            outcome: Err(error),
            trace,
        }
    }

    /// Returns true if the operation hit a failed precondition.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.outcome.is_err()
    }

    /// Maps the successful value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Traced<U, P, V, R> {
        Traced {
            outcome: self.outcome.map(f),
            trace: self.trace,
        }
    }

    /// Splits into outcome and trace.
    pub fn into_parts(self) -> (Result<T>, Trace<P, V, R>) {
        (self.outcome, self.trace)
    }
}

// =============================================================================
// Tests
// =============================================================================
