//! Integration tests for Layer 2: Dynamic Programming Engines
//!
//! Tests the four table-filling engines end to end: answers, trace shape,
//! and determinism.

mod answers;
mod shape;

use stepwise_dp::DpPhase;
use stepwise_trace::{Phase, Trace};

/// Asserts the shape every successful DP trace shares.
pub fn assert_well_formed<V, R>(trace: &Trace<DpPhase, V, R>) {
    assert!(!trace.is_empty());
    assert_eq!(trace.first().map(|s| s.phase()), Some(DpPhase::Initialize));
    assert_eq!(trace.last().map(|s| s.phase()), Some(DpPhase::Complete));

    for (i, snapshot) in trace.iter().enumerate() {
        assert_eq!(snapshot.sequence_index(), i);
        assert!(!snapshot.narrative().trim().is_empty());
        assert_eq!(snapshot.phase().is_terminal(), i == trace.last_index());
    }
}
