//! Trace output formatters.
//!
//! Provides a human-readable formatter for snapshots and whole traces.

use std::fmt::{Display, Write};

use crate::record::{Phase, Snapshot};
use crate::trace::Trace;

// =============================================================================
// Trace Formatter Trait
// =============================================================================

/// Trait for formatting snapshots.
pub trait TraceFormatter {
    /// Formats a single snapshot to a string.
    fn format<P, V, R>(&self, snapshot: &Snapshot<P, V, R>) -> String
    where
        P: Phase,
        V: Display,
        R: Display;

    /// Formats every snapshot of a trace.
    fn format_trace<P, V, R>(&self, trace: &Trace<P, V, R>) -> String
    where
        P: Phase,
        V: Display,
        R: Display,
    {
        trace
            .iter()
            .map(|s| self.format(s))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// =============================================================================
// Human-Readable Formatter
// =============================================================================

/// Formats snapshots in human-readable form.
#[derive(Clone, Debug, Default)]
pub struct HumanFormatter {
    /// Whether to print the state view below the header line.
    pub show_state: bool,
    /// Whether to print the partial result.
    pub show_result: bool,
    /// Total trace length, for `[i/n]` style headers.
    pub total: Option<usize>,
}

impl HumanFormatter {
    /// Creates a new human formatter that prints header lines only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to print the state view.
    #[must_use]
    pub fn with_state(mut self) -> Self {
        self.show_state = true;
        self
    }

    /// Builder method to print the partial result.
    #[must_use]
    pub fn with_result(mut self) -> Self {
        self.show_result = true;
        self
    }

    /// Builder method to print positions relative to a trace length.
    #[must_use]
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }
}

impl TraceFormatter for HumanFormatter {
    fn format<P, V, R>(&self, snapshot: &Snapshot<P, V, R>) -> String
    where
        P: Phase,
        V: Display,
        R: Display,
    {
        let mut out = String::new();

        match self.total {
            Some(total) => {
                let _ = write!(out, "[{}/{}]", snapshot.sequence_index() + 1, total);
            }
            None => {
                let _ = write!(out, "[{:04}]", snapshot.sequence_index());
            }
        }

        let _ = write!(out, " {:<15} {}", snapshot.phase().name(), snapshot.narrative());

        if !snapshot.focus().is_empty() {
            let _ = write!(out, "  @ {}", snapshot.focus());
        }

        if self.show_state {
            let state = snapshot.state_view().to_string();
            if !state.is_empty() {
                out.push('\n');
                for line in state.lines() {
                    let _ = writeln!(out, "    {line}");
                }
                out.pop();
            }
        }

        if self.show_result {
            let result = snapshot.result_so_far().to_string();
            if !result.is_empty() {
                let _ = write!(out, "\n    => {result}");
            }
        }

        out
    }
}
