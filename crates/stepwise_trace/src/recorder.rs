//! Append-only trace recorder.
//!
//! Engines hold a `&mut TraceRecorder` for the duration of one operation and
//! write a snapshot for every observable change. Recursive algorithms pass
//! the same recorder down through each call.

use stepwise_foundation::{Error, Result};

use crate::record::{Focus, Phase, Snapshot};
use crate::trace::Trace;

/// Write-only builder for a [`Trace`].
#[derive(Debug)]
pub struct TraceRecorder<P, V, R> {
    label: String,
    snapshots: Vec<Snapshot<P, V, R>>,
    sealed: bool,
}

impl<P: Phase, V: Clone, R: Clone> TraceRecorder<P, V, R> {
    /// Creates an empty recorder for the named operation.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            snapshots: Vec::new(),
            sealed: false,
        }
    }

    /// Returns the number of snapshots recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns true if nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Returns true once [`finish`](Self::finish) has been called.
    #[must_use]
    pub const fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Appends a snapshot and returns its sequence index.
    ///
    /// `view` and `result` are cloned. Callers pass persistent structures,
    /// so the clone shares storage and later writes by the engine stay
    /// invisible to this snapshot.
    ///
    /// # Errors
    ///
    /// Returns `EngineMisuse` if the recorder is sealed or the narrative is
    /// empty.
    pub fn record(
        &mut self,
        phase: P,
        view: &V,
        focus: Focus,
        narrative: impl Into<String>,
        result: &R,
    ) -> Result<usize> {
        if self.sealed {
            return Err(Error::engine_misuse(format!(
                "record after finish on trace '{}'",
                self.label
            )));
        }

        let narrative = narrative.into();
        if narrative.trim().is_empty() {
            return Err(Error::engine_misuse(format!(
                "empty narrative for {} step in trace '{}'",
                phase.name(),
                self.label
            )));
        }

        let index = self.snapshots.len();
        tracing::trace!(trace = %self.label, index, phase = phase.name(), "{narrative}");

        self.snapshots.push(Snapshot::new(
            index,
            phase,
            view.clone(),
            focus,
            narrative,
            result.clone(),
        ));
        Ok(index)
    }

    /// Seals the recorder and returns the accumulated trace.
    ///
    /// # Errors
    ///
    /// Returns `EngineMisuse` if called twice or if nothing was recorded.
    pub fn finish(&mut self) -> Result<Trace<P, V, R>> {
        if self.sealed {
            return Err(Error::engine_misuse(format!(
                "finish called twice on trace '{}'",
                self.label
            )));
        }
        if self.snapshots.is_empty() {
            return Err(Error::engine_misuse(format!(
                "trace '{}' finished without any snapshots",
                self.label
            )));
        }

        self.sealed = true;
        let snapshots = std::mem::take(&mut self.snapshots);
        tracing::debug!(trace = %self.label, steps = snapshots.len(), "trace sealed");
        Ok(Trace::new(self.label.clone(), snapshots))
    }

    /// Records a terminal error snapshot for `error` and seals the recorder.
    ///
    /// Used for precondition failures, which are reported as one-step traces.
    ///
    /// # Errors
    ///
    /// Returns `EngineMisuse` if the recorder is sealed.
    pub fn fail(
        &mut self,
        view: &V,
        focus: Focus,
        error: &Error,
        result: &R,
    ) -> Result<Trace<P, V, R>> {
        self.record(P::error(), view, focus, error.to_string(), result)?;
        self.finish()
    }
}
