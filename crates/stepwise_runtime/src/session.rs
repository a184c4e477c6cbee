//! Session state shared by the REPL and the CLI.
//!
//! A [`Session`] owns the authoritative heaps, the playback controller for
//! the most recent trace, and the heap state that trace leads to. That state
//! is only committed once playback reports completion, so the heaps a user
//! sees always match the last snapshot they have watched to the end.

use std::fmt::Display;
use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use stepwise_dp::{CoinChange, coin_change, house_robber, knapsack, lcs};
use stepwise_foundation::{Error, ErrorContext, Result};
use stepwise_heap::{BinomialQueue, SkewHeap};
use stepwise_playback::{Play, PlaybackEvent, PlaybackState, Player, TimerHandle};
use stepwise_trace::{HumanFormatter, Phase, TraceStats, Traced};

use crate::config::SessionConfig;
use crate::operation::{Args, HeapCommand, HeapKind, Operation};
use crate::playback::Playback;
use crate::serialize;

/// Heap state produced by an operation but not yet committed.
#[derive(Clone, Debug)]
enum PendingHeap {
    Skew(SkewHeap),
    Binomial(BinomialQueue),
}

/// A freshly traced operation, before it is installed.
struct Loaded {
    playback: Box<dyn Playback>,
    summary: String,
    failed: bool,
    pending: Option<PendingHeap>,
}

/// What [`Session::trigger`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Triggered {
    /// Name of the operation that ran.
    pub operation: &'static str,
    /// One-line description of the outcome.
    pub summary: String,
    /// Whether the run failed a precondition and produced an error trace.
    pub failed: bool,
    /// Number of snapshots in the new trace.
    pub steps: usize,
    /// The live timer, if autoplay started playback.
    pub timer: Option<TimerHandle>,
}

/// Wraps a finished run in a player and describes its outcome.
fn install<T, P, V, R>(
    interval: Duration,
    run: Traced<T, P, V, R>,
    describe: impl FnOnce(&T) -> String,
) -> (Loaded, Option<T>)
where
    P: Phase + Serialize + 'static,
    V: Display + Serialize + 'static,
    R: Display + Serialize + 'static,
{
    let (outcome, trace) = run.into_parts();
    let playback: Box<dyn Playback> = Box::new(Player::with_trace(trace, interval));
    let (summary, failed, value) = match outcome {
        Ok(value) => (describe(&value), false, Some(value)),
        Err(e) => (e.to_string(), true, None),
    };
    let loaded = Loaded {
        playback,
        summary,
        failed,
        pending: None,
    };
    (loaded, value)
}

fn list<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Session state for one user.
pub struct Session {
    /// Playback settings and engine limits.
    config: SessionConfig,

    /// Controller for the most recent trace.
    playback: Option<Box<dyn Playback>>,

    /// The committed skew heap.
    skew: SkewHeap,

    /// The committed binomial queue.
    binomial: BinomialQueue,

    /// Heap state waiting for playback to complete.
    pending: Option<PendingHeap>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    /// Creates a session with empty heaps and nothing loaded.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            playback: None,
            skew: SkewHeap::new(),
            binomial: BinomialQueue::new(),
            pending: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the committed skew heap.
    #[must_use]
    pub const fn skew(&self) -> &SkewHeap {
        &self.skew
    }

    /// Returns the committed binomial queue.
    #[must_use]
    pub const fn binomial(&self) -> &BinomialQueue {
        &self.binomial
    }

    /// Returns true if an operation's heap state is waiting for playback to
    /// complete.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the playback state, `Idle` when nothing is loaded.
    #[must_use]
    pub fn playback_state(&self) -> PlaybackState {
        self.playback
            .as_ref()
            .map_or(PlaybackState::Idle, |p| p.state())
    }

    /// Returns true while automatic playback is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.playback_state() == PlaybackState::Running
    }

    /// Returns the cursor position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.playback.as_ref().map_or(0, |p| p.position())
    }

    /// Returns the number of snapshots in the loaded trace.
    #[must_use]
    pub fn trace_len(&self) -> usize {
        self.playback.as_ref().map_or(0, |p| p.len())
    }

    /// Returns the loaded trace's label.
    #[must_use]
    pub fn trace_label(&self) -> Option<&str> {
        self.playback.as_deref().map(|p| p.label())
    }

    /// Returns the delay between automatic steps.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.config.playback.interval
    }

    fn formatter(&self) -> HumanFormatter {
        HumanFormatter::new()
            .with_state()
            .with_result()
            .with_total(self.trace_len())
    }

    /// Renders the snapshot under the cursor with its state and partial
    /// result.
    #[must_use]
    pub fn current_snapshot(&self) -> Option<String> {
        self.playback
            .as_ref()
            .and_then(|p| p.render_current(&self.formatter()))
    }

    /// Renders the header line of every snapshot in the loaded trace.
    #[must_use]
    pub fn trace_outline(&self) -> Option<String> {
        let formatter = HumanFormatter::new().with_total(self.trace_len());
        self.playback
            .as_ref()
            .and_then(|p| p.render_trace(&formatter))
    }

    /// Returns per-phase counts for the loaded trace.
    #[must_use]
    pub fn stats(&self) -> Option<TraceStats> {
        self.playback.as_ref().and_then(|p| p.stats())
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Parses and runs a named operation.
    ///
    /// # Errors
    ///
    /// See [`Operation::from_name`] and [`Session::trigger`].
    pub fn trigger_named(&mut self, name: &str, args: &Args) -> Result<Triggered> {
        let operation = Operation::from_name(name, args).inspect_err(|e| {
            tracing::warn!(operation = name, error = %e, "operation rejected");
        })?;
        self.trigger(&operation)
    }

    /// Runs an operation against the committed state and loads its trace.
    ///
    /// Precondition failures such as extracting from an empty heap still
    /// load a one-step error trace and return `Ok` with `failed` set.
    ///
    /// # Errors
    ///
    /// Returns `OperationInProgress` while playback is running, and
    /// `InvalidInput` when the input exceeds the configured limits or the
    /// engine rejects it. The session is unchanged in both cases.
    pub fn trigger(&mut self, operation: &Operation) -> Result<Triggered> {
        let name = operation.name();
        if self.is_running() {
            tracing::warn!(operation = name, "operation rejected while playing");
            return Err(Error::operation_in_progress()
                .with_context(ErrorContext::new().with_operation(name)));
        }

        let heap_len = match operation {
            Operation::Heap(HeapKind::Skew, _) => self.skew.len(),
            Operation::Heap(HeapKind::Binomial, _) => self.binomial.len(),
            _ => 0,
        };

        let loaded = operation
            .check_limits(&self.config.limits, heap_len)
            .and_then(|()| self.run(operation))
            .inspect_err(|e| {
                tracing::warn!(operation = name, error = %e, "operation rejected");
            })?;

        if self.pending.is_some() {
            tracing::debug!("discarding heap state from an unfinished playback");
        }
        self.pending = loaded.pending;
        let steps = loaded.playback.len();
        self.playback = Some(loaded.playback);
        tracing::info!(
            operation = %operation,
            steps,
            failed = loaded.failed,
            "operation traced"
        );

        let timer = if self.config.playback.autoplay {
            self.play().handle()
        } else {
            None
        };

        Ok(Triggered {
            operation: name,
            summary: loaded.summary,
            failed: loaded.failed,
            steps,
            timer,
        })
    }

    fn run(&self, operation: &Operation) -> Result<Loaded> {
        let interval = self.config.playback.interval;
        let loaded = match operation {
            Operation::Knapsack { capacity, items } => {
                install(interval, knapsack::solve(*capacity, items)?, |s| {
                    let mut indices: Vec<usize> = s.selected.iter().map(|i| i.index).collect();
                    indices.sort_unstable();
                    format!(
                        "max value {} with weight {} using items [{}]",
                        s.max_value,
                        s.total_weight,
                        list(&indices)
                    )
                })
                .0
            }
            Operation::Lcs { a, b } => {
                install(interval, lcs::solve(a, b)?, |s| {
                    format!("length {}: \"{}\"", s.length, s.subsequence)
                })
                .0
            }
            Operation::CoinChange { amount, coins } => {
                install(interval, coin_change::solve(*amount, coins)?, |c| match c {
                    CoinChange::Possible { count, coins } => {
                        format!("{count} coins: [{}]", list(coins))
                    }
                    CoinChange::Impossible => format!("{amount} cannot be made"),
                })
                .0
            }
            Operation::HouseRobber { houses } => {
                install(interval, house_robber::solve(houses)?, |s| {
                    format!("{} from houses [{}]", s.max_money, list(&s.robbed))
                })
                .0
            }
            Operation::Heap(HeapKind::Skew, command) => self.run_skew(command)?,
            Operation::Heap(HeapKind::Binomial, command) => self.run_binomial(command)?,
        };
        Ok(loaded)
    }

    fn run_skew(&self, command: &HeapCommand) -> Result<Loaded> {
        let interval = self.config.playback.interval;
        let heap = &self.skew;
        let (mut loaded, pending) = match command {
            HeapCommand::Insert(value) => install(interval, heap.insert(*value)?, |h| {
                format!("inserted {value}; {} values", h.len())
            }),
            HeapCommand::ExtractMin => {
                let (loaded, value) = install(interval, heap.extract_min()?, |(min, h)| {
                    format!("extracted {min}; {} values remain", h.len())
                });
                (loaded, value.map(|(_, h)| h))
            }
            HeapCommand::FindMin => {
                let (loaded, _) = install(interval, heap.find_min()?, |min| format!("minimum is {min}"));
                (loaded, None)
            }
            HeapCommand::Meld(values) => {
                let other = SkewHeap::from_values(values)?;
                install(interval, heap.meld(&other)?, |h| {
                    format!("melded {} values; {} values", values.len(), h.len())
                })
            }
            HeapCommand::Clear => install(interval, heap.clear()?, |_| "cleared".to_string()),
        };
        loaded.pending = pending.map(PendingHeap::Skew);
        Ok(loaded)
    }

    fn run_binomial(&self, command: &HeapCommand) -> Result<Loaded> {
        let interval = self.config.playback.interval;
        let queue = &self.binomial;
        let (mut loaded, pending) = match command {
            HeapCommand::Insert(value) => install(interval, queue.insert(*value)?, |q| {
                format!("inserted {value}; ranks {:?}", q.ranks())
            }),
            HeapCommand::ExtractMin => {
                let (loaded, value) = install(interval, queue.extract_min()?, |(min, q)| {
                    format!("extracted {min}; {} values remain", q.len())
                });
                (loaded, value.map(|(_, q)| q))
            }
            HeapCommand::FindMin => {
                let (loaded, _) =
                    install(interval, queue.find_min()?, |min| format!("minimum is {min}"));
                (loaded, None)
            }
            HeapCommand::Meld(values) => {
                let other = BinomialQueue::from_values(values)?;
                install(interval, queue.meld(&other)?, |q| {
                    format!("melded {} values; ranks {:?}", values.len(), q.ranks())
                })
            }
            HeapCommand::Clear => install(interval, queue.clear()?, |_| "cleared".to_string()),
        };
        loaded.pending = pending.map(PendingHeap::Binomial);
        Ok(loaded)
    }

    // =========================================================================
    // Playback
    // =========================================================================

    /// Commits pending heap state when `event` reports completion.
    fn observe(&mut self, event: Option<PlaybackEvent>) -> Option<PlaybackEvent> {
        if event.is_some_and(PlaybackEvent::is_completed) {
            match self.pending.take() {
                Some(PendingHeap::Skew(heap)) => {
                    tracing::debug!(size = heap.len(), "skew heap committed");
                    self.skew = heap;
                }
                Some(PendingHeap::Binomial(queue)) => {
                    tracing::debug!(size = queue.len(), "binomial queue committed");
                    self.binomial = queue;
                }
                None => {}
            }
        }
        event
    }

    /// Starts automatic playback.
    ///
    /// A trace whose cursor is already on its last snapshot completes
    /// immediately and commits.
    pub fn play(&mut self) -> Play {
        let Some(playback) = self.playback.as_mut() else {
            return Play::Ignored;
        };
        let play = playback.play();
        if let Play::Finished(event) = play {
            self.observe(event);
        }
        play
    }

    /// Forwards a timer tick and commits pending state on completion.
    pub fn tick(&mut self, handle: TimerHandle) -> Option<PlaybackEvent> {
        let event = self.playback.as_mut().and_then(|p| p.tick(handle));
        self.observe(event)
    }

    /// Stops automatic playback. Returns false if nothing was running.
    pub fn pause(&mut self) -> bool {
        self.playback.as_mut().is_some_and(|p| p.pause())
    }

    /// Moves one snapshot forward.
    pub fn step_forward(&mut self) -> Option<PlaybackEvent> {
        let event = self.playback.as_mut().and_then(|p| p.step_forward());
        self.observe(event)
    }

    /// Moves one snapshot back.
    pub fn step_backward(&mut self) -> Option<PlaybackEvent> {
        let event = self.playback.as_mut().and_then(|p| p.step_backward());
        self.observe(event)
    }

    /// Jumps to a snapshot, clamped to the trace.
    pub fn seek(&mut self, position: usize) -> Option<PlaybackEvent> {
        let event = self.playback.as_mut().and_then(|p| p.seek(position));
        self.observe(event)
    }

    /// Rewinds to the first snapshot.
    pub fn reset(&mut self) {
        if let Some(playback) = self.playback.as_mut() {
            playback.reset();
        }
    }

    /// Changes the playback interval for this and every later trace.
    pub fn set_interval(&mut self, interval: Duration) {
        self.config.playback.interval = interval;
        if let Some(playback) = self.playback.as_mut() {
            playback.set_interval(interval);
        }
    }

    /// Writes the loaded trace to `path` as `MessagePack`, returning the
    /// number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when nothing is loaded, and `Serialization` or
    /// `Io` errors from encoding and writing.
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let bytes = self
            .playback
            .as_ref()
            .map(|p| p.export())
            .transpose()?
            .flatten()
            .ok_or_else(|| Error::invalid_input("no trace is loaded"))?;
        serialize::write_bytes(&bytes, path)?;
        Ok(bytes.len())
    }
}
