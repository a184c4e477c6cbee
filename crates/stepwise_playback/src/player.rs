//! The playback controller.
//!
//! A [`Player`] owns one sealed trace and a cursor into it. It never touches
//! a clock: `play` hands out a [`TimerHandle`] and the front end calls
//! [`Player::tick`] with that handle once per interval. Pausing, resetting,
//! or loading drops the handle, and ticks carrying a dropped handle are
//! ignored, so at most one timer is ever live.

use std::time::Duration;

use stepwise_trace::{Phase, Snapshot, Trace};

use crate::state::{Play, PlaybackEvent, PlaybackState, TimerHandle};

/// Default delay between automatic steps.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Cursor over a completed trace with play/pause/step/seek/reset.
#[derive(Clone, Debug)]
pub struct Player<P, V, R> {
    /// The loaded trace, if any.
    trace: Option<Trace<P, V, R>>,
    /// Index of the snapshot on display.
    position: usize,
    /// Current lifecycle state.
    state: PlaybackState,
    /// The live timer while `Running`.
    timer: Option<TimerHandle>,
    /// Next handle number to issue.
    next_timer: u64,
    /// Delay the front end should wait between ticks.
    interval: Duration,
    /// Whether completion was already reported for the loaded trace.
    completion_reported: bool,
}

impl<P: Phase, V, R> Default for Player<P, V, R> {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl<P: Phase, V, R> Player<P, V, R> {
    /// Creates an empty player.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            trace: None,
            position: 0,
            state: PlaybackState::Idle,
            timer: None,
            next_timer: 0,
            interval,
            completion_reported: false,
        }
    }

    /// Creates a player with `trace` already loaded.
    #[must_use]
    pub fn with_trace(trace: Trace<P, V, R>, interval: Duration) -> Self {
        let mut player = Self::new(interval);
        player.load(trace);
        player
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    /// Returns the cursor position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of snapshots in the loaded trace.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trace.as_ref().map_or(0, Trace::len)
    }

    /// Returns true if no trace is loaded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.trace.is_none()
    }

    /// Returns the loaded trace.
    #[must_use]
    pub const fn trace(&self) -> Option<&Trace<P, V, R>> {
        self.trace.as_ref()
    }

    /// Returns the snapshot under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&Snapshot<P, V, R>> {
        self.trace.as_ref().and_then(|t| t.get(self.position))
    }

    /// Returns the live timer, if playing.
    #[must_use]
    pub const fn active_timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    /// Returns the delay between automatic steps.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true if the cursor is on the last snapshot.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.trace
            .as_ref()
            .is_some_and(|t| self.position == t.last_index())
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    fn set_state(&mut self, next: PlaybackState) {
        if self.state != next {
            tracing::debug!(from = %self.state, to = %next, position = self.position, "playback state");
            self.state = next;
        }
    }

    /// Enters `Completed` and returns the completion event the first time.
    fn complete(&mut self) -> Option<PlaybackEvent> {
        self.timer = None;
        self.set_state(PlaybackState::Completed);
        if self.completion_reported {
            return None;
        }
        self.completion_reported = true;
        Some(PlaybackEvent::Completed {
            position: self.position,
        })
    }

    /// Moves the cursor outside of `Running` and reports the move.
    fn move_to(&mut self, position: usize) -> Option<PlaybackEvent> {
        if position == self.position {
            return None;
        }
        self.position = position;
        if self.at_end() {
            return Some(self.complete().unwrap_or(PlaybackEvent::Moved { position }));
        }
        self.set_state(PlaybackState::Paused);
        Some(PlaybackEvent::Moved { position })
    }

    /// Installs a new trace: cursor 0, `Idle`, timer cancelled, completion
    /// not yet reported.
    pub fn load(&mut self, trace: Trace<P, V, R>) {
        tracing::debug!(trace = trace.label(), steps = trace.len(), "trace loaded");
        self.trace = Some(trace);
        self.position = 0;
        self.timer = None;
        self.completion_reported = false;
        self.set_state(PlaybackState::Idle);
    }

    /// Starts automatic playback from `Idle` or `Paused`.
    ///
    /// Exactly one timer is armed per successful call. Calls while `Running`
    /// or `Completed` are ignored.
    pub fn play(&mut self) -> Play {
        if self.trace.is_none()
            || matches!(self.state, PlaybackState::Running | PlaybackState::Completed)
        {
            return Play::Ignored;
        }
        if self.at_end() {
            return Play::Finished(self.complete());
        }

        let handle = TimerHandle(self.next_timer);
        self.next_timer += 1;
        self.timer = Some(handle);
        self.set_state(PlaybackState::Running);
        Play::Armed(handle)
    }

    /// Advances one snapshot on behalf of the timer `handle`.
    ///
    /// Ticks for any handle other than the live one are ignored. Reaching the
    /// last snapshot cancels the timer and enters `Completed`.
    pub fn tick(&mut self, handle: TimerHandle) -> Option<PlaybackEvent> {
        if self.state != PlaybackState::Running || self.timer != Some(handle) {
            tracing::trace!(%handle, "stale tick ignored");
            return None;
        }

        self.position += 1;
        tracing::trace!(position = self.position, "tick");
        if self.at_end() {
            let position = self.position;
            return Some(self.complete().unwrap_or(PlaybackEvent::Moved { position }));
        }
        Some(PlaybackEvent::Moved {
            position: self.position,
        })
    }

    /// Stops automatic playback, keeping the cursor where it is.
    ///
    /// Returns false if the player was not running.
    pub fn pause(&mut self) -> bool {
        if self.state != PlaybackState::Running {
            return false;
        }
        self.timer = None;
        self.set_state(PlaybackState::Paused);
        true
    }

    /// Moves one snapshot forward. Ignored while running or at the end.
    pub fn step_forward(&mut self) -> Option<PlaybackEvent> {
        if self.state == PlaybackState::Running || self.trace.is_none() || self.at_end() {
            return None;
        }
        self.move_to(self.position + 1)
    }

    /// Moves one snapshot back. Ignored while running or at the start.
    ///
    /// Stepping back from `Completed` leaves the player `Paused`.
    pub fn step_backward(&mut self) -> Option<PlaybackEvent> {
        if self.state == PlaybackState::Running || self.position == 0 {
            return None;
        }
        self.move_to(self.position - 1)
    }

    /// Jumps to `position`, clamped to the trace. Ignored while running.
    pub fn seek(&mut self, position: usize) -> Option<PlaybackEvent> {
        if self.state == PlaybackState::Running {
            return None;
        }
        let last = self.trace.as_ref().map(Trace::last_index)?;
        self.move_to(position.min(last))
    }

    /// Returns to `Idle` at the first snapshot, cancelling any timer.
    ///
    /// Completion is still reported at most once for the loaded trace.
    pub fn reset(&mut self) {
        self.timer = None;
        self.position = 0;
        self.set_state(PlaybackState::Idle);
    }

    /// Changes the delay between automatic steps.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }
}
