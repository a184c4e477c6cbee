//! Type-erased access to a [`Player`].
//!
//! Each engine produces a differently typed trace. A session only ever needs
//! to drive the cursor and render text, so it holds the player behind the
//! object-safe [`Playback`] trait.

use std::fmt::Display;
use std::time::Duration;

use serde::Serialize;
use stepwise_foundation::Result;
use stepwise_playback::{Play, PlaybackEvent, PlaybackState, Player, TimerHandle};
use stepwise_trace::{HumanFormatter, Phase, TraceFormatter, TraceStats};

use crate::serialize;

/// A playback controller over some trace, with its types erased.
pub trait Playback {
    /// Returns the loaded trace's label.
    fn label(&self) -> &str;

    /// Returns the controller state.
    fn state(&self) -> PlaybackState;

    /// Returns the cursor position.
    fn position(&self) -> usize;

    /// Returns the number of snapshots in the loaded trace.
    fn len(&self) -> usize;

    /// Returns true if no trace is loaded.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the loaded trace is a one-step error trace.
    fn is_failure(&self) -> bool;

    /// Returns the delay between automatic steps.
    fn interval(&self) -> Duration;

    /// See [`Player::play`].
    fn play(&mut self) -> Play;

    /// See [`Player::tick`].
    fn tick(&mut self, handle: TimerHandle) -> Option<PlaybackEvent>;

    /// See [`Player::pause`].
    fn pause(&mut self) -> bool;

    /// See [`Player::step_forward`].
    fn step_forward(&mut self) -> Option<PlaybackEvent>;

    /// See [`Player::step_backward`].
    fn step_backward(&mut self) -> Option<PlaybackEvent>;

    /// See [`Player::seek`].
    fn seek(&mut self, position: usize) -> Option<PlaybackEvent>;

    /// See [`Player::reset`].
    fn reset(&mut self);

    /// See [`Player::set_interval`].
    fn set_interval(&mut self, interval: Duration);

    /// Renders the snapshot under the cursor.
    fn render_current(&self, formatter: &HumanFormatter) -> Option<String>;

    /// Renders every snapshot of the loaded trace.
    fn render_trace(&self, formatter: &HumanFormatter) -> Option<String>;

    /// Returns per-phase counts for the loaded trace.
    fn stats(&self) -> Option<TraceStats>;

    /// Encodes the loaded trace as `MessagePack`.
    ///
    /// # Errors
    ///
    /// Returns a `Serialization` error if encoding fails.
    fn export(&self) -> Result<Option<Vec<u8>>>;
}

impl<P, V, R> Playback for Player<P, V, R>
where
    P: Phase + Serialize,
    V: Display + Serialize,
    R: Display + Serialize,
{
    fn label(&self) -> &str {
        self.trace().map_or("", |t| t.label())
    }

    fn state(&self) -> PlaybackState {
        Player::state(self)
    }

    fn position(&self) -> usize {
        Player::position(self)
    }

    fn len(&self) -> usize {
        Player::len(self)
    }

    fn is_failure(&self) -> bool {
        self.trace().is_some_and(|t| t.is_failure())
    }

    fn interval(&self) -> Duration {
        Player::interval(self)
    }

    fn play(&mut self) -> Play {
        Player::play(self)
    }

    fn tick(&mut self, handle: TimerHandle) -> Option<PlaybackEvent> {
        Player::tick(self, handle)
    }

    fn pause(&mut self) -> bool {
        Player::pause(self)
    }

    fn step_forward(&mut self) -> Option<PlaybackEvent> {
        Player::step_forward(self)
    }

    fn step_backward(&mut self) -> Option<PlaybackEvent> {
        Player::step_backward(self)
    }

    fn seek(&mut self, position: usize) -> Option<PlaybackEvent> {
        Player::seek(self, position)
    }

    fn reset(&mut self) {
        Player::reset(self);
    }

    fn set_interval(&mut self, interval: Duration) {
        Player::set_interval(self, interval);
    }

    fn render_current(&self, formatter: &HumanFormatter) -> Option<String> {
        self.current().map(|s| formatter.format(s))
    }

    fn render_trace(&self, formatter: &HumanFormatter) -> Option<String> {
        self.trace().map(|t| formatter.format_trace(t))
    }

    fn stats(&self) -> Option<TraceStats> {
        self.trace().map(stepwise_trace::Trace::stats)
    }

    fn export(&self) -> Result<Option<Vec<u8>>> {
        self.trace().map(serialize::to_bytes).transpose()
    }
}
