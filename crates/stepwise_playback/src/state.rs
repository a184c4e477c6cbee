//! Playback states, timer handles, and the events a cursor move produces.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where a [`Player`](crate::Player) is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlaybackState {
    /// Loaded or reset; nothing has played yet.
    #[default]
    Idle,
    /// A timer is armed and ticks advance the cursor.
    Running,
    /// Stopped somewhere before the end.
    Paused,
    /// The cursor reached the last snapshot.
    Completed,
}

impl PlaybackState {
    /// Returns the lowercase state name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies one armed timer.
///
/// Handles are never reused within a player, so a tick carrying an old
/// handle can always be told apart from the active one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub(crate) u64);

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// Observable result of a cursor move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// The cursor moved to `position`.
    Moved {
        /// New cursor position.
        position: usize,
    },
    /// The cursor reached the last snapshot for the first time since the
    /// trace was loaded.
    Completed {
        /// Position of the last snapshot.
        position: usize,
    },
}

impl PlaybackEvent {
    /// Returns the cursor position after the move.
    #[must_use]
    pub const fn position(self) -> usize {
        match self {
            Self::Moved { position } | Self::Completed { position } => position,
        }
    }

    /// Returns true for the completion event.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Result of [`Player::play`](crate::Player::play).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Play {
    /// Playback started; call `tick` with this handle after each interval.
    Armed(TimerHandle),
    /// The cursor was already on the last snapshot, so playback finished at
    /// once. Carries the completion event unless it was reported before.
    Finished(Option<PlaybackEvent>),
    /// Nothing to do: already running, already completed, or nothing loaded.
    Ignored,
}

impl Play {
    /// Returns the armed timer, if any.
    #[must_use]
    pub const fn handle(self) -> Option<TimerHandle> {
        match self {
            Self::Armed(handle) => Some(handle),
            Self::Finished(_) | Self::Ignored => None,
        }
    }
}
