//! Playback controller for Stepwise traces.
//!
//! A [`Player`] replays a sealed [`Trace`](stepwise_trace::Trace) forward,
//! backward, or at a configurable speed. It never reads a clock: the front
//! end owns the sleeping and feeds [`TimerHandle`]s back through
//! [`Player::tick`].
//!
//! ```text
//! Idle --play--> Running --pause--> Paused --play--> Running
//!                   |                  |
//!                   +---last tick------+--step/seek to end--> Completed
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod player;
pub mod state;

pub use player::{DEFAULT_INTERVAL, Player};
pub use state::{Play, PlaybackEvent, PlaybackState, TimerHandle};
