//! Integration tests for Layer 3: Playback
//!
//! Drives a player over real engine traces: cursor bounds, the timer
//! protocol, and completion reporting.

mod cursor;
mod timer;

use std::time::Duration;

use stepwise_dp::{DpPhase, RobberProgress, house_robber};
use stepwise_foundation::Row;
use stepwise_playback::Player;

pub type RobberPlayer = Player<DpPhase, Row<i64>, RobberProgress>;

/// A player over the house robber trace for `houses`.
pub fn player(houses: &[i64]) -> RobberPlayer {
    let trace = house_robber::solve(houses).unwrap().trace;
    Player::with_trace(trace, Duration::from_millis(10))
}
