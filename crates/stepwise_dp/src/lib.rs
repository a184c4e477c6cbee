//! Dynamic-programming engines for Stepwise.
//!
//! Each engine validates its input, fills its table eagerly, reconstructs one
//! optimal solution by walking the table backwards, and returns the answer
//! together with the full [`Trace`](stepwise_trace::Trace) of the run.
//!
//! - [`knapsack`] - 0/1 knapsack over a capacity grid
//! - [`lcs`] - longest common subsequence of two strings
//! - [`coin_change`] - fewest coins for an amount
//! - [`house_robber`] - best non-adjacent sum

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod coin_change;
pub mod house_robber;
pub mod knapsack;
pub mod lcs;
pub mod phase;
mod table;

pub use coin_change::{CoinChange, CoinChangeRun, CoinChangeTrace, CoinProgress, CoinTable, Reach};
pub use house_robber::{RobberProgress, RobberRun, RobberSolution, RobberTrace};
pub use knapsack::{
    Item, KnapsackProgress, KnapsackRun, KnapsackSolution, KnapsackTrace, SelectedItem,
};
pub use lcs::{LcsProgress, LcsRun, LcsSolution, LcsTrace};
pub use phase::DpPhase;
