//! Stepwise - execution traces and playback for algorithm visualization
//!
//! This crate re-exports all layers of the Stepwise system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: stepwise_runtime    - Session adapter, REPL, CLI, trace export
//! Layer 3: stepwise_playback   - Timer-driven cursor over a trace
//! Layer 2: stepwise_dp         - Knapsack, LCS, coin change, house robber
//!          stepwise_heap       - Skew heap, binomial queue
//! Layer 1: stepwise_trace      - Snapshots, recorder, formatting
//! Layer 0: stepwise_foundation - Core types (Row, Grid, NodeId, Error)
//! ```

pub use stepwise_dp as dp;
pub use stepwise_foundation as foundation;
pub use stepwise_heap as heap;
pub use stepwise_playback as playback;
pub use stepwise_runtime as runtime;
pub use stepwise_trace as trace;
