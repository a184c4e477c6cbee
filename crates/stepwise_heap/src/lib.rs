//! Mergeable heap engines for Stepwise.
//!
//! Two persistent min-heaps over `i64` values, each operation returning the
//! new heap together with the trace of how it was built:
//!
//! - [`SkewHeap`] - a self-adjusting binary tree merged along right spines
//! - [`BinomialQueue`] - a forest of binomial trees merged by binary addition
//!
//! Operations on an empty heap that need a minimum do not panic or return a
//! bare error: they produce a one-step trace whose only snapshot has the
//! `Error` phase, with the failure in the run's outcome.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod binomial;
pub mod phase;
pub mod progress;
pub mod skew;

pub use binomial::{BinomialNode, BinomialQueue, BinomialRun, BinomialTrace, BinomialView};
pub use phase::HeapPhase;
pub use progress::HeapProgress;
pub use skew::{SkewHeap, SkewNode, SkewRun, SkewTrace, SkewView};
