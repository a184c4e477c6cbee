//! Snapshots, trace recording, and trace formatting for Stepwise.
//!
//! An engine runs once, eagerly, writing a [`Snapshot`] into a
//! [`TraceRecorder`] for every observable change. [`TraceRecorder::finish`]
//! seals the result into an immutable [`Trace`] that a playback controller
//! can replay in any direction.
//!
//! # Example
//!
//! ```
//! use stepwise_foundation::Row;
//! use stepwise_trace::{Focus, Phase, TraceRecorder};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//! enum Step { Fill, Done, Error }
//!
//! impl std::fmt::Display for Step {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         f.write_str(self.name())
//!     }
//! }
//!
//! impl Phase for Step {
//!     fn name(&self) -> &'static str {
//!         match self { Self::Fill => "fill", Self::Done => "done", Self::Error => "error" }
//!     }
//!     fn error() -> Self { Self::Error }
//!     fn is_terminal(&self) -> bool { !matches!(self, Self::Fill) }
//! }
//!
//! let mut rec = TraceRecorder::new("fill");
//! let mut row = Row::filled(3, 0u32);
//! for i in 0..3 {
//!     row.set(i, 1).unwrap();
//!     rec.record(Step::Fill, &row, Focus::index(i), format!("fill {i}"), &(i as u32 + 1)).unwrap();
//! }
//! rec.record(Step::Done, &row, Focus::none(), "done", &3).unwrap();
//!
//! let trace = rec.finish().unwrap();
//! assert_eq!(trace.len(), 4);
//! assert_eq!(trace.first().unwrap().state_view().get(1), Some(&0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod format;
pub mod record;
pub mod recorder;
pub mod trace;

pub use format::{HumanFormatter, TraceFormatter};
pub use record::{Focus, Mark, Phase, Snapshot};
pub use recorder::TraceRecorder;
pub use trace::{Trace, TraceStats, Traced};
