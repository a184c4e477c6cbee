//! Session adapter, REPL, CLI, and trace export for Stepwise.
//!
//! This crate provides:
//! - [`Session`] - runs named operations, owns the committed heaps, and
//!   drives playback of the latest trace
//! - [`Repl`] - interactive command shell over a session
//! - [`Operation`] and [`Args`] - parsing of `name key=value ...` requests
//! - `MessagePack` export of traces ([`to_bytes`], [`save_to_file`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod editor;
pub mod generate;
pub mod highlight;
pub mod operation;
pub mod playback;
pub mod repl;
pub mod serialize;
pub mod session;

pub use config::{Limits, PlaybackConfig, SessionConfig};
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use generate::InputGenerator;
pub use operation::{Args, HeapCommand, HeapKind, MAX_RANDOM_COUNT, OPERATION_NAMES, Operation};
pub use playback::Playback;
pub use repl::Repl;
pub use serialize::{from_bytes, load_from_file, save_to_file, to_bytes, write_bytes};
pub use session::{Session, Triggered};

pub use stepwise_playback::{Play, PlaybackEvent, PlaybackState, TimerHandle};
