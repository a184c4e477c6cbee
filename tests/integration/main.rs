//! Integration tests across all layers
//!
//! Runs operations through a session the way the REPL and CLI do: parse,
//! trigger, play back, commit, and export.

mod export;
mod repl;
mod session;

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use stepwise_runtime::{Args, PlaybackConfig, Session, SessionConfig};

/// A session that loads traces without playing them and never sleeps.
pub fn manual_session() -> Session {
    let playback = PlaybackConfig::manual().with_interval_ms(0);
    Session::new(SessionConfig::default().with_playback(playback))
}

/// Parses an argument string, panicking on malformed input.
pub fn args(text: &str) -> Args {
    Args::parse(text).unwrap()
}

/// Plays the loaded trace to its end, tick by tick.
pub fn finish(session: &mut Session) {
    if let Some(handle) = session.play().handle() {
        while session.tick(handle).is_some() {}
    }
}

/// A fresh path under the system temp directory.
pub fn temp_path(name: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("stepwise-{}-{n}-{name}", std::process::id()))
}
