//! Scripted REPL sessions

use std::collections::VecDeque;

use stepwise_foundation::Result;
use stepwise_runtime::{
    LineEditor, PlaybackConfig, PlaybackState, ReadResult, Repl, Session, SessionConfig,
};

/// Feeds a fixed list of lines, then reports end of input.
struct Script {
    lines: VecDeque<String>,
    history: Vec<String>,
}

impl Script {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| (*l).to_string()).collect(),
            history: Vec::new(),
        }
    }
}

impl LineEditor for Script {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(self
            .lines
            .pop_front()
            .map_or(ReadResult::Eof, ReadResult::Line))
    }

    fn add_history(&mut self, line: &str) {
        self.history.push(line.to_string());
    }

    fn set_keywords(&mut self, _keywords: Vec<String>) {}
}

fn repl(lines: &[&str], autoplay: bool) -> Repl<Script> {
    let playback = PlaybackConfig::default()
        .with_interval_ms(0)
        .with_autoplay(autoplay);
    Repl::with_editor(Script::new(lines))
        .with_session(Session::new(SessionConfig::default().with_playback(playback)))
        .without_banner()
}

#[test]
fn autoplay_commits_heap_operations() {
    let mut repl = repl(
        &["skew.insert 4", "skew.insert 2", "binomial.insert 7", "quit"],
        true,
    );
    repl.run().unwrap();

    assert_eq!(repl.session().skew().len(), 2);
    assert_eq!(repl.session().skew().peek(), Some(2));
    assert_eq!(repl.session().binomial().len(), 1);
}

#[test]
fn manual_stepping_and_seeking() {
    let mut repl = repl(
        &["house-robber houses=2,7,9", "step", "step", "back", "seek 5"],
        false,
    );
    repl.run().unwrap();

    assert_eq!(repl.session().position(), 4);
    assert_eq!(repl.session().playback_state(), PlaybackState::Paused);
}

#[test]
fn errors_do_not_stop_the_loop() {
    let mut repl = repl(
        &["frobnicate", "knapsack capacity=x", "seek nope", "lcs ABC BC"],
        true,
    );
    repl.run().unwrap();

    assert_eq!(repl.session().trace_label(), Some("lcs"));
    assert_eq!(repl.session().playback_state(), PlaybackState::Completed);
}

#[test]
fn partial_play_blocks_new_operations_until_paused() {
    let mut repl = repl(&["house-robber 2,7,9", "play 2"], false);
    repl.run().unwrap();
    assert!(repl.session().is_running());
    assert_eq!(repl.session().position(), 2);

    assert!(repl.eval("house-robber 1").is_err());
    repl.eval("pause").unwrap();
    repl.eval("house-robber 1").unwrap();
    assert_eq!(repl.session().position(), 0);
}

#[test]
fn speed_changes_the_session_interval() {
    let mut repl = repl(&["speed 125"], false);
    repl.run().unwrap();
    assert_eq!(repl.session().config().playback.interval.as_millis(), 125);
}

#[test]
fn export_needs_a_path() {
    let mut repl = repl(&[], false);
    repl.eval("house-robber 1,2").unwrap();
    assert!(repl.eval("export").is_err());
}
