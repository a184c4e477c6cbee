//! The main REPL implementation.

use std::io::{self, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use stepwise_foundation::{Error, ErrorKind, Result};
use stepwise_playback::{Play, PlaybackEvent, TimerHandle};

use crate::config::SessionConfig;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::operation::{Args, OPERATION_NAMES};
use crate::session::Session;

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Session state (heaps, loaded trace, playback).
    session: Session,

    /// Timer of a playback left running by `play N`.
    timer: Option<TimerHandle>,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor).with_session(Session::new(config)))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor and a default session.
    pub fn with_editor(editor: E) -> Self {
        Self {
            editor,
            session: Session::default(),
            timer: None,
            show_banner: true,
            prompt: "stepwise> ".to_string(),
        }
    }

    /// Sets the session for this REPL.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self.timer = None;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the REPL loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    self.print_error(&e);
                    if matches!(e.kind, ErrorKind::Io(_)) {
                        return Err(e);
                    }
                }
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let input = match self.editor.read_line(&self.prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => {
                println!();
                return Ok(true);
            }
            ReadResult::Eof => return Ok(false),
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(true);
        }
        self.editor.add_history(trimmed);

        if matches!(trimmed, "quit" | "exit") {
            return Ok(false);
        }

        if let Err(e) = self.eval(trimmed) {
            self.print_error(&e);
        }
        Ok(true)
    }

    /// Evaluates one command line.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown commands, malformed arguments, rejected
    /// operations, and failed exports.
    pub fn eval(&mut self, input: &str) -> Result<()> {
        let input = input.trim();
        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map_or((input, ""), |(w, r)| (w, r.trim()));

        match word {
            "" => Ok(()),
            "help" => {
                print_help();
                Ok(())
            }
            "operations" => {
                for name in OPERATION_NAMES {
                    println!("  {name}");
                }
                Ok(())
            }
            "play" => {
                let limit = if rest.is_empty() {
                    None
                } else {
                    Some(parse_number::<usize>("play", rest)?)
                };
                self.play(limit);
                Ok(())
            }
            "pause" => {
                if self.session.pause() {
                    self.timer = None;
                    println!("paused at step {}", self.session.position() + 1);
                } else {
                    println!("not playing");
                }
                Ok(())
            }
            "step" => {
                let event = self.session.step_forward();
                self.after_move(event);
                Ok(())
            }
            "back" => {
                let event = self.session.step_backward();
                self.after_move(event);
                Ok(())
            }
            "seek" => {
                let step = parse_number::<usize>("seek", rest)?;
                let event = self.session.seek(step.saturating_sub(1));
                self.after_move(event);
                Ok(())
            }
            "reset" => {
                self.session.reset();
                self.timer = None;
                self.show_current();
                Ok(())
            }
            "show" => {
                self.show_current();
                Ok(())
            }
            "trace" => {
                match self.session.trace_outline() {
                    Some(outline) => println!("{outline}"),
                    None => println!("nothing loaded"),
                }
                Ok(())
            }
            "stats" => {
                match self.session.stats() {
                    Some(stats) => println!("{stats}"),
                    None => println!("nothing loaded"),
                }
                Ok(())
            }
            "speed" => {
                let millis = parse_number::<u64>("speed", rest)?;
                self.session.set_interval(Duration::from_millis(millis));
                println!("interval {millis}ms");
                Ok(())
            }
            "export" => {
                if rest.is_empty() {
                    return Err(Error::invalid_input("export needs a file path"));
                }
                let written = self.session.export(Path::new(rest))?;
                println!("wrote {written} bytes to {rest}");
                Ok(())
            }
            "heaps" => {
                println!("skew:     {}", self.session.skew());
                println!("binomial: {}", self.session.binomial());
                Ok(())
            }
            name => self.trigger(name, rest),
        }
    }

    fn trigger(&mut self, name: &str, rest: &str) -> Result<()> {
        let args = Args::parse(rest)?;
        let triggered = self.session.trigger_named(name, &args)?;
        self.timer = None;

        let color = if triggered.failed { "\x1b[33m" } else { "\x1b[1m" };
        println!(
            "{color}{}: {}\x1b[0m ({} steps)",
            triggered.operation, triggered.summary, triggered.steps
        );

        self.show_current();
        if let Some(handle) = triggered.timer {
            self.timer = Some(handle);
            self.play(None);
        }
        Ok(())
    }

    /// Drives the live timer, sleeping one interval per tick.
    ///
    /// With a limit, stops after that many ticks and leaves playback running
    /// so `play` can resume it or `pause` can stop it.
    fn play(&mut self, limit: Option<usize>) {
        let handle = match self.timer {
            Some(handle) if self.session.is_running() => handle,
            _ => match self.session.play() {
                Play::Armed(handle) => handle,
                Play::Finished(event) => {
                    self.after_move(event);
                    return;
                }
                Play::Ignored => {
                    println!("nothing to play");
                    return;
                }
            },
        };
        self.timer = Some(handle);

        let mut ticks = 0;
        while self.session.is_running() && limit.is_none_or(|limit| ticks < limit) {
            thread::sleep(self.session.interval());
            let event = self.session.tick(handle);
            ticks += 1;
            self.show_current();
            if event.is_some_and(PlaybackEvent::is_completed) {
                println!("\x1b[1;32mcomplete\x1b[0m");
            }
        }

        if !self.session.is_running() {
            self.timer = None;
        }
    }

    fn after_move(&self, event: Option<PlaybackEvent>) {
        match event {
            Some(event) => {
                self.show_current();
                if event.is_completed() {
                    println!("\x1b[1;32mcomplete\x1b[0m");
                }
            }
            None => println!("cannot move ({})", self.session.playback_state()),
        }
    }

    fn show_current(&self) {
        match self.session.current_snapshot() {
            Some(text) => println!("{text}"),
            None => println!("nothing loaded"),
        }
        let _ = io::stdout().flush();
    }

    /// Prints an error to stderr.
    #[allow(clippy::unused_self)]
    fn print_error(&self, error: &Error) {
        eprintln!("\x1b[31mError: {error}\x1b[0m");
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mStepwise\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        println!("Run an operation, then watch it step by step. Type `help` for commands.\n");
        let _ = io::stdout().flush();
    }
}

fn parse_number<T: std::str::FromStr>(command: &str, text: &str) -> Result<T> {
    text.parse::<T>()
        .map_err(|_| Error::invalid_input(format!("{command} needs a number, got '{text}'")))
}

fn print_help() {
    println!(
        "\x1b[1mOPERATIONS:\x1b[0m
    knapsack capacity=W weights=a,b,.. values=a,b,..
    lcs A B                       (or a=.. b=..)
    coin-change amount=N coins=a,b,..
    house-robber houses=a,b,..
    skew.insert N  skew.extract-min  skew.find-min  skew.meld values=..  skew.clear
    binomial.insert N  binomial.extract-min  binomial.find-min  binomial.meld values=..  binomial.clear
    Add random=N seed=S to generate inputs.

\x1b[1mPLAYBACK:\x1b[0m
    play [N]       Play to the end, or N steps
    pause          Stop a playback left running
    step / back    Move one step
    seek N         Jump to step N
    reset          Back to the first step
    speed MS       Set the interval between steps

\x1b[1mINSPECT:\x1b[0m
    show           Current step with its state
    trace          Every step, one line each
    stats          Step counts by phase
    heaps          Committed heap contents
    export PATH    Write the trace as MessagePack
    operations     List operation names
    quit           Exit (or Ctrl+D)"
    );
}
