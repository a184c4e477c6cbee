//! Line editor abstraction for the REPL.
//!
//! The REPL talks to a [`LineEditor`], so tests can feed it scripted input
//! while the binary uses rustyline.

use std::borrow::Cow;

use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter, Validator};
use stepwise_foundation::{Error, ErrorKind, Result};

use crate::highlight::{COMMANDS, StepwiseHighlighter};
use crate::operation::OPERATION_NAMES;

/// Result of reading a line from the editor.
#[derive(Debug)]
pub enum ReadResult {
    /// A line was successfully read.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// User pressed Ctrl+D (EOF).
    Eof,
}

/// Abstraction over line editing functionality.
pub trait LineEditor {
    /// Read a line with the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Add a line to history.
    fn add_history(&mut self, line: &str);

    /// Set available completions for the first word of a line.
    fn set_keywords(&mut self, keywords: Vec<String>);
}

/// Every word the completer offers by default.
#[must_use]
pub fn default_keywords() -> Vec<String> {
    COMMANDS
        .iter()
        .chain(OPERATION_NAMES.iter())
        .map(|word| (*word).to_string())
        .collect()
}

/// Helper for rustyline that provides completion, hints, and highlighting.
#[derive(Helper, Completer, Hinter, Validator)]
struct StepwiseHelper {
    #[rustyline(Completer)]
    completer: StepwiseCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    highlighter: StepwiseHighlighter,
}

impl Highlighter for StepwiseHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;32m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }
}

/// Completes commands and operation names, and file paths after `export`.
struct StepwiseCompleter {
    file_completer: FilenameCompleter,
    keywords: Vec<String>,
}

impl StepwiseCompleter {
    fn new() -> Self {
        Self {
            file_completer: FilenameCompleter::new(),
            keywords: default_keywords(),
        }
    }
}

impl Completer for StepwiseCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = line[..pos]
            .rfind(char::is_whitespace)
            .map_or(0, |i| i + 1);

        if start > 0 {
            if line.trim_start().starts_with("export ") {
                return self.file_completer.complete(line, pos, ctx);
            }
            return Ok((start, Vec::new()));
        }

        let word = &line[start..pos];
        let candidates = self
            .keywords
            .iter()
            .filter(|kw| kw.starts_with(word))
            .map(|kw| Pair {
                display: kw.clone(),
                replacement: kw.clone(),
            })
            .collect();

        Ok((start, candidates))
    }
}

/// Line editor implementation using rustyline.
pub struct RustylineEditor {
    editor: Editor<StepwiseHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates a new rustyline-based editor.
    ///
    /// # Errors
    ///
    /// Returns an error if rustyline initialization fails.
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(1000)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?
            .build();

        let helper = StepwiseHelper {
            completer: StepwiseCompleter::new(),
            hinter: HistoryHinter::new(),
            highlighter: StepwiseHighlighter::new(),
        };

        let mut editor = Editor::with_config(config)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(Error::new(ErrorKind::Io(e.to_string()))),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }

    fn set_keywords(&mut self, keywords: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.completer.keywords = keywords;
        }
    }
}
