//! Syntax highlighting for the REPL.

use std::borrow::Cow;

use crate::operation::OPERATION_NAMES;

/// Words the REPL handles itself rather than passing to an engine.
pub const COMMANDS: [&str; 16] = [
    "play", "pause", "step", "back", "seek", "reset", "show", "trace", "stats", "speed", "export",
    "heaps", "operations", "help", "quit", "exit",
];

/// Highlighter for REPL command lines.
pub struct StepwiseHighlighter {}

impl StepwiseHighlighter {
    /// Creates a new highlighter.
    pub const fn new() -> Self {
        Self {}
    }

    /// Highlight a line of input.
    ///
    /// The first word is colored as a command or operation name, `key=`
    /// prefixes in cyan, and numbers in magenta.
    #[allow(clippy::unused_self)]
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.trim().is_empty() {
            return Cow::Borrowed(line);
        }

        let mut result = String::with_capacity(line.len() * 2);
        let mut chars = line.chars().peekable();
        let mut first_word = true;

        while let Some(c) = chars.next() {
            match c {
                c if c.is_whitespace() => result.push(c),

                // Numbers, possibly negative, possibly comma-separated
                c if c.is_ascii_digit()
                    || (c == '-' && chars.peek().is_some_and(char::is_ascii_digit)) =>
                {
                    first_word = false;
                    result.push_str("\x1b[35m"); // magenta
                    result.push(c);
                    while let Some(&next) = chars.peek() {
                        if next.is_ascii_digit() || next == ',' || next == '-' {
                            result.push(next);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    result.push_str("\x1b[0m");
                }

                _ => {
                    let mut word = String::new();
                    word.push(c);
                    while let Some(&next) = chars.peek() {
                        if next.is_whitespace() || next == '=' {
                            break;
                        }
                        word.push(next);
                        chars.next();
                    }

                    let keyed = chars.peek() == Some(&'=');
                    let color = if keyed {
                        "\x1b[36m" // cyan
                    } else if first_word && COMMANDS.contains(&word.as_str()) {
                        "\x1b[32m" // green
                    } else if first_word && OPERATION_NAMES.contains(&word.as_str()) {
                        "\x1b[1;32m" // bold green
                    } else if first_word {
                        "\x1b[31m" // red: not a known command
                    } else {
                        ""
                    };
                    first_word = false;

                    if color.is_empty() {
                        result.push_str(&word);
                    } else {
                        result.push_str(color);
                        result.push_str(&word);
                        if keyed {
                            result.push('=');
                            chars.next();
                        }
                        result.push_str("\x1b[0m");
                    }
                }
            }
        }

        Cow::Owned(result)
    }
}

impl Default for StepwiseHighlighter {
    fn default() -> Self {
        Self::new()
    }
}
