//! Error types for the Stepwise system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// Result alias used throughout Stepwise.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Stepwise operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput(message.into()))
    }

    /// Creates an empty heap error.
    #[must_use]
    pub fn empty_heap() -> Self {
        Self::new(ErrorKind::EmptyHeap)
    }

    /// Creates an empty queue error.
    #[must_use]
    pub fn empty_queue() -> Self {
        Self::new(ErrorKind::EmptyQueue)
    }

    /// Creates an index out of bounds error.
    #[must_use]
    pub fn index_out_of_bounds(index: usize, length: usize) -> Self {
        Self::new(ErrorKind::IndexOutOfBounds { index, length })
    }

    /// Creates an engine misuse error.
    #[must_use]
    pub fn engine_misuse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EngineMisuse(message.into()))
    }

    /// Creates an operation-in-progress error.
    #[must_use]
    pub fn operation_in_progress() -> Self {
        Self::new(ErrorKind::OperationInProgress)
    }

    /// Creates an unknown operation error.
    #[must_use]
    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownOperation(name.into()))
    }

    /// Returns true if this error is a precondition failure that should be
    /// surfaced as a one-step error trace rather than rejected outright.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::EmptyHeap | ErrorKind::EmptyQueue | ErrorKind::IndexOutOfBounds { .. }
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-range input to an algorithm engine.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Extract or peek on an empty heap.
    #[error("heap is empty")]
    EmptyHeap,

    /// Dequeue or peek on an empty queue.
    #[error("queue is empty")]
    EmptyQueue,

    /// Index out of bounds.
    #[error("index out of bounds: {index} (length {length})")]
    IndexOutOfBounds {
        /// The index that was accessed.
        index: usize,
        /// The actual length of the collection.
        length: usize,
    },

    /// Internal programmer error in how an engine or recorder was driven.
    #[error("engine misuse: {0}")]
    EngineMisuse(String),

    /// A new operation was requested while playback is running.
    #[error("an operation is still playing back")]
    OperationInProgress,

    /// The requested operation name is not known.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// File system failure.
    #[error("io error: {0}")]
    Io(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Operation that was being performed (e.g. `skew.insert`).
    pub operation: Option<String>,
    /// Argument or field that was rejected.
    pub field: Option<String>,
    /// Additional frames, innermost last.
    pub frames: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Sets the rejected field.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.frames.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = &self.operation {
            write!(f, "in {operation}")?;
            if let Some(field) = &self.field {
                write!(f, " ({field})")?;
            }
        }
        if !self.frames.is_empty() {
            writeln!(f)?;
            for frame in &self.frames {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
