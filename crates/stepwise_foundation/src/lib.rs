//! Core errors, identifiers, and persistent collections for Stepwise.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context
//! - [`NodeId`] - Stable identifiers for heap nodes
//! - Persistent collections ([`Grid`], [`Row`]) with structural sharing

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod id;

pub use collections::{Grid, Row};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use id::{NodeId, NodeIdGen};
