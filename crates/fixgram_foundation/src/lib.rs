//! Core values, persistent collections, and error types for fixgram.
//!
//! This crate provides:
//! - [`Value`] - The dynamic value passed to and produced by rule actions
//! - [`Error`] - Rich error types with context
//! - Persistent vectors ([`LtVec`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod value;

pub use collections::LtVec;
pub use error::{
    Error, ErrorContext, ErrorKind, GrammarValidationError, PatternSyntaxError, SemanticLimit,
};
pub use value::Value;

/// Result type alias using the fixgram [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
