//! Rule pattern model and compiler for fixgram grammars.
//!
//! This crate provides:
//! - [`RuleToken`] - One compiled element of a rule's right-hand side
//! - [`CharSet`] - Eagerly expanded character classes
//! - [`PatternCompiler`] - Compiles pattern text into tokens
//! - [`pretty`] - Renders tokens back into canonical pattern text
//!
//! # Pattern syntax
//!
//! ```text
//! 'c'          literal character
//! '[a-z0-9]'   character class
//! '[^0-9]'     negated character class
//! Name         non-terminal reference
//! X+ X* X?     repetition
//! (X)          capture the span X matches
//! %c           escape: the next character is taken verbatim
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod charset;
pub mod compiler;
pub mod pretty;
pub mod token;


pub use charset::CharSet;
pub use compiler::{CompiledPattern, ESCAPE, PatternCompiler, compile_pattern};
pub use token::{Repetition, RuleToken, TokenKind};
