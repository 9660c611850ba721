//! Grammar registry and fixpoint reduction engine for fixgram.
//!
//! This crate provides:
//! - [`Grammar`] - Rule declaration and validation
//! - [`Parser`] - Rewrites input to a fixpoint using a validated grammar
//! - [`ParseOutcome`] - Accepted value or the residual buffer
//! - [`ReductionObserver`] - Hooks for watching a parse
//!
//! # Example
//!
//! ```
//! use fixgram_engine::{Grammar, Parser};
//! use fixgram_foundation::Value;
//!
//! let mut grammar = Grammar::new("Sum");
//! grammar.define_rule("Sum", "(Sum) '+' (Sum)", |args| {
//!     Ok(Value::Int(args[0].expect_int()? + args[1].expect_int()?))
//! })?;
//! grammar.define_rule("Sum", "('[0-9]'+)", |args| Ok(Value::Int(args[0].parse_int()?)))?;
//!
//! let parser = Parser::new(grammar)?;
//! assert_eq!(parser.parse("1+20+300")?.into_value(), Some(Value::Int(321)));
//! # Ok::<(), fixgram_foundation::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod grammar;
pub mod matcher;
pub mod observer;
pub mod outcome;
pub mod parser;
pub mod symbol;

pub use config::{
    DEFAULT_MAX_BUFFER_GROWTH, DEFAULT_MAX_REDUCTIONS, ParserConfig, RulePriority,
};
pub use grammar::{Action, Grammar, Rule};
pub use matcher::RuleMatch;
pub use observer::{NoopObserver, ReductionEvent, ReductionObserver};
pub use outcome::ParseOutcome;
pub use parser::Parser;
pub use symbol::{Buffer, Symbol};
