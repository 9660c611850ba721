//! fixgram - Grammar-driven rewriting to a fixpoint
//!
//! This crate re-exports all layers of the fixgram system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: fixgram_debug      - Reduction tracing and trace formatting
//! Layer 2: fixgram_engine     - Grammar registry, matcher, reduction loop
//! Layer 1: fixgram_pattern    - Rule tokens and the pattern compiler
//! Layer 0: fixgram_foundation - Core types (Value, Error)
//! ```
//!
//! # Example
//!
//! ```
//! use fixgram::engine::{Grammar, Parser};
//! use fixgram::foundation::Value;
//!
//! let mut grammar = Grammar::new("Expr");
//! grammar.define_rule("Expr", "(Expr) '+' (Expr)", |args| {
//!     Ok(Value::Int(args[0].expect_int()? + args[1].expect_int()?))
//! })?;
//! grammar.define_rule("Expr", "(Expr) '*' (Expr)", |args| {
//!     Ok(Value::Int(args[0].expect_int()? * args[1].expect_int()?))
//! })?;
//! grammar.define_rule("Expr", "'(' (Expr) ')'", |args| Ok(args[0].clone()))?;
//! grammar.define_rule("Expr", "(Num)", |args| Ok(args[0].clone()))?;
//! grammar.define_rule("Num", "('[0-9]'+)", |args| Ok(Value::Int(args[0].parse_int()?)))?;
//!
//! let parser = Parser::new(grammar)?;
//! assert_eq!(parser.parse("(1+2)*3")?.into_value(), Some(Value::Int(9)));
//! # Ok::<(), fixgram::foundation::Error>(())
//! ```

pub use fixgram_debug as debug;
pub use fixgram_engine as engine;
pub use fixgram_foundation as foundation;
pub use fixgram_pattern as pattern;
