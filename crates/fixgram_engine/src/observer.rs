//! Hooks for watching a parse as it runs.
//!
//! Every hook has an empty default body, so observers implement only what
//! they need.

use std::ops::Range;

use fixgram_foundation::{Error, Value};

use crate::outcome::ParseOutcome;
use crate::symbol::Buffer;

/// One reduction, reported after the action has run and before the buffer
/// is rewritten.
#[derive(Clone, Debug)]
pub struct ReductionEvent<'a> {
    /// Pass number, starting at 1.
    pub pass: usize,
    /// Ordinal of the rule that matched.
    pub rule: u32,
    /// The rule's left-hand side.
    pub lhs: &'a str,
    /// The replaced entries.
    pub span: Range<usize>,
    /// Arguments passed to the action.
    pub captures: &'a [Value],
    /// The action's result.
    pub value: &'a Value,
}

/// Receives parse progress from [`Parser::parse_observed`](crate::Parser::parse_observed).
pub trait ReductionObserver {
    /// Called once before the first pass.
    fn on_parse_start(&mut self, _input: &str) {}

    /// Called at the start of every pass with the current buffer.
    fn on_pass_start(&mut self, _pass: usize, _buffer: &Buffer) {}

    /// Called for every reduction.
    fn on_reduction(&mut self, _event: &ReductionEvent<'_>) {}

    /// Called once the buffer reaches a fixpoint.
    fn on_parse_end(&mut self, _outcome: &ParseOutcome) {}

    /// Called instead of [`on_parse_end`](Self::on_parse_end) when the parse
    /// fails.
    fn on_parse_abort(&mut self, _error: &Error) {}
}

/// An observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl ReductionObserver for NoopObserver {}
