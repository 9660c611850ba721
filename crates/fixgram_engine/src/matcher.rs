//! Greedy token matching against the buffer.
//!
//! Matching never backtracks: each token consumes as many consecutive
//! entries as its repetition allows, and the next token starts where it
//! stopped.

use std::ops::Range;

use fixgram_foundation::Value;
use fixgram_pattern::{RuleToken, TokenKind};

use crate::symbol::Symbol;

/// A successful match of one rule's tokens.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleMatch {
    /// The matched entries, `[start, end)`.
    pub span: Range<usize>,
    /// Action arguments, in token order.
    pub captures: Vec<Value>,
}

/// Tests one entry against a token kind.
///
/// Terminal kinds only see raw characters and non-terminal kinds only see
/// reduced entries.
#[must_use]
pub fn accepts(kind: &TokenKind, entry: &Symbol) -> bool {
    match entry {
        Symbol::Terminal(c) => kind.accepts_char(*c),
        Symbol::Reduced { symbol, .. } => kind.accepts_symbol(symbol),
    }
}

/// Matches a single token at `start`, returning the end of what it consumed.
#[must_use]
pub fn match_token(token: &RuleToken, entries: &[Symbol], start: usize) -> Option<usize> {
    let mut end = start;
    while let Some(entry) = entries.get(end) {
        if !accepts(&token.kind, entry) {
            break;
        }
        end += 1;
        if !token.repetition.allows_many() {
            break;
        }
    }

    token.repetition.accepts(end - start).then_some(end)
}

/// Matches a full token sequence starting at `start`.
#[must_use]
pub fn match_at(tokens: &[RuleToken], entries: &[Symbol], start: usize) -> Option<RuleMatch> {
    let mut captures = Vec::new();
    let mut end = start;

    for token in tokens {
        let next = match_token(token, entries, end)?;
        if token.capture {
            capture(token, &entries[end..next], &mut captures);
        }
        end = next;
    }

    Some(RuleMatch {
        span: start..end,
        captures,
    })
}

/// Finds the leftmost start position where `tokens` match.
///
/// Only positions holding an entry are tried, so nothing matches an empty
/// buffer.
#[must_use]
pub fn find_match(tokens: &[RuleToken], entries: &[Symbol]) -> Option<RuleMatch> {
    (0..entries.len()).find_map(|start| match_at(tokens, entries, start))
}

/// Appends the arguments a capturing token contributes.
///
/// Terminal tokens contribute their characters as one string, even when
/// they consumed nothing. Non-terminal tokens contribute each consumed
/// value in order.
fn capture(token: &RuleToken, consumed: &[Symbol], captures: &mut Vec<Value>) {
    if token.kind.is_terminal() {
        let text: String = consumed.iter().filter_map(Symbol::as_terminal).collect();
        captures.push(Value::from(text));
    } else {
        captures.extend(consumed.iter().filter_map(Symbol::value).cloned());
    }
}
