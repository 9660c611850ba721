//! Pretty-printer for compiled patterns.
//!
//! Renders tokens back to canonical pattern text. Feeding the output to the
//! compiler yields the same tokens, so rendered rules can be pasted back
//! into a grammar.
//!
//! # Example
//!
//! ```
//! use fixgram_pattern::{compile_pattern, pretty::render_tokens};
//!
//! let pattern = compile_pattern("( Expr )'+'(Expr)", 1).unwrap();
//! assert_eq!(render_tokens(&pattern.tokens), "(Expr) '+' (Expr)");
//! ```

use crate::charset::CharSet;
use crate::compiler::ESCAPE;
use crate::token::{RuleToken, TokenKind};

/// Renders a token sequence, items separated by single spaces.
#[must_use]
pub fn render_tokens(tokens: &[RuleToken]) -> String {
    tokens
        .iter()
        .map(render_token)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders one token.
#[must_use]
pub fn render_token(token: &RuleToken) -> String {
    let mut out = String::new();
    if token.capture {
        out.push('(');
    }

    match &token.kind {
        TokenKind::Char(c) => {
            out.push('\'');
            push_quoted_char(&mut out, *c);
            out.push('\'');
        }
        TokenKind::Charset(set) => {
            out.push('\'');
            push_class(&mut out, set);
            out.push('\'');
        }
        TokenKind::NonTerminal(name) => out.push_str(name),
    }

    if let Some(suffix) = token.repetition.suffix() {
        out.push(suffix);
    }
    if token.capture {
        out.push(')');
    }
    out
}

/// Writes a literal character, escaping what would otherwise end the quote
/// or open a class.
fn push_quoted_char(out: &mut String, c: char) {
    if matches!(c, '\'' | '[' | ESCAPE) {
        out.push(ESCAPE);
    }
    out.push(c);
}

/// Writes a character inside a class body.
fn push_class_char(out: &mut String, c: char, first: bool) {
    if matches!(c, ']' | '-' | ESCAPE) || (first && c == '^') {
        out.push(ESCAPE);
    }
    out.push(c);
}

fn push_class(out: &mut String, set: &CharSet) {
    out.push('[');
    if set.is_negated() {
        out.push('^');
    }

    let mut first = !set.is_negated();
    for (lo, hi) in set.ranges() {
        push_class_char(out, lo, first);
        first = false;
        if lo == hi {
            continue;
        }
        // Two-element runs are written as a pair.
        if char::from_u32(u32::from(lo) + 1) != Some(hi) {
            out.push('-');
        }
        push_class_char(out, hi, false);
    }
    out.push(']');
}
