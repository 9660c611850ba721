//! Parse outcomes.

use std::fmt;
use std::ops::Range;

use fixgram_foundation::Value;

use crate::symbol::{Buffer, Symbol};

/// How a parse ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The buffer reduced to exactly one start symbol.
    Accepted {
        /// The start symbol's value.
        value: Value,
    },
    /// No rule matched and the buffer is not a lone start symbol.
    Stuck {
        /// The residual buffer.
        buffer: Buffer,
        /// The first run of entries that are not the start symbol.
        unmatched: Range<usize>,
    },
}

impl ParseOutcome {
    /// Classifies a final buffer against the start symbol.
    #[must_use]
    pub fn from_buffer(buffer: Buffer, start: &str) -> Self {
        if let [Symbol::Reduced { symbol, value }] = buffer.as_slice() {
            if &**symbol == start {
                return Self::Accepted {
                    value: value.clone(),
                };
            }
        }

        let unmatched = first_unmatched(buffer.as_slice(), start);
        Self::Stuck { buffer, unmatched }
    }

    /// Returns true for [`ParseOutcome::Accepted`].
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Returns the accepted value.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Accepted { value } => Some(value),
            Self::Stuck { .. } => None,
        }
    }

    /// Consumes the outcome, returning the accepted value.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Accepted { value } => Some(value),
            Self::Stuck { .. } => None,
        }
    }

    /// Returns the unmatched span of a stuck parse.
    #[must_use]
    pub fn unmatched(&self) -> Option<Range<usize>> {
        match self {
            Self::Accepted { .. } => None,
            Self::Stuck { unmatched, .. } => Some(unmatched.clone()),
        }
    }
}

impl fmt::Display for ParseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted { value } => write!(f, "accepted: {value}"),
            Self::Stuck { buffer, unmatched } => write!(
                f,
                "stuck at {}..{}: {buffer}",
                unmatched.start, unmatched.end
            ),
        }
    }
}

/// Finds the first maximal run of entries that are not the start symbol.
///
/// A buffer made only of start symbols reports everything after the first.
fn first_unmatched(entries: &[Symbol], start: &str) -> Range<usize> {
    let is_start = |entry: &Symbol| entry.is_reduced_as(start);

    match entries.iter().position(|entry| !is_start(entry)) {
        Some(begin) => {
            let len = entries[begin..]
                .iter()
                .take_while(|entry| !is_start(entry))
                .count();
            begin..begin + len
        }
        None if entries.is_empty() => 0..0,
        None => 1..entries.len(),
    }
}
