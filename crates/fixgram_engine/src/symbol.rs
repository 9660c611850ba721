//! Buffer entries.
//!
//! A parse starts with one [`Symbol::Terminal`] per input character. Each
//! reduction replaces a span of entries with a single [`Symbol::Reduced`].

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use fixgram_foundation::Value;

/// One entry of the rewrite buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Symbol {
    /// An unconsumed input character.
    Terminal(char),
    /// The result of a reduction.
    Reduced {
        /// The left-hand side of the rule that produced it.
        symbol: Arc<str>,
        /// The value its action returned.
        value: Value,
    },
}

impl Symbol {
    /// Creates a reduced entry.
    #[must_use]
    pub fn reduced(symbol: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        Self::Reduced {
            symbol: symbol.into(),
            value: value.into(),
        }
    }

    /// Returns the character of a terminal entry.
    #[must_use]
    pub const fn as_terminal(&self) -> Option<char> {
        match self {
            Self::Terminal(c) => Some(*c),
            Self::Reduced { .. } => None,
        }
    }

    /// Returns the symbol name of a reduced entry.
    #[must_use]
    pub fn symbol_name(&self) -> Option<&str> {
        match self {
            Self::Reduced { symbol, .. } => Some(symbol),
            Self::Terminal(_) => None,
        }
    }

    /// Returns the value carried by a reduced entry.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Reduced { value, .. } => Some(value),
            Self::Terminal(_) => None,
        }
    }

    /// Returns true if this is a reduced entry for `name`.
    #[must_use]
    pub fn is_reduced_as(&self, name: &str) -> bool {
        self.symbol_name() == Some(name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(c) => write!(f, "'{c}'"),
            Self::Reduced { symbol, value } => write!(f, "{symbol}({value})"),
        }
    }
}

/// The ordered sequence of entries being rewritten.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Buffer(Vec<Symbol>);

impl Buffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer holding one terminal per input character.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        Self(input.chars().map(Symbol::Terminal).collect())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the buffer has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Symbol> {
        self.0.get(index)
    }

    /// Returns the entries as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Symbol] {
        &self.0
    }

    /// Iterates the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.0.iter()
    }

    /// Replaces `span` with a single entry.
    ///
    /// An empty span inserts the entry at `span.start`.
    ///
    /// # Panics
    /// Panics if `span` is out of bounds.
    pub fn replace(&mut self, span: Range<usize>, symbol: Symbol) {
        drop(self.0.splice(span, std::iter::once(symbol)));
    }

    /// Consumes the buffer, returning its entries.
    #[must_use]
    pub fn into_vec(self) -> Vec<Symbol> {
        self.0
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, symbol) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{symbol}")?;
        }
        write!(f, "]")
    }
}

impl From<Vec<Symbol>> for Buffer {
    fn from(entries: Vec<Symbol>) -> Self {
        Self(entries)
    }
}

impl FromIterator<Symbol> for Buffer {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Buffer {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Buffer {
    type Item = Symbol;
    type IntoIter = std::vec::IntoIter<Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
