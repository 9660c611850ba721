//! Token model for compiled rule patterns.
//!
//! Each element of a rule's right-hand side compiles to one [`RuleToken`]:
//! a literal character, a character class, or a reference to another rule's
//! left-hand side, together with a repetition operator and a capture flag.

use std::fmt;
use std::sync::Arc;

use crate::charset::CharSet;

/// How many consecutive buffer entries a token may consume.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Repetition {
    /// Exactly one entry.
    #[default]
    None,
    /// One or more entries (`+`).
    OneOrMore,
    /// Zero or more entries (`*`).
    ZeroOrMore,
    /// Zero or one entry (`?`).
    ZeroOrOne,
}

impl Repetition {
    /// Maps a quantifier suffix character to its operator.
    #[must_use]
    pub const fn from_suffix(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::OneOrMore),
            '*' => Some(Self::ZeroOrMore),
            '?' => Some(Self::ZeroOrOne),
            _ => None,
        }
    }

    /// Returns the suffix character for this operator, if any.
    #[must_use]
    pub const fn suffix(self) -> Option<char> {
        match self {
            Self::None => None,
            Self::OneOrMore => Some('+'),
            Self::ZeroOrMore => Some('*'),
            Self::ZeroOrOne => Some('?'),
        }
    }

    /// Returns true if the token may consume more than one entry.
    #[must_use]
    pub const fn allows_many(self) -> bool {
        matches!(self, Self::OneOrMore | Self::ZeroOrMore)
    }

    /// Returns true if the token succeeds after consuming nothing.
    #[must_use]
    pub const fn allows_zero(self) -> bool {
        matches!(self, Self::ZeroOrMore | Self::ZeroOrOne)
    }

    /// Returns true if `count` consumed entries satisfy this operator.
    #[must_use]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Self::None => count == 1,
            Self::OneOrMore => count >= 1,
            Self::ZeroOrMore => true,
            Self::ZeroOrOne => count <= 1,
        }
    }
}

/// What a token tests buffer entries against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// A single literal character.
    Char(char),
    /// A set of characters, possibly negated.
    Charset(CharSet),
    /// A reference to another rule's left-hand side.
    NonTerminal(Arc<str>),
}

impl TokenKind {
    /// Returns true if this kind tests raw input characters.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::NonTerminal(_))
    }

    /// Tests a raw input character. Non-terminals never accept characters.
    #[must_use]
    pub fn accepts_char(&self, c: char) -> bool {
        match self {
            Self::Char(expected) => *expected == c,
            Self::Charset(set) => set.matches(c),
            Self::NonTerminal(_) => false,
        }
    }

    /// Tests a reduced symbol name. Terminals never accept reduced symbols.
    #[must_use]
    pub fn accepts_symbol(&self, name: &str) -> bool {
        match self {
            Self::NonTerminal(expected) => &**expected == name,
            Self::Char(_) | Self::Charset(_) => false,
        }
    }
}

/// One compiled element of a rule's right-hand side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleToken {
    /// What the token matches.
    pub kind: TokenKind,
    /// How many entries it may consume.
    pub repetition: Repetition,
    /// Whether its matched span is passed to the rule's action.
    pub capture: bool,
}

impl RuleToken {
    /// Creates a non-capturing token with no repetition.
    #[must_use]
    pub fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            repetition: Repetition::None,
            capture: false,
        }
    }

    /// Creates a literal character token.
    #[must_use]
    pub fn char(c: char) -> Self {
        Self::new(TokenKind::Char(c))
    }

    /// Creates a character class token.
    #[must_use]
    pub fn charset(set: CharSet) -> Self {
        Self::new(TokenKind::Charset(set))
    }

    /// Creates a non-terminal reference token.
    #[must_use]
    pub fn non_terminal(name: impl Into<Arc<str>>) -> Self {
        Self::new(TokenKind::NonTerminal(name.into()))
    }

    /// Sets the repetition operator.
    #[must_use]
    pub fn with_repetition(mut self, repetition: Repetition) -> Self {
        self.repetition = repetition;
        self
    }

    /// Sets the capture flag.
    #[must_use]
    pub fn captured(mut self, capture: bool) -> Self {
        self.capture = capture;
        self
    }

    /// Returns the referenced symbol name for non-terminal tokens.
    #[must_use]
    pub fn non_terminal_name(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::NonTerminal(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for RuleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::pretty::render_token(self))
    }
}
