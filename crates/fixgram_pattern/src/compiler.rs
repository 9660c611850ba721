//! Pattern-string compiler.
//!
//! Compiles the right-hand side of one rule into an ordered token sequence.
//! The pattern language is:
//!
//! ```text
//! pattern    := item*                       (whitespace between items is skipped)
//! item       := construct quantifier?
//!             | '(' construct quantifier? ')'   (parenthesised items capture)
//! construct  := "'" terminal "'" | name
//! terminal   := '[' '^'? class-item* ']' | char
//! class-item := char ('-' char)?
//! char       := '%' any | any
//! name       := [a-zA-Z][a-zA-Z0-9]*
//! quantifier := '+' | '*' | '?'
//! ```
//!
//! The compiler makes a single left-to-right pass with one character of
//! lookahead and never backtracks.

use std::sync::Arc;

use fixgram_foundation::{Error, Result};

use crate::charset::CharSet;
use crate::token::{Repetition, RuleToken, TokenKind};

/// Escape prefix: the next character is taken verbatim.
pub const ESCAPE: char = '%';

/// A compiled right-hand side together with its source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledPattern {
    /// The raw pattern text.
    pub text: Arc<str>,
    /// Tokens in right-hand-side order.
    pub tokens: Vec<RuleToken>,
}

impl CompiledPattern {
    /// Returns the number of capturing tokens.
    #[must_use]
    pub fn capture_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.capture).count()
    }

    /// Iterates the non-terminal names referenced, in token order.
    pub fn non_terminals(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(RuleToken::non_terminal_name)
    }

    /// Returns true if every token may consume nothing, so the pattern can
    /// match an empty span.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.tokens.iter().all(|t| t.repetition.allows_zero())
    }
}

/// Compiles one rule's pattern string.
///
/// `rule` is the declaration ordinal reported in errors.
///
/// # Errors
/// Returns an "unexpected end" error if the pattern stops inside a construct,
/// and an "unexpected char" error for a character that is not valid where it
/// appears.
pub fn compile_pattern(pattern: &str, rule: u32) -> Result<CompiledPattern> {
    let tokens = PatternCompiler::new(pattern, rule).compile()?;
    Ok(CompiledPattern {
        text: pattern.into(),
        tokens,
    })
}

/// Recursive-descent compiler over one pattern string.
pub struct PatternCompiler<'src> {
    /// Source text, for error reporting.
    source: &'src str,
    /// Source characters.
    chars: Vec<char>,
    /// Current character offset.
    position: usize,
    /// Declaration ordinal of the rule being compiled.
    rule: u32,
}

impl<'src> PatternCompiler<'src> {
    /// Creates a compiler for the given pattern.
    #[must_use]
    pub fn new(source: &'src str, rule: u32) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            position: 0,
            rule,
        }
    }

    /// Compiles the whole pattern.
    ///
    /// # Errors
    /// See [`compile_pattern`].
    pub fn compile(mut self) -> Result<Vec<RuleToken>> {
        let mut tokens = Vec::new();

        self.skip_whitespace();
        while !self.is_done() {
            tokens.push(self.item()?);
            self.skip_whitespace();
        }

        Ok(tokens)
    }

    /// Compiles one item, captured when parenthesised.
    fn item(&mut self) -> Result<RuleToken> {
        if self.check('(') {
            self.advance();
            self.skip_whitespace();
            let token = self.construct()?;
            let token = self.quantifier(token);
            self.skip_whitespace();
            self.expect(')')?;
            Ok(token.captured(true))
        } else {
            let token = self.construct()?;
            Ok(self.quantifier(token).captured(false))
        }
    }

    /// Compiles a quoted terminal or a bare non-terminal name.
    fn construct(&mut self) -> Result<RuleToken> {
        if self.check('\'') {
            self.advance();
            let token = self.terminal()?;
            self.expect('\'')?;
            Ok(token)
        } else if self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            Ok(self.non_terminal())
        } else {
            Err(self.unexpected())
        }
    }

    /// Compiles the body of a quoted terminal.
    fn terminal(&mut self) -> Result<RuleToken> {
        if self.check('[') {
            self.char_class()
        } else if self.peek().is_some_and(|c| c != '\'') {
            Ok(RuleToken::char(self.next_char()?))
        } else {
            Err(self.unexpected())
        }
    }

    /// Compiles `[...]` / `[^...]`, expanding ranges eagerly.
    fn char_class(&mut self) -> Result<RuleToken> {
        self.expect('[')?;

        let mut set = if self.check('^') {
            self.advance();
            CharSet::negated()
        } else {
            CharSet::new()
        };

        while self.peek().is_some_and(|c| c != ']') {
            let c = self.next_char()?;
            if self.check('-') {
                self.advance();
                let stop = self.next_char()?;
                set.insert_range(c, stop);
            } else {
                set.insert(c);
            }
        }

        self.expect(']')?;
        Ok(RuleToken::charset(set))
    }

    /// Compiles a run of ASCII alphanumerics into a non-terminal reference.
    fn non_terminal(&mut self) -> RuleToken {
        let mut name = String::new();
        while let Some(c) = self.peek().filter(char::is_ascii_alphanumeric) {
            name.push(c);
            self.advance();
        }
        RuleToken::new(TokenKind::NonTerminal(name.into()))
    }

    /// Applies a quantifier suffix directly following a construct.
    fn quantifier(&mut self, token: RuleToken) -> RuleToken {
        match self.peek().and_then(Repetition::from_suffix) {
            Some(repetition) => {
                self.advance();
                token.with_repetition(repetition)
            }
            None => token,
        }
    }

    /// Reads one pattern character, resolving the `%` escape.
    fn next_char(&mut self) -> Result<char> {
        if self.check(ESCAPE) {
            self.advance();
        }
        let c = self.peek().ok_or_else(|| self.unexpected())?;
        self.advance();
        Ok(c)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn check(&self, expected: char) -> bool {
        self.peek() == Some(expected)
    }

    fn advance(&mut self) {
        if self.position < self.chars.len() {
            self.position += 1;
        }
    }

    fn is_done(&self) -> bool {
        self.position >= self.chars.len()
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        if self.check(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Builds the error for the current position: end of input or the
    /// character found there.
    fn unexpected(&self) -> Error {
        match self.peek() {
            Some(found) => Error::unexpected_char(self.rule, self.source, found, self.position),
            None => Error::unexpected_end(self.rule, self.source),
        }
    }
}
