//! Error types for fixgram.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// The main error type for fixgram operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an "unexpected end" pattern error.
    #[must_use]
    pub fn unexpected_end(rule: u32, pattern: impl Into<String>) -> Self {
        Self::new(ErrorKind::PatternSyntax(PatternSyntaxError::UnexpectedEnd {
            rule,
            pattern: pattern.into(),
        }))
    }

    /// Creates an "unexpected character" pattern error.
    #[must_use]
    pub fn unexpected_char(
        rule: u32,
        pattern: impl Into<String>,
        found: char,
        offset: usize,
    ) -> Self {
        Self::new(ErrorKind::PatternSyntax(
            PatternSyntaxError::UnexpectedChar {
                rule,
                pattern: pattern.into(),
                found,
                offset,
            },
        ))
    }

    /// Creates a "start symbol undefined" validation error.
    #[must_use]
    pub fn start_undefined(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation(GrammarValidationError::StartUndefined(
            name.into(),
        )))
    }

    /// Creates a "non-terminal undefined" validation error.
    #[must_use]
    pub fn non_terminal_undefined(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation(
            GrammarValidationError::NonTerminalUndefined(name.into()),
        ))
    }

    /// Creates a "symbol defined but unused" validation error.
    #[must_use]
    pub fn symbol_unused(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation(GrammarValidationError::SymbolUnused(
            name.into(),
        )))
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: &'static str, actual: &'static str) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates an invalid number error.
    #[must_use]
    pub fn invalid_number(text: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidNumber(text.into()))
    }

    /// Creates an action failure error.
    #[must_use]
    pub fn action_failed(rule: u32, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ActionFailed {
            rule,
            message: message.into(),
        })
    }

    /// Creates a semantic limit exceeded error.
    #[must_use]
    pub fn limit_exceeded(limit: SemanticLimit) -> Self {
        Self::new(ErrorKind::LimitExceeded(limit))
    }

    /// Returns true if this error came from compiling a pattern string.
    #[must_use]
    pub fn is_pattern_syntax(&self) -> bool {
        matches!(self.kind, ErrorKind::PatternSyntax(_))
    }

    /// Returns true if this error came from grammar validation.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation(_))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A rule's pattern string could not be compiled.
    #[error(transparent)]
    PatternSyntax(#[from] PatternSyntaxError),

    /// The grammar failed its referential integrity checks.
    #[error(transparent)]
    Validation(#[from] GrammarValidationError),

    /// A value had a different type than an action expected.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type name.
        expected: &'static str,
        /// The actual type name.
        actual: &'static str,
    },

    /// Text could not be read as a number.
    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    /// A rule action returned an error while reducing.
    #[error("action for rule #{rule} failed: {message}")]
    ActionFailed {
        /// Ordinal of the rule whose action failed.
        rule: u32,
        /// The action's error message.
        message: String,
    },

    /// Semantic limit exceeded (kill switch triggered).
    #[error("limit exceeded: {0}")]
    LimitExceeded(SemanticLimit),
}

/// Errors raised while compiling one rule's pattern string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternSyntaxError {
    /// The pattern ended in the middle of a construct.
    #[error("unexpected end in rule #{rule} '{pattern}'")]
    UnexpectedEnd {
        /// Declaration ordinal of the rule.
        rule: u32,
        /// The raw pattern text.
        pattern: String,
    },

    /// A character was not valid at its position.
    #[error("unexpected char '{found}' in rule #{rule} '{pattern}'")]
    UnexpectedChar {
        /// Declaration ordinal of the rule.
        rule: u32,
        /// The raw pattern text.
        pattern: String,
        /// The offending character.
        found: char,
        /// Character offset of the offending character.
        offset: usize,
    },
}

impl PatternSyntaxError {
    /// Returns the declaration ordinal of the failing rule.
    #[must_use]
    pub fn rule(&self) -> u32 {
        match self {
            Self::UnexpectedEnd { rule, .. } | Self::UnexpectedChar { rule, .. } => *rule,
        }
    }

    /// Returns the character offset of an unexpected character.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::UnexpectedChar { offset, .. } => Some(*offset),
            Self::UnexpectedEnd { .. } => None,
        }
    }

    /// Returns the raw pattern text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        match self {
            Self::UnexpectedEnd { pattern, .. } | Self::UnexpectedChar { pattern, .. } => pattern,
        }
    }
}

/// Errors raised when a grammar fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarValidationError {
    /// No rule defines the start symbol.
    #[error("start rule '{0}' is not defined")]
    StartUndefined(String),

    /// A rule references a non-terminal no rule defines.
    #[error("non-terminal '{0}' is not defined")]
    NonTerminalUndefined(String),

    /// A rule's left-hand side is never referenced.
    #[error("non-terminal '{0}' defined but not used")]
    SymbolUnused(String),
}

/// Semantic limits (kill switches) that can be exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticLimit {
    /// Maximum reductions per parse exceeded.
    MaxReductions {
        /// The configured limit.
        limit: usize,
    },
    /// Buffer grew too far past the input length.
    MaxBufferGrowth {
        /// The configured limit.
        limit: usize,
    },
}

impl fmt::Display for SemanticLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxReductions { limit } => {
                write!(f, "max reductions ({limit}) exceeded")
            }
            Self::MaxBufferGrowth { limit } => {
                write!(f, "max buffer growth ({limit}) exceeded")
            }
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Symbol or rule the error relates to.
    pub source: Option<String>,
    /// Character offset, if the error points into text.
    pub offset: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the character offset.
    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "in {source}")?;
            if let Some(offset) = self.offset {
                write!(f, " at offset {offset}")?;
            }
        } else if let Some(offset) = self.offset {
            write!(f, "at offset {offset}")?;
        }
        Ok(())
    }
}
