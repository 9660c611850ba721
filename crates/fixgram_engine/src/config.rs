//! Parser configuration.

/// Default ceiling on reductions per parse.
pub const DEFAULT_MAX_REDUCTIONS: usize = 100_000;

/// Default number of entries a parse may add to its buffer beyond the input
/// length.
pub const DEFAULT_MAX_BUFFER_GROWTH: usize = 1_000;

/// The order in which rules are tried on every pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RulePriority {
    /// The most recently declared rule is tried first.
    #[default]
    LastDeclaredFirst,
    /// Rules are tried in the order they were declared.
    DeclarationOrder,
}

impl RulePriority {
    /// Returns rule indices, in the order they are tried, for a grammar with
    /// `count` rules.
    #[must_use]
    pub fn order(self, count: usize) -> Vec<usize> {
        match self {
            Self::LastDeclaredFirst => (0..count).rev().collect(),
            Self::DeclarationOrder => (0..count).collect(),
        }
    }
}

/// Configuration for a [`Parser`](crate::Parser).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Rule priority policy.
    pub priority: RulePriority,
    /// Maximum reductions before a parse is aborted.
    pub max_reductions: usize,
    /// Maximum entries the buffer may grow past the input length.
    ///
    /// Only empty-span reductions grow the buffer.
    pub max_buffer_growth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            priority: RulePriority::default(),
            max_reductions: DEFAULT_MAX_REDUCTIONS,
            max_buffer_growth: DEFAULT_MAX_BUFFER_GROWTH,
        }
    }
}

impl ParserConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule priority policy.
    #[must_use]
    pub fn with_priority(mut self, priority: RulePriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the reduction ceiling.
    #[must_use]
    pub fn with_max_reductions(mut self, max: usize) -> Self {
        self.max_reductions = max;
        self
    }

    /// Sets the buffer growth ceiling.
    #[must_use]
    pub fn with_max_buffer_growth(mut self, max: usize) -> Self {
        self.max_buffer_growth = max;
        self
    }
}
