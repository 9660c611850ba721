//! Grammar registry.
//!
//! Rules are declared one at a time against a start symbol. Each declaration
//! compiles its pattern immediately and receives the next ordinal, so pattern
//! errors name the rule by its position in the declaration sequence.

use std::fmt;
use std::sync::Arc;

use fixgram_foundation::{Error, ErrorContext, ErrorKind, Result, Value};
use fixgram_pattern::{CompiledPattern, RuleToken, compile_pattern};

/// Semantic action invoked with a rule's captures.
pub type Action = Arc<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

// =============================================================================
// Rule
// =============================================================================

/// A declared rule: left-hand side, compiled pattern, and action.
#[derive(Clone)]
pub struct Rule {
    /// Declaration ordinal, starting at 1.
    pub ordinal: u32,
    /// The symbol this rule reduces to.
    pub lhs: Arc<str>,
    /// The compiled right-hand side.
    pub pattern: CompiledPattern,
    action: Action,
}

impl Rule {
    /// Returns the right-hand side tokens.
    #[must_use]
    pub fn tokens(&self) -> &[RuleToken] {
        &self.pattern.tokens
    }

    /// Runs the action over `captures`.
    ///
    /// # Errors
    /// Returns an "action failed" error naming this rule if the action fails.
    pub fn apply(&self, captures: &[Value]) -> Result<Value> {
        (self.action)(captures).map_err(|err| Error::action_failed(self.ordinal, err.to_string()))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("ordinal", &self.ordinal)
            .field("lhs", &self.lhs)
            .field("pattern", &self.pattern.text)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.lhs,
            fixgram_pattern::pretty::render_tokens(self.tokens())
        )
    }
}

// =============================================================================
// Grammar
// =============================================================================

/// An ordered collection of rules with a start symbol.
#[derive(Clone, Debug)]
pub struct Grammar {
    start: Arc<str>,
    rules: Vec<Rule>,
    next_ordinal: u32,
}

impl Grammar {
    /// Creates an empty grammar.
    #[must_use]
    pub fn new(start: impl Into<Arc<str>>) -> Self {
        Self {
            start: start.into(),
            rules: Vec::new(),
            next_ordinal: 1,
        }
    }

    /// Declares a rule.
    ///
    /// # Errors
    /// Returns a pattern syntax error if `pattern` does not compile. The
    /// grammar is unchanged and the ordinal is not consumed.
    pub fn define_rule<F>(&mut self, lhs: impl Into<Arc<str>>, pattern: &str, action: F) -> Result<()>
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        let lhs = lhs.into();
        let pattern = compile_pattern(pattern, self.next_ordinal).map_err(|err| {
            let mut context = ErrorContext::new().with_source(&*lhs);
            if let ErrorKind::PatternSyntax(syntax) = &err.kind {
                if let Some(offset) = syntax.offset() {
                    context = context.with_offset(offset);
                }
            }
            err.with_context(context)
        })?;

        self.rules.push(Rule {
            ordinal: self.next_ordinal,
            lhs,
            pattern,
            action: Arc::new(action),
        });
        self.next_ordinal += 1;
        Ok(())
    }

    /// Returns true if some rule has `name` as its left-hand side.
    #[must_use]
    pub fn is_defined(&self, name: &str) -> bool {
        self.rules.iter().any(|rule| &*rule.lhs == name)
    }

    /// Checks that the grammar can be parsed with.
    ///
    /// All referenced names are collected before any left-hand side is
    /// checked for use.
    ///
    /// # Errors
    /// Returns, in this order of precedence: start undefined; the first
    /// referenced but undefined non-terminal; the first defined but
    /// unreferenced left-hand side.
    pub fn validate(&self) -> Result<()> {
        if !self.is_defined(&self.start) {
            return Err(Error::start_undefined(&*self.start));
        }

        let mut used = std::collections::HashSet::new();
        for name in self.rules.iter().flat_map(|rule| rule.pattern.non_terminals()) {
            if !self.is_defined(name) {
                return Err(Error::non_terminal_undefined(name));
            }
            used.insert(name);
        }

        match self.rules.iter().find(|rule| !used.contains(&*rule.lhs)) {
            Some(rule) => Err(Error::symbol_unused(&*rule.lhs)),
            None => Ok(()),
        }
    }

    /// Returns the start symbol.
    #[must_use]
    pub fn start_symbol(&self) -> &str {
        &self.start
    }

    /// Returns the rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the number of declared rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Iterates the rules reducing to `lhs`, in declaration order.
    pub fn rules_for<'a>(&'a self, lhs: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |rule| &*rule.lhs == lhs)
    }

    /// Looks up a rule by ordinal.
    #[must_use]
    pub fn rule(&self, ordinal: u32) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.ordinal == ordinal)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "start: {}", self.start)?;
        for rule in &self.rules {
            writeln!(f, "#{} {rule}", rule.ordinal)?;
        }
        Ok(())
    }
}
