//! The fixpoint reduction engine.
//!
//! A parse rewrites a buffer of symbols until no rule matches:
//! 1. Rules are tried in priority order, fixed when the parser is built
//! 2. Each rule is matched at every position, left to right
//! 3. The first match is reduced and the pass starts over
//! 4. A pass with no match ends the parse

use fixgram_foundation::{Error, Result, SemanticLimit};

use crate::config::ParserConfig;
use crate::grammar::{Grammar, Rule};
use crate::matcher::{RuleMatch, find_match};
use crate::observer::{NoopObserver, ReductionEvent, ReductionObserver};
use crate::outcome::ParseOutcome;
use crate::symbol::{Buffer, Symbol};

/// A validated grammar ready to parse input.
///
/// Parsing takes `&self`; one parser can serve any number of inputs, from
/// any number of threads.
#[derive(Clone, Debug)]
pub struct Parser {
    grammar: Grammar,
    config: ParserConfig,
    /// Rule indices in the order they are tried.
    order: Vec<usize>,
}

impl Parser {
    /// Validates `grammar` and builds a parser with the default configuration.
    ///
    /// # Errors
    /// Returns a grammar validation error; see [`Grammar::validate`].
    pub fn new(grammar: Grammar) -> Result<Self> {
        Self::with_config(grammar, ParserConfig::default())
    }

    /// Validates `grammar` and builds a parser with `config`.
    ///
    /// # Errors
    /// Returns a grammar validation error; see [`Grammar::validate`].
    pub fn with_config(grammar: Grammar, config: ParserConfig) -> Result<Self> {
        grammar.validate()?;
        let order = config.priority.order(grammar.rule_count());
        Ok(Self {
            grammar,
            config,
            order,
        })
    }

    /// Returns the grammar.
    #[must_use]
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Iterates the rules whose patterns can match an empty span.
    ///
    /// Each reduction by one of these at an empty span lengthens the buffer.
    pub fn nullable_rules(&self) -> impl Iterator<Item = &Rule> {
        self.grammar.rules().iter().filter(|rule| rule.pattern.is_nullable())
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Iterates the rules in the order they are tried.
    pub fn priority(&self) -> impl Iterator<Item = &Rule> {
        let rules = self.grammar.rules();
        self.order.iter().map(move |&index| &rules[index])
    }

    /// Rewrites `input` to a fixpoint and returns the final buffer.
    ///
    /// # Errors
    /// Returns an error if an action fails or the reduction ceiling is
    /// exceeded.
    pub fn reduce(&self, input: &str) -> Result<Buffer> {
        self.run(input, &mut NoopObserver)
    }

    /// Parses `input`, classifying the final buffer.
    ///
    /// # Errors
    /// See [`reduce`](Self::reduce). A buffer that does not reduce to the
    /// start symbol is a [`ParseOutcome::Stuck`], not an error.
    pub fn parse(&self, input: &str) -> Result<ParseOutcome> {
        self.parse_observed(input, &mut NoopObserver)
    }

    /// Parses `input`, reporting progress to `observer`.
    ///
    /// # Errors
    /// See [`parse`](Self::parse).
    pub fn parse_observed(
        &self,
        input: &str,
        observer: &mut dyn ReductionObserver,
    ) -> Result<ParseOutcome> {
        observer.on_parse_start(input);

        match self.run(input, observer) {
            Ok(buffer) => {
                let outcome = ParseOutcome::from_buffer(buffer, self.grammar.start_symbol());
                observer.on_parse_end(&outcome);
                Ok(outcome)
            }
            Err(err) => {
                observer.on_parse_abort(&err);
                Err(err)
            }
        }
    }

    /// Runs passes until one finds nothing to reduce.
    fn run(&self, input: &str, observer: &mut dyn ReductionObserver) -> Result<Buffer> {
        let mut buffer = Buffer::from_input(input);
        let max_len = buffer.len().saturating_add(self.config.max_buffer_growth);
        let mut reductions = 0;

        loop {
            let pass = reductions + 1;
            observer.on_pass_start(pass, &buffer);

            let Some((rule, found)) = self.find_reduction(&buffer) else {
                break;
            };

            // Kill switch
            reductions += 1;
            if reductions > self.config.max_reductions {
                return Err(Error::limit_exceeded(SemanticLimit::MaxReductions {
                    limit: self.config.max_reductions,
                }));
            }

            // Only empty matches insert entries.
            if found.span.is_empty() {
                debug_assert!(rule.pattern.is_nullable());
                if buffer.len() >= max_len {
                    return Err(Error::limit_exceeded(SemanticLimit::MaxBufferGrowth {
                        limit: self.config.max_buffer_growth,
                    }));
                }
            }

            let value = rule.apply(&found.captures)?;
            observer.on_reduction(&ReductionEvent {
                pass,
                rule: rule.ordinal,
                lhs: &rule.lhs,
                span: found.span.clone(),
                captures: &found.captures,
                value: &value,
            });

            buffer.replace(found.span, Symbol::reduced(rule.lhs.clone(), value));
        }

        Ok(buffer)
    }

    /// Finds the first match of the highest-priority rule that matches
    /// anywhere.
    fn find_reduction(&self, buffer: &Buffer) -> Option<(&Rule, RuleMatch)> {
        self.priority()
            .find_map(|rule| find_match(rule.tokens(), buffer.as_slice()).map(|found| (rule, found)))
    }
}
