//! Tracing system for fixgram parses.
//!
//! A [`Tracer`] is a [`ReductionObserver`]: hand it to
//! [`Parser::parse_observed`](fixgram_engine::Parser::parse_observed) and it
//! records every pass and reduction. Recording costs nothing beyond a flag
//! check while the tracer is disabled.
//!
//! # Example
//!
//! ```
//! use fixgram_debug::{Tracer, TracerConfig};
//! use fixgram_engine::{Grammar, Parser};
//! use fixgram_foundation::Value;
//!
//! let mut grammar = Grammar::new("Expr");
//! grammar.define_rule("Expr", "(Expr) '+' (Expr)", |args| {
//!     Ok(Value::Int(args[0].expect_int()? + args[1].expect_int()?))
//! })?;
//! grammar.define_rule("Expr", "('[0-9]'+)", |args| Ok(Value::Int(args[0].parse_int()?)))?;
//! let parser = Parser::new(grammar)?;
//!
//! let mut tracer = Tracer::new(TracerConfig::new().enabled());
//! parser.parse_observed("1+2", &mut tracer)?;
//! assert_eq!(tracer.buffer().by_event_type("reduction").len(), 3);
//! # Ok::<(), fixgram_foundation::Error>(())
//! ```

pub mod buffer;
pub mod format;
pub mod record;

pub use buffer::{DEFAULT_BUFFER_SIZE, TraceBuffer, TraceBufferStats};
pub use format::{HumanFormatter, JsonFormatter, TraceFormatter};
pub use record::{TraceEvent, TraceRecord};

use std::io::{self, Write};
use std::time::Instant;

use fixgram_engine::{Buffer, ParseOutcome, ReductionEvent, ReductionObserver};
use fixgram_foundation::Error;

// =============================================================================
// Trace Output
// =============================================================================

/// Where trace output should be sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceOutput {
    /// No output (traces still recorded in buffer).
    #[default]
    None,
    /// Write each record to stderr as it is recorded.
    Stderr,
}

// =============================================================================
// Tracer Configuration
// =============================================================================

/// Configuration for the tracer.
#[derive(Clone, Debug)]
pub struct TracerConfig {
    /// Whether tracing is enabled.
    pub enabled: bool,
    /// Maximum records to keep in buffer.
    pub buffer_size: usize,
    /// Where to output traces.
    pub output: TraceOutput,
    /// Whether to use JSON format.
    pub json_format: bool,
    /// Filter for specific event types (empty = all).
    pub event_filter: Vec<String>,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
            output: TraceOutput::None,
            json_format: false,
            event_filter: Vec::new(),
        }
    }
}

impl TracerConfig {
    /// Creates a new tracer configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to enable tracing.
    #[must_use]
    pub fn enabled(mut self) -> Self {
        self.enabled = true;
        self
    }

    /// Builder method to set buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Builder method to output to stderr.
    #[must_use]
    pub fn to_stderr(mut self) -> Self {
        self.output = TraceOutput::Stderr;
        self
    }

    /// Builder method to use JSON format.
    #[must_use]
    pub fn json(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Builder method to filter event types.
    #[must_use]
    pub fn filter_events(mut self, types: Vec<String>) -> Self {
        self.event_filter = types;
        self
    }
}

// =============================================================================
// Tracer
// =============================================================================

/// Records parse events into a bounded buffer.
pub struct Tracer {
    config: TracerConfig,
    buffer: TraceBuffer,
    current_parse: u64,
    start_time: Instant,
    human_formatter: HumanFormatter,
    json_formatter: JsonFormatter,
}

impl Tracer {
    /// Creates a new tracer with the given configuration.
    #[must_use]
    pub fn new(config: TracerConfig) -> Self {
        let buffer_size = config.buffer_size;
        Self {
            config,
            buffer: TraceBuffer::new(buffer_size),
            current_parse: 0,
            start_time: Instant::now(),
            human_formatter: HumanFormatter::new().with_timestamps(),
            json_formatter: JsonFormatter::new(),
        }
    }

    /// Creates a tracer with default configuration (disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(TracerConfig::default())
    }

    /// Creates an enabled tracer that outputs to stderr.
    #[must_use]
    pub fn to_stderr() -> Self {
        Self::new(TracerConfig::new().enabled().to_stderr())
    }

    /// Returns whether tracing is enabled.
    #[must_use]
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Enables tracing.
    pub fn enable(&mut self) {
        self.config.enabled = true;
    }

    /// Disables tracing.
    pub fn disable(&mut self) {
        self.config.enabled = false;
    }

    /// Returns the number of the most recent parse (0 before the first).
    #[must_use]
    pub fn current_parse(&self) -> u64 {
        self.current_parse
    }

    /// Sets whether to use JSON output format.
    pub fn set_json_format(&mut self, json: bool) {
        self.config.json_format = json;
    }

    /// Sets the trace output destination.
    pub fn set_output(&mut self, output: TraceOutput) {
        self.config.output = output;
    }

    /// Records a trace event against the current parse.
    #[inline]
    pub fn record(&mut self, event: TraceEvent) {
        if !self.config.enabled {
            return;
        }

        self.record_internal(event);
    }

    fn record_internal(&mut self, event: TraceEvent) {
        if !self.config.event_filter.is_empty()
            && !self
                .config
                .event_filter
                .iter()
                .any(|t| t == event.event_type())
        {
            return;
        }

        #[allow(clippy::cast_possible_truncation)]
        let timestamp_ns = self.start_time.elapsed().as_nanos() as u64;
        self.buffer.push(self.current_parse, timestamp_ns, event);

        if self.config.output == TraceOutput::Stderr {
            if let Some(record) = self.buffer.last() {
                let line = self.format_record(record);
                let _ = writeln!(io::stderr(), "{line}");
            }
        }
    }

    /// Formats a record using the current format settings.
    #[must_use]
    pub fn format_record(&self, record: &TraceRecord) -> String {
        if self.config.json_format {
            self.json_formatter.format(record)
        } else {
            self.human_formatter.format(record)
        }
    }

    /// Formats multiple records.
    #[must_use]
    pub fn format_records(&self, records: &[&TraceRecord]) -> String {
        if self.config.json_format {
            self.json_formatter.format_many(records)
        } else {
            self.human_formatter.format_many(records)
        }
    }

    /// Returns the trace buffer.
    #[must_use]
    pub fn buffer(&self) -> &TraceBuffer {
        &self.buffer
    }

    /// Clears the trace buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Returns buffer statistics.
    #[must_use]
    pub fn stats(&self) -> TraceBufferStats {
        self.buffer.stats()
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::disabled()
    }
}

impl ReductionObserver for Tracer {
    fn on_parse_start(&mut self, input: &str) {
        self.current_parse += 1;
        if self.is_enabled() {
            self.record(TraceEvent::ParseStart {
                input: input.to_string(),
            });
        }
    }

    fn on_pass_start(&mut self, pass: usize, buffer: &Buffer) {
        if self.is_enabled() {
            self.record(TraceEvent::PassStart {
                pass,
                buffer: buffer.to_string(),
            });
        }
    }

    fn on_reduction(&mut self, event: &ReductionEvent<'_>) {
        if self.is_enabled() {
            self.record(TraceEvent::Reduction {
                pass: event.pass,
                rule: event.rule,
                lhs: event.lhs.to_string(),
                span: event.span.clone(),
                captures: event.captures.to_vec(),
                value: event.value.clone(),
            });
        }
    }

    fn on_parse_end(&mut self, outcome: &ParseOutcome) {
        if !self.is_enabled() {
            return;
        }
        let event = match outcome {
            ParseOutcome::Accepted { value } => TraceEvent::ParseEnd {
                value: Some(value.clone()),
                unmatched: None,
                buffer: String::new(),
            },
            ParseOutcome::Stuck { buffer, unmatched } => TraceEvent::ParseEnd {
                value: None,
                unmatched: Some(unmatched.clone()),
                buffer: buffer.to_string(),
            },
        };
        self.record(event);
    }

    fn on_parse_abort(&mut self, error: &Error) {
        self.record(TraceEvent::ParseAbort {
            message: error.to_string(),
        });
    }
}

// =============================================================================
// Tests
// =============================================================================
