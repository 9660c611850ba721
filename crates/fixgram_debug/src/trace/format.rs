//! Trace output formatters.
//!
//! Provides human-readable and JSON formatters for trace records.

use std::fmt::Write;
use std::ops::Range;

use fixgram_foundation::Value;

use super::record::{TraceEvent, TraceRecord};

// =============================================================================
// Trace Formatter Trait
// =============================================================================

/// Trait for formatting trace records.
pub trait TraceFormatter {
    /// Formats a single trace record to a string.
    fn format(&self, record: &TraceRecord) -> String;

    /// Formats multiple records.
    fn format_many(&self, records: &[&TraceRecord]) -> String {
        records
            .iter()
            .map(|r| self.format(r))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// =============================================================================
// Human-Readable Formatter
// =============================================================================

/// Formats trace records in human-readable form.
#[derive(Clone, Debug, Default)]
pub struct HumanFormatter {
    /// Whether to include timestamps.
    pub show_timestamps: bool,
    /// Whether to include record IDs.
    pub show_ids: bool,
}

impl HumanFormatter {
    /// Creates a new human formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to show timestamps.
    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.show_timestamps = true;
        self
    }

    /// Builder method to show record IDs.
    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.show_ids = true;
        self
    }

    /// Formats timestamp in microseconds.
    #[allow(clippy::cast_precision_loss)]
    fn format_timestamp(ns: u64) -> String {
        let us = ns / 1000;
        if us >= 1_000_000 {
            format!("{:.3}s", us as f64 / 1_000_000.0)
        } else if us >= 1000 {
            format!("{:.3}ms", us as f64 / 1000.0)
        } else {
            format!("{us}us")
        }
    }

    fn format_captures(captures: &[Value]) -> String {
        captures
            .iter()
            .map(|v| format!("{v:?}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl TraceFormatter for HumanFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        let mut prefix = String::new();

        if self.show_ids {
            let _ = write!(prefix, "[{:06}] ", record.id);
        }

        let _ = write!(prefix, "P{:04} ", record.parse);

        if self.show_timestamps {
            let _ = write!(
                prefix,
                "{:>10} ",
                Self::format_timestamp(record.timestamp_ns)
            );
        }

        let parse = record.parse;
        let event_str = match &record.event {
            TraceEvent::ParseStart { input } => {
                format!("=== PARSE {parse} START {input:?} ===")
            }
            TraceEvent::PassStart { pass, buffer } => {
                format!("  >> pass {pass} {buffer}")
            }
            TraceEvent::Reduction {
                rule,
                lhs,
                span,
                captures,
                value,
                ..
            } => {
                format!(
                    "    REDUCE #{rule} {lhs} [{}..{}] ({}) -> {value:?}",
                    span.start,
                    span.end,
                    Self::format_captures(captures)
                )
            }
            TraceEvent::ParseEnd {
                value: Some(value), ..
            } => {
                format!("=== PARSE {parse} END (ACCEPTED {value}) ===")
            }
            TraceEvent::ParseEnd {
                value: None,
                unmatched,
                buffer,
            } => {
                let span = unmatched
                    .as_ref()
                    .map(|r| format!(" at {}..{}", r.start, r.end))
                    .unwrap_or_default();
                format!("=== PARSE {parse} END (STUCK{span}) {buffer} ===")
            }
            TraceEvent::ParseAbort { message } => {
                format!("=== PARSE {parse} ABORTED: {message} ===")
            }
        };

        format!("{prefix}{event_str}")
    }
}

// =============================================================================
// JSON Formatter
// =============================================================================

/// Formats trace records as JSON.
#[derive(Clone, Debug, Default)]
pub struct JsonFormatter {
    /// Whether to put each record of a batch on its own line.
    pub pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method for pretty printing.
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Escapes a string for JSON.
    fn escape_string(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_control() => {
                    let _ = write!(out, "\\u{:04x}", u32::from(c));
                }
                c => out.push(c),
            }
        }
        out
    }

    /// Formats a value as JSON.
    fn format_value(value: &Value) -> String {
        match value {
            Value::Nil => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => {
                if f.is_nan() {
                    "\"NaN\"".to_string()
                } else if f.is_infinite() {
                    if *f > 0.0 {
                        "\"Infinity\"".to_string()
                    } else {
                        "\"-Infinity\"".to_string()
                    }
                } else {
                    f.to_string()
                }
            }
            Value::String(s) => format!("\"{}\"", Self::escape_string(s)),
            Value::Vec(items) => {
                let items: Vec<_> = items.iter().map(Self::format_value).collect();
                format!("[{}]", items.join(","))
            }
        }
    }

    fn format_span(span: &Range<usize>) -> String {
        format!("[{},{}]", span.start, span.end)
    }
}

impl TraceFormatter for JsonFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        let event_data = match &record.event {
            TraceEvent::ParseStart { input } => {
                format!("\"input\":\"{}\"", Self::escape_string(input))
            }
            TraceEvent::PassStart { pass, buffer } => {
                format!(
                    "\"pass\":{pass},\"buffer\":\"{}\"",
                    Self::escape_string(buffer)
                )
            }
            TraceEvent::Reduction {
                pass,
                rule,
                lhs,
                span,
                captures,
                value,
            } => {
                let captures: Vec<_> = captures.iter().map(Self::format_value).collect();
                format!(
                    "\"pass\":{pass},\"rule\":{rule},\"lhs\":\"{}\",\"span\":{},\"captures\":[{}],\"value\":{}",
                    Self::escape_string(lhs),
                    Self::format_span(span),
                    captures.join(","),
                    Self::format_value(value)
                )
            }
            TraceEvent::ParseEnd {
                value,
                unmatched,
                buffer,
            } => {
                let value_json = value
                    .as_ref()
                    .map_or_else(|| "null".to_string(), Self::format_value);
                let unmatched_json = unmatched
                    .as_ref()
                    .map_or_else(|| "null".to_string(), Self::format_span);
                format!(
                    "\"accepted\":{},\"value\":{value_json},\"unmatched\":{unmatched_json},\"buffer\":\"{}\"",
                    value.is_some(),
                    Self::escape_string(buffer)
                )
            }
            TraceEvent::ParseAbort { message } => {
                format!("\"message\":\"{}\"", Self::escape_string(message))
            }
        };

        format!(
            "{{\"id\":{},\"parse\":{},\"timestamp_ns\":{},\"type\":\"{}\",{}}}",
            record.id,
            record.parse,
            record.timestamp_ns,
            record.event_type(),
            event_data
        )
    }

    fn format_many(&self, records: &[&TraceRecord]) -> String {
        let items: Vec<_> = records.iter().map(|r| self.format(r)).collect();
        if self.pretty {
            format!("[\n  {}\n]", items.join(",\n  "))
        } else {
            format!("[{}]", items.join(","))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
