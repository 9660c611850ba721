//! Trace event and record types.
//!
//! This module defines the events recorded while a parse runs.

use std::ops::Range;

use fixgram_foundation::Value;

// =============================================================================
// Trace Event
// =============================================================================

/// Events that can be traced during a parse.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceEvent {
    /// A parse has started.
    ParseStart {
        /// The input text.
        input: String,
    },

    /// A pass over the rules has started.
    PassStart {
        /// Pass number within the parse, starting at 1.
        pass: usize,
        /// The buffer at the start of the pass, rendered.
        buffer: String,
    },

    /// A span was reduced.
    Reduction {
        /// Pass number.
        pass: usize,
        /// Ordinal of the rule that matched.
        rule: u32,
        /// The rule's left-hand side.
        lhs: String,
        /// The replaced entries.
        span: Range<usize>,
        /// Arguments passed to the action.
        captures: Vec<Value>,
        /// The action's result.
        value: Value,
    },

    /// The buffer reached a fixpoint.
    ParseEnd {
        /// The accepted value, if the buffer reduced to the start symbol.
        value: Option<Value>,
        /// The unmatched span of a stuck parse.
        unmatched: Option<Range<usize>>,
        /// The final buffer, rendered. Empty for accepted parses.
        buffer: String,
    },

    /// The parse failed.
    ParseAbort {
        /// The error message.
        message: String,
    },
}

impl TraceEvent {
    /// Returns a short name for the event type.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ParseStart { .. } => "parse-start",
            Self::PassStart { .. } => "pass-start",
            Self::Reduction { .. } => "reduction",
            Self::ParseEnd { .. } => "parse-end",
            Self::ParseAbort { .. } => "parse-abort",
        }
    }

    /// Returns true if this event starts or finishes a parse.
    #[must_use]
    pub fn is_parse_boundary(&self) -> bool {
        matches!(
            self,
            Self::ParseStart { .. } | Self::ParseEnd { .. } | Self::ParseAbort { .. }
        )
    }
}

// =============================================================================
// Trace Record
// =============================================================================

/// A timestamped trace record.
#[derive(Clone, Debug)]
pub struct TraceRecord {
    /// Unique record ID within the session.
    pub id: u64,
    /// The parse this event belongs to, starting at 1.
    pub parse: u64,
    /// Timestamp in nanoseconds since session start.
    pub timestamp_ns: u64,
    /// The trace event.
    pub event: TraceEvent,
}

impl TraceRecord {
    /// Creates a new trace record.
    #[must_use]
    pub fn new(id: u64, parse: u64, timestamp_ns: u64, event: TraceEvent) -> Self {
        Self {
            id,
            parse,
            timestamp_ns,
            event,
        }
    }

    /// Returns the event type name.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        self.event.event_type()
    }
}

// =============================================================================
// Tests
// =============================================================================
