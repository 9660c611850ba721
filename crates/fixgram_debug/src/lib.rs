//! Reduction tracing for fixgram.
//!
//! This crate provides:
//! - [`Tracer`] - A [`ReductionObserver`](fixgram_engine::ReductionObserver)
//!   that records parse events into a bounded buffer
//! - [`HumanFormatter`] and [`JsonFormatter`] - Trace output formats

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod trace;

pub use trace::{
    DEFAULT_BUFFER_SIZE, HumanFormatter, JsonFormatter, TraceBuffer, TraceBufferStats, TraceEvent,
    TraceFormatter, TraceOutput, TraceRecord, Tracer, TracerConfig,
};
