//! Request log pipeline.
//!
//! `RequestLogger` serializes each record once and fans the line out to every
//! configured `LogSink`. Sinks are isolated: a failing sink never stops the
//! other sinks, and callers that find a sink busy enqueue and move on.
//!
//! Sink writes are synchronous and run on the calling task's worker thread.
//! The bounded queues cap how many callers can pile up behind a stalled
//! sink, but the caller that holds a sink's writer lock is blocked for the
//! duration of the write, and it also drains whatever queued up meanwhile
//! (at most `queue_capacity` lines). A sink that can stall for long (e.g. a
//! network sink) should hand lines off internally rather than block in
//! `write`.

pub mod logger;
pub mod sink;

pub use logger::{RequestLogger, LOG_RECORDS_DROPPED_TOTAL, LOG_SINK_ERRORS_TOTAL};
pub use sink::{ConsoleSink, FileSink, LogSink};
