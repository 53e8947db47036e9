//! Lumen core: metric registry, exposition encoder, log records, and errors.
//!
//! This crate defines the observability primitives shared by the service,
//! its middleware, and tests. It intentionally carries no transport or
//! runtime dependencies so registries and records can be built in isolation.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Misuse of the registry surfaces as `LumenError`/`Result` so callers decide
//! whether a mistake is fatal.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metrics;
pub mod record;

/// Shared result type.
pub use error::{LumenError, Result};
pub use metrics::{Collector, CounterFamily, GaugeSample, LabelSet, MetricRegistry, Sample};
pub use record::{LogRecord, Severity};
