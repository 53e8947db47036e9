//! In-process counter metrics with Prometheus text exposition.
//!
//! Families are registered once with a fixed label schema. Each series is an
//! `AtomicU64` stored in a per-family `DashMap`, so increments on unrelated
//! families never contend on a shared lock. Gauges are not stored at all:
//! collectors are read when the registry is scraped.

pub mod collector;
pub mod exposition;
pub mod family;
pub mod label;
pub mod registry;

pub use collector::{Collector, GaugeSample};
pub use family::CounterFamily;
pub use label::LabelSet;
pub use registry::{Collect, MetricRegistry, Sample};
