//! Scrape-time gauges.
//!
//! A `Collector` is asked for its current values on every scrape instead of
//! being updated on the request path. Used for process-level readings.

#[derive(Debug, Clone, PartialEq)]
pub struct GaugeSample {
    pub name: &'static str,
    pub help: &'static str,
    pub value: f64,
}

pub trait Collector: Send + Sync {
    /// Every name this collector may report. Reserved in the registry at
    /// registration, whether or not a given scrape emits it.
    fn names(&self) -> &[&'static str];

    /// Current readings. Names missing from `names()` are skipped.
    fn collect(&self) -> Vec<GaugeSample>;
}
