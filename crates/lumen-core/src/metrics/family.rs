use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::error::{LumenError, Result};
use crate::metrics::label::LabelSet;

struct Series {
    seq: u64,
    value: AtomicU64,
}

/// A named counter with one monotonic value per label set.
///
/// The label schema is fixed at registration. Series are created on first
/// increment and remember their creation order for deterministic output.
pub struct CounterFamily {
    name: String,
    help: String,
    label_names: Vec<String>,
    series: DashMap<Vec<String>, Series>,
    next_seq: AtomicU64,
}

impl CounterFamily {
    pub(crate) fn new(name: &str, help: &str, label_names: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            help: help.to_string(),
            label_names: label_names.iter().map(|n| n.to_string()).collect(),
            series: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn label_names(&self) -> &[String] {
        &self.label_names
    }

    /// Increment by 1.
    pub fn inc(&self, values: &[&str]) -> Result<()> {
        self.inc_by(values, 1)
    }

    /// Increment by an arbitrary value. Fails with `CounterOverflow`, leaving
    /// the value untouched, if the sum would exceed `u64::MAX`.
    pub fn inc_by(&self, values: &[&str], v: u64) -> Result<()> {
        self.check_arity(values.len())?;
        let key: Vec<String> = values.iter().map(|v| v.to_string()).collect();

        if let Some(series) = self.series.get(&key) {
            return self.add(&series.value, v);
        }

        // Sequence is taken under the shard lock, so first-seen order matches insertion.
        let series = self.series.entry(key).or_insert_with(|| Series {
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            value: AtomicU64::new(0),
        });
        self.add(&series.value, v)
    }

    fn add(&self, value: &AtomicU64, v: u64) -> Result<()> {
        value
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |cur| cur.checked_add(v))
            .map(|_| ())
            .map_err(|_| LumenError::CounterOverflow(self.name.clone()))
    }

    /// Current value of one series, `None` if it was never incremented.
    pub fn get(&self, values: &[&str]) -> Option<u64> {
        let key: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        self.series
            .get(&key)
            .map(|s| s.value.load(Ordering::Relaxed))
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Point-in-time copy of every series in first-seen order.
    pub fn snapshot(&self) -> Vec<(LabelSet, u64)> {
        let mut rows: Vec<(u64, LabelSet, u64)> = self
            .series
            .iter()
            .map(|r| {
                let labels = LabelSet::from_schema(&self.label_names, r.key());
                (r.value().seq, labels, r.value().value.load(Ordering::Relaxed))
            })
            .collect();
        rows.sort_by_key(|(seq, _, _)| *seq);
        rows.into_iter().map(|(_, l, v)| (l, v)).collect()
    }

    fn check_arity(&self, got: usize) -> Result<()> {
        if got != self.label_names.len() {
            return Err(LumenError::LabelArity {
                family: self.name.clone(),
                expected: self.label_names.len(),
                got,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for CounterFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CounterFamily")
            .field("name", &self.name)
            .field("label_names", &self.label_names)
            .field("series", &self.series.len())
            .finish()
    }
}
