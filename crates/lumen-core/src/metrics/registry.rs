//! Process-scoped registry of counter families and scrape-time collectors.
//!
//! Registration and collection go through the ordered family list; the
//! increment path only touches the name index and the target family.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use dashmap::DashMap;

use crate::error::{LumenError, Result};
use crate::metrics::collector::Collector;
use crate::metrics::family::CounterFamily;
use crate::metrics::label::{validate_label_names, validate_metric_name, LabelSet};

#[derive(Default)]
struct Families {
    counters: Vec<Arc<CounterFamily>>,
    collectors: Vec<Arc<dyn Collector>>,
    names: HashSet<String>,
}

#[derive(Default)]
pub struct MetricRegistry {
    order: RwLock<Families>,
    by_name: DashMap<String, Arc<CounterFamily>>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a counter family with a fixed label schema.
    ///
    /// Fails with `DuplicateName` if the name is taken by a family or a
    /// collector; the registry is left untouched on any failure.
    pub fn register_family(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
    ) -> Result<Arc<CounterFamily>> {
        validate_metric_name(name)?;
        validate_label_names(label_names)?;

        let mut order = self.write();
        if order.names.contains(name) {
            return Err(LumenError::DuplicateName(name.to_string()));
        }
        let family = Arc::new(CounterFamily::new(name, help, label_names));
        self.by_name.insert(name.to_string(), Arc::clone(&family));
        order.names.insert(name.to_string());
        order.counters.push(Arc::clone(&family));
        Ok(family)
    }

    /// Register a scrape-time collector. All of its names are checked before
    /// any is reserved.
    pub fn register_collector(&self, collector: Arc<dyn Collector>) -> Result<()> {
        let names = collector.names();
        for (i, name) in names.iter().enumerate() {
            validate_metric_name(name)?;
            if names[..i].contains(name) {
                return Err(LumenError::DuplicateName(name.to_string()));
            }
        }

        let mut order = self.write();
        if let Some(taken) = names.iter().find(|n| order.names.contains(**n)) {
            return Err(LumenError::DuplicateName(taken.to_string()));
        }
        order.names.extend(names.iter().map(|n| n.to_string()));
        order.collectors.push(collector);
        Ok(())
    }

    /// Counter families in registration order.
    pub fn families(&self) -> Vec<Arc<CounterFamily>> {
        self.order
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .counters
            .clone()
    }

    /// Collectors in registration order.
    pub fn collectors(&self) -> Vec<Arc<dyn Collector>> {
        self.order
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .collectors
            .clone()
    }

    fn write(&self) -> RwLockWriteGuard<'_, Families> {
        self.order.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn family(&self, name: &str) -> Option<Arc<CounterFamily>> {
        self.by_name.get(name).map(|f| Arc::clone(f.value()))
    }

    /// Increment a series by 1, creating it on first use.
    pub fn increment(&self, family: &str, label_values: &[&str]) -> Result<()> {
        self.increment_by(family, label_values, 1)
    }

    pub fn increment_by(&self, family: &str, label_values: &[&str], v: u64) -> Result<()> {
        let fam = self
            .family(family)
            .ok_or_else(|| LumenError::UnknownFamily(family.to_string()))?;
        fam.inc_by(label_values, v)
    }

    /// Lazily walk every series, family registration order first, then
    /// first-seen series order. Each family is read independently.
    pub fn collect(&self) -> Collect {
        Collect {
            families: self.families().into_iter(),
            current: None,
        }
    }

    /// Number of counter families.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// One series observed by `collect()`.
#[derive(Debug, Clone)]
pub struct Sample {
    pub family: Arc<CounterFamily>,
    pub labels: LabelSet,
    pub value: u64,
}

impl Sample {
    pub fn name(&self) -> &str {
        self.family.name()
    }

    pub fn help(&self) -> &str {
        self.family.help()
    }
}

/// Iterator returned by [`MetricRegistry::collect`].
pub struct Collect {
    families: std::vec::IntoIter<Arc<CounterFamily>>,
    current: Option<(Arc<CounterFamily>, std::vec::IntoIter<(LabelSet, u64)>)>,
}

impl Iterator for Collect {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        loop {
            if let Some((family, series)) = &mut self.current {
                if let Some((labels, value)) = series.next() {
                    return Some(Sample {
                        family: Arc::clone(family),
                        labels,
                        value,
                    });
                }
            }
            let family = self.families.next()?;
            let series = family.snapshot().into_iter();
            self.current = Some((family, series));
        }
    }
}
