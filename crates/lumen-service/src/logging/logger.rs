use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

use bytes::Bytes;

use lumen_core::error::Result;
use lumen_core::{CounterFamily, LogRecord, MetricRegistry};

use super::sink::LogSink;

pub const LOG_SINK_ERRORS_TOTAL: &str = "lumen_log_sink_errors_total";
pub const LOG_RECORDS_DROPPED_TOTAL: &str = "lumen_log_records_dropped_total";

/// One sink plus its bounded pending queue.
struct SinkSlot {
    name: String,
    queue: Mutex<VecDeque<Bytes>>,
    sink: Mutex<Box<dyn LogSink>>,
}

/// Fan-out logger with per-sink bounded queues.
///
/// `log` never blocks on a sink: the caller that wins the sink's writer lock
/// drains the queue, everyone else enqueues and returns. A full queue drops
/// its oldest line.
pub struct RequestLogger {
    slots: Vec<SinkSlot>,
    capacity: usize,
    sink_errors: Arc<CounterFamily>,
    dropped: Arc<CounterFamily>,
}

impl RequestLogger {
    /// Build a logger and register its side-channel counters on `registry`.
    pub fn new(
        registry: &MetricRegistry,
        capacity: usize,
        sinks: Vec<Box<dyn LogSink>>,
    ) -> Result<Self> {
        let sink_errors = family_or_register(
            registry,
            LOG_SINK_ERRORS_TOTAL,
            "Log records a sink failed to write",
        )?;
        let dropped = family_or_register(
            registry,
            LOG_RECORDS_DROPPED_TOTAL,
            "Log records dropped because a sink queue was full",
        )?;

        let slots = sinks
            .into_iter()
            .map(|sink| SinkSlot {
                name: sink.name().to_string(),
                queue: Mutex::new(VecDeque::with_capacity(capacity.min(64))),
                sink: Mutex::new(sink),
            })
            .collect();

        Ok(Self {
            slots,
            capacity: capacity.max(1),
            sink_errors,
            dropped,
        })
    }

    pub fn sink_names(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.name.as_str()).collect()
    }

    /// Serialize once and hand the line to every sink.
    pub fn log(&self, record: LogRecord) {
        let line = match record.to_line() {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, record = record.message(), "log record dropped");
                return;
            }
        };
        for slot in &self.slots {
            self.submit(slot, line.clone());
        }
    }

    fn submit(&self, slot: &SinkSlot, line: Bytes) {
        {
            let mut queue = lock(&slot.queue);
            if queue.len() >= self.capacity {
                queue.pop_front();
                self.count(&self.dropped, &slot.name);
            }
            queue.push_back(line);
        }

        loop {
            let mut sink = match slot.sink.try_lock() {
                Ok(guard) => guard,
                Err(TryLockError::Poisoned(p)) => p.into_inner(),
                Err(TryLockError::WouldBlock) => return,
            };
            loop {
                let next = lock(&slot.queue).pop_front();
                let Some(line) = next else { break };
                if let Err(e) = sink.write(&line) {
                    self.count(&self.sink_errors, &slot.name);
                    tracing::warn!(sink = %slot.name, error = %e, "log sink write failed");
                }
            }
            drop(sink);

            // A line pushed between the last pop and the unlock has no drainer yet.
            if lock(&slot.queue).is_empty() {
                return;
            }
        }
    }

    fn count(&self, family: &CounterFamily, sink: &str) {
        if let Err(e) = family.inc(&[sink]) {
            tracing::error!(error = %e, "logger counter update failed");
        }
    }
}

fn family_or_register(
    registry: &MetricRegistry,
    name: &str,
    help: &str,
) -> Result<Arc<CounterFamily>> {
    match registry.family(name) {
        Some(f) => Ok(f),
        None => registry.register_family(name, help, &["sink"]),
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
