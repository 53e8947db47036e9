use std::fs;

use chrono::Utc;

use lumen_core::{Collector, GaugeSample};

const START_TIME: &str = "process_start_time_seconds";
const RESIDENT_MEMORY: &str = "process_resident_memory_bytes";
const VIRTUAL_MEMORY: &str = "process_virtual_memory_bytes";
const OPEN_FDS: &str = "process_open_fds";

const NAMES: [&str; 4] = [START_TIME, RESIDENT_MEMORY, VIRTUAL_MEMORY, OPEN_FDS];

/// Process gauges. Start time is taken when the collector is built at
/// startup; memory and descriptor counts come from `/proc/self` and are
/// omitted where it is unavailable.
pub struct ProcessCollector {
    start_time_seconds: f64,
}

impl ProcessCollector {
    pub fn new() -> Self {
        Self {
            start_time_seconds: Utc::now().timestamp_millis() as f64 / 1000.0,
        }
    }

    pub fn start_time_seconds(&self) -> f64 {
        self.start_time_seconds
    }
}

impl Default for ProcessCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector for ProcessCollector {
    fn names(&self) -> &[&'static str] {
        &NAMES
    }

    fn collect(&self) -> Vec<GaugeSample> {
        let mut out = vec![GaugeSample {
            name: START_TIME,
            help: "Start time of the process since unix epoch in seconds.",
            value: self.start_time_seconds,
        }];

        match fs::read_to_string("/proc/self/status") {
            Ok(status) => {
                if let Some(rss) = parse_status_bytes(&status, "VmRSS:") {
                    out.push(GaugeSample {
                        name: RESIDENT_MEMORY,
                        help: "Resident memory size in bytes.",
                        value: rss as f64,
                    });
                }
                if let Some(vsz) = parse_status_bytes(&status, "VmSize:") {
                    out.push(GaugeSample {
                        name: VIRTUAL_MEMORY,
                        help: "Virtual memory size in bytes.",
                        value: vsz as f64,
                    });
                }
            }
            Err(e) => tracing::trace!(error = %e, "process status unavailable"),
        }

        if let Ok(dir) = fs::read_dir("/proc/self/fd") {
            out.push(GaugeSample {
                name: OPEN_FDS,
                help: "Number of open file descriptors.",
                value: dir.count() as f64,
            });
        }
        out
    }
}

/// Value of a `/proc/<pid>/status` line such as `VmRSS:    1234 kB`, in bytes.
pub fn parse_status_bytes(status: &str, key: &str) -> Option<u64> {
    let line = status.lines().find(|l| l.starts_with(key))?;
    let mut parts = line[key.len()..].split_whitespace();
    let value: u64 = parts.next()?.parse().ok()?;
    match parts.next() {
        Some("kB") => value.checked_mul(1024),
        None => Some(value),
        Some(_) => None,
    }
}
