//! Default process metrics.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use lumen_core::metrics::exposition;
use lumen_core::{Collector, LumenError, MetricRegistry};
use lumen_service::obs::process::parse_status_bytes;
use lumen_service::obs::ProcessCollector;

const STATUS: &str = "\
Name:\tlumen-service
VmSize:\t  123456 kB
VmRSS:\t    2048 kB
Threads:\t4
";

#[test]
fn parses_proc_status_lines() {
    assert_eq!(parse_status_bytes(STATUS, "VmRSS:"), Some(2048 * 1024));
    assert_eq!(parse_status_bytes(STATUS, "VmSize:"), Some(123_456 * 1024));
    assert_eq!(parse_status_bytes(STATUS, "Threads:"), Some(4));
    assert_eq!(parse_status_bytes(STATUS, "VmSwap:"), None);
    assert_eq!(parse_status_bytes("VmRSS:\tlots kB\n", "VmRSS:"), None);
}

#[test]
fn start_time_is_always_reported() {
    let collector = ProcessCollector::new();
    let samples = collector.collect();

    let start = samples
        .iter()
        .find(|s| s.name == "process_start_time_seconds")
        .expect("start time");
    assert_eq!(start.value, collector.start_time_seconds());
    assert!(start.value > 1_600_000_000.0);
    assert!(samples.iter().all(|s| collector.names().contains(&s.name)));
}

#[cfg(target_os = "linux")]
#[test]
fn reads_memory_and_descriptors_on_linux() {
    let samples = ProcessCollector::new().collect();
    let value = |name: &str| samples.iter().find(|s| s.name == name).map(|s| s.value);

    assert!(value("process_resident_memory_bytes").unwrap() > 0.0);
    assert!(value("process_virtual_memory_bytes").unwrap() > 0.0);
    assert!(value("process_open_fds").unwrap() >= 3.0);
}

#[test]
fn registers_once_per_registry() {
    let reg = MetricRegistry::new();
    reg.register_collector(Arc::new(ProcessCollector::new())).unwrap();
    let err = reg
        .register_collector(Arc::new(ProcessCollector::new()))
        .unwrap_err();
    assert!(matches!(err, LumenError::DuplicateName(_)));

    let out = exposition::render(&reg);
    assert!(out.starts_with(
        "# HELP process_start_time_seconds Start time of the process since unix epoch in seconds.\n# TYPE process_start_time_seconds gauge\n"
    ));
}
