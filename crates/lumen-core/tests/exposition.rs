//! Text exposition output.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use lumen_core::metrics::exposition;
use lumen_core::{Collector, GaugeSample, MetricRegistry};

#[test]
fn empty_registry_renders_empty_body() {
    let reg = MetricRegistry::new();
    assert_eq!(exposition::render(&reg), "");
}

#[test]
fn family_without_series_emits_header_only() {
    let reg = MetricRegistry::new();
    reg.register_family("idle_total", "Never touched", &["k"]).unwrap();
    assert_eq!(
        exposition::render(&reg),
        "# HELP idle_total Never touched\n# TYPE idle_total counter\n"
    );
}

struct FixedGauges;

impl Collector for FixedGauges {
    fn names(&self) -> &[&'static str] {
        &["up_seconds", "ratio"]
    }

    fn collect(&self) -> Vec<GaugeSample> {
        vec![
            GaugeSample { name: "up_seconds", help: "Uptime", value: 12.5 },
            GaugeSample { name: "ratio", help: "Ratio", value: f64::INFINITY },
            GaugeSample { name: "undeclared", help: "Skipped", value: 1.0 },
        ]
    }
}

#[test]
fn collectors_render_as_gauges_after_counters() {
    let reg = MetricRegistry::new();
    reg.register_collector(Arc::new(FixedGauges)).unwrap();
    reg.register_family("jobs_total", "Jobs run", &[]).unwrap();
    reg.increment_by("jobs_total", &[], 4096).unwrap();

    let expected = "\
# HELP jobs_total Jobs run
# TYPE jobs_total counter
jobs_total 4096
# HELP up_seconds Uptime
# TYPE up_seconds gauge
up_seconds 12.5
# HELP ratio Ratio
# TYPE ratio gauge
ratio +Inf
";
    assert_eq!(exposition::render(&reg), expected);
}

#[test]
fn renders_help_type_and_series_lines() {
    let reg = MetricRegistry::new();
    let fam = reg
        .register_family(
            "http_requests_total",
            "Total number of HTTP requests",
            &["method", "path", "status"],
        )
        .unwrap();
    for _ in 0..3 {
        fam.inc(&["GET", "/health", "200"]).unwrap();
    }
    fam.inc(&["GET", "/metrics", "200"]).unwrap();
    reg.register_family("jobs_total", "Jobs run", &[]).unwrap();
    reg.increment("jobs_total", &[]).unwrap();

    let expected = "\
# HELP http_requests_total Total number of HTTP requests
# TYPE http_requests_total counter
http_requests_total{method=\"GET\",path=\"/health\",status=\"200\"} 3
http_requests_total{method=\"GET\",path=\"/metrics\",status=\"200\"} 1
# HELP jobs_total Jobs run
# TYPE jobs_total counter
jobs_total 1
";
    assert_eq!(exposition::render(&reg), expected);
}

#[test]
fn escapes_label_values_and_help() {
    let reg = MetricRegistry::new();
    reg.register_family("odd_total", "line one\nline \\two", &["v"]).unwrap();
    reg.increment("odd_total", &["say \"hi\"\\\n"]).unwrap();

    let out = exposition::render(&reg);
    assert!(out.contains("# HELP odd_total line one\\nline \\\\two\n"));
    assert!(out.contains("odd_total{v=\"say \\\"hi\\\"\\\\\\n\"} 1\n"));
}

#[test]
fn rendering_does_not_mutate_state() {
    let reg = MetricRegistry::new();
    reg.register_family("a_total", "A", &["k"]).unwrap();
    reg.increment("a_total", &["x"]).unwrap();

    let first = exposition::render(&reg);
    let second = exposition::render(&reg);
    assert_eq!(first, second);
    assert_eq!(reg.family("a_total").unwrap().get(&["x"]), Some(1));
}
