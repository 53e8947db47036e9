//! Prometheus text exposition (format 0.0.4).

use std::fmt::Write;

use crate::metrics::registry::MetricRegistry;

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Render the registry: every counter family in registration order (HELP and
/// TYPE even before its first series), then every collector's gauges.
/// A registry with nothing registered renders as "".
pub fn render(registry: &MetricRegistry) -> String {
    let mut out = String::new();

    for family in registry.families() {
        write_header(&mut out, family.name(), family.help(), "counter");
        for (labels, value) in family.snapshot() {
            let _ = writeln!(out, "{}{} {}", family.name(), labels, value);
        }
    }

    for collector in registry.collectors() {
        let names = collector.names();
        for g in collector.collect() {
            if !names.contains(&g.name) {
                continue;
            }
            write_header(&mut out, g.name, g.help, "gauge");
            let _ = writeln!(out, "{} {}", g.name, format_float(g.value));
        }
    }
    out
}

fn write_header(out: &mut String, name: &str, help: &str, kind: &str) {
    let _ = writeln!(out, "# HELP {} {}", name, escape_help(help));
    let _ = writeln!(out, "# TYPE {} {}", name, kind);
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

fn format_float(v: f64) -> String {
    if v.is_nan() {
        "NaN".into()
    } else if v.is_infinite() {
        if v > 0.0 { "+Inf".into() } else { "-Inf".into() }
    } else {
        v.to_string()
    }
}
