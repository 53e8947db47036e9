//! Log record construction and JSON line serialization.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use lumen_core::{LogRecord, Severity};

#[test]
fn serializes_reserved_keys_first_then_insertion_order() {
    let ts = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
        + chrono::Duration::milliseconds(42);
    let rec = LogRecord::info("incoming")
        .with_timestamp(ts)
        .with_field("method", "GET")
        .with_field("path", "/health")
        .with_field("attempt", 2);

    let line = rec.to_line().unwrap();
    let text = std::str::from_utf8(&line).unwrap();
    assert_eq!(
        text,
        "{\"timestamp\":\"2024-03-09T07:05:01.042Z\",\"level\":\"info\",\"message\":\"incoming\",\"method\":\"GET\",\"path\":\"/health\",\"attempt\":2}\n"
    );
}

#[test]
fn line_is_independently_parseable() {
    let rec = LogRecord::error("Simulated error").with_field("code", "DEMO_ERROR");
    let line = rec.to_line().unwrap();
    assert_eq!(line.iter().filter(|b| **b == b'\n').count(), 1);

    let v: Value = serde_json::from_slice(&line).unwrap();
    assert_eq!(v["level"], "error");
    assert_eq!(v["code"], "DEMO_ERROR");
    let ts = v["timestamp"].as_str().unwrap();
    assert!(ts.ends_with('Z'));
    assert_eq!(ts.len(), "2024-01-01T00:00:00.000Z".len());
}

#[test]
fn reserved_and_repeated_keys() {
    let rec = LogRecord::info("m")
        .with_field("message", "shadow")
        .with_field("k", 1)
        .with_field("k", json!({"nested": true}));

    assert_eq!(rec.message(), "m");
    assert_eq!(rec.field("_message"), Some(&json!("shadow")));
    assert_eq!(rec.field("k"), Some(&json!({"nested": true})));
    assert_eq!(rec.fields().count(), 2);
}

#[test]
fn escaped_reserved_key_does_not_merge_with_user_key() {
    let rec = LogRecord::info("m")
        .with_field("timestamp", "user supplied")
        .with_field("_timestamp", "already prefixed")
        .with_field("_other", 3);

    assert_eq!(rec.field("_timestamp"), Some(&json!("user supplied")));
    assert_eq!(rec.field("__timestamp"), Some(&json!("already prefixed")));
    assert_eq!(rec.field("_other"), Some(&json!(3)));

    let v: Value = serde_json::from_slice(&rec.to_line().unwrap()).unwrap();
    assert_eq!(v.as_object().unwrap().len(), 6);
    assert_ne!(v["timestamp"], "user supplied");
}

#[test]
fn severity_follows_status() {
    assert_eq!(Severity::for_status(200), Severity::Info);
    assert_eq!(Severity::for_status(499), Severity::Info);
    assert_eq!(Severity::for_status(500), Severity::Error);
    assert_eq!(Severity::for_status(503).as_str(), "error");
}
