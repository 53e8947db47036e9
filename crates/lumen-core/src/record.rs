//! Structured log records.
//!
//! A record is built once with the builder methods and then only read.
//! Serialization writes `timestamp`, `level`, `message` first, followed by
//! the structured fields in insertion order, as a single JSON line.

use bytes::Bytes;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::error::{LumenError, Result};

const RESERVED: [&str; 3] = ["timestamp", "level", "message"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Error => "error",
        }
    }

    /// `Error` for 5xx statuses, `Info` otherwise.
    pub fn for_status(status: u16) -> Self {
        if status >= 500 {
            Severity::Error
        } else {
            Severity::Info
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogRecord {
    timestamp: DateTime<Utc>,
    severity: Severity,
    message: String,
    fields: Vec<(String, Value)>,
}

impl LogRecord {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            severity,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Append a field. Setting an existing key replaces its value in place.
    ///
    /// A key that is a reserved name (`timestamp`, `level`, `message`) with
    /// any number of leading underscores gets one more underscore, so
    /// `timestamp` is stored as `_timestamp` and `_timestamp` as
    /// `__timestamp`. Distinct keys never merge.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut key = key.into();
        if RESERVED.contains(&key.trim_start_matches('_')) {
            key.insert(0, '_');
        }
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// ISO-8601 UTC with millisecond precision.
    pub fn timestamp_string(&self) -> String {
        format_timestamp(self.timestamp)
    }

    /// One newline-terminated JSON line.
    pub fn to_line(&self) -> Result<Bytes> {
        let mut buf = serde_json::to_vec(self)
            .map_err(|e| LumenError::Internal(format!("serialize log record failed: {e}")))?;
        buf.push(b'\n');
        Ok(Bytes::from(buf))
    }
}

impl Serialize for LogRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3 + self.fields.len()))?;
        map.serialize_entry("timestamp", &self.timestamp_string())?;
        map.serialize_entry("level", self.severity.as_str())?;
        map.serialize_entry("message", &self.message)?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
