//! Test sinks shared by the integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use lumen_core::error::{LumenError, Result};
use lumen_service::logging::LogSink;

/// Keeps every line in memory.
#[derive(Clone)]
pub struct MemorySink {
    name: String,
    lines: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MemorySink {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            lines: Arc::default(),
        }
    }

    pub fn lines(&self) -> Vec<Vec<u8>> {
        self.lines.lock().unwrap().clone()
    }

    pub fn records(&self) -> Vec<Value> {
        self.lines()
            .iter()
            .map(|l| serde_json::from_slice(l).unwrap())
            .collect()
    }

    pub fn with_message(&self, message: &str) -> Vec<Value> {
        self.records()
            .into_iter()
            .filter(|r| r["message"] == message)
            .collect()
    }

    pub fn boxed(&self) -> Box<dyn LogSink> {
        Box::new(self.clone())
    }
}

impl LogSink for MemorySink {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&mut self, line: &[u8]) -> Result<()> {
        self.lines.lock().unwrap().push(line.to_vec());
        Ok(())
    }
}

/// Fails every write.
pub struct FailingSink;

impl LogSink for FailingSink {
    fn name(&self) -> &str {
        "failing"
    }

    fn write(&mut self, _line: &[u8]) -> Result<()> {
        Err(LumenError::SinkWrite {
            sink: "failing".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only destination"),
        })
    }
}
