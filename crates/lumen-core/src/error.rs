//! Shared error type across Lumen crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, LumenError>;

/// Unified error type used by core and service.
#[derive(Debug, Error)]
pub enum LumenError {
    #[error("metric family already registered: {0}")]
    DuplicateName(String),
    #[error("unknown metric family: {0}")]
    UnknownFamily(String),
    #[error("label arity mismatch for {family}: expected {expected} values, got {got}")]
    LabelArity {
        family: String,
        expected: usize,
        got: usize,
    },
    #[error("counter overflow in {0}")]
    CounterOverflow(String),
    #[error("invalid name: {0}")]
    InvalidName(String),
    #[error("sink {sink} write failed: {source}")]
    SinkWrite {
        sink: String,
        #[source]
        source: std::io::Error,
    },
    #[error("config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl LumenError {
    /// Stable code used in logs and tests.
    pub fn code(&self) -> &'static str {
        match self {
            LumenError::DuplicateName(_) => "DUPLICATE_NAME",
            LumenError::UnknownFamily(_) => "UNKNOWN_FAMILY",
            LumenError::LabelArity { .. } => "LABEL_ARITY",
            LumenError::CounterOverflow(_) => "COUNTER_OVERFLOW",
            LumenError::InvalidName(_) => "INVALID_NAME",
            LumenError::SinkWrite { .. } => "SINK_WRITE",
            LumenError::Config(_) => "CONFIG",
            LumenError::Internal(_) => "INTERNAL",
        }
    }
}
