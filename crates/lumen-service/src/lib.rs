//! Lumen service library entry.
//!
//! This crate wires the request logger, the instrumentation layer and the
//! HTTP endpoints into a runnable service. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod instrument;
pub mod logging;
pub mod obs;
pub mod ops;
pub mod router;
