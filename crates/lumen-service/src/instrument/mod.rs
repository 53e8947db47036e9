//! Request instrumentation middleware.
//!
//! `InstrumentLayer` wraps any tower service: it logs entry, times the inner
//! call, counts the outcome in `http_requests_total{method,path,status}` and
//! logs completion. Faults from the inner service are observed and passed
//! through unchanged.

mod context;
mod layer;

pub use context::RequestContext;
pub use layer::{InstrumentLayer, Instrumented};

pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";

/// Recorded when the response future is dropped before completion.
pub const CLIENT_CLOSED_REQUEST: u16 = 499;

/// Route label for requests that matched no route.
pub const UNMATCHED_ROUTE: &str = "unmatched";
