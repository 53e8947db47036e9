use std::time::{Duration, Instant};

use axum::extract::MatchedPath;
use axum::http::Request;

use super::UNMATCHED_ROUTE;

/// Per-request state captured on entry and consumed on completion.
#[derive(Debug)]
pub struct RequestContext {
    pub method: String,
    /// Raw request path, logged only.
    pub path: String,
    /// Route template, used as the metric label.
    pub route: String,
    started: Instant,
}

impl RequestContext {
    pub fn from_request<B>(req: &Request<B>) -> Self {
        let route = req
            .extensions()
            .get::<MatchedPath>()
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());
        Self {
            method: req.method().as_str().to_string(),
            path: req.uri().path().to_string(),
            route,
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
