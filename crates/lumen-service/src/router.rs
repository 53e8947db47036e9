//! Axum router wiring.

use axum::{routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(ops::health))
        .route("/api/data", get(ops::data))
        .route("/api/error", get(ops::simulated_error))
        .route("/metrics", get(ops::metrics))
        .fallback(ops::not_found)
        .with_state(state.clone());
    with_observability(routes, &state)
}

/// Instrument every route, then turn handler panics into a generic 500.
/// Apply once per router; the instrumentation layer ignores requests it has
/// already seen.
pub fn with_observability(router: Router, state: &AppState) -> Router {
    router
        .layer(state.instrument_layer())
        .layer(CatchPanicLayer::custom(ops::panic_response))
}
