//! HTTP endpoints.
//!
//! - `/health`    : liveness
//! - `/api/data`  : sample payload
//! - `/api/error` : simulated failure (500)
//! - `/metrics`   : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;

use lumen_core::metrics::exposition;
use lumen_core::record::format_timestamp;
use lumen_core::LogRecord;

use crate::app_state::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    state
        .logger()
        .log(LogRecord::info("Health check").with_field("status", "UP"));
    (StatusCode::OK, Json(json!({ "status": "UP" })))
}

pub async fn data(State(state): State<AppState>) -> impl IntoResponse {
    let data = json!({
        "message": "Observability demo",
        "timestamp": format_timestamp(Utc::now()),
    });
    state
        .logger()
        .log(LogRecord::info("Served data").with_field("data", data.clone()));
    (StatusCode::OK, Json(data))
}

pub async fn simulated_error(State(state): State<AppState>) -> impl IntoResponse {
    state.logger().log(
        LogRecord::error("Simulated error").with_field("code", "DEMO_ERROR"),
    );
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Simulated error" })),
    )
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = exposition::render(state.registry());

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, exposition::CONTENT_TYPE)],
        body,
    )
        .into_response()
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" })))
}

/// Generic 500 for handler panics; details stay in the logs.
pub fn panic_response(_err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal Server Error" })),
    )
        .into_response()
}
