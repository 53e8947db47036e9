//! Lumen service
//!
//! - `GET /health`, `/api/data`, `/api/error`, `/metrics`
//! - Every request logged (console + file) and counted in `http_requests_total`
//! - Exits non-zero only on startup failure (bad config, port in use)

use std::net::SocketAddr;
use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use lumen_core::error::{LumenError, Result};
use lumen_core::LogRecord;
use lumen_service::{app_state, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, code = e.code(), "lumen-service failed to start");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let mut cfg = config::load_optional(config::DEFAULT_CONFIG_PATH)?;
    config::apply_env(&mut cfg, |key| std::env::var(key).ok())?;

    let port = cfg.service.port;
    let listen = SocketAddr::from(([0, 0, 0, 0], port));

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state.clone());

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| LumenError::Internal(format!("bind {listen} failed: {e}")))?;

    tracing::info!(%listen, log_file = %state.cfg().logging.file_path().display(), "lumen-service starting");
    state
        .logger()
        .log(LogRecord::info("Service running").with_field("port", port));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| LumenError::Internal(format!("server failed: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
