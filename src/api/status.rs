//! Status Routes
//!
//! Public health check.

use std::sync::OnceLock;
use std::time::Instant;

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

static STARTUP_TIME: OnceLock<Instant> = OnceLock::new();

/// Record the process startup time for uptime reporting.
pub fn init_startup_time() {
    STARTUP_TIME.get_or_init(Instant::now);
}

/// Build status routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_seconds: u64,
}

/// Liveness check.
///
/// GET /health
async fn health() -> Json<HealthResponse> {
    let uptime_seconds = STARTUP_TIME
        .get()
        .map(|t| t.elapsed().as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "ok",
        uptime_seconds,
    })
}
