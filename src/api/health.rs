//! Liveness and readiness probes

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// Liveness probe, succeeds whenever the process is up
async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "filmdb",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness probe, checks that the database answers
async fn readyz(State(state): State<AppState>) -> Result<StatusCode, StatusCode> {
    sqlx::query("SELECT 1")
        .fetch_one(state.db.pool())
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "Readiness probe failed");
            StatusCode::SERVICE_UNAVAILABLE
        })?;

    Ok(StatusCode::OK)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
