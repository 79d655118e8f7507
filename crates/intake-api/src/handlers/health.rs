//! Liveness and readiness probes.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use utoipa::ToSchema;

const READINESS_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize, ToSchema)]
pub struct LivenessResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub store: String,
}

/// Liveness probe - process is running. Never touches the store.
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses((status = 200, description = "Process is alive", body = LivenessResponse))
)]
pub async fn liveness_check() -> Json<LivenessResponse> {
    Json(LivenessResponse { ok: true })
}

/// Readiness probe - import store answers a non-mutating ping.
#[utoipa::path(
    get,
    path = "/readyz",
    tag = "health",
    responses(
        (status = 200, description = "Store reachable", body = ReadinessResponse),
        (status = 503, description = "Store unreachable", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = match tokio::time::timeout(READINESS_TIMEOUT, state.ledger.ping()).await {
        Ok(Ok(())) => "ready".to_string(),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Import store readiness check failed");
            "not_ready".to_string()
        }
        Err(_) => {
            tracing::error!("Import store readiness check timed out");
            "timeout".to_string()
        }
    };

    let (status_code, status) = if store == "ready" {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    (
        status_code,
        Json(ReadinessResponse {
            status: status.to_string(),
            store,
        }),
    )
}
