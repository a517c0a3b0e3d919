//! Health check handler.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub ytdlp: String,
    pub timestamp: String,
}

/// Health check endpoint (liveness probe).
///
/// Reports whether the extraction tool resolves, without failing the
/// probe when it does not: a missing tool degrades requests, it does
/// not make the process unhealthy.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let ytdlp = match state.locator.locate() {
        Ok(_) => "available",
        Err(_) => "missing",
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ytdlp: ytdlp.to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
