use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use super::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: chrono::DateTime<chrono::Utc>,
    checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// Number of entries in the built-in or configured crop table
    crop_catalog_entries: usize,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let crops = state.engine.catalog().len();
    let status = if crops > 0 { "healthy" } else { "degraded" };

    tracing::debug!(status, crops, "health check completed");

    (
        StatusCode::OK,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            timestamp: chrono::Utc::now(),
            checks: HealthChecks {
                crop_catalog_entries: crops,
            },
        }),
    )
}
