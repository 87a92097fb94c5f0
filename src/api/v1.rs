use axum::{
    routing::{get, post},
    Router,
};

use super::{estimate, health, AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/analysis", post(estimate::analyze))
        .route("/energy/estimate", post(estimate::estimate_energy))
        .route("/crops/recommend", post(estimate::recommend_crops))
        .route("/agri/revenue", post(estimate::agri_revenue))
        .route("/scenarios", post(estimate::scenarios))
        .with_state(state)
}
