use axum::{extract::State, Json};
use serde::Serialize;

use crate::models::{CampaignAttributes, PerformanceReport, PredictionMode};

use super::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub ml_available: bool,
    pub mode: PredictionMode,
}

/// Health check endpoint; reports which prediction path is serving.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let mode = state.prediction.ensure_loaded().await;
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        ml_available: mode == PredictionMode::Live,
        mode,
    })
}

/// Predicts campaign performance and returns ranked recommendations.
///
/// Never fails: unknown categorical values degrade to defaults, out-of-range
/// numerics are clamped, and a missing model falls back to the analytic
/// estimator with the `mode` flag set accordingly.
pub async fn predict_performance(
    State(state): State<AppState>,
    Json(attrs): Json<CampaignAttributes>,
) -> Json<PerformanceReport> {
    Json(state.prediction.predict_and_recommend(&attrs).await)
}
