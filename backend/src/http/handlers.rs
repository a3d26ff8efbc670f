//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! predictor service.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::dto::{HealthResponse, ModelInfoResponse, PredictionRequest, PredictionResponse};
use super::error::AppError;
use super::state::AppState;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        state: state.predictor.state(),
        model_loaded: true,
        trees: state.predictor.n_trees(),
    })
}

/// GET /model
pub async fn model_info(State(state): State<AppState>) -> Json<ModelInfoResponse> {
    Json(ModelInfoResponse {
        metadata: state.predictor.metadata().clone(),
    })
}

/// POST /predict
///
/// Scores one `(day_of_week, hour, is_weekend)` slot. A forest of a hundred
/// shallow trees evaluates in microseconds, so this runs on the async worker.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> HandlerResult<PredictionResponse> {
    let Json(request) = payload?;
    let response = state.predictor.predict(&request)?;
    Ok(Json(response))
}
