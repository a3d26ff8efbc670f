//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Request bodies are three integers; anything larger is refused.
const MAX_BODY_BYTES: usize = 16 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Browser clients are served from arbitrary origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/health", get(handlers::health_check))
        .route("/model", get(handlers::model_info))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::generator::{generate_seeded, GeneratorConfig};
    use crate::services::trainer::{train_on_dataset, TrainingConfig};
    use crate::services::PredictorService;
    use crate::store::ModelArtifact;

    #[test]
    fn test_router_creation() {
        let config = TrainingConfig {
            n_trees: 3,
            ..TrainingConfig::default()
        };
        let dataset = generate_seeded(
            &GeneratorConfig {
                days: 7,
                ..GeneratorConfig::default()
            },
            1,
        );
        let outcome = train_on_dataset(&dataset, &config).unwrap();
        let predictor =
            PredictorService::from_artifact(ModelArtifact::from_training(outcome, &config));
        let _router = create_router(AppState::new(predictor));
    }
}
