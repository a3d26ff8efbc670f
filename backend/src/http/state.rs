//! Application state for the HTTP server.

use std::sync::Arc;

use crate::services::PredictorService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loaded, read-only predictor
    pub predictor: Arc<PredictorService>,
}

impl AppState {
    pub fn new(predictor: PredictorService) -> Self {
        Self {
            predictor: Arc::new(predictor),
        }
    }
}
