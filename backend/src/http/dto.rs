//! Data Transfer Objects for the HTTP API.
//!
//! The prediction request and response bodies are the model types themselves.

use serde::{Deserialize, Serialize};

pub use crate::models::{OccupancyStatus, PredictionRequest, PredictionResponse};
use crate::services::ServiceState;
use crate::store::ModelMetadata;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub state: ServiceState,
    pub model_loaded: bool,
    pub trees: usize,
}

/// Provenance of the served model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfoResponse {
    #[serde(flatten)]
    pub metadata: ModelMetadata,
}
