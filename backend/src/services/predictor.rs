//! Online prediction over a single loaded model.
//!
//! The model is read from disk once, before the service exists; a
//! [`PredictorService`] value is therefore always `Ready`. It never mutates
//! after construction, so it can be shared across request handlers behind an
//! `Arc` without locking.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::algorithms::Regressor;
use crate::error::ForecastResult;
use crate::models::{PredictionRequest, PredictionResponse};
use crate::store::{load_model, ModelArtifact, ModelMetadata};

/// Service lifecycle.
///
/// `Failed` is terminal. `Predicting` names the per-request step back to
/// `Ready` in the transition table only: [`PredictorService::predict`] takes
/// `&self` and mutates nothing, so a live service never records it and
/// [`PredictorService::state`] stays `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Uninitialized,
    Loading,
    Ready,
    Predicting,
    Failed,
}

impl ServiceState {
    pub fn can_transition_to(self, next: ServiceState) -> bool {
        use ServiceState::*;
        matches!(
            (self, next),
            (Uninitialized, Loading)
                | (Loading, Ready)
                | (Loading, Failed)
                | (Ready, Predicting)
                | (Predicting, Ready)
        )
    }
}

#[derive(Debug)]
pub struct PredictorService {
    artifact: ModelArtifact,
}

impl PredictorService {
    /// Wrap an already verified artifact.
    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        Self { artifact }
    }

    /// Load the model at `path`, logging each lifecycle transition.
    pub fn load(path: impl AsRef<Path>) -> ForecastResult<Self> {
        Self::load_with_observer(path, |from, to| {
            info!(from = ?from, to = ?to, "Predictor state change");
        })
    }

    /// Load the model at `path`, reporting every transition to `observer`.
    pub fn load_with_observer<F>(path: impl AsRef<Path>, mut observer: F) -> ForecastResult<Self>
    where
        F: FnMut(ServiceState, ServiceState),
    {
        let path = path.as_ref();
        let mut state = ServiceState::Uninitialized;
        let mut advance = |next: ServiceState| {
            debug_assert!(state.can_transition_to(next));
            observer(state, next);
            state = next;
        };

        advance(ServiceState::Loading);
        match load_model(path) {
            Ok(artifact) => {
                advance(ServiceState::Ready);
                Ok(Self::from_artifact(artifact))
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Model load failed");
                advance(ServiceState::Failed);
                Err(e)
            }
        }
    }

    /// Always `Ready`: a service only exists once its model is loaded.
    pub fn state(&self) -> ServiceState {
        ServiceState::Ready
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.artifact.metadata
    }

    pub fn n_trees(&self) -> usize {
        self.artifact.model.n_trees()
    }

    /// Validate the request, run the forest and round the score.
    pub fn predict(&self, request: &PredictionRequest) -> ForecastResult<PredictionResponse> {
        let features = request.validate().map_err(|e| {
            warn!(error = %e, "Rejected prediction request");
            e
        })?;
        let raw = self.artifact.model.predict_row(&features.to_row());
        let response = PredictionResponse::from_raw(raw);
        debug!(
            day_of_week = features.day_of_week,
            hour = features.hour,
            is_weekend = features.is_weekend,
            raw,
            score = response.occupancy_score,
            "Prediction served"
        );
        Ok(response)
    }
}

#[cfg(test)]
#[path = "predictor_tests.rs"]
mod predictor_tests;
