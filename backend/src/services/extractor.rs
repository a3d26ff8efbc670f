//! Split a dataset into the feature matrix and the target vector.

use crate::algorithms::FeatureMatrix;
use crate::error::{ErrorContext, ForecastError, ForecastResult};
use crate::models::{Dataset, FeatureVector};

/// Feature rows in `(day_of_week, hour, is_weekend)` order with the matching
/// occupancy targets. Row `i` of both outputs comes from observation `i`.
pub fn extract(dataset: &Dataset) -> ForecastResult<(FeatureMatrix, Vec<f64>)> {
    if dataset.is_empty() {
        return Err(ForecastError::validation_with_context(
            "dataset is empty",
            ErrorContext::new("extract"),
        ));
    }

    let mut features = FeatureMatrix::with_features(FeatureVector::LEN);
    let mut targets = Vec::with_capacity(dataset.len());
    for observation in dataset.iter() {
        features.push_row(&observation.features().to_row());
        targets.push(observation.occupancy);
    }
    Ok((features, targets))
}
