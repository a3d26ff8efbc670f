//! Request and response types for single-sample predictions.

use serde::{Deserialize, Serialize};

use super::features::{FeatureVector, DAYS_PER_WEEK, HOURS_PER_DAY};
use super::observation::clamp_occupancy;
use crate::error::{ErrorContext, ForecastError, ForecastResult};

/// Scores above this are reported as [`OccupancyStatus::Full`].
pub const FULL_THRESHOLD: f64 = 85.0;

/// Raw prediction request as received on the wire.
///
/// Fields are wide signed integers so out-of-range values reach validation
/// instead of failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub day_of_week: i64,
    pub hour: i64,
    pub is_weekend: i64,
}

impl PredictionRequest {
    pub fn new(day_of_week: i64, hour: i64, is_weekend: i64) -> Self {
        Self {
            day_of_week,
            hour,
            is_weekend,
        }
    }

    /// Check the declared domains and build the feature row.
    pub fn validate(&self) -> ForecastResult<FeatureVector> {
        let max_day = i64::from(DAYS_PER_WEEK) - 1;
        let max_hour = i64::from(HOURS_PER_DAY) - 1;
        let day_of_week = check_range("day_of_week", self.day_of_week, 0, max_day)?;
        let hour = check_range("hour", self.hour, 0, max_hour)?;
        let is_weekend = check_range("is_weekend", self.is_weekend, 0, 1)?;
        Ok(FeatureVector {
            day_of_week,
            hour,
            is_weekend,
        })
    }
}

fn check_range(field: &str, value: i64, min: i64, max: i64) -> ForecastResult<u8> {
    if value < min || value > max {
        return Err(ForecastError::validation_with_context(
            format!("{} must be in [{}, {}], got {}", field, min, max, value),
            ErrorContext::new("predict").with_field(field),
        ));
    }
    // Range checked above, so the narrowing is lossless.
    Ok(value as u8)
}

impl From<FeatureVector> for PredictionRequest {
    fn from(fv: FeatureVector) -> Self {
        Self::new(
            i64::from(fv.day_of_week),
            i64::from(fv.hour),
            i64::from(fv.is_weekend),
        )
    }
}

/// Coarse availability label derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OccupancyStatus {
    Full,
    Available,
}

impl OccupancyStatus {
    pub fn from_score(score: f64) -> Self {
        if score > FULL_THRESHOLD {
            Self::Full
        } else {
            Self::Available
        }
    }
}

/// Round to two decimal places.
pub fn round_score(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Prediction result returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction_text: String,
    pub occupancy_score: f64,
    pub status: OccupancyStatus,
}

impl PredictionResponse {
    /// Build a response from a raw model output: clamp to `[0, 100]`, round
    /// to two decimals and format the summary.
    pub fn from_raw(raw: f64) -> Self {
        let occupancy_score = round_score(clamp_occupancy(raw));
        Self {
            prediction_text: format!("Predicted Occupancy: {:?}%", occupancy_score),
            occupancy_score,
            status: OccupancyStatus::from_score(occupancy_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_domain_edges() {
        let fv = PredictionRequest::new(6, 23, 1).validate().unwrap();
        assert_eq!(
            fv,
            FeatureVector {
                day_of_week: 6,
                hour: 23,
                is_weekend: 1
            }
        );
        let fv = PredictionRequest::new(0, 0, 0).validate().unwrap();
        assert_eq!(fv.to_row(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_validate_rejects_day_out_of_range() {
        let err = PredictionRequest::new(7, 0, 0).validate().unwrap_err();
        assert_eq!(err.kind(), "VALIDATION_ERROR");
        assert_eq!(err.context().and_then(|c| c.field.as_deref()), Some("day_of_week"));
    }

    #[test]
    fn test_validate_rejects_hour_out_of_range() {
        let err = PredictionRequest::new(0, 25, 0).validate().unwrap_err();
        assert!(err.message().contains("hour"));
        assert!(PredictionRequest::new(0, -1, 0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_weekend_flag_out_of_range() {
        let err = PredictionRequest::new(5, 12, 2).validate().unwrap_err();
        assert_eq!(err.context().and_then(|c| c.field.as_deref()), Some("is_weekend"));
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(72.345_6), 72.35);
        assert_eq!(round_score(50.0), 50.0);
        assert_eq!(round_score(33.333_333), 33.33);
    }

    #[test]
    fn test_response_formats_summary() {
        let resp = PredictionResponse::from_raw(72.3456);
        assert_eq!(resp.occupancy_score, 72.35);
        assert_eq!(resp.prediction_text, "Predicted Occupancy: 72.35%");
        assert_eq!(resp.status, OccupancyStatus::Available);
    }

    #[test]
    fn test_whole_scores_keep_a_decimal() {
        let resp = PredictionResponse::from_raw(50.0);
        assert_eq!(resp.prediction_text, "Predicted Occupancy: 50.0%");
        assert_eq!(
            PredictionResponse::from_raw(120.0).prediction_text,
            "Predicted Occupancy: 100.0%"
        );
        assert_eq!(
            PredictionResponse::from_raw(-1.0).prediction_text,
            "Predicted Occupancy: 0.0%"
        );
    }

    #[test]
    fn test_response_is_clamped_and_flags_full() {
        let resp = PredictionResponse::from_raw(104.2);
        assert_eq!(resp.occupancy_score, 100.0);
        assert_eq!(resp.status, OccupancyStatus::Full);
        assert_eq!(PredictionResponse::from_raw(-3.0).occupancy_score, 0.0);
    }

    #[test]
    fn test_status_threshold_is_exclusive() {
        assert_eq!(OccupancyStatus::from_score(85.0), OccupancyStatus::Available);
        assert_eq!(OccupancyStatus::from_score(85.01), OccupancyStatus::Full);
    }
}
