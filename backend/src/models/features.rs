//! The time-derived feature triple shared by training rows and prediction requests.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Column order used by the trainer and the predictor. Changing it silently
/// invalidates every stored model.
pub const FEATURE_NAMES: [&str; FeatureVector::LEN] = ["day_of_week", "hour", "is_weekend"];

pub const DAYS_PER_WEEK: u8 = 7;
pub const HOURS_PER_DAY: u8 = 24;

/// Saturday and Sunday with the Monday = 0 convention.
pub fn is_weekend_day(day_of_week: u8) -> bool {
    day_of_week == 5 || day_of_week == 6
}

/// Ordered `(day_of_week, hour, is_weekend)` triple.
///
/// `day_of_week` is in `[0, 6]` (Monday = 0), `hour` in `[0, 23]` and
/// `is_weekend` is `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureVector {
    pub day_of_week: u8,
    pub hour: u8,
    pub is_weekend: u8,
}

impl FeatureVector {
    /// Number of features in a row.
    pub const LEN: usize = 3;

    /// Build a feature vector whose weekend flag is derived from the day.
    pub fn for_slot(day_of_week: u8, hour: u8) -> Self {
        Self {
            day_of_week,
            hour,
            is_weekend: is_weekend_day(day_of_week) as u8,
        }
    }

    /// Derive the features from a local timestamp.
    pub fn from_datetime(ts: NaiveDateTime) -> Self {
        let day_of_week = ts.weekday().num_days_from_monday() as u8;
        Self::for_slot(day_of_week, ts.hour() as u8)
    }

    /// Numeric row in training column order.
    pub fn to_row(&self) -> [f64; Self::LEN] {
        [
            f64::from(self.day_of_week),
            f64::from(self.hour),
            f64::from(self.is_weekend),
        ]
    }

    /// Whether every field lies inside its documented domain.
    pub fn in_domain(&self) -> bool {
        self.day_of_week < DAYS_PER_WEEK && self.hour < HOURS_PER_DAY && self.is_weekend <= 1
    }
}

#[cfg(test)]
#[path = "features_tests.rs"]
mod features_tests;
