//! Historical occupancy observations and the dataset that groups them.

use serde::{Deserialize, Serialize};

use super::features::FeatureVector;

pub const MIN_OCCUPANCY: f64 = 0.0;
pub const MAX_OCCUPANCY: f64 = 100.0;

/// Clamp a raw occupancy value into `[0, 100]`.
pub fn clamp_occupancy(value: f64) -> f64 {
    value.clamp(MIN_OCCUPANCY, MAX_OCCUPANCY)
}

/// One labeled sample. Field names map to the exported CSV columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(rename = "Day_of_Week")]
    pub day_of_week: u8,
    #[serde(rename = "Hour")]
    pub hour: u8,
    #[serde(rename = "Is_Weekend")]
    pub is_weekend: u8,
    #[serde(rename = "Occupancy")]
    pub occupancy: f64,
}

impl Observation {
    /// Build an observation; the weekend flag follows the day and the
    /// occupancy is clamped.
    pub fn new(day_of_week: u8, hour: u8, occupancy: f64) -> Self {
        let features = FeatureVector::for_slot(day_of_week, hour);
        Self {
            day_of_week: features.day_of_week,
            hour: features.hour,
            is_weekend: features.is_weekend,
            occupancy: clamp_occupancy(occupancy),
        }
    }

    pub fn features(&self) -> FeatureVector {
        FeatureVector {
            day_of_week: self.day_of_week,
            hour: self.hour,
            is_weekend: self.is_weekend,
        }
    }
}

/// Ordered, immutable collection of observations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }
}

impl FromIterator<Observation> for Dataset {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_clamps_occupancy() {
        assert_eq!(Observation::new(0, 18, 120.0).occupancy, 100.0);
        assert_eq!(Observation::new(0, 3, -4.0).occupancy, 0.0);
        assert_eq!(Observation::new(0, 9, 55.0).occupancy, 55.0);
    }

    #[test]
    fn test_observation_weekend_follows_day() {
        assert_eq!(Observation::new(5, 12, 60.0).is_weekend, 1);
        assert_eq!(Observation::new(2, 12, 60.0).is_weekend, 0);
    }

    #[test]
    fn test_dataset_preserves_order() {
        let ds: Dataset = (0..7u8).map(|d| Observation::new(d, 10, 50.0)).collect();
        assert_eq!(ds.len(), 7);
        let days: Vec<u8> = ds.iter().map(|o| o.day_of_week).collect();
        assert_eq!(days, vec![0, 1, 2, 3, 4, 5, 6]);
        assert!(!ds.is_empty());
        assert!(Dataset::default().is_empty());
    }
}
