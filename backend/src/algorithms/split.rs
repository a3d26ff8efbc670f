//! Seeded train/test partitioning.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, ForecastResult};

/// Row indices of the two partitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n_rows` with a seeded RNG and hold out
/// `ceil(n_rows * test_ratio)` rows for testing.
pub fn train_test_split(
    n_rows: usize,
    test_ratio: f64,
    seed: u64,
) -> ForecastResult<TrainTestSplit> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(ForecastError::training(format!(
            "test ratio must be in (0, 1), got {}",
            test_ratio
        )));
    }
    let n_test = (n_rows as f64 * test_ratio).ceil() as usize;
    if n_test == 0 || n_test >= n_rows {
        return Err(ForecastError::training(format!(
            "{} rows cannot be split with test ratio {}",
            n_rows, test_ratio
        )));
    }

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok(TrainTestSplit {
        train,
        test: indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes_follow_ratio() {
        let split = train_test_split(1620, 0.2, 42).unwrap();
        assert_eq!(split.test.len(), 324);
        assert_eq!(split.train.len(), 1296);

        // ceil rounds the test side up
        let split = train_test_split(11, 0.2, 42).unwrap();
        assert_eq!(split.test.len(), 3);
        assert_eq!(split.train.len(), 8);
    }

    #[test]
    fn test_partitions_are_disjoint_and_complete() {
        let split = train_test_split(100, 0.25, 3).unwrap();
        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_seed_is_reproducible() {
        assert_eq!(
            train_test_split(50, 0.2, 42).unwrap(),
            train_test_split(50, 0.2, 42).unwrap()
        );
        assert_ne!(
            train_test_split(50, 0.2, 42).unwrap(),
            train_test_split(50, 0.2, 43).unwrap()
        );
    }

    #[test]
    fn test_rejects_bad_ratio() {
        assert!(train_test_split(10, 0.0, 1).is_err());
        assert!(train_test_split(10, 1.0, 1).is_err());
        assert!(train_test_split(10, f64::NAN, 1).is_err());
    }

    #[test]
    fn test_rejects_too_few_rows() {
        let err = train_test_split(1, 0.2, 1).unwrap_err();
        assert_eq!(err.kind(), "TRAINING_ERROR");
        assert!(train_test_split(0, 0.2, 1).is_err());
        assert!(train_test_split(2, 0.2, 1).is_ok());
    }
}
