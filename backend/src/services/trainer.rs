//! Fit the occupancy forest and score it on a held-out split.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::extractor;
use crate::algorithms::{
    mae, r_squared, rmse, train_test_split, FeatureMatrix, ForestParams, RandomForest, Regressor,
    TreeParams, DEFAULT_N_TREES,
};
use crate::error::{ErrorContext, ForecastError, ForecastResult};
use crate::models::Dataset;

/// Trainer settings. One seed drives both the split and the bootstrap draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Fraction of rows held out for scoring.
    pub test_ratio: f64,
    pub seed: u64,
    pub n_trees: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_ratio: 0.2,
            seed: 42,
            n_trees: DEFAULT_N_TREES,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> ForecastResult<()> {
        let ctx = |field: &str| ErrorContext::new("train").with_field(field);
        if !(self.test_ratio > 0.0 && self.test_ratio < 1.0) {
            return Err(ForecastError::configuration_with_context(
                format!("test_ratio must be in (0, 1), got {}", self.test_ratio),
                ctx("test_ratio"),
            ));
        }
        if self.n_trees == 0 {
            return Err(ForecastError::configuration_with_context(
                "n_trees must be positive",
                ctx("n_trees"),
            ));
        }
        if self.min_samples_leaf == 0 {
            return Err(ForecastError::configuration_with_context(
                "min_samples_leaf must be positive",
                ctx("min_samples_leaf"),
            ));
        }
        Ok(())
    }

    pub fn forest_params(&self) -> ForestParams {
        ForestParams {
            n_trees: self.n_trees,
            seed: self.seed,
            tree: TreeParams {
                max_depth: self.max_depth,
                min_samples_split: self.min_samples_split,
                min_samples_leaf: self.min_samples_leaf,
            },
        }
    }
}

/// Held-out scores and sizes of a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Coefficient of determination on the test split; may be negative.
    pub r2: f64,
    pub mae: f64,
    pub rmse: f64,
    pub train_rows: usize,
    pub test_rows: usize,
    pub elapsed: Duration,
}

/// Fitted model plus its evaluation.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub model: RandomForest,
    pub report: TrainingReport,
}

/// Split, fit and evaluate.
pub fn train(
    x: &FeatureMatrix,
    y: &[f64],
    config: &TrainingConfig,
) -> ForecastResult<TrainingOutcome> {
    if x.n_rows() != y.len() {
        return Err(ForecastError::training(format!(
            "feature rows ({}) and targets ({}) differ in length",
            x.n_rows(),
            y.len()
        )));
    }
    let distinct = x.distinct_rows();
    if distinct < 2 {
        return Err(ForecastError::training(format!(
            "need at least 2 distinct feature rows, got {}",
            distinct
        )));
    }

    let started = Instant::now();
    let split = train_test_split(x.n_rows(), config.test_ratio, config.seed)?;
    let x_train = x.select(&split.train);
    let y_train: Vec<f64> = split.train.iter().map(|&i| y[i]).collect();
    let x_test = x.select(&split.test);
    let y_test: Vec<f64> = split.test.iter().map(|&i| y[i]).collect();

    let model = RandomForest::fit(&x_train, &y_train, &config.forest_params())?;
    let predicted = model.predict(&x_test);

    let report = TrainingReport {
        r2: r_squared(&y_test, &predicted),
        mae: mae(&y_test, &predicted),
        rmse: rmse(&y_test, &predicted),
        train_rows: split.train.len(),
        test_rows: split.test.len(),
        elapsed: started.elapsed(),
    };

    info!(
        trees = model.n_trees(),
        train_rows = report.train_rows,
        test_rows = report.test_rows,
        r2 = report.r2,
        mae = report.mae,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "Trained occupancy forest"
    );

    Ok(TrainingOutcome { model, report })
}

/// Extract features from the dataset, then [`train`].
pub fn train_on_dataset(
    dataset: &Dataset,
    config: &TrainingConfig,
) -> ForecastResult<TrainingOutcome> {
    let (x, y) = extractor::extract(dataset)?;
    train(&x, &y, config)
}

#[cfg(test)]
#[path = "trainer_tests.rs"]
mod trainer_tests;
