//! Regression algorithms used by the trainer.
//!
//! # Components
//!
//! - [`matrix`]: Dense row-major feature storage
//! - [`tree`]: CART regression tree
//! - [`forest`]: Bootstrap-aggregated tree ensemble
//! - [`metrics`]: R², MAE and RMSE
//! - [`split`]: Seeded train/test partitioning

pub mod forest;
pub mod matrix;
pub mod metrics;
pub mod split;
pub mod tree;

pub use forest::{ForestParams, RandomForest, DEFAULT_N_TREES};
pub use matrix::FeatureMatrix;
pub use metrics::{mae, r_squared, rmse};
pub use split::{train_test_split, TrainTestSplit};
pub use tree::{RegressionTree, TreeParams};

/// Anything that maps a feature row to a scalar.
pub trait Regressor {
    fn predict_row(&self, row: &[f64]) -> f64;

    fn predict(&self, x: &FeatureMatrix) -> Vec<f64> {
        x.rows().map(|row| self.predict_row(row)).collect()
    }
}
