//! Bagged ensemble of regression trees.
//!
//! Each tree is grown on a bootstrap resample of the training rows and the
//! ensemble predicts the mean of its trees. Trees are grown in parallel with
//! rayon; every tree draws from its own RNG seeded from the forest seed and
//! the tree index, so the fitted forest does not depend on thread scheduling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::matrix::FeatureMatrix;
use super::tree::{RegressionTree, TreeParams};
use super::Regressor;
use crate::error::{ForecastError, ForecastResult};

pub const DEFAULT_N_TREES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub seed: u64,
    pub tree: TreeParams,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_N_TREES,
            seed: 42,
            tree: TreeParams::default(),
        }
    }
}

/// Seed for tree `index`, spread with the SplitMix64 increment.
fn tree_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn bootstrap_sample(n_rows: usize, rng: &mut StdRng) -> Vec<usize> {
    (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<RegressionTree>,
    n_features: usize,
}

impl RandomForest {
    /// Fit the ensemble on every row of `x`.
    pub fn fit(x: &FeatureMatrix, y: &[f64], params: &ForestParams) -> ForecastResult<Self> {
        if params.n_trees == 0 {
            return Err(ForecastError::training("forest needs at least one tree"));
        }
        if x.n_rows() != y.len() {
            return Err(ForecastError::training(format!(
                "feature rows ({}) and targets ({}) differ in length",
                x.n_rows(),
                y.len()
            )));
        }
        if x.is_empty() {
            return Err(ForecastError::training("cannot fit a forest on zero rows"));
        }

        let n_rows = x.n_rows();
        let trees: Vec<RegressionTree> = (0..params.n_trees)
            .into_par_iter()
            .map(|index| {
                let mut rng = StdRng::seed_from_u64(tree_seed(params.seed, index));
                let sample = bootstrap_sample(n_rows, &mut rng);
                RegressionTree::fit(x, y, sample, &params.tree)
            })
            .collect();

        Ok(Self {
            trees,
            n_features: x.n_features(),
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }

    /// Structural check for forests read from disk.
    pub fn check_structure(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.check_structure(self.n_features)
                .map_err(|e| format!("tree {}: {}", i, e))?;
        }
        Ok(())
    }
}

impl Regressor for RandomForest {
    fn predict_row(&self, row: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.predict_row(row)).sum();
        total / self.trees.len() as f64
    }
}
