//! CART regression tree.
//!
//! Splits minimize the summed squared error of the two children. Candidate
//! thresholds are midpoints between consecutive distinct feature values and
//! every feature is considered at every node. Nodes live in a flat arena;
//! children are always appended after their parent, so node `0` is the root
//! and child indices strictly increase along any path.

use serde::{Deserialize, Serialize};

use super::matrix::FeatureMatrix;
use super::Regressor;

/// Minimum reduction in squared error for a split to be kept.
const MIN_IMPROVEMENT: f64 = 1e-12;

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeParams {
    /// Maximum depth; `None` grows until leaves are pure or too small.
    pub max_depth: Option<usize>,
    /// Minimum rows required to attempt a split.
    pub min_samples_split: usize,
    /// Minimum rows on each side of a split.
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Leaf {
        value: f64,
        samples: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
    n_features: usize,
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    cost: f64,
}

impl RegressionTree {
    /// Grow a tree on the rows named by `samples` (duplicates allowed, which
    /// is how bootstrap resamples are expressed).
    ///
    /// `samples` must be non-empty and every index must be a valid row of `x`
    /// and `y`.
    pub fn fit(x: &FeatureMatrix, y: &[f64], samples: Vec<usize>, params: &TreeParams) -> Self {
        debug_assert!(!samples.is_empty(), "tree needs at least one sample");
        let mut tree = Self {
            nodes: Vec::new(),
            n_features: x.n_features(),
        };
        tree.grow(x, y, samples, 0, params);
        tree
    }

    fn grow(
        &mut self,
        x: &FeatureMatrix,
        y: &[f64],
        samples: Vec<usize>,
        depth: usize,
        params: &TreeParams,
    ) -> usize {
        let n = samples.len();
        let (sum, sum_sq) = samples
            .iter()
            .fold((0.0, 0.0), |(s, sq), &i| (s + y[i], sq + y[i] * y[i]));
        let node_id = self.nodes.len();
        self.nodes.push(Node::Leaf {
            value: sum / n as f64,
            samples: n,
        });

        let parent_sse = sum_sq - sum * sum / n as f64;
        let depth_reached = params.max_depth.is_some_and(|max| depth >= max);
        if n < params.min_samples_split.max(2) || depth_reached || parent_sse <= MIN_IMPROVEMENT {
            return node_id;
        }

        let Some(split) = self.best_split(x, y, &samples, parent_sse, params) else {
            return node_id;
        };

        let (left_samples, right_samples): (Vec<usize>, Vec<usize>) = samples
            .into_iter()
            .partition(|&i| x.get(i, split.feature) <= split.threshold);

        let left = self.grow(x, y, left_samples, depth + 1, params);
        let right = self.grow(x, y, right_samples, depth + 1, params);
        self.nodes[node_id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        node_id
    }

    fn best_split(
        &self,
        x: &FeatureMatrix,
        y: &[f64],
        samples: &[usize],
        parent_sse: f64,
        params: &TreeParams,
    ) -> Option<SplitCandidate> {
        let n = samples.len();
        let min_leaf = params.min_samples_leaf.max(1);
        let total_sum: f64 = samples.iter().map(|&i| y[i]).sum();
        let total_sq: f64 = samples.iter().map(|&i| y[i] * y[i]).sum();

        let mut best: Option<SplitCandidate> = None;
        let mut order = samples.to_vec();

        for feature in 0..self.n_features {
            order.sort_by(|&a, &b| x.get(a, feature).total_cmp(&x.get(b, feature)));

            let mut left_sum = 0.0;
            let mut left_sq = 0.0;
            for k in 0..n - 1 {
                let i = order[k];
                left_sum += y[i];
                left_sq += y[i] * y[i];

                let current = x.get(i, feature);
                let next = x.get(order[k + 1], feature);
                if current == next {
                    continue;
                }
                let n_left = k + 1;
                let n_right = n - n_left;
                if n_left < min_leaf || n_right < min_leaf {
                    continue;
                }

                let right_sum = total_sum - left_sum;
                let right_sq = total_sq - left_sq;
                let cost = (left_sq - left_sum * left_sum / n_left as f64)
                    + (right_sq - right_sum * right_sum / n_right as f64);

                if best.map_or(true, |b| cost < b.cost) {
                    best = Some(SplitCandidate {
                        feature,
                        threshold: current + (next - current) / 2.0,
                        cost,
                    });
                }
            }
        }

        best.filter(|b| parent_sse - b.cost > MIN_IMPROVEMENT)
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Longest root-to-leaf path, counted in edges.
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], id: usize) -> usize {
            match nodes[id] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, left).max(walk(nodes, right)),
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }

    /// Structural check used when a tree comes from an untrusted source.
    pub fn check_structure(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        if self.n_features != n_features {
            return Err(format!(
                "tree expects {} features, model declares {}",
                self.n_features, n_features
            ));
        }
        for (id, node) in self.nodes.iter().enumerate() {
            match *node {
                Node::Leaf { value, .. } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {} holds a non-finite value", id));
                    }
                }
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(format!("node {} splits on unknown feature {}", id, feature));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {} has a non-finite threshold", id));
                    }
                    let in_bounds = |child: usize| child > id && child < self.nodes.len();
                    if !in_bounds(left) || !in_bounds(right) {
                        return Err(format!("node {} has dangling children", id));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Regressor for RegressionTree {
    fn predict_row(&self, row: &[f64]) -> f64 {
        let mut id = 0;
        loop {
            match self.nodes[id] {
                Node::Leaf { value, .. } => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if row[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tree_tests;
