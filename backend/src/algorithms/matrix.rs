//! Dense row-major feature matrix.

use serde::{Deserialize, Serialize};

/// Row-major matrix of `f64` features with a fixed column count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    data: Vec<f64>,
    n_features: usize,
}

impl FeatureMatrix {
    /// Empty matrix with the given column count.
    pub fn with_features(n_features: usize) -> Self {
        Self {
            data: Vec::new(),
            n_features,
        }
    }

    /// Build from fixed-size rows.
    pub fn from_rows<const N: usize>(rows: &[[f64; N]]) -> Self {
        let mut data = Vec::with_capacity(rows.len() * N);
        for row in rows {
            data.extend_from_slice(row);
        }
        Self {
            data,
            n_features: N,
        }
    }

    /// Append one row. Panics if the row width does not match.
    pub fn push_row(&mut self, row: &[f64]) {
        assert_eq!(row.len(), self.n_features, "row width mismatch");
        self.data.extend_from_slice(row);
    }

    pub fn n_rows(&self) -> usize {
        if self.n_features == 0 {
            0
        } else {
            self.data.len() / self.n_features
        }
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.n_features;
        &self.data[start..start + self.n_features]
    }

    #[inline]
    pub fn get(&self, row: usize, feature: usize) -> f64 {
        self.data[row * self.n_features + feature]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.n_features.max(1))
    }

    /// New matrix holding the selected rows, in the given order.
    pub fn select(&self, indices: &[usize]) -> Self {
        let mut out = Self::with_features(self.n_features);
        out.data.reserve(indices.len() * self.n_features);
        for &i in indices {
            out.data.extend_from_slice(self.row(i));
        }
        out
    }

    /// Number of distinct rows (bitwise comparison of values).
    pub fn distinct_rows(&self) -> usize {
        let mut seen = std::collections::HashSet::new();
        for row in self.rows() {
            let key: Vec<u64> = row.iter().map(|v| v.to_bits()).collect();
            seen.insert(key);
        }
        seen.len()
    }
}
