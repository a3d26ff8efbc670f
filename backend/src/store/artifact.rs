//! On-disk model artifacts.
//!
//! An artifact file is a bincode-encoded envelope:
//!
//! ```text
//! magic "PKFM" | format version | sha-256 of payload | payload
//! ```
//!
//! where the payload is the bincode-encoded [`ModelArtifact`]. Saves go
//! through a sibling temp file and a rename, so readers never observe a
//! partially written artifact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::checksum::calculate_checksum;
use crate::algorithms::RandomForest;
use crate::error::{ErrorContext, ForecastError, ForecastResult};
use crate::models::{FeatureVector, FEATURE_NAMES};
use crate::services::trainer::{TrainingConfig, TrainingOutcome};

pub const MAGIC: [u8; 4] = *b"PKFM";
pub const FORMAT_VERSION: u32 = 1;

/// Provenance stored next to the fitted forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub trained_at: DateTime<Utc>,
    pub seed: u64,
    pub n_trees: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    /// Held-out coefficient of determination.
    pub r2: f64,
    pub feature_names: Vec<String>,
    pub crate_version: String,
}

/// A fitted forest together with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub metadata: ModelMetadata,
    pub model: RandomForest,
}

impl ModelArtifact {
    pub fn from_training(outcome: TrainingOutcome, config: &TrainingConfig) -> Self {
        let metadata = ModelMetadata {
            trained_at: Utc::now(),
            seed: config.seed,
            n_trees: outcome.model.n_trees(),
            train_rows: outcome.report.train_rows,
            test_rows: outcome.report.test_rows,
            r2: outcome.report.r2,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            crate_version: env!("CARGO_PKG_VERSION").to_string(),
        };
        Self {
            metadata,
            model: outcome.model,
        }
    }

    /// Reject artifacts whose forest or feature layout cannot serve requests.
    fn check(&self) -> Result<(), String> {
        if self.model.n_features() != FeatureVector::LEN {
            return Err(format!(
                "model expects {} features, service provides {}",
                self.model.n_features(),
                FeatureVector::LEN
            ));
        }
        if self.metadata.feature_names != FEATURE_NAMES {
            return Err(format!(
                "feature order {:?} does not match {:?}",
                self.metadata.feature_names, FEATURE_NAMES
            ));
        }
        self.model.check_structure()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    magic: [u8; 4],
    format_version: u32,
    checksum: String,
    payload: Vec<u8>,
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn encoding_error(err: bincode::Error, context: ErrorContext) -> ForecastError {
    ForecastError::io(io::Error::new(io::ErrorKind::InvalidData, err.to_string()), context)
}

/// Serialize the artifact to `path`, replacing any existing file.
pub fn save_model(artifact: &ModelArtifact, path: impl AsRef<Path>) -> ForecastResult<()> {
    let path = path.as_ref();
    let ctx = || ErrorContext::new("save_model").with_path(path);

    let payload = bincode::serialize(artifact).map_err(|e| encoding_error(e, ctx()))?;
    let envelope = Envelope {
        magic: MAGIC,
        format_version: FORMAT_VERSION,
        checksum: calculate_checksum(&payload),
        payload,
    };
    let bytes = bincode::serialize(&envelope).map_err(|e| encoding_error(e, ctx()))?;

    let tmp = temp_path(path);
    if let Err(e) = fs::write(&tmp, &bytes) {
        let _ = fs::remove_file(&tmp);
        return Err(ForecastError::io(e, ctx()));
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(ForecastError::io(e, ctx()));
    }

    info!(
        path = %path.display(),
        bytes = bytes.len(),
        trees = artifact.model.n_trees(),
        checksum = %envelope.checksum,
        "Saved model artifact"
    );
    Ok(())
}

/// Read and verify the artifact at `path`.
pub fn load_model(path: impl AsRef<Path>) -> ForecastResult<ModelArtifact> {
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ForecastError::artifact_not_found(path));
        }
        Err(e) => {
            return Err(ForecastError::io(
                e,
                ErrorContext::new("load_model").with_path(path),
            ));
        }
    };

    let envelope: Envelope = bincode::deserialize(&bytes)
        .map_err(|e| ForecastError::artifact_corrupt(format!("unreadable envelope: {}", e), path))?;
    if envelope.magic != MAGIC {
        return Err(ForecastError::artifact_corrupt("not a model artifact", path));
    }
    if envelope.format_version != FORMAT_VERSION {
        return Err(ForecastError::artifact_corrupt(
            format!(
                "unsupported format version {} (expected {})",
                envelope.format_version, FORMAT_VERSION
            ),
            path,
        ));
    }
    let checksum = calculate_checksum(&envelope.payload);
    if checksum != envelope.checksum {
        warn!(
            path = %path.display(),
            expected = %envelope.checksum,
            actual = %checksum,
            "Checksum mismatch"
        );
        return Err(ForecastError::artifact_corrupt("checksum mismatch", path));
    }

    let artifact: ModelArtifact = bincode::deserialize(&envelope.payload)
        .map_err(|e| ForecastError::artifact_corrupt(format!("unreadable model: {}", e), path))?;
    artifact
        .check()
        .map_err(|e| ForecastError::artifact_corrupt(e, path))?;

    info!(
        path = %path.display(),
        trees = artifact.model.n_trees(),
        trained_at = %artifact.metadata.trained_at,
        "Loaded model artifact"
    );
    Ok(artifact)
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod artifact_tests;
