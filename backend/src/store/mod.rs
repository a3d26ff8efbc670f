//! Durable storage for fitted models.
//!
//! - [`artifact`]: Versioned, checksummed model files
//! - [`checksum`]: SHA-256 helper used for integrity checks

pub mod artifact;
pub mod checksum;

pub use artifact::{load_model, save_model, ModelArtifact, ModelMetadata, FORMAT_VERSION};
pub use checksum::calculate_checksum;
