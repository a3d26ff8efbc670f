//! Pipeline stages: synthesize history, extract features, train, serve.
//!
//! Each stage is a plain function or value over the types in [`crate::models`];
//! the binaries and the HTTP layer wire them together.

pub mod extractor;
pub mod generator;
pub mod predictor;
pub mod trainer;

pub use extractor::extract;
pub use generator::{export_csv, generate, generate_seeded, GeneratorConfig};
pub use predictor::{PredictorService, ServiceState};
pub use trainer::{train, train_on_dataset, TrainingConfig, TrainingOutcome, TrainingReport};
