//! # Parking Forecast
//!
//! Synthetic parking-lot history, a bagged regression forest, and an HTTP
//! predictor for hourly occupancy.
//!
//! ## Features
//!
//! - **Generation**: Seeded hourly occupancy with evening and weekend peaks
//! - **Export**: CSV with `Day_of_Week,Hour,Is_Weekend,Occupancy` columns
//! - **Training**: Reproducible 80/20 split, 100-tree forest, R² on the held-out rows
//! - **Artifacts**: Checksummed, versioned model files written atomically
//! - **HTTP API**: `POST /predict` returning a rounded occupancy percentage
//!
//! ## Architecture
//!
//! - [`models`]: Observations, feature vectors, prediction request and response
//! - [`algorithms`]: Feature matrix, regression tree, forest, split and metrics
//! - [`services`]: Generator, extractor, trainer and predictor
//! - [`store`]: Model artifact persistence
//! - [`config`]: `forecast.toml` plus environment overrides
//! - [`http`]: Axum router and handlers
//!
//! ## Example
//!
//! ```no_run
//! use parking_forecast::services::{
//!     generate_seeded, train_on_dataset, GeneratorConfig, TrainingConfig,
//! };
//! use parking_forecast::store::{save_model, ModelArtifact};
//!
//! let dataset = generate_seeded(&GeneratorConfig::default(), 7);
//! let config = TrainingConfig::default();
//! let outcome = train_on_dataset(&dataset, &config)?;
//! println!("Model Accuracy: {:.2}%", outcome.report.r2 * 100.0);
//! save_model(&ModelArtifact::from_training(outcome, &config), "parking_model.bin")?;
//! # Ok::<(), parking_forecast::error::ForecastError>(())
//! ```

// ForecastError carries rich context for debugging
#![allow(clippy::result_large_err)]

pub mod algorithms;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod telemetry;

#[cfg(feature = "http-server")]
pub mod http;

pub use config::ForecastConfig;
pub use error::{ForecastError, ForecastResult};
