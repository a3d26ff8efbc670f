//! Offline training pipeline.
//!
//! Generates the synthetic history, optionally exports it as CSV, fits the
//! forest, prints its held-out accuracy, and writes the model artifact.
//!
//! # Usage
//!
//! ```bash
//! parking-train --days 90 --seed 7 --model parking_model.bin
//! parking-train --config forecast.toml --no-export
//! ```
//!
//! # Environment Variables
//!
//! - `PARKING_CONFIG`: Configuration file (default: search for `forecast.toml`)
//! - `PARKING_MODEL_PATH`: Artifact destination (default: parking_model.bin)
//! - `RUST_LOG`: Log level (default: info)

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use parking_forecast::services::{export_csv, generate_seeded, train_on_dataset};
use parking_forecast::store::{save_model, ModelArtifact};
use parking_forecast::telemetry::init_tracing;
use parking_forecast::ForecastConfig;

/// Train the occupancy forest on synthetic history
#[derive(Parser, Debug)]
#[command(name = "parking-train", version, about)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', env = "PARKING_CONFIG")]
    config: Option<PathBuf>,

    /// Days of history to generate
    #[arg(long)]
    days: Option<u32>,

    /// Seed for the synthetic history
    #[arg(long)]
    seed: Option<u64>,

    /// Seed for the train/test split and bootstrap draws
    #[arg(long)]
    split_seed: Option<u64>,

    /// Number of trees in the forest
    #[arg(long)]
    trees: Option<usize>,

    /// Where to write the model artifact
    #[arg(long, short = 'o')]
    model: Option<PathBuf>,

    /// Where to write the generated CSV
    #[arg(long, conflicts_with = "no_export")]
    export: Option<PathBuf>,

    /// Skip the CSV export
    #[arg(long, default_value = "false")]
    no_export: bool,

    /// Also write the training report as JSON
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut ForecastConfig) {
        if let Some(days) = self.days {
            config.generator.days = days;
        }
        if let Some(seed) = self.seed {
            config.generator.seed = seed;
        }
        if let Some(seed) = self.split_seed {
            config.training.seed = seed;
        }
        if let Some(trees) = self.trees {
            config.training.n_trees = trees;
        }
        if let Some(model) = &self.model {
            config.artifact.path = model.clone();
        }
        if let Some(export) = &self.export {
            config.generator.export_path = export.clone();
        }
    }
}

fn main() -> Result<()> {
    init_tracing("info");
    let args = Args::parse();

    let mut config =
        ForecastConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    let generator = config.generator.generator_config();
    info!(
        days = generator.days,
        hours = ?(generator.hour_start..=generator.hour_end),
        seed = config.generator.seed,
        "Generating synthetic history"
    );
    let dataset = generate_seeded(&generator, config.generator.seed);

    if !args.no_export {
        export_csv(&dataset, &config.generator.export_path).with_context(|| {
            format!("Failed to export data to {}", config.generator.export_path.display())
        })?;
    }

    let outcome = train_on_dataset(&dataset, &config.training).context("Training failed")?;
    println!("Model Accuracy: {:.2}%", outcome.report.r2 * 100.0);

    let report = outcome.report.clone();
    let artifact = ModelArtifact::from_training(outcome, &config.training);
    save_model(&artifact, &config.artifact.path)
        .with_context(|| format!("Failed to save model to {}", config.artifact.path.display()))?;

    // Written only once the model is in place.
    if let Some(report_path) = &args.report {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(report_path, json)
            .with_context(|| format!("Failed to write report to {}", report_path.display()))?;
    }

    info!(path = %config.artifact.path.display(), "Training complete");
    Ok(())
}
