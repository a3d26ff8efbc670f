//! Parking Forecast HTTP Server Binary
//!
//! Loads the trained model, then serves predictions over HTTP. The process
//! exits with an error before binding if the model cannot be loaded.
//!
//! # Usage
//!
//! ```bash
//! parking-train
//! parking-server
//! curl -X POST localhost:5000/predict \
//!   -H 'content-type: application/json' \
//!   -d '{"day_of_week": 5, "hour": 18, "is_weekend": 1}'
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 5000)
//! - `PARKING_MODEL_PATH`: Model artifact (default: parking_model.bin)
//! - `PARKING_CONFIG`: Configuration file (default: search for `forecast.toml`)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};

use parking_forecast::http::{create_router, AppState};
use parking_forecast::services::PredictorService;
use parking_forecast::telemetry::init_tracing;
use parking_forecast::ForecastConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info,tower_http=debug");

    info!("Starting Parking Forecast HTTP Server");

    let config_path = env::var_os("PARKING_CONFIG").map(PathBuf::from);
    let config =
        ForecastConfig::load(config_path.as_deref()).context("Failed to load configuration")?;

    let predictor = PredictorService::load(&config.artifact.path)
        .with_context(|| format!("Failed to load model from {}", config.artifact.path.display()))?;
    info!(
        trees = predictor.n_trees(),
        r2 = predictor.metadata().r2,
        trained_at = %predictor.metadata().trained_at,
        "Predictor ready"
    );

    let app = create_router(AppState::new(predictor));

    let bind_address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(bind_address.as_str())
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received CTRL+C signal"),
        _ = terminate => info!("Received SIGTERM signal"),
    }
}
