//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a formatting subscriber filtered by `RUST_LOG`.
///
/// `default_directive` applies when `RUST_LOG` is unset or unparsable, e.g.
/// `"info"` or `"parking_forecast=debug,tower_http=info"`. Calling this twice
/// is harmless; the second install is ignored.
pub fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(filter)
        .try_init();
}
