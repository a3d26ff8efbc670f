//! HTTP server module.
//!
//! Exposes the predictor service as a small JSON API:
//!
//! | Method | Path       | Body                                    |
//! |--------|------------|-----------------------------------------|
//! | POST   | `/predict` | `{day_of_week, hour, is_weekend}`       |
//! | GET    | `/health`  |                                         |
//! | GET    | `/model`   |                                         |
//!
//! Errors are returned as `{code, message, details?}` with a 4xx status for
//! bad input and 5xx otherwise.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
