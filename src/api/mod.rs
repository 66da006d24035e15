//! HTTP service: health, metrics, web UI and JSON endpoints

pub mod handlers;
pub mod routes;
pub mod ui;

pub use handlers::{ApiError, AppState};
pub use routes::build_router;
