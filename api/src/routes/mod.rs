//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → health check endpoint
//! - `/airquality` → measurement list/latest/statistics/create/update/delete

use crate::routes::{airquality::airquality_routes, health::health_routes};
use crate::state::AppState;
use axum::Router;

pub mod airquality;
pub mod health;

/// Builds the application router for all HTTP endpoints, with `AppState`
/// as its state type.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/health", health_routes())
        .nest("/airquality", airquality_routes())
}
