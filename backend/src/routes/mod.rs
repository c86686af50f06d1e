//! Route definitions for the Weather Sync Platform

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create the read API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::read_root))
        .route("/items/:city", get(handlers::read_item))
        .route("/health", get(handlers::health_check))
}
