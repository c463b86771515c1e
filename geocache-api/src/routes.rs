//! API route configuration.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::welcome))
        // Health check
        .route("/health", get(handlers::health_check))

        // Lookups
        .route("/geocoding", get(handlers::geocoding))
        .route("/reverse-geocoding", get(handlers::reverse_geocoding))

        // Maintenance
        .route("/cache/sweep", post(handlers::sweep_caches))

        .with_state(state)
}
