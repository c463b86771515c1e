//! API route handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::{debug, info, warn};

use geocache_core::constants::{GEOCODING_CACHE, REVERSE_GEOCODING_CACHE};
use geocache_core::types::Location;

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /
pub async fn welcome() -> &'static str {
    "Welcome to the Geo Coding API."
}

/// GET /geocoding?address=
pub async fn geocoding(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GeocodingQuery>,
) -> Result<Json<Location>> {
    debug!(address = %params.address, "Geocoding request");
    let location = state.service.get_geocoding(&params.address).await?;
    Ok(Json(location))
}

/// GET /reverse-geocoding?latitude=&longitude=
pub async fn reverse_geocoding(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReverseGeocodingQuery>,
) -> Result<String> {
    debug!(
        latitude = params.latitude,
        longitude = params.longitude,
        "Reverse geocoding request"
    );
    let address = state
        .service
        .get_reverse_geocoding(params.latitude, params.longitude)
        .await?;
    Ok(address.address)
}

/// POST /cache/sweep
pub async fn sweep_caches(State(state): State<Arc<AppState>>) -> Json<SweepResponse> {
    let report = state.service.sweep_all();

    for (cache, result) in [
        (GEOCODING_CACHE, &report.geocoding),
        (REVERSE_GEOCODING_CACHE, &report.reverse_geocoding),
    ] {
        match result {
            Ok(outcome) => info!(cache, removed = outcome.removed(), "Manual sweep complete"),
            Err(e) => warn!(cache, error = %e, "Manual sweep failed"),
        }
    }

    Json(SweepResponse {
        geocoding: report.geocoding.into(),
        reverse_geocoding: report.reverse_geocoding.into(),
    })
}

static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let start = START_TIME.get_or_init(Instant::now);
    let uptime = start.elapsed().as_secs();

    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: uptime,
        geocoding_entries: state.service.geocoding_tracker().len(),
        reverse_geocoding_entries: state.service.reverse_geocoding_tracker().len(),
    })
}
