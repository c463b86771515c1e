//! DTOs for API requests and responses.

use serde::{Deserialize, Serialize};

use geocache_cache::SweepOutcome;
use geocache_core::error::Result;

/// Query parameters for forward geocoding.
#[derive(Debug, Deserialize)]
pub struct GeocodingQuery {
    /// Free-form address
    pub address: String,
}

/// Query parameters for reverse geocoding.
#[derive(Debug, Deserialize)]
pub struct ReverseGeocodingQuery {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status
    pub status: String,
    /// Version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Keys tracked in the geocoding cache
    pub geocoding_entries: usize,
    /// Keys tracked in the reverse geocoding cache
    pub reverse_geocoding_entries: usize,
}

/// Result of sweeping one cache.
#[derive(Debug, Serialize)]
pub struct SweepResultDto {
    /// Whether the sweep completed
    pub ok: bool,
    /// Keys evicted from the store
    pub evicted: Vec<String>,
    /// Ledger entries dropped without a store value
    pub dropped: Vec<String>,
    /// Tracked keys left
    pub remaining: usize,
    /// Failure message, if the sweep aborted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<SweepOutcome>> for SweepResultDto {
    fn from(result: Result<SweepOutcome>) -> Self {
        match result {
            Ok(outcome) => Self {
                ok: true,
                evicted: outcome.evicted,
                dropped: outcome.dropped,
                remaining: outcome.remaining,
                error: None,
            },
            Err(e) => Self {
                ok: false,
                evicted: Vec::new(),
                dropped: Vec::new(),
                remaining: 0,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Response for an explicit sweep.
#[derive(Debug, Serialize)]
pub struct SweepResponse {
    /// Geocoding cache
    pub geocoding: SweepResultDto,
    /// Reverse geocoding cache
    pub reverse_geocoding: SweepResultDto,
}
