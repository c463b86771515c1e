//! Values served to callers and the raw provider payload they are mapped from.

use serde::{Deserialize, Serialize};

/// Result of forward geocoding: where an address is.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl Location {
    /// Creates a new location.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Result of reverse geocoding: what is at a coordinate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Human-readable label for the place
    pub address: String,
}

impl Address {
    /// Creates a new address.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

/// Raw response body from the geocoding provider.
///
/// Only the fields geocache reads are modelled; anything else in the payload
/// is ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Matching places, best match first
    #[serde(default)]
    pub data: Vec<ProviderPlace>,
}

impl ProviderResponse {
    /// Returns the best match, if any.
    pub fn first(&self) -> Option<&ProviderPlace> {
        self.data.first()
    }

    /// Returns true if the provider found nothing.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A single place in a provider response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProviderPlace {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Display label (full address)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}
