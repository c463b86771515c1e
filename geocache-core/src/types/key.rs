//! Cache key types.
//!
//! Keys are plain strings as far as the cache store is concerned; these
//! wrappers exist so every caller derives them the same way.

use std::fmt;

use crate::constants::{COORDINATE_KEY_DELIMITER, LATITUDE_RANGE, LONGITUDE_RANGE};
use crate::error::{GeocacheError, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// GEOCODING KEY
// ═══════════════════════════════════════════════════════════════════════════════

/// Key for the forward geocoding cache.
///
/// The key is the address trimmed and lowercased, so `"Berlin"` and
/// `" berlin "` share one cache entry. The trimmed, case-preserved address is
/// kept alongside for the provider query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GeocodingKey {
    key: String,
    address: String,
}

impl GeocodingKey {
    /// Builds a key from a raw address. Blank input is rejected.
    pub fn new(address: &str) -> Result<Self> {
        let trimmed = address.trim();
        if trimmed.is_empty() {
            return Err(GeocacheError::InvalidAddress(
                "no address was provided".into(),
            ));
        }

        Ok(Self {
            key: trimmed.to_lowercase(),
            address: trimmed.to_string(),
        })
    }

    /// Returns the normalized key string.
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Returns the address to send to the provider.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns true if this key matches the bypass token, ignoring case.
    pub fn is_bypass(&self, token: &str) -> bool {
        let token = token.trim();
        !token.is_empty() && self.key == token.to_lowercase()
    }
}

impl fmt::Display for GeocodingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl AsRef<str> for GeocodingKey {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COORDINATE KEY
// ═══════════════════════════════════════════════════════════════════════════════

/// Key for the reverse geocoding cache: `"{lat},{lon}"`.
///
/// Coordinates are rendered with the shortest representation that round-trips,
/// so equal values always produce the same key. Negative zero is folded into
/// zero for the same reason.
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateKey {
    key: String,
    latitude: f64,
    longitude: f64,
}

impl CoordinateKey {
    /// Builds a key from a coordinate pair.
    ///
    /// Fails with [`GeocacheError::InvalidKey`] on NaN, infinities, or values
    /// outside the valid latitude/longitude ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let latitude = canonical_component("latitude", latitude, LATITUDE_RANGE)?;
        let longitude = canonical_component("longitude", longitude, LONGITUDE_RANGE)?;

        Ok(Self {
            key: format!("{}{}{}", latitude, COORDINATE_KEY_DELIMITER, longitude),
            latitude,
            longitude,
        })
    }

    /// Returns the composite key string.
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Returns the canonical latitude.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the canonical longitude.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

fn canonical_component(name: &str, value: f64, (min, max): (f64, f64)) -> Result<f64> {
    if !value.is_finite() {
        return Err(GeocacheError::InvalidKey(format!(
            "{} must be a finite number, got {}",
            name, value
        )));
    }
    if value < min || value > max {
        return Err(GeocacheError::InvalidKey(format!(
            "{} {} is outside [{}, {}]",
            name, value, min, max
        )));
    }
    // -0.0 == 0.0, but the two format differently
    Ok(if value == 0.0 { 0.0 } else { value })
}

impl fmt::Display for CoordinateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl AsRef<str> for CoordinateKey {
    fn as_ref(&self) -> &str {
        &self.key
    }
}
