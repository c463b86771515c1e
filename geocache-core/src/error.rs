//! Error types for geocache.
//!
//! A single error hierarchy built with `thiserror`, shared by the cache core,
//! the provider client, the orchestrating service and the HTTP layer.

use thiserror::Error;

/// Result type alias using `GeocacheError`.
pub type Result<T> = std::result::Result<T, GeocacheError>;

/// Main error type for all geocache operations.
#[derive(Debug, Error)]
pub enum GeocacheError {
    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Address is missing, blank, or otherwise unusable.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// A cache key could not be built (e.g. non-finite coordinates).
    #[error("Invalid cache key: {0}")]
    InvalidKey(String),

    /// The provider answered but had nothing for the query.
    #[error("No results found: {0}")]
    NoResults(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // CACHE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The cache store failed to evict a key selected by a sweep.
    #[error("Cache eviction failed for '{key}' in cache '{cache}': {reason}")]
    EvictionFailed {
        /// Cache being swept
        cache: String,
        /// Key whose eviction failed
        key: String,
        /// Store error message
        reason: String,
    },

    /// The named cache is not provisioned in the store.
    #[error("Cache not found: {0}")]
    CacheNotFound(String),

    /// Any other cache store fault (get/put).
    #[error("Cache store error: {0}")]
    CacheStoreError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // PROVIDER / NETWORK ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Provider did not answer in time.
    #[error("Connection timeout: {0}")]
    ConnectionTimeout(String),

    /// Provider answered with a non-success status.
    #[error("Geocoding provider returned {status}: {message}")]
    ProviderError {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION / CONFIG / INTERNAL
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal invariant violation (should never happen).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl GeocacheError {
    /// Returns true if this error is recoverable (can retry).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GeocacheError::HttpError(_)
                | GeocacheError::ConnectionTimeout(_)
                | GeocacheError::EvictionFailed { .. }
        )
    }

    /// Returns true if the caller supplied bad input.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            GeocacheError::InvalidAddress(_) | GeocacheError::InvalidKey(_)
        )
    }

    /// Returns true if this error originated in the cache layer.
    pub fn is_cache_error(&self) -> bool {
        matches!(
            self,
            GeocacheError::EvictionFailed { .. }
                | GeocacheError::CacheNotFound(_)
                | GeocacheError::CacheStoreError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeocacheError::EvictionFailed {
            cache: "geocoding".into(),
            key: "berlin".into(),
            reason: "disk full".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("geocoding"));
        assert!(msg.contains("berlin"));
        assert!(msg.contains("disk full"));
    }

    #[test]
    fn test_error_classification() {
        assert!(GeocacheError::HttpError("test".into()).is_recoverable());
        assert!(!GeocacheError::InvalidAddress("".into()).is_recoverable());

        assert!(GeocacheError::InvalidKey("nan".into()).is_validation_error());
        assert!(!GeocacheError::NoResults("x".into()).is_validation_error());

        assert!(GeocacheError::CacheNotFound("x".into()).is_cache_error());
        assert!(!GeocacheError::HttpError("x".into()).is_cache_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("invalid");
        let result: Result<serde_json::Value> = json_result.map_err(GeocacheError::from);
        assert!(matches!(result, Err(GeocacheError::JsonError(_))));
    }
}
