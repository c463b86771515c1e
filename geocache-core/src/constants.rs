//! Constants shared across the geocache workspace.

// ═══════════════════════════════════════════════════════════════════════════════
// LOGICAL CACHE NAMES
// ═══════════════════════════════════════════════════════════════════════════════

/// Cache holding forward geocoding results, keyed by normalized address.
pub const GEOCODING_CACHE: &str = "geocoding";

/// Cache holding reverse geocoding results, keyed by `"{lat},{lon}"`.
pub const REVERSE_GEOCODING_CACHE: &str = "reverse-geocoding";

// ═══════════════════════════════════════════════════════════════════════════════
// EVICTION POLICY DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum number of tracked entries per logical cache.
pub const DEFAULT_MAX_ENTRIES: usize = 10;

/// Time-to-live of a tracked entry, in seconds (5 minutes).
pub const DEFAULT_TTL_SECONDS: u64 = 5 * 60;

/// Address whose results are never written to the cache store.
/// Matched case-insensitively against the geocoding key only.
pub const DEFAULT_BYPASS_TOKEN: &str = "goa";

// ═══════════════════════════════════════════════════════════════════════════════
// KEYS
// ═══════════════════════════════════════════════════════════════════════════════

/// Separator between latitude and longitude in a reverse geocoding key.
pub const COORDINATE_KEY_DELIMITER: &str = ",";

/// Valid latitude range in degrees.
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Valid longitude range in degrees.
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

// ═══════════════════════════════════════════════════════════════════════════════
// PROVIDER URL TEMPLATES
// ═══════════════════════════════════════════════════════════════════════════════
// The forward and reverse templates historically use different names for the
// API key placeholder; both are kept so existing configuration keeps working.

/// API key placeholder in the forward geocoding URL template.
pub const ACCESS_KEY_PLACEHOLDER: &str = "ACCESS_KEY_PLACEHOLDER";

/// Address placeholder in the forward geocoding URL template.
pub const ADDRESS_PLACEHOLDER: &str = "ADDRESS";

/// API key placeholder in the reverse geocoding URL template.
pub const API_KEY_PLACEHOLDER: &str = "API_KEY_PLACEHOLDER";

/// Latitude placeholder in the reverse geocoding URL template.
pub const LATITUDE_PLACEHOLDER: &str = "LATITUDE";

/// Longitude placeholder in the reverse geocoding URL template.
pub const LONGITUDE_PLACEHOLDER: &str = "LONGITUDE";

/// Default provider request timeout in seconds.
pub const DEFAULT_PROVIDER_TIMEOUT_SECONDS: u64 = 30;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_names_are_distinct() {
        assert_ne!(GEOCODING_CACHE, REVERSE_GEOCODING_CACHE);
    }

    #[test]
    fn test_policy_defaults() {
        assert_eq!(DEFAULT_MAX_ENTRIES, 10);
        assert_eq!(DEFAULT_TTL_SECONDS, 300);
    }
}
