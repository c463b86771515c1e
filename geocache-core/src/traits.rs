//! Common traits for geocache.
//!
//! These traits are the seams between the eviction core and the
//! collaborators it does not own: the key-value store holding cached values
//! and the upstream geocoding provider.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::ProviderResponse;

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE STORE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Key-value store holding cached values, partitioned into named caches.
///
/// Implementations are expected to be in-process and fast; every method is
/// synchronous and may be called concurrently from many request tasks.
pub trait CacheStore<V>: Send + Sync {
    /// Returns the cached value for `key`, if present.
    fn get(&self, cache: &str, key: &str) -> Result<Option<V>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&self, cache: &str, key: &str, value: V) -> Result<()>;

    /// Removes `key` from the cache.
    ///
    /// Returns `Ok(true)` if an entry was removed and `Ok(false)` if the key
    /// was already absent. Absence is not an error; `Err` is reserved for a
    /// genuine store fault.
    fn evict(&self, cache: &str, key: &str) -> Result<bool>;

    /// Returns true if the named cache is provisioned in this store.
    fn exists(&self, cache: &str) -> bool;
}

// ═══════════════════════════════════════════════════════════════════════════════
// GEOCODING PROVIDER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for the upstream geocoding service.
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Looks up places matching a free-form address.
    async fn geocode(&self, address: &str) -> Result<ProviderResponse>;

    /// Looks up places at the given coordinates.
    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<ProviderResponse>;
}
