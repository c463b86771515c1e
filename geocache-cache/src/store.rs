//! In-memory cache store with named caches.

use std::collections::HashMap;

use parking_lot::RwLock;

use geocache_core::error::{GeocacheError, Result};
use geocache_core::traits::CacheStore;

/// In-memory [`CacheStore`] partitioned into named caches.
///
/// Caches are provisioned up front; reads and writes against a name that was
/// never provisioned fail with [`GeocacheError::CacheNotFound`].
///
/// Thread-safe. Values carry no expiry of their own: lifetime is decided by
/// the eviction tracker in front of the store.
#[derive(Debug)]
pub struct MemoryCacheStore<V> {
    caches: RwLock<HashMap<String, HashMap<String, V>>>,
}

impl<V> MemoryCacheStore<V> {
    /// Creates a store with the given caches provisioned.
    pub fn with_caches<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let caches = names
            .into_iter()
            .map(|name| (name.into(), HashMap::new()))
            .collect();

        Self {
            caches: RwLock::new(caches),
        }
    }

    /// Returns the number of values held in `cache` (0 if unknown).
    pub fn len(&self, cache: &str) -> usize {
        self.caches.read().get(cache).map_or(0, HashMap::len)
    }

    /// Returns true if `cache` holds no values.
    pub fn is_empty(&self, cache: &str) -> bool {
        self.len(cache) == 0
    }

    /// Returns true if `cache` holds a value for `key`.
    pub fn contains(&self, cache: &str, key: &str) -> bool {
        self.caches
            .read()
            .get(cache)
            .is_some_and(|entries| entries.contains_key(key))
    }

    /// Drops every value, keeping the caches provisioned.
    pub fn clear(&self) {
        for entries in self.caches.write().values_mut() {
            entries.clear();
        }
    }
}

impl<V> CacheStore<V> for MemoryCacheStore<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, cache: &str, key: &str) -> Result<Option<V>> {
        let caches = self.caches.read();
        let entries = caches
            .get(cache)
            .ok_or_else(|| GeocacheError::CacheNotFound(cache.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, cache: &str, key: &str, value: V) -> Result<()> {
        let mut caches = self.caches.write();
        let entries = caches
            .get_mut(cache)
            .ok_or_else(|| GeocacheError::CacheNotFound(cache.to_string()))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn evict(&self, cache: &str, key: &str) -> Result<bool> {
        let mut caches = self.caches.write();
        let entries = caches
            .get_mut(cache)
            .ok_or_else(|| GeocacheError::CacheNotFound(cache.to_string()))?;
        Ok(entries.remove(key).is_some())
    }

    fn exists(&self, cache: &str) -> bool {
        self.caches.read().contains_key(cache)
    }
}
