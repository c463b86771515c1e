//! Explicit read-through: get from the store, or load and store.

use std::future::Future;

use tracing::{debug, warn};

use geocache_core::error::Result;
use geocache_core::traits::CacheStore;

/// How a read-through was answered.
#[derive(Clone, Debug, PartialEq)]
pub enum CacheRead<V> {
    /// Served from the store
    Hit(V),
    /// Loaded and written to the store
    Stored(V),
    /// Loaded but not written (skipped, or the write failed)
    Uncached(V),
    /// The loader had nothing
    Missing,
}

impl<V> CacheRead<V> {
    /// Returns true if this read wrote a value to the store.
    pub fn is_stored(&self) -> bool {
        matches!(self, CacheRead::Stored(_))
    }

    /// Returns the value, if any.
    pub fn into_value(self) -> Option<V> {
        match self {
            CacheRead::Hit(v) | CacheRead::Stored(v) | CacheRead::Uncached(v) => Some(v),
            CacheRead::Missing => None,
        }
    }
}

/// Returns the cached value for `key`, or loads, stores and returns it.
///
/// A loader result of `None` is never stored. A loaded value is also left
/// out of the store when `skip_cache(key, &value)` is true.
///
/// A store fault on `get` propagates. A fault on `put` is logged and the
/// loaded value is returned as [`CacheRead::Uncached`].
pub async fn read_through<V, S, P, F, Fut>(
    store: &S,
    cache: &str,
    key: &str,
    skip_cache: P,
    load: F,
) -> Result<CacheRead<V>>
where
    V: Clone,
    S: CacheStore<V> + ?Sized,
    P: FnOnce(&str, &V) -> bool,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Option<V>>>,
{
    if let Some(value) = store.get(cache, key)? {
        debug!(cache, key, "Cache hit");
        return Ok(CacheRead::Hit(value));
    }

    debug!(cache, key, "Cache miss, loading");

    let Some(value) = load().await? else {
        debug!(cache, key, "Loader returned nothing, not caching");
        return Ok(CacheRead::Missing);
    };

    if skip_cache(key, &value) {
        debug!(cache, key, "Skipping cache write");
        return Ok(CacheRead::Uncached(value));
    }

    if let Err(e) = store.put(cache, key, value.clone()) {
        warn!(cache, key, error = %e, "Failed to store loaded value");
        return Ok(CacheRead::Uncached(value));
    }

    Ok(CacheRead::Stored(value))
}
