//! Store double shared by the unit tests in this crate.

use std::collections::HashSet;

use parking_lot::Mutex;

use geocache_core::error::{GeocacheError, Result};
use geocache_core::traits::CacheStore;

use crate::store::MemoryCacheStore;

type EvictHook = Box<dyn Fn(&str) + Send + Sync>;

/// Wraps a [`MemoryCacheStore`], recording evictions and failing on demand.
pub(crate) struct RecordingStore {
    pub(crate) inner: MemoryCacheStore<String>,
    evictions: Mutex<Vec<String>>,
    failing: Mutex<HashSet<String>>,
    hook: Mutex<Option<EvictHook>>,
}

impl RecordingStore {
    pub(crate) fn new(cache: &str) -> Self {
        Self {
            inner: MemoryCacheStore::with_caches([cache]),
            evictions: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            hook: Mutex::new(None),
        }
    }

    /// Makes every eviction of `key` fail.
    pub(crate) fn fail_on(&self, key: &str) {
        self.failing.lock().insert(key.to_string());
    }

    pub(crate) fn heal(&self) {
        self.failing.lock().clear();
    }

    /// Runs `hook` at the start of every eviction.
    pub(crate) fn on_evict(&self, hook: impl Fn(&str) + Send + Sync + 'static) {
        *self.hook.lock() = Some(Box::new(hook));
    }

    /// Keys passed to `evict`, in call order, including failed attempts.
    pub(crate) fn evictions(&self) -> Vec<String> {
        self.evictions.lock().clone()
    }
}

impl CacheStore<String> for RecordingStore {
    fn get(&self, cache: &str, key: &str) -> Result<Option<String>> {
        self.inner.get(cache, key)
    }

    fn put(&self, cache: &str, key: &str, value: String) -> Result<()> {
        self.inner.put(cache, key, value)
    }

    fn evict(&self, cache: &str, key: &str) -> Result<bool> {
        self.evictions.lock().push(key.to_string());
        if self.failing.lock().contains(key) {
            return Err(GeocacheError::CacheStoreError("injected failure".into()));
        }
        if let Some(hook) = self.hook.lock().as_ref() {
            hook(key);
        }
        self.inner.evict(cache, key)
    }

    fn exists(&self, cache: &str) -> bool {
        self.inner.exists(cache)
    }
}
