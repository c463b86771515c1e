//! One logical cache: its ledger, its store and its policy.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tracing::instrument;

use geocache_core::error::Result;
use geocache_core::traits::CacheStore;
use geocache_core::types::EvictionPolicy;

use crate::clock::{Clock, SystemClock};
use crate::ledger::AccessLedger;
use crate::read_through::read_through;
use crate::sweep::{sweep, SweepOutcome};

/// Access tracking and eviction for a single named cache.
///
/// Owns exactly one [`AccessLedger`] and references exactly one store. Two
/// trackers never share state, so sweeps of different caches run
/// independently.
pub struct EvictionTracker<V> {
    cache: String,
    ledger: AccessLedger,
    store: Arc<dyn CacheStore<V>>,
    policy: EvictionPolicy,
}

impl<V> EvictionTracker<V> {
    /// Creates a tracker on the system clock.
    pub fn new(
        cache: impl Into<String>,
        store: Arc<dyn CacheStore<V>>,
        policy: EvictionPolicy,
    ) -> Self {
        Self::with_clock(cache, store, policy, Arc::new(SystemClock))
    }

    /// Creates a tracker on the given clock.
    pub fn with_clock(
        cache: impl Into<String>,
        store: Arc<dyn CacheStore<V>>,
        policy: EvictionPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cache: cache.into(),
            ledger: AccessLedger::with_clock(clock),
            store,
            policy,
        }
    }

    /// Name of the tracked cache.
    pub fn cache_name(&self) -> &str {
        &self.cache
    }

    /// Eviction policy in force.
    pub fn policy(&self) -> &EvictionPolicy {
        &self.policy
    }

    /// The access ledger.
    pub fn ledger(&self) -> &AccessLedger {
        &self.ledger
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn CacheStore<V>> {
        &self.store
    }

    /// Records an access to `key`.
    pub fn touch(&self, key: &str) {
        self.ledger.touch(key);
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    /// Returns true if no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// Runs one eviction sweep over this cache.
    #[instrument(skip(self), fields(cache = %self.cache))]
    pub fn sweep(&self) -> Result<SweepOutcome> {
        sweep(&self.cache, &self.ledger, self.store.as_ref(), &self.policy)
    }

    /// Reads `key` through this cache's store. See [`read_through`].
    ///
    /// A value written to the store is touched again afterwards, so it is
    /// tracked even if a sweep retired the key while the loader ran.
    pub async fn read<P, F, Fut>(&self, key: &str, skip_cache: P, load: F) -> Result<Option<V>>
    where
        V: Clone,
        P: FnOnce(&str, &V) -> bool,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<V>>>,
    {
        let read = read_through(self.store.as_ref(), &self.cache, key, skip_cache, load).await?;
        if read.is_stored() {
            self.ledger.touch(key);
        }
        Ok(read.into_value())
    }
}

impl<V> fmt::Debug for EvictionTracker<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvictionTracker")
            .field("cache", &self.cache)
            .field("tracked", &self.ledger.len())
            .field("policy", &self.policy)
            .finish()
    }
}
