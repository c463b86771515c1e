//! Eviction sweep: bring one logical cache back within its policy.

use tracing::{debug, error, info};

use geocache_core::error::{GeocacheError, Result};
use geocache_core::traits::CacheStore;
use geocache_core::types::EvictionPolicy;

use crate::ledger::AccessLedger;

/// What a completed sweep did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    /// Keys whose store entry was evicted, oldest first
    pub evicted: Vec<String>,
    /// Keys dropped from the ledger that had no store entry (never cached)
    pub dropped: Vec<String>,
    /// Ledger size after the sweep, as seen from its snapshot
    pub remaining: usize,
}

impl SweepOutcome {
    /// Total number of ledger entries the sweep retired.
    pub fn removed(&self) -> usize {
        self.evicted.len() + self.dropped.len()
    }
}

/// Evicts least-recently-used entries from `cache` until the ledger holds at
/// most `policy.max_entries` keys and its oldest key is within the TTL.
///
/// Works from one snapshot taken at the start; touches that land mid-sweep
/// are left for the next sweep. Each key is evicted from the store before it
/// leaves the ledger. The first store fault aborts the sweep with
/// [`GeocacheError::EvictionFailed`], leaving the failing key and everything
/// newer in the ledger. Nothing is retried here.
pub fn sweep<V, S>(
    cache: &str,
    ledger: &AccessLedger,
    store: &S,
    policy: &EvictionPolicy,
) -> Result<SweepOutcome>
where
    S: CacheStore<V> + ?Sized,
{
    let snapshot = ledger.snapshot();
    if snapshot.is_empty() {
        return Ok(SweepOutcome::default());
    }

    if !store.exists(cache) {
        error!(cache, "Cache not found in cache store");
        return Err(GeocacheError::CacheNotFound(cache.to_string()));
    }

    let now = ledger.now();
    let mut outcome = SweepOutcome::default();
    let mut remaining = snapshot.len();

    for entry in snapshot {
        let over_capacity = remaining > policy.max_entries;
        let expired = policy.is_expired(now.saturating_duration_since(entry.last_access));
        if !over_capacity && !expired {
            break;
        }

        let present = store.evict(cache, &entry.key).map_err(|e| {
            error!(cache, key = %entry.key, error = %e, "Failed to evict cache entry");
            GeocacheError::EvictionFailed {
                cache: cache.to_string(),
                key: entry.key.clone(),
                reason: e.to_string(),
            }
        })?;

        if !ledger.remove_if_unchanged(&entry.key, entry.generation) {
            debug!(cache, key = %entry.key, "Key touched during sweep, keeping ledger entry");
        }
        remaining -= 1;

        if present {
            info!(cache, key = %entry.key, over_capacity, expired, "Evicted stale cache entry");
            outcome.evicted.push(entry.key);
        } else {
            debug!(cache, key = %entry.key, "Dropped ledger entry with no cached value");
            outcome.dropped.push(entry.key);
        }
    }

    outcome.remaining = remaining;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::testing::RecordingStore;
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::time::Duration;

    const CACHE: &str = "geocoding";

    fn setup(
        max_entries: usize,
        ttl_secs: u64,
    ) -> (Arc<ManualClock>, AccessLedger, RecordingStore, EvictionPolicy) {
        let clock = Arc::new(ManualClock::new());
        let ledger = AccessLedger::with_clock(clock.clone());
        let store = RecordingStore::new(CACHE);
        let policy = EvictionPolicy::new(max_entries, Duration::from_secs(ttl_secs));
        (clock, ledger, store, policy)
    }

    /// Touches each key one second apart and caches a value for it.
    fn populate(clock: &ManualClock, ledger: &AccessLedger, store: &RecordingStore, keys: &[&str]) {
        for key in keys {
            ledger.touch(key);
            store.inner.put(CACHE, key, key.to_string()).unwrap();
            clock.advance(Duration::from_secs(1));
        }
    }

    #[test]
    fn test_empty_ledger_is_noop() {
        let (_clock, ledger, store, policy) = setup(2, 300);

        let outcome = sweep(CACHE, &ledger, &store, &policy).unwrap();

        assert_eq!(outcome, SweepOutcome::default());
        assert!(store.evictions().is_empty());
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let (clock, ledger, store, policy) = setup(2, 300);
        populate(&clock, &ledger, &store, &["a", "b", "c"]);

        let outcome = sweep(CACHE, &ledger, &store, &policy).unwrap();

        assert_eq!(outcome.evicted, vec!["a"]);
        assert_eq!(outcome.remaining, 2);
        assert_eq!(store.evictions(), vec!["a"]);
        assert!(!ledger.contains("a"));
        assert!(ledger.contains("b") && ledger.contains("c"));
    }

    #[test]
    fn test_ttl_evicts_after_expiry_only() {
        let (clock, ledger, store, policy) = setup(10, 300);
        populate(&clock, &ledger, &store, &["x"]);

        clock.advance(Duration::from_secs(59));
        let outcome = sweep(CACHE, &ledger, &store, &policy).unwrap();
        assert!(outcome.evicted.is_empty());
        assert!(ledger.contains("x"));

        clock.advance(Duration::from_secs(300));
        let outcome = sweep(CACHE, &ledger, &store, &policy).unwrap();
        assert_eq!(outcome.evicted, vec!["x"]);
        assert!(ledger.is_empty());
        assert!(!store.inner.contains(CACHE, "x"));
    }

    #[test]
    fn test_ttl_stops_at_first_fresh_entry() {
        let (clock, ledger, store, policy) = setup(10, 300);
        populate(&clock, &ledger, &store, &["old-1", "old-2"]);
        clock.advance(Duration::from_secs(299));
        populate(&clock, &ledger, &store, &["fresh"]);

        let outcome = sweep(CACHE, &ledger, &store, &policy).unwrap();

        assert_eq!(outcome.evicted, vec!["old-1", "old-2"]);
        assert_eq!(outcome.remaining, 1);
        assert!(ledger.contains("fresh"));
    }

    #[test]
    fn test_entry_without_store_value_is_dropped_quietly() {
        let (clock, ledger, store, policy) = setup(10, 300);
        ledger.touch("goa");
        clock.advance(Duration::from_secs(301));

        let outcome = sweep(CACHE, &ledger, &store, &policy).unwrap();

        assert!(outcome.evicted.is_empty());
        assert_eq!(outcome.dropped, vec!["goa"]);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_failure_aborts_and_keeps_ledger_entry() {
        let (clock, ledger, store, policy) = setup(1, 300);
        populate(&clock, &ledger, &store, &["a", "b", "c", "d"]);
        store.fail_on("b");

        let err = sweep(CACHE, &ledger, &store, &policy).unwrap_err();

        assert!(matches!(err, GeocacheError::EvictionFailed { ref key, .. } if key == "b"));
        assert_eq!(store.evictions(), vec!["a", "b"]);
        assert!(!ledger.contains("a"));
        assert!(ledger.contains("b"));
        assert!(ledger.contains("c") && ledger.contains("d"));
        assert!(store.inner.contains(CACHE, "c"));
    }

    #[test]
    fn test_next_sweep_retries_after_failure() {
        let (clock, ledger, store, policy) = setup(1, 300);
        populate(&clock, &ledger, &store, &["a", "b"]);
        store.fail_on("a");
        assert!(sweep(CACHE, &ledger, &store, &policy).is_err());

        store.heal();
        let outcome = sweep(CACHE, &ledger, &store, &policy).unwrap();

        assert_eq!(outcome.evicted, vec!["a"]);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_missing_cache_fails_without_touching_ledger() {
        let (_clock, ledger, store, policy) = setup(0, 300);
        ledger.touch("a");

        let err = sweep("weather", &ledger, &store, &policy).unwrap_err();

        assert!(matches!(err, GeocacheError::CacheNotFound(_)));
        assert!(ledger.contains("a"));
    }

    #[test]
    fn test_key_touched_mid_sweep_survives() {
        let (clock, ledger, store, policy) = setup(10, 300);
        let ledger = Arc::new(ledger);
        populate(&clock, &ledger, &store, &["a"]);
        clock.advance(Duration::from_secs(400));

        // Lands after the snapshot was taken, before the ledger removal.
        let hook_ledger = ledger.clone();
        store.on_evict(move |key| {
            hook_ledger.touch(key);
        });

        let outcome = sweep(CACHE, &ledger, &store, &policy).unwrap();

        assert_eq!(outcome.evicted, vec!["a"]);
        assert!(ledger.contains("a"));
    }

    proptest! {
        #[test]
        fn prop_cap_enforced_and_oldest_removed(n in 0usize..40, cap in 1usize..15) {
            let (clock, ledger, store, policy) = setup(cap, 3600);
            let keys: Vec<String> = (0..n).map(|i| format!("k{:03}", i)).collect();
            let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
            populate(&clock, &ledger, &store, &refs);

            let outcome = sweep(CACHE, &ledger, &store, &policy).unwrap();

            prop_assert!(ledger.len() <= cap);
            let expected: Vec<String> = keys.iter().take(n.saturating_sub(cap)).cloned().collect();
            prop_assert_eq!(&outcome.evicted, &expected);
            for entry in ledger.snapshot() {
                prop_assert!(store.inner.contains(CACHE, &entry.key));
            }
            for key in &outcome.evicted {
                prop_assert!(!store.inner.contains(CACHE, key));
            }
        }
    }
}
