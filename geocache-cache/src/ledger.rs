//! Access time ledger: the last time each cache key was read.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;

use crate::clock::{Clock, SystemClock};

/// One row of a ledger snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Cache key
    pub key: String,
    /// Last time the key was touched
    pub last_access: Instant,
    /// Ledger-wide sequence number of that touch
    pub generation: u64,
}

#[derive(Clone, Copy, Debug)]
struct Stamp {
    at: Instant,
    generation: u64,
}

/// Concurrent map from cache key to last access time.
///
/// A key is present while the tracker believes the cache store holds a value
/// for it. Entries are written by every read and removed only by a sweep.
///
/// Every touch also takes a fresh generation number, so two touches of the
/// same key are told apart even when the clock returns the same instant.
///
/// # Thread Safety
///
/// Backed by a sharded [`DashMap`], so `touch`, `remove`, `len` and
/// `snapshot` may run concurrently without callers holding any lock.
#[derive(Debug)]
pub struct AccessLedger {
    entries: DashMap<String, Stamp>,
    generation: AtomicU64,
    clock: Arc<dyn Clock>,
}

impl AccessLedger {
    /// Creates an empty ledger on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty ledger on the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            generation: AtomicU64::new(0),
            clock,
        }
    }

    /// Returns the ledger clock's current instant.
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Records an access to `key` now, overwriting any earlier timestamp.
    pub fn touch(&self, key: &str) -> Instant {
        let stamp = Stamp {
            at: self.clock.now(),
            generation: self.generation.fetch_add(1, Ordering::Relaxed),
        };
        self.entries.insert(key.to_owned(), stamp);
        stamp.at
    }

    /// Returns every entry, oldest first.
    ///
    /// Entries with identical timestamps are ordered by key so a sweep over
    /// the snapshot is deterministic. Touches racing with the snapshot may or
    /// may not be reflected, but every key present for the whole call appears
    /// exactly once.
    pub fn snapshot(&self) -> Vec<LedgerEntry> {
        let mut entries: Vec<LedgerEntry> = self
            .entries
            .iter()
            .map(|entry| LedgerEntry {
                key: entry.key().clone(),
                last_access: entry.value().at,
                generation: entry.value().generation,
            })
            .collect();

        entries.sort_unstable_by(|a, b| {
            a.last_access
                .cmp(&b.last_access)
                .then_with(|| a.key.cmp(&b.key))
        });
        entries
    }

    /// Removes `key`. Returns true if it was present.
    pub fn remove(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Removes `key` only if its last touch is still `generation`.
    ///
    /// A sweep uses this so a key touched again after the snapshot was taken
    /// survives until the next sweep.
    pub fn remove_if_unchanged(&self, key: &str, generation: u64) -> bool {
        self.entries
            .remove_if(key, |_, current| current.generation == generation)
            .is_some()
    }

    /// Returns the last access time for `key`.
    pub fn last_access(&self, key: &str) -> Option<Instant> {
        self.entries.get(key).map(|entry| entry.value().at)
    }

    /// Returns true if `key` is tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AccessLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::time::Duration;

    fn manual_ledger() -> (Arc<ManualClock>, AccessLedger) {
        let clock = Arc::new(ManualClock::new());
        let ledger = AccessLedger::with_clock(clock.clone());
        (clock, ledger)
    }

    #[test]
    fn test_touch_twice_keeps_one_entry_with_latest_time() {
        let (clock, ledger) = manual_ledger();

        ledger.touch("berlin");
        clock.advance(Duration::from_secs(5));
        let second = ledger.touch("berlin");

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.last_access("berlin"), Some(second));
    }

    #[test]
    fn test_snapshot_is_oldest_first() {
        let (clock, ledger) = manual_ledger();

        for key in ["c", "a", "b"] {
            ledger.touch(key);
            clock.advance(Duration::from_secs(1));
        }

        let keys: Vec<_> = ledger.snapshot().into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_snapshot_ties_break_by_key() {
        let (_clock, ledger) = manual_ledger();

        for key in ["delta", "alpha", "charlie", "bravo"] {
            ledger.touch(key);
        }

        let keys: Vec<_> = ledger.snapshot().into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["alpha", "bravo", "charlie", "delta"]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_clock, ledger) = manual_ledger();
        ledger.touch("berlin");

        assert!(ledger.remove("berlin"));
        assert!(!ledger.remove("berlin"));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_remove_if_unchanged_spares_refreshed_key() {
        let (clock, ledger) = manual_ledger();

        ledger.touch("berlin");
        let seen = ledger.snapshot().remove(0);
        clock.advance(Duration::from_secs(1));
        ledger.touch("berlin");

        assert!(!ledger.remove_if_unchanged("berlin", seen.generation));
        assert!(ledger.contains("berlin"));
    }

    #[test]
    fn test_retouch_at_same_instant_is_still_a_change() {
        let (_clock, ledger) = manual_ledger();

        ledger.touch("berlin");
        let seen = ledger.snapshot().remove(0);
        ledger.touch("berlin");

        assert_eq!(ledger.last_access("berlin"), Some(seen.last_access));
        assert!(!ledger.remove_if_unchanged("berlin", seen.generation));
        assert!(ledger.contains("berlin"));
    }

    #[test]
    fn test_remove_if_unchanged_removes_untouched_key() {
        let (_clock, ledger) = manual_ledger();

        ledger.touch("berlin");
        let seen = ledger.snapshot().remove(0);

        assert!(ledger.remove_if_unchanged("berlin", seen.generation));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_concurrent_touches() {
        let ledger = Arc::new(AccessLedger::new());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let ledger = ledger.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        ledger.touch(&format!("key-{}", (t * 100 + i) % 200));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(ledger.len(), 200);
        assert_eq!(ledger.snapshot().len(), 200);
    }
}
