//! # Geocache Cache
//!
//! Access-time tracking and eviction for the geocoding result caches.
//!
//! Each logical cache gets one [`EvictionTracker`], which pairs an
//! [`AccessLedger`] (key → last access) with a [`CacheStore`] holding the
//! values. Reads touch the ledger, then a [`sweep`] evicts the oldest entries
//! until the cache is back under its [`EvictionPolicy`].
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use geocache_cache::{EvictionTracker, MemoryCacheStore};
//! use geocache_core::{EvictionPolicy, GEOCODING_CACHE};
//!
//! let store = Arc::new(MemoryCacheStore::<String>::with_caches([GEOCODING_CACHE]));
//! let tracker = EvictionTracker::new(GEOCODING_CACHE, store, EvictionPolicy::default());
//!
//! tracker.touch("berlin");
//! let outcome = tracker.sweep().unwrap();
//! assert!(outcome.evicted.is_empty());
//! ```
//!
//! [`CacheStore`]: geocache_core::CacheStore
//! [`EvictionPolicy`]: geocache_core::EvictionPolicy

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod clock;
mod ledger;
mod read_through;
mod store;
mod sweep;
mod tracker;

#[cfg(test)]
mod testing;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ledger::{AccessLedger, LedgerEntry};
pub use read_through::{read_through, CacheRead};
pub use store::MemoryCacheStore;
pub use sweep::{sweep, SweepOutcome};
pub use tracker::EvictionTracker;
