//! Cache access orchestration for forward and reverse geocoding.

use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use geocache_cache::{Clock, EvictionTracker, MemoryCacheStore, SweepOutcome, SystemClock};
use geocache_core::constants::{GEOCODING_CACHE, REVERSE_GEOCODING_CACHE};
use geocache_core::error::{GeocacheError, Result};
use geocache_core::traits::{CacheStore, GeocodingProvider};
use geocache_core::types::{Address, CoordinateKey, GeocodingKey, Location};

use crate::config::ServiceConfig;
use crate::mapper::{map_to_address, map_to_location};

/// Geocoding with tracked, size- and age-bounded result caches.
///
/// Holds one [`EvictionTracker`] per logical cache. A read:
/// 1. records the access in that cache's ledger,
/// 2. sweeps that cache, logging and discarding any failure,
/// 3. reads through the cache store, calling the provider on a miss.
///
/// Cache maintenance never fails a read. Provider and validation errors pass
/// through unchanged.
pub struct GeocodingService {
    geocoding: EvictionTracker<Location>,
    reverse_geocoding: EvictionTracker<Address>,
    provider: Arc<dyn GeocodingProvider>,
    config: ServiceConfig,
}

/// Result of sweeping both caches.
#[derive(Debug)]
pub struct SweepReport {
    /// Forward geocoding sweep
    pub geocoding: Result<SweepOutcome>,
    /// Reverse geocoding sweep
    pub reverse_geocoding: Result<SweepOutcome>,
}

impl GeocodingService {
    /// Creates a service with in-memory stores on the system clock.
    pub fn new(config: ServiceConfig, provider: Arc<dyn GeocodingProvider>) -> Result<Self> {
        Self::with_stores(
            config,
            provider,
            Arc::new(MemoryCacheStore::<Location>::with_caches([GEOCODING_CACHE])),
            Arc::new(MemoryCacheStore::<Address>::with_caches([REVERSE_GEOCODING_CACHE])),
            Arc::new(SystemClock),
        )
    }

    /// Creates a service over caller-provided stores and clock.
    ///
    /// Fails with [`GeocacheError::ConfigError`] if the policy has a zero cap
    /// or a zero TTL.
    pub fn with_stores(
        config: ServiceConfig,
        provider: Arc<dyn GeocodingProvider>,
        geocoding_store: Arc<dyn CacheStore<Location>>,
        reverse_geocoding_store: Arc<dyn CacheStore<Address>>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            geocoding: EvictionTracker::with_clock(
                GEOCODING_CACHE,
                geocoding_store,
                config.policy,
                clock.clone(),
            ),
            reverse_geocoding: EvictionTracker::with_clock(
                REVERSE_GEOCODING_CACHE,
                reverse_geocoding_store,
                config.policy,
                clock,
            ),
            provider,
            config,
        })
    }

    /// Returns the service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Tracker for the forward geocoding cache.
    pub fn geocoding_tracker(&self) -> &EvictionTracker<Location> {
        &self.geocoding
    }

    /// Tracker for the reverse geocoding cache.
    pub fn reverse_geocoding_tracker(&self) -> &EvictionTracker<Address> {
        &self.reverse_geocoding
    }

    /// Resolves an address to coordinates.
    ///
    /// Results for the bypass token are never cached, and the token is not
    /// recorded in the ledger either, since it can never have a store entry.
    #[instrument(skip(self))]
    pub async fn get_geocoding(&self, address: &str) -> Result<Location> {
        let key = GeocodingKey::new(address)?;
        let bypass = key.is_bypass(&self.config.bypass_token);

        if bypass {
            debug!(key = %key, "Bypass token, not tracking access");
        } else {
            self.geocoding.touch(key.as_str());
        }
        sweep_best_effort(&self.geocoding);

        let provider = &self.provider;
        let location = self
            .geocoding
            .read(
                key.as_str(),
                |_, _| bypass,
                || async {
                    info!(address = key.address(), "Fetching geocoding data from provider");
                    let response = provider.geocode(key.address()).await?;
                    map_to_location(&response).map(Some)
                },
            )
            .await?;

        location.ok_or_else(|| {
            GeocacheError::NoResults(format!(
                "no location found for address: {}",
                key.address()
            ))
        })
    }

    /// Resolves coordinates to an address.
    #[instrument(skip(self))]
    pub async fn get_reverse_geocoding(&self, latitude: f64, longitude: f64) -> Result<Address> {
        let key = CoordinateKey::new(latitude, longitude)?;

        self.reverse_geocoding.touch(key.as_str());
        sweep_best_effort(&self.reverse_geocoding);

        let provider = &self.provider;
        let address = self
            .reverse_geocoding
            .read(
                key.as_str(),
                |_, _| false,
                || async {
                    info!(key = %key, "Fetching reverse geocoding data from provider");
                    let response = provider
                        .reverse_geocode(key.latitude(), key.longitude())
                        .await?;
                    map_to_address(&response).map(Some)
                },
            )
            .await?;

        address.ok_or_else(|| {
            GeocacheError::NoResults(format!("no address found for coordinates: {}", key))
        })
    }

    /// Sweeps both caches now, independently of any read.
    pub fn sweep_all(&self) -> SweepReport {
        SweepReport {
            geocoding: self.geocoding.sweep(),
            reverse_geocoding: self.reverse_geocoding.sweep(),
        }
    }
}

/// Sweeps `tracker`, logging instead of returning a failure.
fn sweep_best_effort<V>(tracker: &EvictionTracker<V>) {
    match tracker.sweep() {
        Ok(outcome) if outcome.removed() > 0 => {
            debug!(
                cache = tracker.cache_name(),
                evicted = outcome.evicted.len(),
                dropped = outcome.dropped.len(),
                remaining = outcome.remaining,
                "Cache cleanup complete"
            );
        }
        Ok(_) => {}
        Err(e) => {
            error!(
                cache = tracker.cache_name(),
                error = %e,
                retried_next_read = e.is_recoverable(),
                "Error during cache cleanup"
            );
        }
    }
}
