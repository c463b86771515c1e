//! Domain types for geocache.
//!
//! - [`GeocodingKey`] / [`CoordinateKey`]: canonical cache keys for the two logical caches
//! - [`Location`] / [`Address`]: values served to callers and held in the cache store
//! - [`ProviderResponse`]: raw payload returned by the upstream geocoding provider
//! - [`EvictionPolicy`]: size cap and time-to-live applied per logical cache

mod key;
mod location;
mod policy;

pub use key::*;
pub use location::*;
pub use policy::*;
