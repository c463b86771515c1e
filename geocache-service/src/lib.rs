//! # Geocache Service
//!
//! Cache access orchestration for the two geocoding caches.
//!
//! Every read records the access, runs a best-effort eviction sweep of the
//! cache it belongs to, then reads through the cache store to the provider.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod config;
mod mapper;
mod service;

pub use config::ServiceConfig;
pub use mapper::{map_to_address, map_to_location};
pub use service::{GeocodingService, SweepReport};
