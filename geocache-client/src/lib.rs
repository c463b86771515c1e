//! HTTP client for the upstream geocoding provider.
//!
//! Builds request URLs from configurable templates and maps provider
//! responses and failures onto [`geocache_core::GeocacheError`].

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;

pub use client::{ClientConfig, HttpGeocodingClient};
