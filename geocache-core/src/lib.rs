//! # Geocache Core
//!
//! Core types, errors, and traits shared by every geocache crate.
//!
//! - **Types**: cache keys, response DTOs, provider payloads, eviction policy
//! - **Errors**: the [`GeocacheError`] taxonomy
//! - **Constants**: cache names, policy defaults, URL placeholders
//! - **Traits**: the [`CacheStore`] and [`GeocodingProvider`] boundaries
//!
//! ## Example
//!
//! ```rust
//! use geocache_core::{CoordinateKey, GeocodingKey};
//!
//! let key = GeocodingKey::new("  Berlin ").unwrap();
//! assert_eq!(key.as_str(), "berlin");
//!
//! let coords = CoordinateKey::new(52.52, 13.405).unwrap();
//! assert_eq!(coords.as_str(), "52.52,13.405");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{GeocacheError, Result};
pub use traits::*;
pub use types::*;
