//! Eviction policy parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL_SECONDS};
use crate::error::{GeocacheError, Result};

/// Size cap and time-to-live applied to one logical cache.
///
/// Fixed at startup; both logical caches normally share one policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvictionPolicy {
    /// Maximum number of tracked entries
    pub max_entries: usize,
    /// Maximum idle age of an entry before it is stale
    pub ttl: Duration,
}

impl Default for EvictionPolicy {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            ttl: Duration::from_secs(DEFAULT_TTL_SECONDS),
        }
    }
}

impl EvictionPolicy {
    /// Creates a policy with the given cap and TTL.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self { max_entries, ttl }
    }

    /// Returns the time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns true if an entry of the given age is past its TTL.
    pub fn is_expired(&self, age: Duration) -> bool {
        age > self.ttl
    }

    /// Rejects policies that would evict every entry on every sweep.
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(GeocacheError::ConfigError(
                "max_entries must be at least 1".into(),
            ));
        }
        if self.ttl.is_zero() {
            return Err(GeocacheError::ConfigError("ttl must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = EvictionPolicy::default();
        assert_eq!(policy.max_entries, 10);
        assert_eq!(policy.ttl(), Duration::from_secs(300));
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_expiry_is_strict() {
        let policy = EvictionPolicy::new(10, Duration::from_secs(60));
        assert!(!policy.is_expired(Duration::from_secs(60)));
        assert!(policy.is_expired(Duration::from_secs(61)));
    }

    #[test]
    fn test_sub_second_ttl_is_kept() {
        let policy = EvictionPolicy::new(10, Duration::from_millis(1500));
        assert_eq!(policy.ttl(), Duration::from_millis(1500));
        assert!(policy.is_expired(Duration::from_millis(1501)));
        assert!(!policy.is_expired(Duration::from_millis(1200)));

        let short = EvictionPolicy::new(10, Duration::from_millis(500));
        assert!(short.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero() {
        assert!(EvictionPolicy::new(0, Duration::from_secs(1)).validate().is_err());
        assert!(EvictionPolicy::new(1, Duration::ZERO).validate().is_err());
    }

    #[test]
    fn test_policy_serde() {
        let json = r#"{"max_entries": 3, "ttl": {"secs": 42, "nanos": 500000000}}"#;
        let policy: EvictionPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy, EvictionPolicy::new(3, Duration::from_millis(42_500)));
    }
}
