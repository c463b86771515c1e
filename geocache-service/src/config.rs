//! Service configuration.

use serde::{Deserialize, Serialize};

use geocache_core::constants::DEFAULT_BYPASS_TOKEN;
use geocache_core::error::Result;
use geocache_core::types::EvictionPolicy;

/// Settings for [`GeocodingService`](crate::GeocodingService).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Policy applied to both logical caches
    pub policy: EvictionPolicy,
    /// Address whose results are never cached (case-insensitive)
    pub bypass_token: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            policy: EvictionPolicy::default(),
            bypass_token: DEFAULT_BYPASS_TOKEN.into(),
        }
    }
}

impl ServiceConfig {
    /// Sets the eviction policy.
    pub fn with_policy(mut self, policy: EvictionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the bypass token.
    pub fn with_bypass_token(mut self, token: impl Into<String>) -> Self {
        self.bypass_token = token.into();
        self
    }

    /// Checks the policy.
    pub fn validate(&self) -> Result<()> {
        self.policy.validate()
    }
}
