//! App state: geocoding service and config.

use std::sync::Arc;
use std::time::Duration;

use geocache_client::{ClientConfig, HttpGeocodingClient};
use geocache_core::constants::{
    DEFAULT_BYPASS_TOKEN, DEFAULT_MAX_ENTRIES, DEFAULT_PROVIDER_TIMEOUT_SECONDS,
    DEFAULT_TTL_SECONDS,
};
use geocache_core::error::Result;
use geocache_core::traits::GeocodingProvider;
use geocache_core::types::EvictionPolicy;
use geocache_service::{GeocodingService, ServiceConfig};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Provider API key
    pub api_key: String,
    /// Forward URL template; provider default when unset
    pub geocoding_url: Option<String>,
    /// Reverse URL template; provider default when unset
    pub reverse_geocoding_url: Option<String>,
    /// Provider request timeout in seconds
    pub timeout_seconds: u64,
    /// Maximum tracked entries per cache
    pub max_entries: usize,
    /// Idle lifetime of a cache entry in seconds
    pub ttl_seconds: u64,
    /// Address whose results are never cached
    pub bypass_token: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            geocoding_url: None,
            reverse_geocoding_url: None,
            timeout_seconds: DEFAULT_PROVIDER_TIMEOUT_SECONDS,
            max_entries: DEFAULT_MAX_ENTRIES,
            ttl_seconds: DEFAULT_TTL_SECONDS,
            bypass_token: DEFAULT_BYPASS_TOKEN.into(),
        }
    }
}

impl ApiConfig {
    /// Loads config from the environment (and `.env`), falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        Self {
            api_key: std::env::var("GEOCODING_API_KEY").unwrap_or_default(),
            geocoding_url: std::env::var("GEOCODING_URL").ok(),
            reverse_geocoding_url: std::env::var("REVERSE_GEOCODING_URL").ok(),
            timeout_seconds: env_parse("GEOCODING_TIMEOUT_SECONDS")
                .unwrap_or(defaults.timeout_seconds),
            max_entries: env_parse("GEOCACHE_MAX_ENTRIES").unwrap_or(defaults.max_entries),
            ttl_seconds: env_parse("GEOCACHE_TTL_SECONDS").unwrap_or(defaults.ttl_seconds),
            bypass_token: std::env::var("GEOCACHE_BYPASS_TOKEN")
                .unwrap_or(defaults.bypass_token),
        }
    }

    /// Provider client settings.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(&self.api_key);
        if let Some(url) = &self.geocoding_url {
            config.geocoding_url = url.clone();
        }
        if let Some(url) = &self.reverse_geocoding_url {
            config.reverse_geocoding_url = url.clone();
        }
        config.timeout_seconds = self.timeout_seconds;
        config
    }

    /// Cache settings.
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig::default()
            .with_policy(EvictionPolicy::new(
                self.max_entries,
                Duration::from_secs(self.ttl_seconds),
            ))
            .with_bypass_token(&self.bypass_token)
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Shared state behind every handler.
pub struct AppState {
    /// Config the state was built from
    pub config: ApiConfig,
    /// Cached geocoding
    pub service: GeocodingService,
}

impl AppState {
    /// Builds the state with the HTTP provider client.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = HttpGeocodingClient::with_config(config.client_config())?;
        Self::with_provider(config, Arc::new(client))
    }

    /// Builds the state over any provider.
    pub fn with_provider(config: ApiConfig, provider: Arc<dyn GeocodingProvider>) -> Result<Self> {
        Ok(Self {
            service: GeocodingService::new(config.service_config(), provider)?,
            config,
        })
    }
}
