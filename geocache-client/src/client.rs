//! Geocoding provider client.
//!
//! Forward and reverse lookups are plain GETs against URL templates; the
//! placeholders in each template are replaced per request.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, instrument};

use geocache_core::constants::{
    ACCESS_KEY_PLACEHOLDER, ADDRESS_PLACEHOLDER, API_KEY_PLACEHOLDER,
    DEFAULT_PROVIDER_TIMEOUT_SECONDS, LATITUDE_PLACEHOLDER, LONGITUDE_PLACEHOLDER,
};
use geocache_core::error::{GeocacheError, Result};
use geocache_core::traits::GeocodingProvider;
use geocache_core::types::ProviderResponse;

const DEFAULT_GEOCODING_URL: &str =
    "http://api.positionstack.com/v1/forward?access_key=ACCESS_KEY_PLACEHOLDER&query=ADDRESS";
const DEFAULT_REVERSE_GEOCODING_URL: &str = concat!(
    "http://api.positionstack.com/v1/reverse",
    "?access_key=API_KEY_PLACEHOLDER&query=LATITUDE,LONGITUDE"
);

/// Provider client configuration.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ClientConfig {
    /// API key substituted into both templates
    pub access_key: String,
    /// Forward template with `ACCESS_KEY_PLACEHOLDER` and `ADDRESS`
    pub geocoding_url: String,
    /// Reverse template with `API_KEY_PLACEHOLDER`, `LATITUDE` and `LONGITUDE`
    pub reverse_geocoding_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            geocoding_url: DEFAULT_GEOCODING_URL.into(),
            reverse_geocoding_url: DEFAULT_REVERSE_GEOCODING_URL.into(),
            timeout_seconds: DEFAULT_PROVIDER_TIMEOUT_SECONDS,
        }
    }
}

impl ClientConfig {
    /// Creates config with the given API key and default templates.
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            ..Default::default()
        }
    }

    /// Overrides both URL templates.
    pub fn with_urls(
        mut self,
        geocoding_url: impl Into<String>,
        reverse_geocoding_url: impl Into<String>,
    ) -> Self {
        self.geocoding_url = geocoding_url.into();
        self.reverse_geocoding_url = reverse_geocoding_url.into();
        self
    }

    /// Renders the forward lookup URL for `address`.
    pub fn geocoding_request_url(&self, address: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(address.as_bytes()).collect();
        self.geocoding_url
            .replace(ACCESS_KEY_PLACEHOLDER, &self.access_key)
            .replace(ADDRESS_PLACEHOLDER, &encoded)
    }

    /// Renders the reverse lookup URL for a coordinate pair.
    pub fn reverse_geocoding_request_url(&self, latitude: f64, longitude: f64) -> String {
        self.reverse_geocoding_url
            .replace(API_KEY_PLACEHOLDER, &self.access_key)
            .replace(LATITUDE_PLACEHOLDER, &latitude.to_string())
            .replace(LONGITUDE_PLACEHOLDER, &longitude.to_string())
    }
}

/// [`GeocodingProvider`] over HTTP.
pub struct HttpGeocodingClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl HttpGeocodingClient {
    /// Creates a client with the given config.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                GeocacheError::ConfigError(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn fetch(&self, url: &str) -> Result<ProviderResponse> {
        let response = self.http_client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                GeocacheError::ConnectionTimeout(format!(
                    "no answer from geocoding provider within {}s",
                    self.config.timeout_seconds
                ))
            } else {
                GeocacheError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeocacheError::ProviderError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| GeocacheError::HttpError(e.to_string()))?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl GeocodingProvider for HttpGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<ProviderResponse> {
        if address.trim().is_empty() {
            error!("Provided address is empty");
            return Err(GeocacheError::InvalidAddress("no address was provided".into()));
        }

        debug!("Fetching geocoding data from provider");
        let response = self.fetch(&self.config.geocoding_request_url(address)).await?;

        if response.is_empty() {
            error!("No geocoding results from provider");
            return Err(GeocacheError::NoResults(format!(
                "no results found for the given address: {}",
                address
            )));
        }

        Ok(response)
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<ProviderResponse> {
        debug!("Fetching reverse geocoding data from provider");
        let url = self
            .config
            .reverse_geocoding_request_url(latitude, longitude);
        let response = self.fetch(&url).await?;

        if response.is_empty() {
            error!("No reverse geocoding results from provider");
            return Err(GeocacheError::NoResults(format!(
                "no results found for the given latitude and longitude: {}, {}",
                latitude, longitude
            )));
        }

        Ok(response)
    }
}
