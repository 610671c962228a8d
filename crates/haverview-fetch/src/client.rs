//! Connection manager.

use std::sync::Arc;

use haverview_countries::CountryTable;
use haverview_types::{HaverError, Result};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::SeriesCache;
use crate::config::{API_KEY_ENV, ClientConfig, RequestOptions, resolve_api_key};
use crate::transport::{HttpTransport, Transport};
use crate::url;

/// Client for the Haver View REST API.
///
/// Construction and [`Haver::connect`] probe the API once. A failed probe is
/// not an error: it leaves [`Haver::is_active`] false and logs a warning, and
/// the caller decides whether to go on.
///
/// Every operation issues its requests one after another. The client is not
/// meant to be shared across tasks that call it concurrently.
#[derive(Debug)]
pub struct Haver {
    config: ClientConfig,
    base_url: Url,
    transport: Arc<dyn Transport>,
    api_key: Option<String>,
    options: RequestOptions,
    active: bool,
    pub(crate) cache: SeriesCache,
    pub(crate) countries: Arc<CountryTable>,
}

impl Haver {
    /// Creates a client over HTTP and probes the API.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or a proxy is invalid, or the HTTP
    /// client cannot be created. An unreachable API is not an error.
    pub async fn new(config: ClientConfig) -> Result<Self> {
        let options = RequestOptions::layered(&config, None);
        let transport = HttpTransport::new(&options).map_err(|e| HaverError::Http(e.to_string()))?;
        Self::with_transport(config, Arc::new(transport)).await
    }

    /// Creates a client with the default configuration and the key from
    /// the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub async fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()).await
    }

    /// Creates a client over a custom transport and probes the API.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or cannot take a path
    /// (e.g. `mailto:`).
    pub async fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| HaverError::invalid_argument("base_url", e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(HaverError::invalid_argument(
                "base_url",
                format!("{base_url} cannot hold endpoint paths"),
            ));
        }
        let options = RequestOptions::layered(&config, None);
        let api_key = config.api_key.clone();

        let mut client = Self {
            config,
            base_url,
            transport,
            api_key: None,
            options,
            active: false,
            cache: SeriesCache::default(),
            countries: CountryTable::shared(),
        };
        client.connect(api_key).await;
        Ok(client)
    }

    /// Replaces the country table used by [`Haver::read_table`].
    #[must_use]
    pub fn with_countries(mut self, countries: Arc<CountryTable>) -> Self {
        self.countries = countries;
        self
    }

    /// Re-initialises the connection with `api_key`, or the key from the
    /// environment when `None`, and probes the API.
    ///
    /// Clears the series listing cache. Returns the probe outcome; a failure
    /// is logged as a warning, never returned as an error.
    pub async fn connect(&mut self, api_key: Option<String>) -> bool {
        self.api_key = resolve_api_key(api_key);
        self.options = RequestOptions::layered(&self.config, self.api_key.as_deref());
        self.cache.clear();

        if self.api_key.is_none() {
            warn!(
                "No Haver API key provided. Pass one explicitly or set {API_KEY_ENV}; \
                 API calls will fail until then."
            );
            self.active = false;
            return false;
        }

        self.active = self.probe().await;
        if !self.active {
            warn!(
                "Invalid or expired Haver API key, or the API is unreachable. \
                 Reconnect with a valid key via Haver::connect."
            );
        }
        self.active
    }

    /// Probes the API with the current key.
    ///
    /// Unlike [`Haver::is_active`], this makes a request on every call.
    pub async fn is_connected(&self) -> bool {
        self.api_key.is_some() && self.probe().await
    }

    /// Returns the outcome of the last probe made by construction or
    /// [`Haver::connect`].
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns true if a key was resolved.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the options sent with every request.
    #[must_use]
    pub const fn request_options(&self) -> &RequestOptions {
        &self.options
    }

    /// Returns the API root.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the country table used to build series tables.
    #[must_use]
    pub fn countries(&self) -> &CountryTable {
        &self.countries
    }

    async fn probe(&self) -> bool {
        let url = url::docs(&self.base_url);
        match self.transport.get(&url, self.options.headers()).await {
            Ok(response) => {
                debug!(status = response.status, "health probe");
                response.status == 200
            }
            Err(e) => {
                debug!(error = %e, "health probe failed");
                false
            }
        }
    }

    /// GETs `url` and decodes the body as `T`.
    ///
    /// The status is not checked: an error payload that does not decode as
    /// `T` surfaces as [`HaverError::Schema`].
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(path = url.path(), query = url.query().unwrap_or(""), "GET");
        let response = self
            .transport
            .get(&url, self.options.headers())
            .await
            .map_err(|e| HaverError::Http(e.to_string()))?;

        if !response.is_success() {
            debug!(status = response.status, path = url.path(), "non-success status");
        }

        serde_json::from_str(&response.body).map_err(|source| HaverError::Schema {
            endpoint: url.path().to_string(),
            source,
        })
    }
}
