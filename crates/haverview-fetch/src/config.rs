//! Client configuration and request option layering.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::url::BASE_URL;

/// Environment variable holding the Haver API key.
pub const API_KEY_ENV: &str = "HAVER_API_KEY";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Configuration for the Haver client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, without version prefix.
    pub base_url: String,
    /// API key. `None` falls back to [`API_KEY_ENV`].
    pub api_key: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// Proxy URLs keyed by scheme: `http`, `https` or `all`.
    pub proxies: BTreeMap<String, String>,
    /// TLS certificate verification. `None` keeps the default (verify).
    pub verify: Option<bool>,
    /// Extra headers, applied last and overriding any default header.
    pub headers: Vec<(String, String)>,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(60),
            proxies: BTreeMap::new(),
            verify: None,
            headers: Vec::new(),
            user_agent: format!("haverview/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Creates a default configuration with the key taken from [`API_KEY_ENV`].
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_key: resolve_api_key(None),
            ..Self::default()
        }
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Routes requests of `scheme` (`http`, `https` or `all`) through a proxy.
    #[must_use]
    pub fn with_proxy(mut self, scheme: impl Into<String>, url: impl Into<String>) -> Self {
        self.proxies.insert(scheme.into(), url.into());
        self
    }

    /// Enables or disables TLS certificate verification.
    #[must_use]
    pub const fn with_verify(mut self, verify: bool) -> Self {
        self.verify = Some(verify);
        self
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Resolves the API key: explicit argument first, then [`API_KEY_ENV`].
///
/// Blank keys count as absent.
#[must_use]
pub fn resolve_api_key(explicit: Option<String>) -> Option<String> {
    let present = |key: &String| !key.trim().is_empty();
    explicit
        .filter(present)
        .or_else(|| std::env::var(API_KEY_ENV).ok().filter(present))
}

/// Options applied to every request.
///
/// Built in a fixed order: base headers, then proxies, then TLS
/// verification, then the configured header overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    headers: Vec<(String, String)>,
    proxies: BTreeMap<String, String>,
    verify: bool,
    timeout: Duration,
}

impl RequestOptions {
    /// Layers `config` over the defaults for the given key.
    #[must_use]
    pub fn layered(config: &ClientConfig, api_key: Option<&str>) -> Self {
        let mut options = Self {
            headers: Vec::new(),
            proxies: BTreeMap::new(),
            verify: true,
            timeout: config.timeout,
        };

        options.set_header("Content-Type", "application/json");
        options.set_header("User-Agent", &config.user_agent);
        if let Some(key) = api_key {
            options.set_header(API_KEY_HEADER, key);
        }

        options.proxies.extend(
            config
                .proxies
                .iter()
                .map(|(scheme, url)| (scheme.to_lowercase(), url.clone())),
        );

        if let Some(verify) = config.verify {
            options.verify = verify;
        }

        for (name, value) in &config.headers {
            options.set_header(name, value);
        }

        options
    }

    /// Sets a header, replacing any header of the same name.
    fn set_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some(slot) => slot.1 = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Returns a header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns all headers in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns the proxies keyed by lowercased scheme.
    #[must_use]
    pub const fn proxies(&self) -> &BTreeMap<String, String> {
        &self.proxies
    }

    /// Returns whether TLS certificates are verified.
    #[must_use]
    pub const fn verify(&self) -> bool {
        self.verify
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}
