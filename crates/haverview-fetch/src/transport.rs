//! HTTP transport.

use async_trait::async_trait;
use reqwest::{Client, Proxy, Url};
use std::time::Duration;
use thiserror::Error;

use crate::RequestOptions;

/// Errors that can occur at the transport level.
#[derive(Error, Debug)]
pub enum TransportError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Proxy configured for an unknown scheme.
    #[error("Invalid proxy scheme '{0}' (expected http, https or all)")]
    ProxyScheme(String),

    /// The connection could not be established.
    #[error("Connection failed: {0}")]
    Connection(String),
}

/// Raw response of a GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl Response {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for a 2xx status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Issues GET requests on behalf of the client.
#[async_trait]
pub trait Transport: std::fmt::Debug + Send + Sync {
    /// Sends a GET request with the given headers.
    ///
    /// Non-2xx statuses are returned as responses, not errors.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received.
    async fn get(&self, url: &Url, headers: &[(String, String)])
    -> Result<Response, TransportError>;
}

/// [`Transport`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport honouring the proxy, TLS and timeout options.
    ///
    /// # Errors
    ///
    /// Returns an error if a proxy is invalid or the client cannot be built.
    pub fn new(options: &RequestOptions) -> Result<Self, TransportError> {
        let mut builder = Client::builder()
            .timeout(options.timeout())
            // Connection timeout (separate from request timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .gzip(true);

        for (scheme, url) in options.proxies() {
            let proxy = match scheme.as_str() {
                "http" => Proxy::http(url.as_str())?,
                "https" => Proxy::https(url.as_str())?,
                "all" => Proxy::all(url.as_str())?,
                other => return Err(TransportError::ProxyScheme(other.to_string())),
            };
            builder = builder.proxy(proxy);
        }

        if !options.verify() {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        url: &Url,
        headers: &[(String, String)],
    ) -> Result<Response, TransportError> {
        let mut request = self.client.get(url.clone());
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(Response { status, body })
    }
}
