//! HTTP client setup and middleware configuration.
//!
//! The client wraps a single `reqwest` connection pool in two middleware
//! stacks: one with tracing and retry for the methods listed in the
//! [`RetryPolicy`], one with tracing only for everything else.
//!
//! # Examples
//!
//! ```rust
//! use poster_dl::http::{HttpClient, HttpClientConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new(HttpClientConfig::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! ```rust,no_run
//! use poster_dl::http::{HttpClient, HttpClientConfig};
//! use reqwest::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new(HttpClientConfig::default())?;
//! let url = Url::parse("https://example.com/poster_large.jpg")?;
//! let bytes = client.fetch_ok(&url).await?;
//! println!("{} bytes", bytes.len());
//! # Ok(())
//! # }
//! ```

use super::retry::RetryPolicy;
use crate::error::{Error, Result};

use bytes::Bytes;
use reqwest::{header::HeaderMap, Method, Response, StatusCode, Url};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_retry::RetryTransientMiddleware;
use reqwest_tracing::TracingMiddleware;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Per-request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for HTTP client setup.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Timeout applied to every request.
    pub timeout: Duration,
    /// Retry policy for transient failures.
    pub retry: RetryPolicy,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            headers: None,
        }
    }
}

/// HTTP client shared by the listing fetch and every poster download.
#[derive(Clone)]
pub struct HttpClient {
    retrying: ClientWithMiddleware,
    direct: ClientWithMiddleware,
    retry: RetryPolicy,
    timeout: Duration,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("retry", &self.retry)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HttpClient {
    /// Creates an HTTP client from the given configuration.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let mut inner_client_builder = reqwest::Client::builder().timeout(config.timeout);

        if let Some(headers) = config.headers {
            inner_client_builder = inner_client_builder.default_headers(headers);
        }

        // Both stacks share the same connection pool.
        let inner_client = inner_client_builder.build()?;

        let retrying = ClientBuilder::new(inner_client.clone())
            .with(TracingMiddleware::default())
            .with(RetryTransientMiddleware::new_with_policy_and_strategy(
                config.retry.backoff(),
                config.retry.strategy(),
            ))
            .build();

        let direct = ClientBuilder::new(inner_client)
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            retrying,
            direct,
            retry: config.retry,
            timeout: config.timeout,
        })
    }

    /// Gets the retry policy.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Gets the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Starts a request, routed through the retry middleware when the
    /// policy allows retrying `method`.
    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        if self.retry.retries_method(&method) {
            self.retrying.request(method, url)
        } else {
            self.direct.request(method, url)
        }
    }

    /// Sends a GET request. The response status is not checked.
    pub async fn get(&self, url: &Url) -> Result<Response> {
        debug!("GET {}", url);
        let res = self.request(Method::GET, url.clone()).send().await?;
        Ok(res)
    }

    /// Fetches a body along with the final status, whatever that status is.
    pub async fn fetch(&self, url: &Url) -> Result<(Bytes, StatusCode)> {
        let res = self.get(url).await?;
        let status = res.status();
        let body = res.bytes().await?;
        Ok((body, status))
    }

    /// Fetches a body, failing with [`Error::HttpStatus`] when the final
    /// status is a client or server error.
    pub async fn fetch_ok(&self, url: &Url) -> Result<Bytes> {
        let res = self.get(url).await?;
        let status = res.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status,
            });
        }
        Ok(res.bytes().await?)
    }
}
