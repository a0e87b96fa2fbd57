//! Builder pattern implementation for creating [`Downloader`] instances.
//!
//! # Examples
//!
//! ```rust
//! use poster_dl::downloader::DownloaderBuilder;
//! use poster_dl::http::RetryPolicy;
//! use std::path::PathBuf;
//!
//! # fn example() -> Result<(), poster_dl::Error> {
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("./posters"))
//!     .concurrent_downloads(4)
//!     .retry_policy(RetryPolicy::none())
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use super::{config::DownloaderConfig, downloader::Downloader};
use crate::catalog::PosterExtractor;
use crate::error::Result;
use crate::http::{HttpClient, RetryPolicy};

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use std::path::PathBuf;
use std::time::Duration;

/// A builder used to create a [`Downloader`].
///
/// ```rust
/// # fn main() -> Result<(), poster_dl::Error> {
/// use poster_dl::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().directory("posters".into()).build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Sets the directory where to store the posters.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = directory;
        self
    }

    /// Sets the listing page to scrape.
    pub fn listing_url(mut self, url: impl Into<String>) -> Self {
        self.config.listing_url = url.into();
        self
    }

    /// Sets the CSS selector locating cover art images.
    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.config.selector = selector.into();
        self
    }

    /// Set the number of concurrent downloads.
    pub fn concurrent_downloads(mut self, concurrent_downloads: usize) -> Self {
        self.config.concurrent_downloads = concurrent_downloads;
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.http.timeout = timeout;
        self
    }

    /// Set the retry policy of the HTTP client.
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.config.http.retry = retry;
        self
    }

    /// Add the http header.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.config
            .http
            .headers
            .get_or_insert_with(HeaderMap::new)
            .insert(name, value);
        self
    }

    /// Create the [`Downloader`] with the specified options.
    ///
    /// Fails when the HTTP client cannot be initialized or the selector does
    /// not parse.
    pub fn build(self) -> Result<Downloader> {
        let client = HttpClient::new(self.config.http.clone())?;
        let extractor = PosterExtractor::with_selector(&self.config.selector)?;
        Ok(Downloader::new(self.config, client, extractor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use reqwest::header::USER_AGENT;

    #[test]
    fn test_builder_defaults() {
        let downloader = DownloaderBuilder::new().build().unwrap();

        assert_eq!(downloader.directory(), &PathBuf::from("src"));
        assert_eq!(downloader.concurrent_downloads(), 8);
        assert_eq!(
            downloader.listing_url(),
            "https://www.criterion.com/shop/browse/list?sort=spine_number"
        );
        assert_eq!(downloader.client().timeout(), Duration::from_secs(60));
        assert_eq!(downloader.client().retry_policy(), &RetryPolicy::default());
    }

    #[test]
    fn test_builder_header_merges() {
        let builder = DownloaderBuilder::new()
            .header(USER_AGENT, HeaderValue::from_static("poster-dl-test"))
            .header("x-extra", HeaderValue::from_static("1"));

        let headers = builder.config.http.headers.as_ref().unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get(USER_AGENT).unwrap(), "poster-dl-test");
    }

    #[test]
    fn test_builder_rejects_bad_selector() {
        let result = DownloaderBuilder::new().selector("img[[").build();
        assert!(matches!(result, Err(Error::Selector(_))));
    }
}
