//! Configuration structures and defaults for the downloader.
//!
//! There is no configuration file: the defaults below are the behavior of
//! the `poster-dl` binary, and the [`DownloaderBuilder`](super::DownloaderBuilder)
//! is the only way to change them.

use crate::catalog::{COVER_ART_SELECTOR, LISTING_URL};
use crate::http::HttpClientConfig;

use std::path::PathBuf;

/// Directory posters are written to, relative to the working directory.
pub const DEFAULT_DIRECTORY: &str = "src";
/// Size of the worker pool.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Configuration structure for the downloader
#[derive(Clone, Debug)]
pub struct DownloaderConfig {
    /// Directory where to store the posters. Must already exist.
    pub directory: PathBuf,
    /// Listing page enumerating the posters.
    pub listing_url: String,
    /// CSS selector locating cover art on the listing.
    pub selector: String,
    /// Number of maximum concurrent downloads.
    pub concurrent_downloads: usize,
    /// Timeout, retry policy and headers of the shared HTTP client.
    pub http: HttpClientConfig,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            listing_url: LISTING_URL.to_string(),
            selector: COVER_ART_SELECTOR.to_string(),
            concurrent_downloads: DEFAULT_CONCURRENCY,
            http: HttpClientConfig::default(),
        }
    }
}
