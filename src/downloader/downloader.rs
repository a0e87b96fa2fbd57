//! The batch orchestrator.
//!
//! [`Downloader::run`] fetches the listing, extracts the posters and hands
//! them to a pool of workers bounded by `concurrent_downloads`. Only the
//! listing fetch may fail the run; every poster ends up as a [`Summary`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use poster_dl::downloader::DownloaderBuilder;
//!
//! # async fn example() -> Result<(), poster_dl::Error> {
//! let downloader = DownloaderBuilder::new().build()?;
//! let report = downloader.run().await?;
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```

use super::config::DownloaderConfig;
use crate::catalog::{fetch_listing, PosterEntry, PosterExtractor};
use crate::download::{process_one, target_path, BatchReport, Summary};
use crate::error::Result;
use crate::http::HttpClient;

use futures::stream::{self, StreamExt};
use reqwest::Url;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

/// Represents the download controller.
#[derive(Debug, Clone)]
pub struct Downloader {
    config: DownloaderConfig,
    client: HttpClient,
    extractor: PosterExtractor,
}

impl Downloader {
    pub(crate) fn new(
        config: DownloaderConfig,
        client: HttpClient,
        extractor: PosterExtractor,
    ) -> Self {
        Self {
            config,
            client,
            extractor,
        }
    }

    /// Gets the directory where posters are written.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    /// Gets the listing URL.
    pub fn listing_url(&self) -> &str {
        &self.config.listing_url
    }

    /// Gets the number of concurrent downloads.
    pub fn concurrent_downloads(&self) -> usize {
        self.config.concurrent_downloads
    }

    /// Gets the shared HTTP client.
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Runs a whole batch: listing, extraction, downloads.
    ///
    /// Returns an error only when the listing cannot be fetched.
    pub async fn run(&self) -> Result<BatchReport> {
        let body = fetch_listing(&self.client, &self.config.listing_url).await?;
        let entries = self.extractor.extract(&body);
        info!("Found {} posters", entries.len());

        let summaries = self.download(&entries).await;
        Ok(BatchReport::new(summaries))
    }

    /// Downloads the given posters through the worker pool.
    ///
    /// Summaries come back in completion order. Entries whose name collides
    /// with an earlier entry are not dispatched.
    pub async fn download(&self, entries: &[PosterEntry]) -> Vec<Summary> {
        let base = Url::parse(&self.config.listing_url).ok();
        let (dispatch, mut summaries) = self.plan(entries);

        let completed = stream::iter(dispatch)
            .map(|entry| process_one(&self.client, base.as_ref(), entry, &self.config.directory))
            .buffer_unordered(self.config.concurrent_downloads.max(1))
            .collect::<Vec<_>>()
            .await;

        summaries.extend(completed);
        summaries
    }

    /// Splits entries into the ones to dispatch and the ones rejected for
    /// sharing a target path with an earlier entry.
    ///
    /// An exact repeat is skipped. A different URL under the same name fails,
    /// since only one of the two posters could ever be stored.
    fn plan<'a>(&self, entries: &'a [PosterEntry]) -> (Vec<&'a PosterEntry>, Vec<Summary>) {
        let mut seen: HashMap<&str, &PosterEntry> = HashMap::new();
        let mut dispatch = Vec::with_capacity(entries.len());
        let mut rejected = Vec::new();

        for entry in entries {
            match seen.get(entry.name.as_str()).copied() {
                None => {
                    seen.insert(&entry.name, entry);
                    dispatch.push(entry);
                }
                Some(first) => {
                    let summary =
                        Summary::new(entry.clone(), target_path(&self.config.directory, entry));
                    if first.url == entry.url {
                        info!("{} is listed twice, skip", entry.name);
                        rejected.push(summary.skip("duplicate entry"));
                    } else {
                        warn!(
                            "name collision: {} also used by {}, not downloading {}",
                            entry.name, first.url, entry.url
                        );
                        rejected.push(summary.fail(format!(
                            "name collision with {}",
                            first.url
                        )));
                    }
                }
            }
        }

        (dispatch, rejected)
    }
}
