//! poster-dl fetches a film catalog listing, extracts every cover art image
//! from it and downloads the posters concurrently, skipping the ones already
//! on disk.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use poster_dl::{DownloaderBuilder, Error};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("posters"))
//!     .build()?;
//! let report = downloader.run().await?;
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`catalog`] - listing fetch and poster extraction
//! - [`download`] - the per-poster worker, `Summary` and `BatchReport`
//! - [`downloader`] - the `Downloader` orchestrator and its builder
//! - [`error`] - the `Error` enum
//! - [`http`] - the shared HTTP client and its retry policy

pub mod catalog;
pub mod download;
pub mod downloader;
pub mod error;
pub mod http;

pub use catalog::{PosterEntry, PosterExtractor};
pub use download::{BatchReport, Status, Summary};
pub use downloader::{Downloader, DownloaderBuilder};
pub use error::{Error, Result};
pub use http::{HttpClient, HttpClientConfig, RetryPolicy};
