//! Downloader module containing the batch orchestrator, its builder and
//! configuration.
//!
//! - `downloader` - [`Downloader`] running listing, extraction and the worker pool
//! - `builder` - [`DownloaderBuilder`] for flexible configuration
//! - `config` - [`DownloaderConfig`] and its defaults
//!
//! # Examples
//!
//! ```rust,no_run
//! use poster_dl::downloader::DownloaderBuilder;
//! use poster_dl::catalog::PosterEntry;
//!
//! # async fn example() -> Result<(), poster_dl::Error> {
//! let downloader = DownloaderBuilder::new().build()?;
//! let summaries = downloader
//!     .download(&[PosterEntry::new("Ran", "https://example.com/ran_large.jpg")])
//!     .await;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod downloader;

pub use builder::DownloaderBuilder;
pub use config::{DownloaderConfig, DEFAULT_CONCURRENCY, DEFAULT_DIRECTORY};
pub use downloader::Downloader;
