//! HTTP module containing HTTP client functionality.
//!
//! - [`client`] - the shared [`HttpClient`] with tracing, timeout and retry
//! - [`retry`] - the immutable [`RetryPolicy`] injected into the client
//!
//! # Examples
//!
//! ```rust
//! use poster_dl::http::{HttpClient, HttpClientConfig, RetryPolicy};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpClientConfig {
//!     timeout: Duration::from_secs(10),
//!     retry: RetryPolicy::none(),
//!     headers: None,
//! };
//! let client = HttpClient::new(config)?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod retry;

pub use client::{HttpClient, HttpClientConfig, DEFAULT_TIMEOUT};
pub use retry::{RetryPolicy, StatusStrategy, DEFAULT_RETRY_STATUSES};
