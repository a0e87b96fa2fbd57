//! Error handling for poster-dl.
//!
//! Only a failure while fetching the listing page is allowed to end a run.
//! Per-poster failures are captured as [`Status::Fail`](crate::Status::Fail)
//! inside a [`Summary`](crate::Summary) and never travel up as an [`Error`].

use reqwest::StatusCode;
use std::error::Error as StdError;
use std::io;
use thiserror::Error;

/// Errors that can happen when fetching the listing or a poster.
#[derive(Error, Debug)]
pub enum Error {
    /// The listing page could not be retrieved.
    ///
    /// This is the only error that aborts a batch: without the listing there
    /// is nothing to download.
    #[error("failed to fetch listing {url}")]
    Listing {
        url: String,
        #[source]
        source: Box<Error>,
    },

    /// Transport failure: connection error, timeout, or retries exhausted
    /// on a transient network error.
    #[error("network error")]
    Network {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// The final response carried a client or server error status.
    #[error("{url} answered with HTTP {status}")]
    HttpStatus { url: String, status: StatusCode },

    /// The CSS selector used to locate cover art is malformed.
    #[error("invalid selector {0}")]
    Selector(String),

    /// An image URL that cannot be resolved into an absolute URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// I/O Error.
    #[error("I/O error")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Network {
            source: reqwest_middleware::Error::Reqwest(source),
        }
    }
}

impl Error {
    /// Wrap an error raised while fetching the listing page.
    pub(crate) fn listing(url: impl Into<String>, source: Error) -> Self {
        Error::Listing {
            url: url.into(),
            source: Box::new(source),
        }
    }

    /// Render the error together with every source in its chain.
    ///
    /// `Display` alone only shows the outermost message, which hides the
    /// useful part of a network failure.
    pub fn chain(&self) -> String {
        let mut out = self.to_string();
        let mut source = StdError::source(self);
        while let Some(err) = source {
            out.push_str(": ");
            out.push_str(&err.to_string());
            source = StdError::source(err);
        }
        out
    }
}

/// Result type alias for operations that can fail with a poster-dl error.
pub type Result<T> = std::result::Result<T, Error>;
