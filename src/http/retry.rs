//! Retry policy shared by every request of a run.
//!
//! A [`RetryPolicy`] is a plain value handed to
//! [`HttpClient::new`](super::HttpClient::new) through
//! [`HttpClientConfig`](super::HttpClientConfig). It is translated into a
//! `reqwest-retry` exponential backoff plus a [`StatusStrategy`] deciding
//! which responses count as transient.
//!
//! # Examples
//!
//! ```rust
//! use poster_dl::http::RetryPolicy;
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::default();
//! assert_eq!(policy.total, 4);
//! assert_eq!(policy.backoff_delay(1), Duration::from_millis(200));
//! assert_eq!(policy.backoff_delay(3), Duration::from_millis(800));
//! ```

use reqwest::{Method, StatusCode};
use reqwest_retry::{
    default_on_request_failure, policies::ExponentialBackoff, Jitter, Retryable,
    RetryableStrategy,
};
use std::time::Duration;

/// Statuses retried by default: rate limiting and transient server errors.
pub const DEFAULT_RETRY_STATUSES: [StatusCode; 5] = [
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Upper bound for a single backoff sleep.
const MAX_BACKOFF: Duration = Duration::from_secs(120);

/// Immutable retry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempt budget, first attempt included.
    pub total: u32,
    /// Response statuses treated as transient.
    pub statuses: Vec<StatusCode>,
    /// Methods that may be retried at all.
    pub methods: Vec<Method>,
    /// Backoff factor: the sleep before retry `n` is `factor * 2^(n-1)`.
    pub backoff_factor: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            total: 4,
            statuses: DEFAULT_RETRY_STATUSES.to_vec(),
            methods: vec![Method::HEAD, Method::GET, Method::OPTIONS],
            backoff_factor: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            total: 1,
            ..Self::default()
        }
    }

    /// Number of retries following the first attempt.
    pub fn max_retries(&self) -> u32 {
        self.total.saturating_sub(1)
    }

    /// Whether requests using `method` go through the retry middleware.
    pub fn retries_method(&self, method: &Method) -> bool {
        self.methods.contains(method)
    }

    /// Whether a final response with `status` should be retried.
    pub fn retries_status(&self, status: StatusCode) -> bool {
        self.statuses.contains(&status)
    }

    /// Sleep preceding retry number `retry` (1-based).
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(31);
        self.backoff_factor
            .saturating_mul(2u32.saturating_pow(exponent))
            .min(MAX_BACKOFF.max(self.backoff_factor))
    }

    /// Build the `reqwest-retry` backoff schedule for this policy.
    pub(crate) fn backoff(&self) -> ExponentialBackoff {
        let max = MAX_BACKOFF.max(self.backoff_factor);
        ExponentialBackoff::builder()
            .retry_bounds(self.backoff_factor, max)
            .jitter(Jitter::None)
            .base(2)
            .build_with_max_retries(self.max_retries())
    }

    /// Build the strategy classifying responses for this policy.
    pub(crate) fn strategy(&self) -> StatusStrategy {
        StatusStrategy {
            statuses: self.statuses.clone(),
        }
    }
}

/// Classifies responses as transient when their status is in a fixed set.
///
/// Transport errors keep `reqwest-retry`'s default classification, so
/// timeouts and connection resets are retried as well. Once the budget is
/// spent, a retryable status comes back as the last response, while a
/// transport error comes back wrapped in `RetryError::WithRetries` with the
/// original error as its source.
#[derive(Debug, Clone)]
pub struct StatusStrategy {
    statuses: Vec<StatusCode>,
}

impl RetryableStrategy for StatusStrategy {
    fn handle(
        &self,
        res: &Result<reqwest::Response, reqwest_middleware::Error>,
    ) -> Option<Retryable> {
        match res {
            Ok(response) if self.statuses.contains(&response.status()) => {
                Some(Retryable::Transient)
            }
            Ok(_) => None,
            Err(error) => default_on_request_failure(error),
        }
    }
}
