//! HTTP client abstraction for testability.
//!
//! The tracker talks to the API through the [`HttpClient`] trait so tests
//! can inject a mock instead of a real network client.

use std::time::Duration;

use thiserror::Error;

/// Default timeout for API requests (30 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised by the HTTP transport.
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    /// Failed to construct the underlying client.
    #[error("failed to create HTTP client: {0}")]
    Build(String),

    /// The request could not be sent or timed out.
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Trait for blocking HTTP GET operations.
///
/// # Returns
///
/// The response body as text, or an error for transport failures and
/// non-success statuses.
pub trait HttpClient {
    fn get(&self, url: &str) -> Result<String, HttpError>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn get(&self, url: &str) -> Result<String, HttpError> {
        (**self).get(url)
    }
}

/// Real HTTP client implementation using blocking reqwest.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a client with the default timeout.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<String, HttpError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| HttpError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().map_err(|e| HttpError::Body(e.to_string()))
    }
}
