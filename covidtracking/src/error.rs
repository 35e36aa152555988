//! Crate-wide error types.

use thiserror::Error;

use crate::client::HttpError;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by tracker operations.
///
/// There is no retry or partial-failure recovery anywhere in the crate;
/// every failure propagates to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Network failure or non-success HTTP status.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// Response body is not valid JSON.
    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A date string failed ISO-8601 (`YYYY-MM-DD`) parsing.
    #[error("malformed date {value:?}: {source}")]
    MalformedDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A data payload carried no usable `date` field.
    #[error("payload has no date field")]
    MissingDate,

    /// Access to an observation field that was not extracted.
    #[error("unknown observation field {name:?}")]
    UnknownField { name: String },

    /// Structurally unusable payload.
    #[error("unexpected payload shape: {0}")]
    Payload(String),

    /// Unreadable or malformed configuration file.
    #[error("configuration error: {0}")]
    Config(String),
}
