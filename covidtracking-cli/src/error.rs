//! CLI error types.

use thiserror::Error;

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    /// Library operation failed.
    #[error(transparent)]
    Tracker(#[from] covidtracking::Error),

    /// Invalid argument combination.
    #[error("invalid usage: {0}")]
    Usage(String),

    /// Failed to serialize output.
    #[error("failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}
