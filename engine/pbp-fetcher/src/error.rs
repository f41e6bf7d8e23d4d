//! Error types for the play-by-play fetcher

use thiserror::Error;

/// Result type for fetcher operations
pub type Result<T> = std::result::Result<T, FetchError>;

/// Provider failures. Any of these aborts the run before analysis starts.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse play-by-play CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid play-by-play source: {0}")]
    InvalidSource(String),
}
