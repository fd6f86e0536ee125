//! Error types for solvetrack-core

use thiserror::Error;

/// Main error type for the solvetrack-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Requested year/month does not name a real calendar month
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for solvetrack-core
pub type Result<T> = std::result::Result<T, Error>;
