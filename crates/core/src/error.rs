//! Error types for trialsearch
//!
//! Ranking itself is infallible. These errors come from the collaborators
//! around it: reading collection files, talking to the remote registry,
//! and loading configuration.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use thiserror::Error;

/// Result type alias for trialsearch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for trialsearch
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Collection file could not be read or written as CSV
    #[error("CSV error: {0}")]
    CsvError(String),

    /// JSON payload could not be parsed or produced
    #[error("JSON error: {0}")]
    JsonError(String),

    /// Remote registry request failed
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Configuration file is missing a value or holds an invalid one
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid argument supplied by a caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Build a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::ConfigError(msg.into())
    }

    /// Build an invalid-input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Build an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Error::HttpError(msg.into())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::CsvError(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::JsonError(e.to_string())
    }
}
