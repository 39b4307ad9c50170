//! Evaluation errors

use std::io;
use thiserror::Error;

/// Result type alias for evaluation operations
pub type EvalResult<T> = std::result::Result<T, EvalError>;

/// Errors raised while building templates or computing metrics
#[derive(Debug, Error)]
pub enum EvalError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Judgment file is not valid CSV
    #[error("CSV error: {0}")]
    Csv(String),

    /// Judgment file lacks a required column
    #[error("judgment file has no '{0}' column")]
    MissingColumn(&'static str),

    /// Relevance column present but never filled in
    #[error("relevance judgments are missing; fill the relevance column of {path} first")]
    MissingJudgments {
        /// File that was read
        path: String,
    },
}

impl From<csv::Error> for EvalError {
    fn from(e: csv::Error) -> Self {
        EvalError::Csv(e.to_string())
    }
}
