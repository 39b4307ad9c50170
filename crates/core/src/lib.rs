//! Core types for trialsearch
//!
//! This crate defines the foundational types used throughout the system:
//! - Record: one clinical-trial entry, all-text fields
//! - Search types: SearchRequest, ScoredResult, SearchStats, SearchResponse
//! - Config: `trialsearch.toml` with BM25 and fetch settings
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod record;
pub mod search_types;

// Re-export commonly used types
pub use config::{Bm25Params, FetchConfig, SearchConfig, CONFIG_FILE_NAME};
pub use error::{Error, Result};
pub use record::Record;
pub use search_types::{ScoredResult, SearchRequest, SearchResponse, SearchStats, DEFAULT_TOP_K};
