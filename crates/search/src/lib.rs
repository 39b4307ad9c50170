//! Ranked retrieval over clinical-trial records
//!
//! This crate provides:
//! - Tokenizer shared by indexing and querying
//! - InvertedIndex over tokenized documents
//! - Scorer trait with the BM25 Okapi implementation
//! - FilterExtractor for phase/status hints in query text
//! - BoostPolicy applying the entity boost rules per record
//! - Fuser trait with additive fusion and stable top-k selection
//! - QueryEngine tying these together, and EngineHandle for rebuilds
//!
//! # Usage
//!
//! ```
//! use trialsearch_core::Record;
//! use trialsearch_search::QueryEngine;
//!
//! let engine = QueryEngine::build(vec![
//!     Record::new("NCT001").with_title("Melanoma vaccine").with_status("Recruiting"),
//!     Record::new("NCT002").with_title("Melanoma surgery").with_status("Completed"),
//! ]);
//!
//! let results = engine.search("melanoma recruiting", 10, true);
//! assert_eq!(results[0].record.id, "NCT001");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boost;
pub mod builder;
pub mod engine;
pub mod filters;
pub mod fuser;
pub mod index;
pub mod scorer;
pub mod tokenizer;

// Re-export commonly used types
pub use boost::{BoostBreakdown, BoostPolicy, LOCATION_BOOST, PHASE_BOOST, STATUS_BOOST};
pub use builder::{CorpusIndex, IndexBuilder};
pub use engine::{EngineHandle, QueryEngine};
pub use filters::{FilterExtractor, PhaseMatcher, QueryFilters};
pub use fuser::{AdditiveFuser, Candidate, FusedResult, Fuser};
pub use index::{DocId, InvertedIndex, PostingEntry, PostingList, TermId};
pub use scorer::{Bm25Scorer, Scorer};
pub use tokenizer::tokenize;
