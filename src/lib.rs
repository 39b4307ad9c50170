//! trialsearch - ranked retrieval over clinical-trial summaries
//!
//! Given a free-text query over a fixed collection of trial records, returns
//! the top-K records ordered by BM25 relevance plus rule-based boosts for the
//! phase, recruitment status, and location mentioned in the query.
//!
//! # Quick Start
//!
//! ```
//! use trialsearch::{QueryEngine, Record};
//!
//! let records = vec![
//!     Record::new("NCT001")
//!         .with_title("Lung cancer trial")
//!         .with_phase("Phase 1")
//!         .with_status("Recruiting"),
//!     Record::new("NCT002").with_title("Diabetes study"),
//! ];
//!
//! let engine = QueryEngine::build(records);
//! let results = engine.search("lung cancer phase 1 recruiting", 10, true);
//!
//! assert_eq!(results[0].record.id, "NCT001");
//! assert_eq!(results[0].boost_score, 10.0);
//! ```
//!
//! # Architecture
//!
//! - [`trialsearch_core`]: records, scored results, config, errors
//! - [`trialsearch_search`]: tokenizer, BM25 index, filter extraction, boosts, ranking
//! - [`trialsearch_source`]: CSV collection files and the ClinicalTrials.gov fetch
//! - [`trialsearch_eval`]: offline P@5 / nDCG@5 evaluation harness

pub use trialsearch_core::*;
pub use trialsearch_search::*;

pub use trialsearch_eval as eval;
pub use trialsearch_source as source;
