//! Collection sources for trialsearch
//!
//! This crate provides:
//! - CSV loading and writing of record collections
//! - Fetching a fresh collection from the ClinicalTrials.gov v2 API
//!
//! Both produce plain `Vec<Record>` in a stable order; index building is
//! left to `trialsearch-search`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod csv;
pub mod fetch;

pub use crate::csv::{load_records, read_records, write_records, COLUMNS};
pub use crate::fetch::{fetch_records, parse_studies, NO_PHASE};
