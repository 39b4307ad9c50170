//! Core search types
//!
//! This module defines the request and result types shared by the query
//! engine and everything that consumes it:
//! - SearchRequest: query text, top-k and the boost switch
//! - ScoredResult: a record with its statistical, boost and final scores
//! - SearchStats: execution statistics for debugging/monitoring
//! - SearchResponse: ranked results plus stats

use crate::record::Record;
use serde::{Deserialize, Serialize};

/// Default number of results returned by a request
pub const DEFAULT_TOP_K: usize = 10;

// ============================================================================
// SearchRequest
// ============================================================================

/// Request for a ranked search
///
/// # Examples
///
/// ```
/// use trialsearch_core::SearchRequest;
///
/// let req = SearchRequest::new("lung cancer phase 2")
///     .with_k(20)
///     .with_filters(false);
///
/// assert_eq!(req.query, "lung cancer phase 2");
/// assert_eq!(req.k, 20);
/// assert!(!req.use_filters);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Raw query text
    pub query: String,

    /// Maximum results to return (top-k); 0 returns nothing
    pub k: usize,

    /// Whether entity boosts are computed
    pub use_filters: bool,
}

impl SearchRequest {
    /// Create a new SearchRequest with defaults
    ///
    /// Default values:
    /// - k: 10
    /// - use_filters: true
    pub fn new(query: impl Into<String>) -> Self {
        SearchRequest {
            query: query.into(),
            k: DEFAULT_TOP_K,
            use_filters: true,
        }
    }

    /// Builder: set top-k results count
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Builder: enable or disable entity boosts
    pub fn with_filters(mut self, use_filters: bool) -> Self {
        self.use_filters = use_filters;
        self
    }
}

// ============================================================================
// ScoredResult
// ============================================================================

/// A single ranked result
///
/// `final_score` is always `statistical_score + boost_score`. Both
/// components are kept so evaluation code can inspect them separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    /// The matched record
    pub record: Record,

    /// BM25 score of the record against the query tokens
    pub statistical_score: f64,

    /// Sum of entity boosts (0.0 when boosting is off)
    pub boost_score: f64,

    /// `statistical_score + boost_score`
    pub final_score: f64,

    /// Rank in result set (1-indexed)
    pub rank: u32,
}

impl ScoredResult {
    /// Create a result; the final score is derived from the two components
    pub fn new(record: Record, statistical_score: f64, boost_score: f64, rank: u32) -> Self {
        ScoredResult {
            record,
            statistical_score,
            boost_score,
            final_score: statistical_score + boost_score,
            rank,
        }
    }

    /// Identifier of the underlying record
    pub fn id(&self) -> &str {
        &self.record.id
    }
}

// ============================================================================
// SearchStats
// ============================================================================

/// Execution statistics for a search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Time spent in search (microseconds)
    pub elapsed_micros: u64,

    /// Records scored (always the whole collection)
    pub candidates_considered: usize,

    /// Records with a non-zero statistical score
    pub lexical_matches: usize,

    /// Records that earned at least one boost
    pub boosted: usize,
}

impl SearchStats {
    /// Create new SearchStats
    pub fn new(elapsed_micros: u64, candidates: usize) -> Self {
        SearchStats {
            elapsed_micros,
            candidates_considered: candidates,
            lexical_matches: 0,
            boosted: 0,
        }
    }
}

// ============================================================================
// SearchResponse
// ============================================================================

/// Ranked results of one search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Results ordered by final score, best first
    pub results: Vec<ScoredResult>,

    /// Whether more records existed than `k`
    pub truncated: bool,

    /// Execution statistics
    pub stats: SearchStats,
}

impl SearchResponse {
    /// Number of results
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if there are no results
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Identifiers in rank order
    pub fn ids(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.id()).collect()
    }
}
