//! Fusion of statistical and boost scores into the final ranking
//!
//! This module provides:
//! - Candidate: one record's score components
//! - Fuser trait for pluggable fusion algorithms
//! - AdditiveFuser: final = statistical + boost, stable descending sort

use crate::index::DocId;

// ============================================================================
// Candidate
// ============================================================================

/// Score components of one record before ranking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Position of the record in the collection
    pub doc_id: DocId,
    /// BM25 score
    pub statistical_score: f64,
    /// Sum of entity boosts
    pub boost_score: f64,
}

impl Candidate {
    /// Create a new candidate
    pub fn new(doc_id: DocId, statistical_score: f64, boost_score: f64) -> Self {
        Candidate {
            doc_id,
            statistical_score,
            boost_score,
        }
    }

    /// `statistical_score + boost_score`
    pub fn final_score(&self) -> f64 {
        self.statistical_score + self.boost_score
    }
}

// ============================================================================
// FusedResult
// ============================================================================

/// Ranked, truncated candidates
#[derive(Debug, Clone, Default)]
pub struct FusedResult {
    /// Best first
    pub ranked: Vec<Candidate>,
    /// Whether candidates were dropped by the top-k cut
    pub truncated: bool,
}

impl FusedResult {
    /// Create a new FusedResult
    pub fn new(ranked: Vec<Candidate>, truncated: bool) -> Self {
        FusedResult { ranked, truncated }
    }
}

// ============================================================================
// Fuser Trait
// ============================================================================

/// Pluggable fusion interface
///
/// Candidates arrive in collection order. Implementations must be stable:
/// candidates with equal final scores keep their relative input order.
///
/// # Thread Safety
///
/// Fusers must be Send + Sync so an engine can be shared by readers.
pub trait Fuser: Send + Sync {
    /// Rank candidates and keep the best `k`
    fn fuse(&self, candidates: Vec<Candidate>, k: usize) -> FusedResult;

    /// Name for debugging and logging
    fn name(&self) -> &str;
}

// ============================================================================
// AdditiveFuser
// ============================================================================

/// Additive fusion: sort by `statistical + boost`, descending
///
/// Uses a stable sort, so ties resolve to collection order.
#[derive(Debug, Clone, Default)]
pub struct AdditiveFuser;

impl AdditiveFuser {
    /// Create a new AdditiveFuser
    pub fn new() -> Self {
        AdditiveFuser
    }
}

impl Fuser for AdditiveFuser {
    fn fuse(&self, mut candidates: Vec<Candidate>, k: usize) -> FusedResult {
        if k == 0 {
            return FusedResult::new(vec![], !candidates.is_empty());
        }

        // slice::sort_by is stable; total_cmp also orders NaN
        candidates.sort_by(|a, b| b.final_score().total_cmp(&a.final_score()));

        let truncated = candidates.len() > k;
        candidates.truncate(k);

        FusedResult::new(candidates, truncated)
    }

    fn name(&self) -> &str {
        "additive"
    }
}

// ============================================================================
// Tests
// ============================================================================
