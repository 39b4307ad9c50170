//! Statistical scoring over the inverted index
//!
//! This module provides:
//! - Scorer trait for pluggable corpus scorers
//! - Bm25Scorer: Okapi BM25 with a floored IDF table
//!
//! # BM25 Formula
//!
//! For each query token t (repeats count once per occurrence):
//! score += IDF(t) * (tf * (k1 + 1)) / (tf + k1 * (1 - b + b * dl/avgdl))
//!
//! Where:
//! - IDF(t) = ln(N - df + 0.5) - ln(df + 0.5)
//! - terms whose IDF is negative get `epsilon * mean IDF` instead
//! - tf = term frequency in document, dl = document length
//! - avgdl = average document length over the whole corpus

use crate::index::{InvertedIndex, TermId};
use trialsearch_core::Bm25Params;

// ============================================================================
// Scorer Trait
// ============================================================================

/// Pluggable corpus scoring interface
///
/// A scorer scores a token sequence against every document of an index in
/// one pass. Documents sharing no token with the query must get exactly
/// `0.0`.
///
/// # Thread Safety
///
/// Scorers must be Send + Sync so a built index can be shared by readers.
pub trait Scorer: Send + Sync {
    /// Score `query_terms` against every document; one score per document.
    fn score_all(&self, index: &InvertedIndex, query_terms: &[String]) -> Vec<f64>;

    /// Name for debugging and logging
    fn name(&self) -> &str;
}

// ============================================================================
// Bm25Scorer
// ============================================================================

/// Okapi BM25 scorer fitted to one corpus
///
/// The IDF table is computed once at fit time, indexed by term id. A scorer
/// is only meaningful against the index it was fitted on.
#[derive(Debug, Clone)]
pub struct Bm25Scorer {
    params: Bm25Params,
    /// IDF per term id, negative values already floored
    idf: Vec<f64>,
    /// Mean raw IDF over the vocabulary (0.0 for an empty vocabulary)
    average_idf: f64,
}

impl Bm25Scorer {
    /// Fit IDF values to the corpus held by `index`.
    pub fn fit(index: &InvertedIndex, params: Bm25Params) -> Self {
        let n = index.total_docs() as f64;

        let mut idf: Vec<f64> = index
            .posting_lists()
            .iter()
            .map(|postings| {
                let df = postings.len() as f64;
                (n - df + 0.5).ln() - (df + 0.5).ln()
            })
            .collect();

        let average_idf = if idf.is_empty() {
            0.0
        } else {
            idf.iter().sum::<f64>() / idf.len() as f64
        };

        let floor = params.epsilon * average_idf;
        for value in idf.iter_mut() {
            if *value < 0.0 {
                *value = floor;
            }
        }

        Bm25Scorer {
            params,
            idf,
            average_idf,
        }
    }

    /// Tuning constants in use
    pub fn params(&self) -> Bm25Params {
        self.params
    }

    /// Mean raw IDF over the vocabulary
    pub fn average_idf(&self) -> f64 {
        self.average_idf
    }

    /// IDF of a term; 0.0 for terms outside the vocabulary
    pub fn idf(&self, index: &InvertedIndex, term: &str) -> f64 {
        index
            .term_id(term)
            .map(|id| self.idf_by_id(id))
            .unwrap_or(0.0)
    }

    fn idf_by_id(&self, id: TermId) -> f64 {
        self.idf[id as usize]
    }

    /// Saturated, length-normalized term frequency component
    fn tf_component(&self, tf: f64, doc_len: f64, avg_len: f64) -> f64 {
        let k1 = self.params.k1;
        let b = self.params.b;
        (tf * (k1 + 1.0)) / (tf + k1 * (1.0 - b + b * doc_len / avg_len))
    }
}

impl Scorer for Bm25Scorer {
    fn score_all(&self, index: &InvertedIndex, query_terms: &[String]) -> Vec<f64> {
        let mut scores = vec![0.0; index.total_docs()];

        // Any posting implies a non-empty document, so avg_len > 0 below
        let avg_len = index.avg_doc_len();

        for term in query_terms {
            let Some(term_id) = index.term_id(term) else {
                continue;
            };
            let idf = self.idf_by_id(term_id);
            for entry in &index.postings(term_id).entries {
                let doc_len = f64::from(index.doc_len(entry.doc_id));
                scores[entry.doc_id as usize] +=
                    idf * self.tf_component(f64::from(entry.tf), doc_len, avg_len);
            }
        }

        scores
    }

    fn name(&self) -> &str {
        "bm25-okapi"
    }
}

// ============================================================================
// Tests
// ============================================================================
