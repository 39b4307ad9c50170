//! Index builder: records → tokenized corpus → BM25 model
//!
//! A [`CorpusIndex`] is built once per collection snapshot and is read-only
//! afterwards. Refreshing the collection means building a new one.

use crate::index::InvertedIndex;
use crate::scorer::{Bm25Scorer, Scorer};
use crate::tokenizer::tokenize;
use trialsearch_core::{Bm25Params, Record};

// ============================================================================
// CorpusIndex
// ============================================================================

/// Records plus the statistical model built over them
#[derive(Debug, Clone)]
pub struct CorpusIndex {
    /// Collection in its original order
    records: Vec<Record>,
    /// Tokenized document per record
    documents: Vec<Vec<String>>,
    inverted: InvertedIndex,
    scorer: Bm25Scorer,
}

impl CorpusIndex {
    /// Records in collection order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Tokenized document of a record
    pub fn document(&self, position: usize) -> Option<&[String]> {
        self.documents.get(position).map(Vec::as_slice)
    }

    /// Underlying inverted index
    pub fn inverted(&self) -> &InvertedIndex {
        &self.inverted
    }

    /// BM25 scorer fitted to this corpus
    pub fn scorer(&self) -> &Bm25Scorer {
        &self.scorer
    }

    /// BM25 score of `query_terms` against every record, in collection order
    ///
    /// Records sharing no token with the query score exactly `0.0`.
    pub fn score(&self, query_terms: &[String]) -> Vec<f64> {
        self.scorer.score_all(&self.inverted, query_terms)
    }
}

// ============================================================================
// IndexBuilder
// ============================================================================

/// Builds a [`CorpusIndex`] from a record collection
///
/// # Example
///
/// ```
/// use trialsearch_core::Record;
/// use trialsearch_search::IndexBuilder;
///
/// let index = IndexBuilder::new().build(vec![
///     Record::new("a").with_title("Asthma inhaler study"),
///     Record::new("b").with_title("Migraine prevention"),
///     Record::new("c").with_title("Sleep apnea device"),
/// ]);
///
/// let scores = index.score(&["asthma".to_string()]);
/// assert!(scores[0] > 0.0);
/// assert_eq!(scores[1], 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexBuilder {
    params: Bm25Params,
}

impl IndexBuilder {
    /// Builder with the default BM25 constants (k1 = 1.5, b = 0.75)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set BM25 constants
    pub fn with_params(mut self, params: Bm25Params) -> Self {
        self.params = params;
        self
    }

    /// Tokenize every record and fit the BM25 model.
    ///
    /// Never fails. An empty collection yields an index that scores every
    /// query as nothing. Parameters that fail [`Bm25Params::validate`] are
    /// replaced by the defaults.
    pub fn build(&self, records: Vec<Record>) -> CorpusIndex {
        let params = match self.params.validate() {
            Ok(()) => self.params,
            Err(e) => {
                tracing::warn!(
                    target: "trialsearch::index",
                    error = %e,
                    "Invalid BM25 parameters, using defaults"
                );
                Bm25Params::default()
            }
        };

        let documents: Vec<Vec<String>> = records
            .iter()
            .map(|record| tokenize(&record.document_text()))
            .collect();

        let inverted = InvertedIndex::from_documents(&documents);
        let scorer = Bm25Scorer::fit(&inverted, params);

        tracing::info!(
            target: "trialsearch::index",
            documents = inverted.total_docs(),
            vocabulary = inverted.vocabulary_size(),
            avg_doc_len = inverted.avg_doc_len(),
            scorer = scorer.name(),
            "Index built"
        );

        CorpusIndex {
            records,
            documents,
            inverted,
            scorer,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
