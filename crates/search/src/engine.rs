//! Query engine: filters, boosts, fusion and ranking
//!
//! One `search` call is a pure function of (query, k, use_filters, index):
//!
//! 1. Tokenize the query and score every record with BM25
//! 2. If boosting is on, extract phase/status/location hints and evaluate
//!    the boost rules per record
//! 3. Fuse `statistical + boost`, stable-sort descending, keep the top k
//!
//! The engine holds no per-call state. [`EngineHandle`] lets a long-lived
//! caller swap in an engine built over a refreshed collection without
//! touching the one readers are using.

use crate::boost::BoostPolicy;
use crate::builder::{CorpusIndex, IndexBuilder};
use crate::filters::{FilterExtractor, QueryFilters};
use crate::fuser::{AdditiveFuser, Candidate, Fuser};
use crate::tokenizer::tokenize;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;
use trialsearch_core::{
    Bm25Params, Record, ScoredResult, SearchRequest, SearchResponse, SearchStats,
};

// ============================================================================
// QueryEngine
// ============================================================================

/// Ranked search over one collection snapshot
///
/// # Example
///
/// ```
/// use trialsearch_core::Record;
/// use trialsearch_search::QueryEngine;
///
/// let engine = QueryEngine::build(vec![
///     Record::new("a").with_title("Asthma study").with_phase("Phase 2"),
///     Record::new("b").with_title("Asthma trial").with_phase("Phase 3"),
/// ]);
///
/// let results = engine.search("asthma phase ii", 5, true);
/// assert_eq!(results[0].record.id, "a");
/// assert_eq!(results[0].boost_score, 5.0);
/// ```
pub struct QueryEngine {
    index: Arc<CorpusIndex>,
    extractor: FilterExtractor,
    fuser: Box<dyn Fuser>,
}

impl std::fmt::Debug for QueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine")
            .field("records", &self.index.len())
            .field("fuser", &self.fuser.name())
            .finish()
    }
}

impl QueryEngine {
    /// Build an index over `records` with default BM25 constants
    pub fn build(records: Vec<Record>) -> Self {
        Self::build_with_params(records, Bm25Params::default())
    }

    /// Build an index over `records` with the given BM25 constants
    pub fn build_with_params(records: Vec<Record>, params: Bm25Params) -> Self {
        let index = IndexBuilder::new().with_params(params).build(records);
        Self::from_index(Arc::new(index))
    }

    /// Wrap an already-built index
    pub fn from_index(index: Arc<CorpusIndex>) -> Self {
        QueryEngine {
            index,
            extractor: FilterExtractor::new(),
            fuser: Box::new(AdditiveFuser::new()),
        }
    }

    /// Builder: replace the fusion strategy
    pub fn with_fuser(mut self, fuser: Box<dyn Fuser>) -> Self {
        self.fuser = fuser;
        self
    }

    /// The index this engine reads
    pub fn index(&self) -> &Arc<CorpusIndex> {
        &self.index
    }

    /// Number of records searched per query
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Extract phase/status/location hints from a query
    pub fn parse_filters(&self, query: &str) -> QueryFilters {
        self.extractor.extract(query, &tokenize(query))
    }

    /// Top-`k` records for `query`, best first.
    ///
    /// `k == 0` returns nothing. With `use_filters == false` every boost is
    /// 0.0 and the order is BM25 order with ties in collection order.
    pub fn search(&self, query: &str, k: usize, use_filters: bool) -> Vec<ScoredResult> {
        self.rank(query, k, use_filters).0.results
    }

    /// Execute a [`SearchRequest`], returning results plus stats
    pub fn execute(&self, req: &SearchRequest) -> SearchResponse {
        let (response, filters) = self.rank(&req.query, req.k, req.use_filters);

        tracing::debug!(
            target: "trialsearch::search",
            query = %req.query,
            k = req.k,
            use_filters = req.use_filters,
            phase = ?filters.as_ref().and_then(|f| f.phase.as_deref()),
            status = ?filters.as_ref().and_then(|f| f.status.as_deref()),
            results = response.results.len(),
            elapsed_micros = response.stats.elapsed_micros,
            "Search executed"
        );

        response
    }

    fn rank(
        &self,
        query: &str,
        k: usize,
        use_filters: bool,
    ) -> (SearchResponse, Option<QueryFilters>) {
        let start = Instant::now();
        let records = self.index.records();

        let query_terms = tokenize(query);
        let statistical = self.index.score(&query_terms);

        let filters = use_filters.then(|| self.extractor.extract(query, &query_terms));
        let boosts: Vec<f64> = match &filters {
            Some(filters) => {
                let policy = BoostPolicy::new(&self.extractor, filters);
                records
                    .iter()
                    .map(|record| policy.evaluate(record).total())
                    .collect()
            }
            None => vec![0.0; records.len()],
        };

        let mut stats = SearchStats::new(0, records.len());
        stats.lexical_matches = statistical.iter().filter(|s| **s != 0.0).count();
        stats.boosted = boosts.iter().filter(|b| **b != 0.0).count();

        let candidates: Vec<Candidate> = statistical
            .iter()
            .zip(&boosts)
            .enumerate()
            .map(|(doc_id, (&s, &b))| Candidate::new(doc_id as u32, s, b))
            .collect();

        let fused = self.fuser.fuse(candidates, k);

        let results = fused
            .ranked
            .iter()
            .enumerate()
            .map(|(i, c)| {
                ScoredResult::new(
                    records[c.doc_id as usize].clone(),
                    c.statistical_score,
                    c.boost_score,
                    (i + 1) as u32,
                )
            })
            .collect();

        stats.elapsed_micros = start.elapsed().as_micros() as u64;

        let response = SearchResponse {
            results,
            truncated: fused.truncated,
            stats,
        };
        (response, filters)
    }
}

// ============================================================================
// EngineHandle
// ============================================================================

/// Shared, swappable reference to the active engine
///
/// Readers take an `Arc` snapshot and search it without holding the lock.
/// A rebuild constructs a complete new engine first and then replaces the
/// reference; no engine is ever mutated in place.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    current: Arc<RwLock<Arc<QueryEngine>>>,
}

impl EngineHandle {
    /// Wrap an engine
    pub fn new(engine: QueryEngine) -> Self {
        EngineHandle {
            current: Arc::new(RwLock::new(Arc::new(engine))),
        }
    }

    /// Snapshot of the active engine
    pub fn current(&self) -> Arc<QueryEngine> {
        Arc::clone(&self.current.read())
    }

    /// Replace the active engine, returning the previous one
    pub fn swap(&self, engine: QueryEngine) -> Arc<QueryEngine> {
        let next = Arc::new(engine);
        std::mem::replace(&mut *self.current.write(), next)
    }
}

// ============================================================================
// Tests
// ============================================================================
