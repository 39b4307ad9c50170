//! Session state: the active engine plus per-session search settings.
//!
//! The engine sits behind an `EngineHandle`, so `.reload` builds a new
//! index from the collection file and swaps it in as a whole.

use std::path::{Path, PathBuf};

use trialsearch_core::{Result, SearchConfig, SearchRequest, SearchResponse};
use trialsearch_search::{EngineHandle, QueryEngine};
use trialsearch_source::load_records;

/// Engine handle and current settings.
pub struct SessionState {
    config: SearchConfig,
    handle: EngineHandle,
    top_k: usize,
    use_filters: bool,
}

impl SessionState {
    /// Load the configured collection and build its index.
    pub fn open(config: SearchConfig) -> Result<Self> {
        let engine = build_engine(&config.data_path, &config)?;
        Ok(Self {
            top_k: config.top_k,
            use_filters: config.use_filters,
            handle: EngineHandle::new(engine),
            config,
        })
    }

    /// Rank the collection with the session settings.
    pub fn search(&self, query: &str) -> SearchResponse {
        self.search_with(query, self.top_k, self.use_filters)
    }

    /// Rank the collection with explicit settings.
    pub fn search_with(&self, query: &str, k: usize, use_filters: bool) -> SearchResponse {
        let request = SearchRequest::new(query)
            .with_k(k)
            .with_filters(use_filters);
        self.handle.current().execute(&request)
    }

    /// Rebuild the index from the collection file; returns the record count.
    ///
    /// On failure the previous engine stays active.
    pub fn reload(&mut self) -> Result<usize> {
        let engine = build_engine(&self.config.data_path, &self.config)?;
        let count = engine.len();
        self.handle.swap(engine);
        Ok(count)
    }

    /// Active engine.
    pub fn engine(&self) -> std::sync::Arc<QueryEngine> {
        self.handle.current()
    }

    /// Collection path.
    pub fn data_path(&self) -> &Path {
        &self.config.data_path
    }

    /// Records in the active collection.
    pub fn record_count(&self) -> usize {
        self.handle.current().len()
    }

    /// Switch boosts on or off.
    pub fn set_filters(&mut self, on: bool) {
        self.use_filters = on;
    }

    /// Whether boosts are on.
    pub fn filters(&self) -> bool {
        self.use_filters
    }

    /// Set the result count.
    pub fn set_top_k(&mut self, k: usize) {
        self.top_k = k;
    }

    /// Current result count.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Generate the REPL prompt string.
    pub fn prompt(&self) -> String {
        let filters = if self.use_filters { "boost" } else { "plain" };
        format!("trialsearch[{}|k={}]> ", filters, self.top_k)
    }
}

fn build_engine(path: &Path, config: &SearchConfig) -> Result<QueryEngine> {
    let records = load_records(path)?;
    Ok(QueryEngine::build_with_params(records, config.bm25))
}

/// Config path from `--config`, or the default in the working directory.
pub fn config_path(flag: Option<&String>) -> PathBuf {
    flag.map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(trialsearch_core::CONFIG_FILE_NAME))
}
