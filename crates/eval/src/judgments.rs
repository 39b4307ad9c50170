//! Judgment templates and labelled judgment files
//!
//! File columns: `query_id, query, doc_id, title, phase, status, relevance`.
//! Only `query`, `doc_id` and `relevance` are read back.

use crate::error::{EvalError, EvalResult};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use trialsearch_search::QueryEngine;

const TEMPLATE_COLUMNS: [&str; 7] = [
    "query_id",
    "query",
    "doc_id",
    "title",
    "phase",
    "status",
    "relevance",
];

// ============================================================================
// Templates
// ============================================================================

/// One row of a judgment file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JudgmentRow {
    /// Position of the query in the query set
    pub query_id: usize,
    /// Query text
    pub query: String,
    /// Record identifier
    pub doc_id: String,
    /// Record title, for the labeller
    pub title: String,
    /// Record phase, for the labeller
    pub phase: String,
    /// Record status, for the labeller
    pub status: String,
    /// Relevance label; empty in a fresh template
    pub relevance: String,
}

/// Pool the top-`k` results of both configurations for every query
///
/// Per query, baseline results come first, then system results; a record
/// seen twice keeps its first position and takes the later row.
pub fn judgment_template(engine: &QueryEngine, queries: &[&str], k: usize) -> Vec<JudgmentRow> {
    let mut rows = Vec::new();

    for (query_id, query) in queries.iter().enumerate() {
        let baseline = engine.search(query, k, false);
        let system = engine.search(query, k, true);

        let mut pooled: Vec<JudgmentRow> = Vec::new();
        let mut position: FxHashMap<String, usize> = FxHashMap::default();

        for result in baseline.iter().chain(&system) {
            let record = &result.record;
            let row = JudgmentRow {
                query_id,
                query: query.to_string(),
                doc_id: record.id.clone(),
                title: record.title.clone(),
                phase: record.phase.clone(),
                status: record.status.clone(),
                relevance: String::new(),
            };
            match position.get(&record.id) {
                Some(&i) => pooled[i] = row,
                None => {
                    position.insert(record.id.clone(), pooled.len());
                    pooled.push(row);
                }
            }
        }

        rows.extend(pooled);
    }

    rows
}

/// Write a template unless `path` already exists.
///
/// Returns whether a file was written. An existing file is never touched,
/// so filled-in labels survive re-runs.
pub fn write_template_if_missing(path: impl AsRef<Path>, rows: &[JudgmentRow]) -> EvalResult<bool> {
    let path = path.as_ref();
    if path.exists() {
        tracing::info!(
            target: "trialsearch::eval",
            path = %path.display(),
            "Judgment file exists, skipping template"
        );
        return Ok(false);
    }

    let mut writer = csv::Writer::from_path(path)?;
    if rows.is_empty() {
        writer.write_record(TEMPLATE_COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    tracing::info!(
        target: "trialsearch::eval",
        path = %path.display(),
        rows = rows.len(),
        "Judgment template written"
    );
    Ok(true)
}

// ============================================================================
// Judgments
// ============================================================================

/// Relevance labels keyed by (query, doc_id)
#[derive(Debug, Clone, Default)]
pub struct Judgments {
    by_query: FxHashMap<String, FxHashMap<String, f64>>,
}

impl Judgments {
    /// Empty judgment set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a label; a later label for the same pair replaces the earlier one
    pub fn insert(&mut self, query: impl Into<String>, doc_id: impl Into<String>, relevance: f64) {
        self.by_query
            .entry(query.into())
            .or_default()
            .insert(doc_id.into(), relevance);
    }

    /// Label of a pair; unjudged pairs count as 0
    pub fn relevance(&self, query: &str, doc_id: &str) -> f64 {
        self.by_query
            .get(query)
            .and_then(|docs| docs.get(doc_id))
            .copied()
            .unwrap_or(0.0)
    }

    /// Every label judged for a query, best first
    pub fn ideal(&self, query: &str) -> Vec<f64> {
        let mut rels: Vec<f64> = self
            .by_query
            .get(query)
            .map(|docs| docs.values().copied().collect())
            .unwrap_or_default();
        rels.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        rels
    }

    /// Number of judged pairs
    pub fn len(&self) -> usize {
        self.by_query.values().map(|docs| docs.len()).sum()
    }

    /// Check if nothing is judged
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Load a labelled judgment file
pub fn load_judgments(path: impl AsRef<Path>) -> EvalResult<Judgments> {
    let path = path.as_ref();
    let judgments = read_judgments(File::open(path)?, &path.display().to_string())?;

    tracing::info!(
        target: "trialsearch::eval",
        path = %path.display(),
        pairs = judgments.len(),
        "Judgments loaded"
    );
    Ok(judgments)
}

/// Read judgments from a CSV stream; `source` names it in errors
///
/// Labels are parsed as numbers; blank or unparsable labels count as 0.
/// Fails with [`EvalError::MissingJudgments`] when no row carries a label.
pub fn read_judgments<R: Read>(reader: R, source: &str) -> EvalResult<Judgments> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = reader.headers()?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(EvalError::MissingColumn(name))
    };
    let query_col = column("query")?;
    let doc_col = column("doc_id")?;
    let rel_col = column("relevance")?;

    let mut judgments = Judgments::new();
    let mut labelled = 0usize;

    for row in reader.records() {
        let row = row?;
        let label = row.get(rel_col).unwrap_or("").trim();
        if !label.is_empty() {
            labelled += 1;
        }
        judgments.insert(
            row.get(query_col).unwrap_or(""),
            row.get(doc_col).unwrap_or(""),
            parse_relevance(label),
        );
    }

    if labelled == 0 {
        return Err(EvalError::MissingJudgments {
            path: source.to_string(),
        });
    }
    Ok(judgments)
}

fn parse_relevance(label: &str) -> f64 {
    match label.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

// ============================================================================
// Tests
// ============================================================================
