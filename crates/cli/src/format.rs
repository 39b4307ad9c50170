//! Search results and reports → human/json/raw string formatting.
//!
//! Three modes:
//! - **Human** (default): numbered entries with fields and score breakdown
//! - **JSON** (`--json`): `serde_json::to_string_pretty`
//! - **Raw** (`--raw`): record ids only, one per line

use std::fmt::Display;

use serde_json::json;
use trialsearch_core::{ScoredResult, SearchResponse};
use trialsearch_eval::{EvalReport, RunMetrics};

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Raw,
}

/// Format a ranked result list.
pub fn format_results(response: &SearchResponse, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(&json!(response.results)),
        OutputMode::Raw => response.ids().join("\n"),
        OutputMode::Human => {
            if response.is_empty() {
                "(no results)".to_string()
            } else {
                response
                    .results
                    .iter()
                    .map(format_result_human)
                    .collect::<Vec<_>>()
                    .join("\n\n")
            }
        }
    }
}

fn format_result_human(result: &ScoredResult) -> String {
    let record = &result.record;
    let location = [record.location_city.as_str(), record.location_state.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{}) {} [{}] (Score: {:.2})\n   Condition: {}\n   Phase: {} | Status: {} | Location: {}\n   BM25: {:.2} | Boost: {:.2}",
        result.rank,
        record.title,
        record.id,
        result.final_score,
        record.condition,
        record.phase,
        record.status,
        if location.is_empty() { "-" } else { location.as_str() },
        result.statistical_score,
        result.boost_score,
    )
}

/// Format an evaluation report.
pub fn format_report(report: &EvalReport, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => report.to_string(),
        OutputMode::Json => to_json(&json!({
            "baseline": run_json(&report.baseline),
            "system": run_json(&report.system),
        })),
        OutputMode::Raw => format!(
            "{:.4}\t{:.4}\t{:.4}\t{:.4}",
            report.baseline.mean_precision(),
            report.baseline.mean_ndcg(),
            report.system.mean_precision(),
            report.system.mean_ndcg()
        ),
    }
}

fn run_json(run: &RunMetrics) -> serde_json::Value {
    json!({
        "name": run.name,
        "use_filters": run.use_filters,
        "mean_p_at_5": run.mean_precision(),
        "mean_ndcg_at_5": run.mean_ndcg(),
        "queries": run.per_query.iter().map(|q| json!({
            "query": q.query,
            "p_at_5": q.precision,
            "ndcg_at_5": q.ndcg,
        })).collect::<Vec<_>>(),
    })
}

/// Format a one-line status message.
pub fn format_message(message: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(&json!({ "message": message })),
        OutputMode::Human | OutputMode::Raw => message.to_string(),
    }
}

/// Format an error.
pub fn format_error(err: &dyn Display, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(&json!({ "error": err.to_string() })),
        OutputMode::Raw => err.to_string(),
        OutputMode::Human => format!("(error) {}", err),
    }
}

fn to_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}
