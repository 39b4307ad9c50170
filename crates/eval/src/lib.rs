//! Offline evaluation of the ranking
//!
//! This crate provides:
//! - QUERIES: the fixed evaluation query set
//! - Judgment templates: pooled top results for manual relevance labels
//! - Judgments: loading labelled files
//! - Metrics: P@5 and nDCG@5, averaged per configuration
//!
//! Two configurations are compared on the same engine: "Baseline" ranks
//! with boosts off, "System" with boosts on.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod judgments;
pub mod metrics;

pub use error::{EvalError, EvalResult};
pub use judgments::{
    judgment_template, load_judgments, read_judgments, write_template_if_missing, JudgmentRow,
    Judgments,
};
pub use metrics::{dcg, evaluate, ndcg_at_k, precision_at_k, EvalReport, QueryMetrics, RunMetrics};

/// Results considered per query
pub const CUTOFF: usize = 5;

/// Fixed evaluation query set
pub const QUERIES: [&str; 10] = [
    "lung cancer phase 1",
    "diabetes recruiting",
    "asthma",
    "breast cancer phase 3",
    "pain management",
    "obesity diet",
    "melanoma immunotherapy",
    "hypertension",
    "covid-19 vaccine",
    "depression",
];
