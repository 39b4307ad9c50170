//! Ranking quality metrics
//!
//! Gains are graded: a label `r` contributes `2^r - 1`, discounted by
//! `log2(i + 2)` at 0-based position `i`.

use crate::judgments::Judgments;
use crate::CUTOFF;
use std::fmt;
use trialsearch_search::QueryEngine;

/// Precision at `k`: sum of the first `k` labels divided by `k`
///
/// Fewer than `k` results still divide by `k`.
pub fn precision_at_k(rels: &[f64], k: usize) -> f64 {
    if k == 0 {
        return 0.0;
    }
    rels.iter().take(k).sum::<f64>() / k as f64
}

/// Discounted cumulative gain of a label sequence
pub fn dcg(rels: &[f64]) -> f64 {
    rels.iter()
        .enumerate()
        .map(|(i, r)| (2f64.powf(*r) - 1.0) / ((i + 2) as f64).log2())
        .sum()
}

/// Normalized DCG at `k`; 0 when the ideal ordering has no gain
pub fn ndcg_at_k(rels: &[f64], ideal: &[f64], k: usize) -> f64 {
    let idcg = dcg(&ideal[..ideal.len().min(k)]);
    if idcg > 0.0 {
        dcg(&rels[..rels.len().min(k)]) / idcg
    } else {
        0.0
    }
}

// ============================================================================
// Reports
// ============================================================================

/// Metrics of one query under one configuration
#[derive(Debug, Clone, PartialEq)]
pub struct QueryMetrics {
    /// Query text
    pub query: String,
    /// P@5
    pub precision: f64,
    /// nDCG@5
    pub ndcg: f64,
}

/// Metrics of one configuration over the query set
#[derive(Debug, Clone, PartialEq)]
pub struct RunMetrics {
    /// "Baseline" or "System"
    pub name: &'static str,
    /// Whether boosts were on
    pub use_filters: bool,
    /// One entry per query, in query-set order
    pub per_query: Vec<QueryMetrics>,
}

impl RunMetrics {
    /// Mean P@5 (0 over an empty query set)
    pub fn mean_precision(&self) -> f64 {
        mean(self.per_query.iter().map(|q| q.precision))
    }

    /// Mean nDCG@5 (0 over an empty query set)
    pub fn mean_ndcg(&self) -> f64 {
        mean(self.per_query.iter().map(|q| q.ndcg))
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Baseline vs System comparison
#[derive(Debug, Clone, PartialEq)]
pub struct EvalReport {
    /// Boosts off
    pub baseline: RunMetrics,
    /// Boosts on
    pub system: RunMetrics,
}

impl fmt::Display for EvalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<11} | {:<10} | {:<10}", "Metric", "Baseline", "System")?;
        writeln!(f, "{}", "-".repeat(37))?;
        writeln!(
            f,
            "{:<11} | {:<10.4} | {:<10.4}",
            "Mean P@5",
            self.baseline.mean_precision(),
            self.system.mean_precision()
        )?;
        write!(
            f,
            "{:<11} | {:<10.4} | {:<10.4}",
            "Mean nDCG@5",
            self.baseline.mean_ndcg(),
            self.system.mean_ndcg()
        )
    }
}

/// Score both configurations of `engine` against `judgments`
pub fn evaluate(engine: &QueryEngine, judgments: &Judgments, queries: &[&str]) -> EvalReport {
    let run = |name: &'static str, use_filters: bool| RunMetrics {
        name,
        use_filters,
        per_query: queries
            .iter()
            .map(|query| {
                let rels: Vec<f64> = engine
                    .search(query, CUTOFF, use_filters)
                    .iter()
                    .map(|r| judgments.relevance(query, r.id()))
                    .collect();
                QueryMetrics {
                    query: query.to_string(),
                    precision: precision_at_k(&rels, CUTOFF),
                    ndcg: ndcg_at_k(&rels, &judgments.ideal(query), CUTOFF),
                }
            })
            .collect(),
    };

    let report = EvalReport {
        baseline: run("Baseline", false),
        system: run("System", true),
    };

    tracing::info!(
        target: "trialsearch::eval",
        queries = queries.len(),
        baseline_p5 = report.baseline.mean_precision(),
        system_p5 = report.system.mean_precision(),
        baseline_ndcg5 = report.baseline.mean_ndcg(),
        system_ndcg5 = report.system.mean_ndcg(),
        "Evaluation complete"
    );

    report
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use trialsearch_core::Record;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_precision_divides_by_k() {
        assert!(approx(precision_at_k(&[1.0, 0.0, 1.0], 5), 0.4));
        assert!(approx(precision_at_k(&[1.0; 7], 5), 1.0));
        assert_eq!(precision_at_k(&[1.0], 0), 0.0);
        assert_eq!(precision_at_k(&[], 5), 0.0);
    }

    #[test]
    fn test_dcg_graded_gain() {
        assert!(approx(dcg(&[1.0, 0.0, 1.0]), 1.5));
        // 2^2 - 1 = 3 at the top
        assert!(approx(dcg(&[2.0]), 3.0));
        assert_eq!(dcg(&[]), 0.0);
    }

    #[test]
    fn test_ndcg_perfect_and_zero() {
        assert!(approx(ndcg_at_k(&[1.0, 1.0, 0.0], &[1.0, 1.0], 5), 1.0));
        assert_eq!(ndcg_at_k(&[1.0], &[0.0, 0.0], 5), 0.0);
        assert_eq!(ndcg_at_k(&[], &[], 5), 0.0);
    }

    #[test]
    fn test_ndcg_ideal_truncated_to_k() {
        let ideal = [1.0; 8];
        let rels = [1.0; 5];
        assert!(approx(ndcg_at_k(&rels, &ideal, 5), 1.0));
    }

    #[test]
    fn test_evaluate_rewards_boosted_ranking() {
        let engine = QueryEngine::build(vec![
            Record::new("a").with_title("asthma study").with_phase("Phase 1"),
            Record::new("b").with_title("migraine trial").with_phase("Phase 2"),
            Record::new("c").with_title("sleep device").with_phase("Phase 3"),
        ]);
        let mut judgments = Judgments::new();
        judgments.insert("asthma phase 2", "a", 0.0);
        judgments.insert("asthma phase 2", "b", 1.0);

        let report = evaluate(&engine, &judgments, &["asthma phase 2"]);

        assert!(approx(report.baseline.mean_precision(), 0.2));
        assert!(approx(report.system.mean_precision(), 0.2));
        // baseline puts b second, system first
        assert!(approx(report.baseline.mean_ndcg(), 1.0 / 3f64.log2()));
        assert!(approx(report.system.mean_ndcg(), 1.0));
        assert_eq!(report.baseline.name, "Baseline");
        assert!(report.system.use_filters);
    }

    #[test]
    fn test_report_display() {
        let run = |name| RunMetrics {
            name,
            use_filters: false,
            per_query: vec![QueryMetrics {
                query: "q".to_string(),
                precision: 0.2,
                ndcg: 0.5,
            }],
        };
        let text = EvalReport {
            baseline: run("Baseline"),
            system: run("System"),
        }
        .to_string();
        assert!(text.contains("Mean P@5"));
        assert!(text.contains("0.2000"));
        assert!(text.contains("0.5000"));
    }

    #[test]
    fn test_empty_query_set_means_zero() {
        let engine = QueryEngine::build(vec![]);
        let report = evaluate(&engine, &Judgments::new(), &[]);
        assert_eq!(report.baseline.mean_precision(), 0.0);
        assert_eq!(report.system.mean_ndcg(), 0.0);
    }
}
