//! Judgment template and metrics over a real engine

use crate::test_utils::sample_engine;
use trialsearch::eval::{
    evaluate, judgment_template, load_judgments, write_template_if_missing, EvalError, CUTOFF,
    QUERIES,
};

#[test]
fn test_template_covers_every_query() {
    let engine = sample_engine();
    let rows = judgment_template(&engine, &QUERIES, CUTOFF);

    for (query_id, query) in QUERIES.iter().enumerate() {
        let pooled: Vec<_> = rows.iter().filter(|r| r.query_id == query_id).collect();
        // five records, so both top-5 lists are the whole collection
        assert_eq!(pooled.len(), 5);
        assert!(pooled.iter().all(|r| r.query == *query));

        let mut seen = std::collections::HashSet::new();
        assert!(pooled.iter().all(|r| seen.insert(r.doc_id.as_str())));
    }
}

#[test]
fn test_label_then_evaluate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("judgments.csv");
    let engine = sample_engine();

    let rows = judgment_template(&engine, &QUERIES, CUTOFF);
    assert!(write_template_if_missing(&path, &rows).unwrap());
    assert!(matches!(
        load_judgments(&path),
        Err(EvalError::MissingJudgments { .. })
    ));

    // Label: the asthma trial is relevant to "asthma", nothing else is
    let mut labelled = String::from("query_id,query,doc_id,title,phase,status,relevance\n");
    for row in &rows {
        let rel = if row.query == "asthma" && row.doc_id == "NCT03" { 1 } else { 0 };
        labelled.push_str(&format!(
            "{},{},{},x,x,x,{}\n",
            row.query_id, row.query, row.doc_id, rel
        ));
    }
    std::fs::write(&path, labelled).unwrap();

    let judgments = load_judgments(&path).unwrap();
    let report = evaluate(&engine, &judgments, &QUERIES);

    // one relevant hit at rank 1 for one of ten queries
    let expected_p5 = (1.0 / 5.0) / 10.0;
    assert!((report.baseline.mean_precision() - expected_p5).abs() < 1e-9);
    assert!((report.system.mean_precision() - expected_p5).abs() < 1e-9);
    assert!((report.system.mean_ndcg() - 0.1).abs() < 1e-9);
    assert_eq!(report.baseline.per_query.len(), QUERIES.len());
}
