//! Reference scenario
//!
//! Query "lung cancer phase 1 recruiting" over R1/R2/R3. R1 earns phase and
//! status boosts, R3 the phase boost only, R2 nothing. The BM25 component is
//! small next to the boosts, so the ranking is R1, R3, R2.

use crate::test_utils::{find, ids, reference_collection};
use trialsearch::{QueryEngine, SearchRequest, PHASE_BOOST, STATUS_BOOST};

const QUERY: &str = "lung cancer phase 1 recruiting";

#[test]
fn test_reference_boosts() {
    let engine = QueryEngine::build(reference_collection());
    let results = engine.search(QUERY, 3, true);

    assert_eq!(find(&results, "R1").boost_score, PHASE_BOOST + STATUS_BOOST);
    assert_eq!(find(&results, "R2").boost_score, 0.0);
    assert_eq!(find(&results, "R3").boost_score, PHASE_BOOST);
}

#[test]
fn test_reference_order() {
    let engine = QueryEngine::build(reference_collection());
    assert_eq!(ids(&engine.search(QUERY, 3, true)), vec!["R1", "R3", "R2"]);
}

#[test]
fn test_reference_statistical_component() {
    let engine = QueryEngine::build(reference_collection());
    let results = engine.search(QUERY, 3, true);

    // R1 and R2 have the same length and the same matching tokens
    let r1 = find(&results, "R1").statistical_score;
    let r2 = find(&results, "R2").statistical_score;
    assert!((r1 - r2).abs() < 1e-12);
    assert_eq!(find(&results, "R3").statistical_score, 0.0);
    assert!(r1.abs() < PHASE_BOOST);
}

#[test]
fn test_reference_without_filters() {
    let engine = QueryEngine::build(reference_collection());
    let results = engine.search(QUERY, 3, false);
    assert!(results.iter().all(|r| r.boost_score == 0.0));
    assert_eq!(results.len(), 3);
}

#[test]
fn test_reference_top_one() {
    let engine = QueryEngine::build(reference_collection());
    let response = engine.execute(&SearchRequest::new(QUERY).with_k(1));
    assert_eq!(response.ids(), vec!["R1"]);
    assert!(response.truncated);
    assert_eq!(response.stats.boosted, 2);
}
