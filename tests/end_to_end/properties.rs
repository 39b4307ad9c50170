//! Property-based invariants over random collections

use proptest::prelude::*;
use trialsearch::{QueryEngine, Record};

const WORDS: &[&str] = &[
    "lung", "cancer", "asthma", "diabetes", "trial", "study", "vaccine", "therapy",
];
const PHASES: &[&str] = &["Phase 1", "Phase II", "Phase 3", "Phase 2, Phase 3", "Not Applicable", ""];
const STATUSES: &[&str] = &["Recruiting", "Completed", "Active, not recruiting", ""];
const PLACES: &[(&str, &str)] = &[("Boston", "MA"), ("Austin", "Texas"), ("", "NY"), ("", "")];
const QUERY_PARTS: &[&str] = &[
    "lung", "asthma", "phase 2", "phase iii", "recruiting", "completed", "boston", "texas", "ny",
    "trial",
];

/// Every sum of distinct boosts: phase 5, status 5, city 3, state 3
const BOOST_SUMS: &[f64] = &[0.0, 3.0, 5.0, 6.0, 8.0, 10.0, 11.0, 13.0, 16.0];

fn record_strategy() -> impl Strategy<Value = Record> {
    (
        proptest::collection::vec(0..WORDS.len(), 0..6),
        0..PHASES.len(),
        0..STATUSES.len(),
        0..PLACES.len(),
    )
        .prop_map(|(words, phase, status, place)| {
            let title: Vec<&str> = words.iter().map(|&i| WORDS[i]).collect();
            Record::new("")
                .with_title(title.join(" "))
                .with_phase(PHASES[phase])
                .with_status(STATUSES[status])
                .with_location(PLACES[place].0, PLACES[place].1)
        })
}

fn collection_strategy() -> impl Strategy<Value = Vec<Record>> {
    proptest::collection::vec(record_strategy(), 0..20).prop_map(|records| {
        records
            .into_iter()
            .enumerate()
            .map(|(i, mut r)| {
                r.id = format!("R{}", i);
                r
            })
            .collect()
    })
}

fn query_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(0..QUERY_PARTS.len(), 0..4)
        .prop_map(|parts| parts.iter().map(|&i| QUERY_PARTS[i]).collect::<Vec<_>>().join(" "))
}

proptest! {
    #[test]
    fn prop_result_count_is_min_k_n(
        records in collection_strategy(),
        query in query_strategy(),
        k in 0usize..30,
    ) {
        let n = records.len();
        let engine = QueryEngine::build(records);
        prop_assert_eq!(engine.search(&query, k, true).len(), k.min(n));
    }

    #[test]
    fn prop_sorted_with_stable_ties(
        records in collection_strategy(),
        query in query_strategy(),
    ) {
        let engine = QueryEngine::build(records);
        let results = engine.search(&query, 100, true);
        for pair in results.windows(2) {
            prop_assert!(pair[0].final_score >= pair[1].final_score);
            if pair[0].final_score == pair[1].final_score {
                let a: usize = pair[0].record.id[1..].parse().unwrap();
                let b: usize = pair[1].record.id[1..].parse().unwrap();
                prop_assert!(a < b);
            }
        }
    }

    #[test]
    fn prop_score_decomposition(
        records in collection_strategy(),
        query in query_strategy(),
        use_filters in any::<bool>(),
    ) {
        let engine = QueryEngine::build(records);
        for r in engine.search(&query, 100, use_filters) {
            prop_assert!((r.final_score - (r.statistical_score + r.boost_score)).abs() < 1e-9);
            if use_filters {
                prop_assert!(BOOST_SUMS.contains(&r.boost_score));
            } else {
                prop_assert_eq!(r.boost_score, 0.0);
            }
        }
    }

    #[test]
    fn prop_deterministic(
        records in collection_strategy(),
        query in query_strategy(),
    ) {
        let a = QueryEngine::build(records.clone());
        let b = QueryEngine::build(records);
        prop_assert_eq!(a.search(&query, 10, true), b.search(&query, 10, true));
    }
}
