//! Collection files on disk → engine → ranking

use crate::test_utils::{ids, sample_collection};
use trialsearch::source::{load_records, write_records};
use trialsearch::{QueryEngine, SearchConfig, LOCATION_BOOST};

#[test]
fn test_csv_roundtrip_ranks_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample_trials.csv");
    write_records(&path, &sample_collection()).unwrap();

    let from_disk = QueryEngine::build(load_records(&path).unwrap());
    let in_memory = QueryEngine::build(sample_collection());

    for query in ["asthma recruiting", "melanoma phase ii", "cancer in boston", ""] {
        assert_eq!(
            from_disk.search(query, 5, true),
            in_memory.search(query, 5, true)
        );
    }
}

#[test]
fn test_sparse_csv_is_searchable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sparse.csv");
    std::fs::write(
        &path,
        "NCTId,BriefTitle,LocationState\nA,Asthma in adults,NY\nB,Migraine relief,\nC,Sleep apnea,\n",
    )
    .unwrap();

    let engine = QueryEngine::build(load_records(&path).unwrap());
    let results = engine.search("asthma ny", 3, true);
    assert_eq!(ids(&results), vec!["A", "B", "C"]);
    assert_eq!(results[0].boost_score, LOCATION_BOOST);
}

#[test]
fn test_config_drives_engine() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("trials.csv");
    write_records(&data, &sample_collection()).unwrap();

    let config_path = dir.path().join("trialsearch.toml");
    std::fs::write(
        &config_path,
        format!(
            "data_path = {:?}\ntop_k = 2\n\n[bm25]\nk1 = 1.2\nb = 0.5\n",
            data.display().to_string()
        ),
    )
    .unwrap();

    let config = SearchConfig::from_file(&config_path).unwrap();
    let engine =
        QueryEngine::build_with_params(load_records(&config.data_path).unwrap(), config.bm25);

    assert_eq!(engine.index().scorer().params().k1, 1.2);
    assert_eq!(engine.search("asthma", config.top_k, true).len(), 2);
}
