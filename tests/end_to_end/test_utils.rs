//! Shared fixtures for the end-to-end suite

use trialsearch::{QueryEngine, Record, ScoredResult};

/// The reference three-record collection
pub fn reference_collection() -> Vec<Record> {
    vec![
        Record::new("R1")
            .with_title("lung cancer trial")
            .with_phase("Phase 1")
            .with_status("Recruiting")
            .with_location("Boston", "MA"),
        Record::new("R2")
            .with_title("lung cancer study")
            .with_phase("Phase 2")
            .with_status("Completed"),
        Record::new("R3")
            .with_title("diabetes study")
            .with_phase("Phase 1")
            .with_status("Active"),
    ]
}

/// A small but varied collection
pub fn sample_collection() -> Vec<Record> {
    vec![
        Record::new("NCT01")
            .with_title("Pembrolizumab in advanced lung cancer")
            .with_summary("Checkpoint inhibitor for non-small cell lung cancer")
            .with_condition("Lung Cancer")
            .with_phase("Phase 2")
            .with_status("Recruiting")
            .with_location("Boston", "Massachusetts"),
        Record::new("NCT02")
            .with_title("Metformin and lifestyle in type 2 diabetes")
            .with_summary("Diet and exercise with metformin")
            .with_condition("Diabetes")
            .with_phase("Phase 3")
            .with_status("Completed")
            .with_location("Houston", "TX"),
        Record::new("NCT03")
            .with_title("Inhaled corticosteroids for asthma")
            .with_summary("Asthma control in adults")
            .with_condition("Asthma")
            .with_phase("Phase 1")
            .with_status("Recruiting")
            .with_location("Chicago", "Illinois"),
        Record::new("NCT04")
            .with_title("Melanoma immunotherapy vaccine")
            .with_summary("Personalized vaccine with immunotherapy")
            .with_condition("Melanoma")
            .with_phase("Phase 1, Phase 2")
            .with_status("Active, not recruiting")
            .with_location("New York", "New York"),
        Record::new("NCT05")
            .with_title("Breast cancer screening outreach")
            .with_summary("Mammography in rural clinics")
            .with_condition("Breast Cancer")
            .with_phase("Not Applicable")
            .with_status("Enrolling by invitation"),
    ]
}

/// Ids of a result list, best first
pub fn ids(results: &[ScoredResult]) -> Vec<&str> {
    results.iter().map(|r| r.id()).collect()
}

/// Result for a record id
pub fn find<'a>(results: &'a [ScoredResult], id: &str) -> &'a ScoredResult {
    results
        .iter()
        .find(|r| r.id() == id)
        .unwrap_or_else(|| panic!("{} not in results", id))
}

/// Engine over the sample collection
pub fn sample_engine() -> QueryEngine {
    QueryEngine::build(sample_collection())
}
