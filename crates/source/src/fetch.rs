//! Collection refresh from the ClinicalTrials.gov v2 studies API
//!
//! Only one page is requested; `page_size` bounds the collection size.
//! Field mapping from `studies[].protocolSection`:
//!
//! - `identificationModule.nctId` / `.briefTitle` → id / title
//! - `descriptionModule.briefSummary` → summary
//! - `conditionsModule.conditions`, comma-joined → condition
//! - `designModule.phases`, comma-joined, or "Not Applicable" → phase
//! - `statusModule.overallStatus` → status
//! - `contactsLocationsModule.locations`: first US site, else first site →
//!   city / state

use serde_json::Value;
use std::time::Duration;
use trialsearch_core::{Error, FetchConfig, Record, Result};

/// Phase text for studies that declare no phases
pub const NO_PHASE: &str = "Not Applicable";

/// Country preferred when choosing the representative site
const PREFERRED_COUNTRY: &str = "United States";

/// Fetch one page of studies and map them to records
pub fn fetch_records(config: &FetchConfig) -> Result<Vec<Record>> {
    if config.page_size == 0 {
        return Err(Error::invalid_input("page_size must be at least 1"));
    }

    tracing::info!(
        target: "trialsearch::source",
        url = %config.base_url,
        page_size = config.page_size,
        "Fetching studies"
    );

    let agent_config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_millis(config.timeout_ms)))
        .build();
    let agent = ureq::Agent::new_with_config(agent_config);

    let mut response = agent
        .get(config.base_url.as_str())
        .query("format", "json")
        .query("pageSize", config.page_size.to_string())
        .call()
        .map_err(|e| Error::http(e.to_string()))?;

    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| Error::http(format!("failed to read response: {}", e)))?;

    let records = parse_studies(&body)?;

    tracing::info!(
        target: "trialsearch::source",
        records = records.len(),
        "Fetched studies"
    );

    Ok(records)
}

/// Map a studies API payload to records, in payload order
///
/// A payload without a `studies` array yields no records. Missing fields
/// read as empty strings.
pub fn parse_studies(json: &str) -> Result<Vec<Record>> {
    let payload: Value = serde_json::from_str(json)?;

    let Some(studies) = payload.get("studies").and_then(Value::as_array) else {
        tracing::warn!(target: "trialsearch::source", "Payload has no studies array");
        return Ok(Vec::new());
    };

    Ok(studies
        .iter()
        .map(|study| study_to_record(study.get("protocolSection").unwrap_or(&Value::Null)))
        .collect())
}

fn study_to_record(protocol: &Value) -> Record {
    let module = |name: &str| protocol.get(name).unwrap_or(&Value::Null);

    let identification = module("identificationModule");
    let phases = join_strings(module("designModule").get("phases"));
    let (location_city, location_state) = representative_site(module("contactsLocationsModule"));

    Record {
        id: text(identification.get("nctId")),
        title: text(identification.get("briefTitle")),
        summary: text(module("descriptionModule").get("briefSummary")),
        condition: join_strings(module("conditionsModule").get("conditions")),
        phase: if phases.is_empty() {
            NO_PHASE.to_string()
        } else {
            phases
        },
        status: text(module("statusModule").get("overallStatus")),
        location_city,
        location_state,
    }
}

fn representative_site(contacts: &Value) -> (String, String) {
    let Some(locations) = contacts.get("locations").and_then(Value::as_array) else {
        return (String::new(), String::new());
    };

    let site = locations
        .iter()
        .find(|loc| loc.get("country").and_then(Value::as_str) == Some(PREFERRED_COUNTRY))
        .or_else(|| locations.first());

    match site {
        Some(site) => (text(site.get("city")), text(site.get("state"))),
        None => (String::new(), String::new()),
    }
}

fn text(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

fn join_strings(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "studies": [
            {
                "protocolSection": {
                    "identificationModule": {"nctId": "NCT001", "briefTitle": "Lung cancer trial"},
                    "descriptionModule": {"briefSummary": "Checkpoint inhibitor"},
                    "conditionsModule": {"conditions": ["Lung Cancer", "NSCLC"]},
                    "designModule": {"phases": ["PHASE1", "PHASE2"]},
                    "statusModule": {"overallStatus": "RECRUITING"},
                    "contactsLocationsModule": {"locations": [
                        {"city": "Toronto", "state": "Ontario", "country": "Canada"},
                        {"city": "Boston", "state": "Massachusetts", "country": "United States"}
                    ]}
                }
            },
            {
                "protocolSection": {
                    "identificationModule": {"nctId": "NCT002", "briefTitle": "Diet study"},
                    "contactsLocationsModule": {"locations": [
                        {"city": "Lyon", "country": "France"}
                    ]}
                }
            },
            {}
        ]
    }"#;

    #[test]
    fn test_parse_full_study() {
        let records = parse_studies(PAYLOAD).unwrap();
        assert_eq!(records.len(), 3);

        let r = &records[0];
        assert_eq!(r.id, "NCT001");
        assert_eq!(r.title, "Lung cancer trial");
        assert_eq!(r.summary, "Checkpoint inhibitor");
        assert_eq!(r.condition, "Lung Cancer, NSCLC");
        assert_eq!(r.phase, "PHASE1, PHASE2");
        assert_eq!(r.status, "RECRUITING");
        assert_eq!(r.location_city, "Boston");
        assert_eq!(r.location_state, "Massachusetts");
    }

    #[test]
    fn test_parse_sparse_study() {
        let records = parse_studies(PAYLOAD).unwrap();
        let r = &records[1];
        assert_eq!(r.summary, "");
        assert_eq!(r.condition, "");
        assert_eq!(r.phase, NO_PHASE);
        assert_eq!(r.location_city, "Lyon");
        assert_eq!(r.location_state, "");
    }

    #[test]
    fn test_parse_empty_study() {
        let records = parse_studies(PAYLOAD).unwrap();
        assert_eq!(records[2], Record::new("").with_phase(NO_PHASE));
    }

    #[test]
    fn test_parse_without_studies() {
        assert!(parse_studies(r#"{"totalCount": 0}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_studies("not json").unwrap_err();
        assert!(matches!(err, Error::JsonError(_)));
    }

    #[test]
    fn test_fetch_rejects_zero_page_size() {
        let config = FetchConfig {
            page_size: 0,
            ..FetchConfig::default()
        };
        assert!(matches!(
            fetch_records(&config),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_fetch_unreachable_host_is_http_error() {
        let config = FetchConfig {
            base_url: "http://127.0.0.1:1/studies".to_string(),
            page_size: 1,
            timeout_ms: 2_000,
        };
        assert!(matches!(fetch_records(&config), Err(Error::HttpError(_))));
    }
}
