//! CSV collection files
//!
//! Column layout, header first:
//!
//! `NCTId, BriefTitle, BriefSummary, Condition, Phase, OverallStatus,
//! LocationCity, LocationState`
//!
//! Missing columns and empty cells read as empty strings. Extra columns are
//! ignored. Row order is collection order.

use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use trialsearch_core::{Record, Result};

/// Header row written by [`write_records`]
pub const COLUMNS: [&str; 8] = [
    "NCTId",
    "BriefTitle",
    "BriefSummary",
    "Condition",
    "Phase",
    "OverallStatus",
    "LocationCity",
    "LocationState",
];

/// One CSV row, as written
#[derive(Debug, Serialize)]
struct Row<'a> {
    #[serde(rename = "NCTId")]
    id: &'a str,
    #[serde(rename = "BriefTitle")]
    title: &'a str,
    #[serde(rename = "BriefSummary")]
    summary: &'a str,
    #[serde(rename = "Condition")]
    condition: &'a str,
    #[serde(rename = "Phase")]
    phase: &'a str,
    #[serde(rename = "OverallStatus")]
    status: &'a str,
    #[serde(rename = "LocationCity")]
    location_city: &'a str,
    #[serde(rename = "LocationState")]
    location_state: &'a str,
}

impl<'a> From<&'a Record> for Row<'a> {
    fn from(record: &'a Record) -> Self {
        Row {
            id: &record.id,
            title: &record.title,
            summary: &record.summary,
            condition: &record.condition,
            phase: &record.phase,
            status: &record.status,
            location_city: &record.location_city,
            location_state: &record.location_state,
        }
    }
}

/// Load a collection from a CSV file
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let records = read_records(file)?;

    tracing::info!(
        target: "trialsearch::source",
        path = %path.display(),
        records = records.len(),
        "Collection loaded"
    );

    Ok(records)
}

/// Read a collection from any CSV stream
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    // Column position of each field, in COLUMNS order
    let headers = reader.headers()?.clone();
    let positions: Vec<Option<usize>> = COLUMNS
        .iter()
        .map(|column| headers.iter().position(|h| h.trim() == *column))
        .collect();

    let missing: Vec<&str> = COLUMNS
        .iter()
        .zip(&positions)
        .filter(|(_, pos)| pos.is_none())
        .map(|(column, _)| *column)
        .collect();
    if !missing.is_empty() {
        tracing::warn!(
            target: "trialsearch::source",
            missing = ?missing,
            "CSV header lacks columns; treating them as empty"
        );
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let field = |i: usize| -> String {
            positions[i]
                .and_then(|pos| row.get(pos))
                .unwrap_or("")
                .to_string()
        };
        records.push(Record {
            id: field(0),
            title: field(1),
            summary: field(2),
            condition: field(3),
            phase: field(4),
            status: field(5),
            location_city: field(6),
            location_state: field(7),
        });
    }
    Ok(records)
}

/// Write a collection to a CSV file, header first
pub fn write_records(path: impl AsRef<Path>, records: &[Record]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = ::csv::Writer::from_path(path)?;

    // serialize() only emits the header with the first row
    if records.is_empty() {
        writer.write_record(COLUMNS)?;
    }
    for record in records {
        writer.serialize(Row::from(record))?;
    }
    writer.flush()?;

    tracing::info!(
        target: "trialsearch::source",
        path = %path.display(),
        records = records.len(),
        "Collection written"
    );

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
