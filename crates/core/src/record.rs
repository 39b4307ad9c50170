//! Clinical-trial record type
//!
//! A `Record` is one flat entry of the collection. Every field is plain text
//! and the empty string is the only way to say "absent". There is no
//! `Option` anywhere on this type, so callers never have to reconcile two
//! representations of missing data.

use serde::{Deserialize, Serialize};

/// One clinical-trial entry of the collection
///
/// Collection order is significant: it is the tie-break order when two
/// records end up with the same final score.
///
/// # Example
///
/// ```
/// use trialsearch_core::Record;
///
/// let record = Record::new("NCT00000001")
///     .with_title("Lung cancer trial")
///     .with_condition("Non-small cell lung cancer")
///     .with_phase("Phase 2");
///
/// assert_eq!(record.summary, "");
/// assert_eq!(
///     record.document_text(),
///     "Lung cancer trial  Non-small cell lung cancer"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Registry identifier (e.g. NCT number); uniqueness is not enforced
    pub id: String,
    /// Brief title
    pub title: String,
    /// Brief summary
    pub summary: String,
    /// Conditions studied, comma-joined
    pub condition: String,
    /// Phase designation, e.g. "Phase 1" or "Phase 2, Phase 3"
    pub phase: String,
    /// Overall recruitment status, e.g. "Recruiting"
    pub status: String,
    /// Representative site city
    pub location_city: String,
    /// Representative site state or region
    pub location_state: String,
}

impl Record {
    /// Create a record with the given id and every other field empty
    pub fn new(id: impl Into<String>) -> Self {
        Record {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Builder: set title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder: set summary
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Builder: set condition
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }

    /// Builder: set phase
    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = phase.into();
        self
    }

    /// Builder: set status
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Builder: set city and state
    pub fn with_location(mut self, city: impl Into<String>, state: impl Into<String>) -> Self {
        self.location_city = city.into();
        self.location_state = state.into();
        self
    }

    /// Text that gets indexed: `title + " " + summary + " " + condition`
    pub fn document_text(&self) -> String {
        let mut text =
            String::with_capacity(self.title.len() + self.summary.len() + self.condition.len() + 2);
        text.push_str(&self.title);
        text.push(' ');
        text.push_str(&self.summary);
        text.push(' ');
        text.push_str(&self.condition);
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_record_new_has_empty_fields() {
        let record = Record::new("NCT1");
        assert_eq!(record.id, "NCT1");
        assert_eq!(record.title, "");
        assert_eq!(record.phase, "");
        assert_eq!(record.location_city, "");
        assert_eq!(record.location_state, "");
    }

    #[test]
    fn test_record_builder() {
        let record = Record::new("NCT2")
            .with_title("t")
            .with_summary("s")
            .with_condition("c")
            .with_phase("Phase 3")
            .with_status("Completed")
            .with_location("Boston", "MA");

        assert_eq!(record.title, "t");
        assert_eq!(record.summary, "s");
        assert_eq!(record.condition, "c");
        assert_eq!(record.phase, "Phase 3");
        assert_eq!(record.status, "Completed");
        assert_eq!(record.location_city, "Boston");
        assert_eq!(record.location_state, "MA");
    }

    #[test]
    fn test_document_text_order() {
        let record = Record::new("x")
            .with_title("alpha")
            .with_summary("beta")
            .with_condition("gamma");
        assert_eq!(record.document_text(), "alpha beta gamma");
    }

    #[test]
    fn test_document_text_empty_record() {
        assert_eq!(Record::new("x").document_text(), "  ");
    }

    #[test]
    fn test_record_json_shape() {
        let record = Record::new("NCT3").with_phase("Phase 1");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "NCT3");
        assert_eq!(json["phase"], "Phase 1");
        assert_eq!(json["location_city"], "");
    }

    proptest! {
        #[test]
        fn prop_document_text_joins_with_two_spaces(
            title in ".{0,32}",
            summary in ".{0,32}",
            condition in ".{0,32}",
        ) {
            let record = Record::new("x")
                .with_title(title.clone())
                .with_summary(summary.clone())
                .with_condition(condition.clone());
            let text = record.document_text();

            prop_assert_eq!(text.len(), title.len() + summary.len() + condition.len() + 2);
            prop_assert!(text.starts_with(title.as_str()));
            prop_assert!(text.ends_with(condition.as_str()));
            prop_assert_eq!(&text[title.len() + 1..text.len() - condition.len() - 1], summary.as_str());
        }
    }
}
