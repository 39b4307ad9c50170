//! Rule-based boosts from query entities
//!
//! | Signal   | Condition                                               | Boost |
//! |----------|---------------------------------------------------------|-------|
//! | Phase    | record phase matches the extracted phase                | +5.0  |
//! | Status   | record status contains the extracted status phrase      | +5.0  |
//! | City     | record city is a substring of the query                 | +3.0  |
//! | State    | record state is a substring of the query, and is either | +3.0  |
//! |          | longer than 2 characters or an exact query token        |       |
//!
//! Signals are independent and additive; there is no cap.

use crate::filters::{FilterExtractor, PhaseMatcher, QueryFilters};
use trialsearch_core::Record;

/// Boost for a phase match
pub const PHASE_BOOST: f64 = 5.0;

/// Boost for a status match
pub const STATUS_BOOST: f64 = 5.0;

/// Boost for each of the city and state matches
pub const LOCATION_BOOST: f64 = 3.0;

// ============================================================================
// BoostBreakdown
// ============================================================================

/// Per-signal boosts earned by one record
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoostBreakdown {
    /// Phase signal
    pub phase: f64,
    /// Status signal
    pub status: f64,
    /// City signal
    pub city: f64,
    /// State signal
    pub state: f64,
}

impl BoostBreakdown {
    /// Sum of all signals
    pub fn total(&self) -> f64 {
        self.phase + self.status + self.city + self.state
    }

    /// Whether any signal fired
    pub fn is_boosted(&self) -> bool {
        self.total() != 0.0
    }
}

// ============================================================================
// BoostPolicy
// ============================================================================

/// Boost rules prepared for one query
///
/// The phase matcher is resolved once here and then applied to every
/// record of the ranking pass.
#[derive(Debug, Clone)]
pub struct BoostPolicy<'a> {
    filters: &'a QueryFilters,
    phase: Option<PhaseMatcher>,
}

impl<'a> BoostPolicy<'a> {
    /// Prepare the rules for `filters`
    pub fn new(extractor: &FilterExtractor, filters: &'a QueryFilters) -> Self {
        let phase = filters
            .phase
            .as_deref()
            .map(|phase| extractor.phase_matcher(phase));
        BoostPolicy { filters, phase }
    }

    /// Evaluate every signal against one record
    pub fn evaluate(&self, record: &Record) -> BoostBreakdown {
        let mut boost = BoostBreakdown::default();

        if let Some(matcher) = &self.phase {
            if matcher.matches(&record.phase) {
                boost.phase = PHASE_BOOST;
            }
        }

        if let Some(status) = &self.filters.status {
            if record.status.to_lowercase().contains(status.as_str()) {
                boost.status = STATUS_BOOST;
            }
        }

        let query = self.filters.query_text.as_str();

        let city = record.location_city.to_lowercase();
        if !city.is_empty() && query.contains(city.as_str()) {
            boost.city = LOCATION_BOOST;
        }

        let state = record.location_state.to_lowercase();
        if !state.is_empty() && query.contains(state.as_str()) {
            // Codes of 1-2 chars ("ny", "ma") must also be a whole query token
            let long_name = state.chars().count() > 2;
            if long_name || self.filters.query_tokens.iter().any(|t| *t == state) {
                boost.state = LOCATION_BOOST;
            }
        }

        boost
    }
}

// ============================================================================
// Tests
// ============================================================================
