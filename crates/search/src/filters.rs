//! Entity extraction from raw query text
//!
//! This module provides:
//! - QueryFilters: the phase/status hints and location text of one query
//! - FilterExtractor: regex-driven extraction, patterns compiled once
//! - PhaseMatcher: tests a record's phase field against an extracted phase
//!
//! # Grammar
//!
//! - Phase: `phase\s*([0-4]|i{1,3}v?|iv)`, case-insensitive, leftmost match.
//!   The roman alternative is intentionally permissive (`iiv`, `iiiv` match).
//! - Status: one of `recruiting | active | completed | not recruiting |
//!   enrolling`, case-insensitive, leftmost match.
//! - Location: nothing is extracted; the lower-cased query and its tokens
//!   are kept for substring tests against each record's city and state.

use regex::Regex;

/// Phase language in a query
const PHASE_PATTERN: &str = r"(?i)phase\s*([0-4]|i{1,3}v?|iv)";

/// Designator inside an already-matched phase substring
const DESIGNATOR_PATTERN: &str = r"([0-4]|i{1,3}v?|iv)";

/// Recruitment status phrases
const STATUS_PATTERN: &str = r"(?i)(recruiting|active|completed|not recruiting|enrolling)";

/// Every designator the phase grammar can produce
const DESIGNATORS: &[&str] = &[
    "0", "1", "2", "3", "4", "i", "ii", "iii", "iv", "iiv", "iiiv",
];

/// Digit/roman counterpart of a designator, in both directions
fn counterpart(designator: &str) -> Option<&'static str> {
    match designator {
        "1" => Some("i"),
        "2" => Some("ii"),
        "3" => Some("iii"),
        "4" => Some("iv"),
        "i" => Some("1"),
        "ii" => Some("2"),
        "iii" => Some("3"),
        "iv" => Some("4"),
        _ => None,
    }
}

/// Pattern matched against a lower-cased record phase field
fn record_phase_pattern(designator: &str) -> String {
    let mut variants = vec![regex::escape(designator)];
    if let Some(other) = counterpart(designator) {
        variants.push(other.to_string());
    }
    format!(r"phase\s*(?:{})\b", variants.join("|"))
}

// ============================================================================
// QueryFilters
// ============================================================================

/// Structured hints derived from one query
///
/// Lives for a single search call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilters {
    /// Matched phase substring, lower-cased (e.g. "phase 2", "phase iii")
    pub phase: Option<String>,

    /// Matched status phrase, lower-cased
    pub status: Option<String>,

    /// Lower-cased raw query, for location substring tests
    pub query_text: String,

    /// Query tokens, for exact matching of short state codes
    pub query_tokens: Vec<String>,
}

impl QueryFilters {
    /// Whether a phase or status hint was found
    pub fn has_entities(&self) -> bool {
        self.phase.is_some() || self.status.is_some()
    }
}

// ============================================================================
// PhaseMatcher
// ============================================================================

/// Test for a record's phase field, derived from the phase filter
#[derive(Debug, Clone)]
pub enum PhaseMatcher {
    /// Word-bounded match of `phase` followed by the designator or its
    /// digit/roman counterpart
    Designator {
        /// Designator found in the filter (e.g. "2", "iii")
        designator: String,
        /// Compiled record pattern
        pattern: Regex,
    },
    /// Plain substring test, used when no designator can be read from the
    /// filter text
    Literal(String),
}

impl PhaseMatcher {
    /// Check a record's phase field
    pub fn matches(&self, record_phase: &str) -> bool {
        let phase = record_phase.to_lowercase();
        match self {
            PhaseMatcher::Designator { pattern, .. } => pattern.is_match(&phase),
            PhaseMatcher::Literal(text) => phase.contains(text.as_str()),
        }
    }
}

// ============================================================================
// FilterExtractor
// ============================================================================

/// Compiled extraction patterns
///
/// Built once per engine; extraction and matcher construction never compile
/// a regex for any designator the phase grammar can produce.
#[derive(Debug, Clone)]
pub struct FilterExtractor {
    phase: Regex,
    designator: Regex,
    status: Regex,
    /// Record patterns keyed by designator
    record_phase: Vec<(&'static str, Regex)>,
}

impl Default for FilterExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterExtractor {
    /// Compile all patterns
    pub fn new() -> Self {
        let compile = |pattern: &str| Regex::new(pattern).expect("static pattern is valid");
        FilterExtractor {
            phase: compile(PHASE_PATTERN),
            designator: compile(DESIGNATOR_PATTERN),
            status: compile(STATUS_PATTERN),
            record_phase: DESIGNATORS
                .iter()
                .map(|&d| (d, compile(record_phase_pattern(d).as_str())))
                .collect(),
        }
    }

    /// Extract the phase hint, lower-cased
    pub fn extract_phase(&self, query: &str) -> Option<String> {
        self.phase.find(query).map(|m| m.as_str().to_lowercase())
    }

    /// Extract the status hint, lower-cased
    pub fn extract_status(&self, query: &str) -> Option<String> {
        self.status.find(query).map(|m| m.as_str().to_lowercase())
    }

    /// Derive all filters from a query and its tokens
    pub fn extract(&self, query: &str, query_tokens: &[String]) -> QueryFilters {
        QueryFilters {
            phase: self.extract_phase(query),
            status: self.extract_status(query),
            query_text: query.to_lowercase(),
            query_tokens: query_tokens.to_vec(),
        }
    }

    /// Build the record test for a phase filter string.
    ///
    /// Falls back to [`PhaseMatcher::Literal`] when the filter holds no
    /// designator. Filters produced by [`extract_phase`](Self::extract_phase)
    /// always hold one.
    pub fn phase_matcher(&self, phase_filter: &str) -> PhaseMatcher {
        let Some(found) = self.designator.find(phase_filter) else {
            return PhaseMatcher::Literal(phase_filter.to_string());
        };
        let designator = found.as_str();

        let pattern = match self.record_phase.iter().find(|(d, _)| *d == designator) {
            Some((_, pattern)) => pattern.clone(),
            None => match Regex::new(&record_phase_pattern(designator)) {
                Ok(pattern) => pattern,
                Err(_) => return PhaseMatcher::Literal(phase_filter.to_string()),
            },
        };

        PhaseMatcher::Designator {
            designator: designator.to_string(),
            pattern,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
