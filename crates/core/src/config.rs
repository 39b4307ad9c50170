//! Configuration via `trialsearch.toml`
//!
//! A single TOML file holds the collection path, ranking defaults, BM25
//! tuning and the remote fetch settings. Every key is optional; missing
//! keys take the defaults below. Boost amounts are fixed constants of the
//! ranking policy and are deliberately absent from this file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "trialsearch.toml";

/// Default collection file.
pub const DEFAULT_DATA_PATH: &str = "data/sample_trials.csv";

/// Default ClinicalTrials.gov studies endpoint.
pub const DEFAULT_FETCH_URL: &str = "https://clinicaltrials.gov/api/v2/studies";

// ============================================================================
// Bm25Params
// ============================================================================

/// Okapi BM25 tuning constants
///
/// `epsilon` is the floor factor applied to terms whose IDF would otherwise
/// be negative: such terms get `epsilon * mean_idf`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bm25Params {
    /// Term-frequency saturation (default 1.5)
    #[serde(default = "default_k1")]
    pub k1: f64,
    /// Length normalization (default 0.75)
    #[serde(default = "default_b")]
    pub b: f64,
    /// Negative-IDF floor factor (default 0.25)
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

fn default_k1() -> f64 {
    1.5
}

fn default_b() -> f64 {
    0.75
}

fn default_epsilon() -> f64 {
    0.25
}

impl Default for Bm25Params {
    fn default() -> Self {
        Bm25Params {
            k1: default_k1(),
            b: default_b(),
            epsilon: default_epsilon(),
        }
    }
}

impl Bm25Params {
    /// Create parameters with the default epsilon
    pub fn new(k1: f64, b: f64) -> Self {
        Bm25Params {
            k1,
            b,
            epsilon: default_epsilon(),
        }
    }

    /// Builder: set epsilon
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Check that every constant is finite, `k1 >= 0` and `0 <= b <= 1`.
    pub fn validate(&self) -> Result<()> {
        if !self.k1.is_finite() || self.k1 < 0.0 {
            return Err(Error::config(format!(
                "bm25.k1 must be a finite non-negative number, got {}",
                self.k1
            )));
        }
        if !self.b.is_finite() || !(0.0..=1.0).contains(&self.b) {
            return Err(Error::config(format!(
                "bm25.b must be within [0, 1], got {}",
                self.b
            )));
        }
        if !self.epsilon.is_finite() {
            return Err(Error::config(format!(
                "bm25.epsilon must be finite, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

// ============================================================================
// FetchConfig
// ============================================================================

/// Settings for pulling a fresh collection from the registry API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Studies endpoint
    #[serde(default = "default_fetch_url")]
    pub base_url: String,
    /// Number of studies requested
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Request timeout in milliseconds (default: 30000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_fetch_url() -> String {
    DEFAULT_FETCH_URL.to_string()
}

fn default_page_size() -> usize {
    100
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            base_url: default_fetch_url(),
            page_size: default_page_size(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

// ============================================================================
// SearchConfig
// ============================================================================

/// Configuration loaded from `trialsearch.toml`.
///
/// # Example
///
/// ```toml
/// data_path = "data/sample_trials.csv"
/// top_k = 10
/// use_filters = true
///
/// [bm25]
/// k1 = 1.5
/// b = 0.75
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Collection CSV file
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    /// Results per query when the caller does not say
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Whether entity boosts are on by default
    #[serde(default = "default_use_filters")]
    pub use_filters: bool,
    /// BM25 tuning
    #[serde(default)]
    pub bm25: Bm25Params,
    /// Remote fetch settings
    #[serde(default)]
    pub fetch: FetchConfig,
}

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn default_top_k() -> usize {
    crate::search_types::DEFAULT_TOP_K
}

fn default_use_filters() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            data_path: default_data_path(),
            top_k: default_top_k(),
            use_filters: default_use_filters(),
            bm25: Bm25Params::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# trialsearch configuration

# Collection file (CSV with NCTId, BriefTitle, BriefSummary, Condition,
# Phase, OverallStatus, LocationCity, LocationState columns)
data_path = "data/sample_trials.csv"

# Results per query (default: 10)
top_k = 10

# Apply phase/status/location boosts (default: true)
use_filters = true

# Okapi BM25 tuning
[bm25]
k1 = 1.5
b = 0.75
epsilon = 0.25

# ClinicalTrials.gov fetch
[fetch]
base_url = "https://clinicaltrials.gov/api/v2/studies"
page_size = 100
timeout_ms = 30000
"#
    }

    /// Parse config from TOML text and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SearchConfig = toml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::ConfigError(msg) => {
                Error::ConfigError(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(true)` if the file was created.
    pub fn write_default_if_missing(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        std::fs::write(path, Self::default_toml()).map_err(|e| {
            Error::config(format!(
                "Failed to write default config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(true)
    }

    /// Validate ranking settings.
    pub fn validate(&self) -> Result<()> {
        self.bm25.validate()?;
        if self.fetch.page_size == 0 {
            return Err(Error::config("fetch.page_size must be at least 1"));
        }
        Ok(())
    }
}
