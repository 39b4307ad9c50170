//! Text tokenizer for indexing and queries
//!
//! Pipeline: lowercase → drop everything except `a-z`, `0-9` and whitespace
//!           → split on whitespace (including U+001C..=U+001F)
//!
//! Punctuation is removed rather than treated as a separator, so hyphenated
//! terms collapse into one token ("covid-19" → "covid19"). There is no
//! stemming, stopword list or minimum length.

/// Token separator: Unicode whitespace plus the ASCII information
/// separators U+001C..=U+001F.
#[inline]
fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{1c}'..='\u{1f}')
}

/// Check if a lower-cased character survives tokenization.
#[inline]
fn is_kept(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || is_separator(c)
}

/// Tokenize text into searchable terms.
///
/// The same function is applied to record documents at build time and to
/// query text at search time. Empty or punctuation-only input yields an
/// empty vector.
///
/// # Example
///
/// ```
/// use trialsearch_search::tokenizer::tokenize;
///
/// let tokens = tokenize("COVID-19 Vaccine, Phase II");
/// assert_eq!(tokens, vec!["covid19", "vaccine", "phase", "ii"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text.to_lowercase().chars().filter(|&c| is_kept(c)).collect();
    cleaned
        .split(is_separator)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
