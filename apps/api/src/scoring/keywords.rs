//! Keyword extraction — turns free text into the normalized scoring vocabulary.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximal lowercase alphabetic runs of length ≥ 4. Shorter words and anything
/// containing digits or punctuation is discarded.
static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-z]{4,}\b").expect("word pattern is valid"));

/// Closed list of filler words excluded from the keyword set.
const STOP_WORDS: &[&str] = &[
    "this", "that", "with", "from", "your", "have", "more", "will", "team", "about", "work",
];

/// Extracts the keyword set from a job description: lowercased, tokenized,
/// stop words removed. Membership test only — frequency is not tracked.
pub fn extract_keywords(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .filter(|w| !STOP_WORDS.contains(&w.as_str()))
        .collect()
}

/// Tokenizes bullet text with the same lowercasing and pattern rules as the
/// job description side. Duplicates are kept; each occurrence counts.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}
