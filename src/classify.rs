//! Word classification and case-pattern detection.
//!
//! Classification is a pure function of the token text; neighboring tokens
//! are never consulted.

use crate::models::{CasePattern, MarkerProfile, WordClass};
use crate::rules::{COMBINED_RULE, MARKER_A, MARKER_N};

/// Classify a word token by the ambiguous markers it contains.
///
/// Decision order: no alphabetic content first (skipped), then the combined
/// contiguous pattern, then the å family, then the ñ family. A word holding
/// both markers non-adjacently classifies as the å family; the corrector
/// applies both rule sets to such a word in two independent passes.
pub fn classify(word: &str) -> WordClass {
    if !word.chars().any(char::is_alphabetic) {
        return WordClass::NonAlphabetic;
    }

    let lower = word.to_lowercase();
    if lower.contains(COMBINED_RULE.pattern) {
        return WordClass::CombinedMarkers;
    }
    if lower.contains(MARKER_A) {
        return WordClass::MarkerA;
    }
    if lower.contains(MARKER_N) {
        return WordClass::MarkerN;
    }
    WordClass::Clean
}

/// Count the ambiguous markers in a word's lowercase form
pub fn marker_profile(word: &str) -> MarkerProfile {
    let lower = word.to_lowercase();
    MarkerProfile {
        n_markers: lower.matches(MARKER_N).count(),
        a_markers: lower.matches(MARKER_A).count(),
        combined: lower.matches(COMBINED_RULE.pattern).count(),
    }
}

/// Detect the case pattern over a word's alphabetic characters.
///
/// Words without alphabetic content report `Lower` (nothing to restore).
pub fn detect_case_pattern(word: &str) -> CasePattern {
    let alpha: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    if alpha.is_empty() {
        return CasePattern::Lower;
    }

    if alpha.iter().all(|c| c.is_uppercase()) {
        return CasePattern::Upper;
    }
    if alpha.iter().all(|c| c.is_lowercase()) {
        return CasePattern::Lower;
    }
    if alpha[0].is_uppercase() && alpha[1..].iter().all(|c| c.is_lowercase()) {
        return CasePattern::Title;
    }
    CasePattern::Mixed
}
