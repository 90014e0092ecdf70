//! Data structures for the IAST repair pipeline.

use serde::Serialize;
use std::collections::HashMap;

/// Kind of a tokenized span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    /// Run of letters from the extended Latin/IAST alphabet (plus hyphens)
    Word,
    /// Run of blank characters, including newlines
    Whitespace,
    /// Run of symbol characters
    Punctuation,
    /// Digit run, or a single character claimed by no other kind
    Other,
}

/// A single span of the input text.
///
/// The ordered token sequence for any input concatenates back to that input
/// exactly; offsets are byte positions into the original buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Classification of a word token by the ambiguous markers it contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WordClass {
    /// No ambiguous markers; left untouched
    Clean,
    /// Contains the contiguous combined pattern (åñ in any casing)
    CombinedMarkers,
    /// Contains the å-family marker
    MarkerA,
    /// Contains the ñ-family marker
    MarkerN,
    /// No alphabetic content (e.g. a bare hyphen run); skipped
    NonAlphabetic,
}

impl WordClass {
    pub fn name(&self) -> &'static str {
        match self {
            WordClass::Clean => "clean",
            WordClass::CombinedMarkers => "combined_markers",
            WordClass::MarkerA => "marker_a",
            WordClass::MarkerN => "marker_n",
            WordClass::NonAlphabetic => "non_alphabetic",
        }
    }
}

/// Case pattern of a word's alphabetic characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CasePattern {
    Lower,
    Upper,
    Title,
    Mixed,
}

/// Marker counts for a word, computed over its lowercase form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerProfile {
    pub n_markers: usize,
    pub a_markers: usize,
    pub combined: usize,
}

impl MarkerProfile {
    pub fn is_clean(&self) -> bool {
        self.n_markers == 0 && self.a_markers == 0
    }
}

/// Result of correcting a single word token
#[derive(Debug, Clone, Serialize)]
pub struct CorrectionResult {
    pub original: String,
    pub corrected: String,
    pub word_class: WordClass,
    /// Identifiers of the rules that fired, in firing order
    pub rules_applied: Vec<String>,
    pub changed: bool,
    /// Base confidence from the marker profile, before validation penalties
    pub confidence: f32,
}

impl CorrectionResult {
    /// An identity result for tokens the corrector does not touch
    pub fn unchanged(text: &str, word_class: WordClass) -> Self {
        CorrectionResult {
            original: text.to_string(),
            corrected: text.to_string(),
            word_class,
            rules_applied: Vec::new(),
            changed: false,
            confidence: 1.0,
        }
    }
}

/// Why the validator flagged a position in a corrected word
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AnomalyReason {
    /// An ambiguous marker survived correction outside a legitimate context
    ResidualMarker(char),
    /// A rule replacement put a marker character back into the output
    MarkerReintroduced(char),
    /// Alphabetic output character outside the legal IAST alphabet
    NonIastCharacter(char),
    /// Token was classified as ambiguous but no rule fired
    UnexpectedPassThrough,
    /// Correction changed the length by more than expected
    LengthDrift { from: usize, to: usize },
}

impl AnomalyReason {
    /// Errors gate `passed`; warnings only reduce confidence
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            AnomalyReason::ResidualMarker(_) | AnomalyReason::MarkerReintroduced(_)
        )
    }
}

impl std::fmt::Display for AnomalyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnomalyReason::ResidualMarker(c) => write!(f, "residual marker '{}'", c),
            AnomalyReason::MarkerReintroduced(c) => write!(f, "rule reintroduced marker '{}'", c),
            AnomalyReason::NonIastCharacter(c) => write!(f, "non-IAST character '{}'", c),
            AnomalyReason::UnexpectedPassThrough => write!(f, "ambiguous token passed through"),
            AnomalyReason::LengthDrift { from, to } => {
                write!(f, "length changed {} -> {}", from, to)
            }
        }
    }
}

/// A flagged position in a corrected word
#[derive(Debug, Clone, Serialize)]
pub struct Anomaly {
    /// Byte offset into the corrected word
    pub offset: usize,
    pub reason: AnomalyReason,
}

/// Validation outcome for one correction
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub passed: bool,
    /// Final confidence after anomaly penalties
    pub confidence: f32,
    pub anomalies: Vec<Anomaly>,
    pub needs_review: bool,
}

/// Engine parameters
///
/// The per-family switches exist for isolated testing; production runs keep
/// both enabled.
#[derive(Debug, Clone, Serialize)]
pub struct EngineParams {
    /// Apply å-family corrections (å -> ṛ/ā)
    pub fix_a_family: bool,
    /// Apply ñ-family corrections (ñ -> ṣ, with protected exceptions)
    pub fix_n_family: bool,
    /// Confidence at or above which a correction counts as high confidence
    pub high_confidence: f32,
    /// Confidence below which a correction is flagged for manual review
    pub review_threshold: f32,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            fix_a_family: true,
            fix_n_family: true,
            high_confidence: 0.95,
            review_threshold: 0.90,
        }
    }
}

/// Aggregated statistics for one processed page
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageStatistics {
    pub tokens_total: usize,
    pub words_total: usize,
    pub words_changed: usize,

    /// Character-map replacement counts, keyed by rule id ("å→ā" style)
    pub char_map_replacements: HashMap<String, usize>,
    /// Word-class distribution over word tokens
    pub class_distribution: HashMap<String, usize>,

    pub n_corrections: usize,
    pub a_corrections: usize,
    pub combined_corrections: usize,
    /// Rule firing counts across the page
    pub rules_fired: HashMap<String, usize>,

    pub high_confidence_count: usize,
    pub medium_confidence_count: usize,
    pub low_confidence_count: usize,
    pub validation_errors: usize,
    pub needs_review: usize,

    pub stage_times_ms: HashMap<String, f64>,
    pub processing_time_ms: f64,
}

/// Complete result of one page run.
///
/// Constructed once per call and returned to the caller; the pipeline keeps
/// no state between pages.
#[derive(Debug, Clone, Serialize)]
pub struct PageResult {
    pub page_number: u32,
    pub original_text: String,
    pub corrected_text: String,
    /// One entry per word token, in input order; clean words carry an
    /// identity entry so the list aligns positionally with the token stream
    pub corrections: Vec<CorrectionResult>,
    /// Validation reports aligned to `corrections`
    pub reports: Vec<ValidationReport>,
    pub statistics: PageStatistics,
}
