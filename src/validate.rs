//! Post-correction validation.
//!
//! Validation never rewrites anything. It inspects a finished correction,
//! flags anomalies, and adjusts the confidence score; deciding what to do
//! with a flagged word is the caller's job.
//!
//! Severity is two-tier: residual or reintroduced markers are errors and
//! fail the word, everything else is a warning that only lowers confidence.

use crate::models::{Anomaly, AnomalyReason, CorrectionResult, EngineParams, ValidationReport};
use crate::rules::{is_valid_iast, MARKER_A, MARKER_N};

const ERROR_PENALTY: f32 = 0.7;
const WARNING_PENALTY: f32 = 0.9;

/// Maximum character-count drift a correction is allowed before it is
/// flagged (dhåtr -> dhṛtar legitimately grows by one)
const MAX_LENGTH_DRIFT: usize = 2;

/// Validate one correction against the legal IAST alphabet and the
/// marker-elimination contract.
pub fn validate(result: &CorrectionResult, params: &EngineParams) -> ValidationReport {
    let mut anomalies = Vec::new();

    let original_lower = result.original.to_lowercase();
    let corrected_lower = result.corrected.to_lowercase();

    check_marker(
        &original_lower,
        &corrected_lower,
        MARKER_A,
        |_, _| false,
        &mut anomalies,
    );
    check_marker(
        &original_lower,
        &corrected_lower,
        MARKER_N,
        is_legitimate_n,
        &mut anomalies,
    );

    if !result.changed && result.rules_applied.is_empty() && result.confidence < 1.0 {
        // An ambiguous word where neither a rule nor a protected exception
        // accounted for the markers
        anomalies.push(Anomaly {
            offset: 0,
            reason: AnomalyReason::UnexpectedPassThrough,
        });
    }

    let from = result.original.chars().count();
    let to = result.corrected.chars().count();
    if from.abs_diff(to) > MAX_LENGTH_DRIFT {
        anomalies.push(Anomaly {
            offset: 0,
            reason: AnomalyReason::LengthDrift { from, to },
        });
    }

    for (offset, c) in corrected_lower.char_indices() {
        if c.is_alphabetic() && c != MARKER_A && c != MARKER_N && !is_valid_iast(c) {
            anomalies.push(Anomaly {
                offset,
                reason: AnomalyReason::NonIastCharacter(c),
            });
        }
    }

    let has_error = anomalies.iter().any(|a| a.reason.is_error());
    let has_warning = anomalies.iter().any(|a| !a.reason.is_error());

    let mut confidence = result.confidence;
    if has_error {
        confidence *= ERROR_PENALTY;
    }
    if has_warning {
        confidence *= WARNING_PENALTY;
    }

    ValidationReport {
        passed: !has_error,
        confidence,
        needs_review: confidence < params.review_threshold,
        anomalies,
    }
}

/// Flag surviving or reintroduced occurrences of one marker.
///
/// Occurrences beyond the original's count are reintroductions (a rule
/// replacement put the marker back); the rest are residuals, excused only
/// when `legitimate` accepts the site.
fn check_marker(
    original_lower: &str,
    corrected_lower: &str,
    marker: char,
    legitimate: impl Fn(&str, usize) -> bool,
    anomalies: &mut Vec<Anomaly>,
) {
    let before = original_lower.matches(marker).count();
    let after = corrected_lower.matches(marker).count();

    if after > before {
        let offset = corrected_lower.find(marker).unwrap_or(0);
        anomalies.push(Anomaly {
            offset,
            reason: AnomalyReason::MarkerReintroduced(marker),
        });
        return;
    }

    for (offset, c) in corrected_lower.char_indices() {
        if c == marker && !legitimate(corrected_lower, offset) {
            anomalies.push(Anomaly {
                offset,
                reason: AnomalyReason::ResidualMarker(marker),
            });
        }
    }
}

/// Whether the ñ at byte offset `idx` sits in a legitimate Sanskrit context:
/// after j (jñāna) or before c or j (pañca, sañjaya, pañcha via the c).
fn is_legitimate_n(lower: &str, idx: usize) -> bool {
    if lower[..idx].chars().next_back() == Some('j') {
        return true;
    }
    matches!(
        lower[idx + MARKER_N.len_utf8()..].chars().next(),
        Some('c') | Some('j')
    )
}
