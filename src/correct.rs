//! Context-aware diacritic correction for a single word token.
//!
//! The algorithm works on the lowercase form of the word:
//!
//! 1. the combined åñ pattern is resolved as a unit,
//! 2. legitimate ñ contexts are shielded behind private-use placeholders,
//! 3. family priority rules fire in table order (first match wins per site),
//! 4. the family default claims any marker still standing,
//! 5. placeholders are restored verbatim,
//! 6. the original case pattern is re-applied.
//!
//! A marker no rule can claim degrades to pass-through; the validator flags
//! it rather than the corrector guessing.

use crate::classify::{classify, detect_case_pattern, marker_profile};
use crate::models::{CasePattern, CorrectionResult, EngineParams, MarkerProfile, WordClass};
use crate::rules::{
    CorrectionRule, A_DEFAULT, A_RULES, COMBINED_RULE, MARKER_A, MARKER_N, N_DEFAULT,
    N_EXCEPTIONS, N_RULES,
};

/// Start of the private-use range used for shield placeholders. Guaranteed
/// not to collide with any alphabet character or token content: the
/// tokenizer never admits private-use characters into word tokens.
const PLACEHOLDER_BASE: u32 = 0xE000;

/// Correct one word token.
///
/// Clean and non-alphabetic words come back unchanged with full confidence.
pub fn correct_word(word: &str, params: &EngineParams) -> CorrectionResult {
    let word_class = classify(word);
    if matches!(word_class, WordClass::Clean | WordClass::NonAlphabetic) {
        return CorrectionResult::unchanged(word, word_class);
    }

    let profile = marker_profile(word);
    let mut rules_applied = Vec::new();
    let mut work = word.to_lowercase();

    // The combined pattern stands for ṛṣ and must be consumed before either
    // family can claim one of its halves. It rewrites both markers, so it
    // only runs when both families are active.
    if params.fix_a_family && params.fix_n_family && work.contains(COMBINED_RULE.pattern) {
        work = apply_rule(&work, &COMBINED_RULE, &mut rules_applied);
    }

    if params.fix_n_family && work.contains(MARKER_N) {
        let (shielded, side_table) = shield_exceptions(&work, &mut rules_applied);
        let mut current = shielded;
        for rule in N_RULES {
            if current.contains(rule.pattern) {
                current = apply_rule(&current, rule, &mut rules_applied);
            }
        }
        current = apply_rule(&current, &N_DEFAULT, &mut rules_applied);
        work = restore_placeholders(&current, &side_table);
    }

    if params.fix_a_family && work.contains(MARKER_A) {
        for rule in A_RULES {
            if work.contains(rule.pattern) {
                work = apply_rule(&work, rule, &mut rules_applied);
            }
        }
        work = apply_rule(&work, &A_DEFAULT, &mut rules_applied);
    }

    let corrected = restore_case_pattern(word, &work);
    let changed = corrected != word;

    CorrectionResult {
        original: word.to_string(),
        corrected,
        word_class,
        rules_applied,
        changed,
        confidence: base_confidence(&profile),
    }
}

/// Base confidence from the marker profile; validation may lower it further
fn base_confidence(profile: &MarkerProfile) -> f32 {
    if profile.combined > 0 {
        0.98
    } else if profile.n_markers + profile.a_markers == 1 {
        0.99
    } else if profile.n_markers > 0 && profile.a_markers > 0 {
        0.95
    } else if profile.n_markers > 1 || profile.a_markers > 1 {
        0.95
    } else {
        0.90
    }
}

/// Apply one rule in a single left-to-right pass, recording each firing.
///
/// Guarded occurrences that fail their guard are skipped; scanning resumes
/// after a fired replacement, never re-entering the replaced span.
fn apply_rule(text: &str, rule: &CorrectionRule, fired: &mut Vec<String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(rel) = text[pos..].find(rule.pattern) {
        let start = pos + rel;
        let end = start + rule.pattern.len();

        if rule.guard_allows(text, start, end) {
            out.push_str(&text[pos..start]);
            out.push_str(rule.replacement);
            fired.push(rule.id.to_string());
            pos = end;
        } else {
            // Step past the first character of the failed site and rescan
            let step = text[start..]
                .chars()
                .next()
                .map_or(1, |c| c.len_utf8());
            out.push_str(&text[pos..start + step]);
            pos = start + step;
        }
    }

    out.push_str(&text[pos..]);
    out
}

/// Replace every legitimate ñ context with a per-occurrence placeholder.
///
/// The side table maps placeholder index to the original fragment, scoped to
/// this call only; each protection is recorded in the audit trail so a word
/// whose markers are all legitimate does not read as an unexplained
/// pass-through.
fn shield_exceptions(text: &str, applied: &mut Vec<String>) -> (String, Vec<String>) {
    let mut side_table: Vec<String> = Vec::new();
    let mut current = text.to_string();

    for exception in N_EXCEPTIONS {
        if !current.contains(exception.pattern) {
            continue;
        }

        let mut out = String::with_capacity(current.len());
        let mut pos = 0;

        while let Some(rel) = current[pos..].find(exception.pattern) {
            let start = pos + rel;
            let end = start + exception.pattern.len();

            if exception.guard_allows(&current, start) {
                out.push_str(&current[pos..start]);
                let placeholder = char::from_u32(PLACEHOLDER_BASE + side_table.len() as u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                out.push(placeholder);
                side_table.push(exception.pattern.to_string());
                applied.push(format!("{}(protected)", exception.id));
                pos = end;
            } else {
                let step = current[start..]
                    .chars()
                    .next()
                    .map_or(1, |c| c.len_utf8());
                out.push_str(&current[pos..start + step]);
                pos = start + step;
            }
        }

        out.push_str(&current[pos..]);
        current = out;
    }

    (current, side_table)
}

/// Substitute shield placeholders back to their original fragments
fn restore_placeholders(text: &str, side_table: &[String]) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match (c as u32).checked_sub(PLACEHOLDER_BASE) {
            Some(idx) if (idx as usize) < side_table.len() => {
                out.push_str(&side_table[idx as usize]);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Re-apply the original word's case pattern to its corrected lowercase form.
///
/// Lower, Upper and Title are restored wholesale; Mixed maps case position by
/// position over the alphabetic characters, so a corrected run inside an
/// already-uppercase region keeps that region's casing. Replacement growth
/// past the original's length stays lowercase.
pub fn restore_case_pattern(original: &str, corrected: &str) -> String {
    match detect_case_pattern(original) {
        CasePattern::Lower => corrected.to_string(),
        CasePattern::Upper => corrected.to_uppercase(),
        CasePattern::Title => {
            let mut out = String::with_capacity(corrected.len());
            let mut capitalized = false;
            for c in corrected.chars() {
                if !capitalized && c.is_alphabetic() {
                    out.extend(c.to_uppercase());
                    capitalized = true;
                } else {
                    out.push(c);
                }
            }
            out
        }
        CasePattern::Mixed => {
            let original_chars: Vec<char> = original.chars().collect();
            let mut out = String::with_capacity(corrected.len());
            let mut orig_idx = 0;

            for c in corrected.chars() {
                if !c.is_alphabetic() {
                    out.push(c);
                    continue;
                }
                while orig_idx < original_chars.len() && !original_chars[orig_idx].is_alphabetic()
                {
                    orig_idx += 1;
                }
                if orig_idx < original_chars.len() {
                    if original_chars[orig_idx].is_uppercase() {
                        out.extend(c.to_uppercase());
                    } else {
                        out.push(c);
                    }
                    orig_idx += 1;
                } else {
                    out.push(c);
                }
            }
            out
        }
    }
}
