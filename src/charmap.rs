//! Global character map: direct substitutions applied before any word-level
//! analysis.
//!
//! Table order is a correctness invariant, not an optimization: combined
//! multi-character patterns must appear before any entry whose source is a
//! substring of them, otherwise an earlier single-character substitution
//! permanently hides the combined pattern. Case variants are listed
//! explicitly; no implicit folding happens here.

/// One ordered substitution pair
#[derive(Debug, Clone, Copy)]
pub struct CharMapEntry {
    pub source: &'static str,
    pub replacement: &'static str,
}

const fn entry(source: &'static str, replacement: &'static str) -> CharMapEntry {
    CharMapEntry {
        source,
        replacement,
    }
}

/// The global substitution table.
///
/// The åñ entries cover the combined pattern (kåñṇa -> kṛṣṇa, dåñṭa -> dṛṣṭa,
/// håñīkeśa -> hṛṣīkeśa, åñi -> ṛṣi) and must stay ahead of any future
/// standalone å or ñ entry. The remaining pairs are one-for-one glyph
/// confusions from PDF font mis-mapping; several would corrupt French or
/// Czech text (à, ˇ) but the corpus is Sanskrit-only.
pub const CHAR_MAP: &[CharMapEntry] = &[
    entry("åñ", "ṛṣ"),
    entry("Åñ", "Ṛṣ"),
    entry("ÅÑ", "ṚṢ"),
    entry("ä", "ā"),
    entry("Ä", "Ā"),
    entry("é", "ī"),
    entry("É", "Ī"),
    entry("ü", "ū"),
    entry("Ü", "Ū"),
    entry("î", "ī"),
    entry("Î", "Ī"),
    entry("ë", "ṇ"),
    entry("Ë", "Ṇ"),
    entry("√", "ṇ"),
    entry("ö", "ṭ"),
    entry("Ö", "Ṭ"),
    entry("ò", "ḍ"),
    entry("Ò", "Ḍ"),
    entry("∂", "ḍ"),
    entry("∫", "ṅ"),
    entry("ì", "ṅ"),
    entry("Ì", "Ṅ"),
    entry("ç", "ś"),
    entry("Ç", "Ś"),
    entry("ß", "ṣ"),
    entry("®", "ṛ"),
    entry("µ", "ṁ"),
    entry("ù", "ḥ"),
    entry("Ù", "Ḥ"),
    entry("†", "ṭ"),
    entry("ˇ", "Ṭ"),
    entry("à", "ṁ"),
    entry("À", "Ṁ"),
    entry("ï", "ñ"),
    entry("Ï", "Ñ"),
];

/// Apply the global character map.
///
/// Returns the rewritten text and the per-entry replacement counts
/// (entries that never matched are omitted). Total over all Unicode input;
/// unmatched characters pass through unchanged.
pub fn apply_char_map(text: &str) -> (String, Vec<(String, usize)>) {
    apply_char_map_with(text, CHAR_MAP)
}

/// Apply an explicit substitution table, in table order.
///
/// Each pair gets a single left-to-right non-overlapping pass; later pairs
/// see the output of earlier pairs, and no pair is re-applied.
pub fn apply_char_map_with(text: &str, map: &[CharMapEntry]) -> (String, Vec<(String, usize)>) {
    let mut result = text.to_string();
    let mut replacements = Vec::new();

    for e in map {
        let count = result.matches(e.source).count();
        if count > 0 {
            result = result.replace(e.source, e.replacement);
            replacements.push((format!("{}→{}", e.source, e.replacement), count));
        }
    }

    (result, replacements)
}

/// Check the longest-match-first ordering invariant: no entry may be a
/// strict substring of a later entry's source.
pub fn ordering_invariant_holds(map: &[CharMapEntry]) -> bool {
    for (i, shorter) in map.iter().enumerate() {
        for longer in &map[i + 1..] {
            if longer.source != shorter.source && longer.source.contains(shorter.source) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_pattern_resolves_as_unit() {
        let (fixed, counts) = apply_char_map("kåñṇa dåñṭa håñīkeśa åñi");
        assert_eq!(fixed, "kṛṣṇa dṛṣṭa hṛṣīkeśa ṛṣi");
        assert_eq!(counts[0].0, "åñ→ṛṣ");
        assert_eq!(counts[0].1, 4);
    }

    #[test]
    fn test_combined_pattern_case_variants() {
        let (fixed, _) = apply_char_map("Kåñṇa KÅÑṆA");
        assert_eq!(fixed, "Kṛṣṇa KṚṢṆA");
    }

    #[test]
    fn test_single_glyph_substitutions() {
        let (fixed, _) = apply_char_map("kåñëa says oà to Jïäna");
        assert_eq!(fixed, "kṛṣṇa says oṁ to Jñāna");
    }

    #[test]
    fn test_caron_and_grave_confusions() {
        let (fixed, _) = apply_char_map("ˇhākura ekaà satataà");
        assert_eq!(fixed, "Ṭhākura ekaṁ satataṁ");
    }

    #[test]
    fn test_grave_is_a_pure_glyph_substitution() {
        // à stands for ṁ and nothing else; no vowel is ever inserted
        let (fixed, _) = apply_char_map("satatà");
        assert_eq!(fixed, "satatṁ");
    }

    #[test]
    fn test_unmatched_input_passes_through() {
        let input = "Page 123: $99.99 (info@example.com)";
        let (fixed, counts) = apply_char_map(input);
        assert_eq!(fixed, input);
        assert!(counts.is_empty());
    }

    #[test]
    fn test_table_ordering_invariant() {
        assert!(ordering_invariant_holds(CHAR_MAP));
    }

    #[test]
    fn test_misordered_table_hides_combined_pattern() {
        // Regression guard: moving a conflicting single-character entry ahead
        // of the combined pattern must break the combined rewrite.
        let misordered = &[entry("ñ", "ṣ"), entry("åñ", "ṛṣ")];
        assert!(!ordering_invariant_holds(misordered));
        let (broken, _) = apply_char_map_with("kåñṇa", misordered);
        assert_ne!(broken, "kṛṣṇa");
        assert_eq!(broken, "kåṣṇa");

        let well_ordered = &[entry("åñ", "ṛṣ"), entry("ñ", "ṣ")];
        assert!(ordering_invariant_holds(well_ordered));
        let (fixed, _) = apply_char_map_with("kåñṇa", well_ordered);
        assert_eq!(fixed, "kṛṣṇa");
    }

    #[test]
    fn test_counts_reported_per_entry() {
        let (_, counts) = apply_char_map("ää ç");
        let map: std::collections::HashMap<_, _> = counts.into_iter().collect();
        assert_eq!(map.get("ä→ā"), Some(&2));
        assert_eq!(map.get("ç→ś"), Some(&1));
    }
}
