//! Correction rule tables for the two ambiguous marker families.
//!
//! This module is the single owner of every family rule, exception guard and
//! the combined pattern. All call sites, including the word-level wrappers in
//! `correct`, evaluate these tables; no second copy of a rule exists anywhere
//! in the crate.
//!
//! All patterns and replacements are lowercase: the corrector normalizes a
//! word to lowercase before rule application and re-derives the original
//! casing afterwards (see `correct::restore_case_pattern`).

/// A priority rule: first match wins, evaluation in table order.
///
/// Guards constrain the characters immediately adjacent to the match site.
/// An empty set means unconstrained. `preceded_by` requires a preceding
/// character (a word-initial match fails it); `not_preceded_by` accepts
/// word-initial matches.
#[derive(Debug, Clone, Copy)]
pub struct CorrectionRule {
    /// Stable identifier used in statistics and audit trails
    pub id: &'static str,
    pub pattern: &'static str,
    pub replacement: &'static str,
    pub preceded_by: &'static [char],
    pub not_preceded_by: &'static [char],
    pub followed_by: &'static [char],
}

impl CorrectionRule {
    const fn plain(id: &'static str, pattern: &'static str, replacement: &'static str) -> Self {
        CorrectionRule {
            id,
            pattern,
            replacement,
            preceded_by: &[],
            not_preceded_by: &[],
            followed_by: &[],
        }
    }

    /// Evaluate the guards at a match site within `text`.
    ///
    /// `start`/`end` are byte offsets of the matched pattern.
    pub fn guard_allows(&self, text: &str, start: usize, end: usize) -> bool {
        if !self.preceded_by.is_empty() {
            match text[..start].chars().next_back() {
                Some(prev) if self.preceded_by.contains(&prev) => {}
                _ => return false,
            }
        }
        if !self.not_preceded_by.is_empty() {
            if let Some(prev) = text[..start].chars().next_back() {
                if self.not_preceded_by.contains(&prev) {
                    return false;
                }
            }
        }
        if !self.followed_by.is_empty() {
            match text[end..].chars().next() {
                Some(next) if self.followed_by.contains(&next) => {}
                _ => return false,
            }
        }
        true
    }
}

/// A legitimate marker context that must be shielded from family rewriting
#[derive(Debug, Clone, Copy)]
pub struct ExceptionPattern {
    pub id: &'static str,
    pub pattern: &'static str,
    /// If non-empty, the character before the pattern must be in this set
    pub preceded_by: &'static [char],
}

impl ExceptionPattern {
    pub fn guard_allows(&self, text: &str, start: usize) -> bool {
        if self.preceded_by.is_empty() {
            return true;
        }
        match text[..start].chars().next_back() {
            Some(prev) => self.preceded_by.contains(&prev),
            None => false,
        }
    }
}

/// The two ambiguous marker characters (lowercase forms)
pub const MARKER_A: char = 'å';
pub const MARKER_N: char = 'ñ';

/// The combined two-marker sequence, resolved as a unit before either family
/// is allowed to touch its halves: åñ stands for ṛṣ (kåñṇa -> kṛṣṇa,
/// dåñṭa -> dṛṣṭa, åñi -> ṛṣi).
pub const COMBINED_RULE: CorrectionRule = CorrectionRule::plain("åñ→ṛṣ", "åñ", "ṛṣ");

const SANDHI_LONG_VOWELS: &[char] = &['ā', 'ī', 'ū'];
const KRT_FOLLOWERS: &[char] = &['a', 'e', 'i', 'u', 'm', 'o', 'ā', 'ī', 'ū'];

/// å-family priority rules, ascending priority (first match wins).
///
/// These encode the ~17% of å occurrences that stand for the vocalic ṛ; the
/// family default maps everything else to the long vowel ā. The guarded
/// entries are lexical disambiguations derived from corpus frequency
/// analysis, kept as literal patterns on purpose: generalizing them would
/// reintroduce the false positives they were written to avoid.
pub const A_RULES: &[CorrectionRule] = &[
    CorrectionRule::plain("åh→ṛh", "åh", "ṛh"),
    CorrectionRule::plain("åḥ→ṛḥ", "åḥ", "ṛḥ"),
    // amṛta; blocked after a long vowel so the sandhi rule below claims those
    CorrectionRule {
        id: "amåt→amṛt",
        pattern: "amåt",
        replacement: "amṛt",
        preceded_by: &[],
        not_preceded_by: SANDHI_LONG_VOWELS,
        followed_by: &[],
    },
    // Compound sandhi: bhagavatāmåta -> bhagavatāmṛta, never -māta
    CorrectionRule {
        id: "måt→mṛt(sandhi)",
        pattern: "måt",
        replacement: "mṛt",
        preceded_by: SANDHI_LONG_VOWELS,
        not_preceded_by: &[],
        followed_by: &[],
    },
    CorrectionRule::plain("småt→smṛt", "småt", "smṛt"),
    CorrectionRule::plain("gåhī→gṛhī", "gåhī", "gṛhī"),
    CorrectionRule::plain("tåpt→tṛpt", "tåpt", "tṛpt"),
    CorrectionRule::plain("tåṇ→tṛṇ", "tåṇ", "tṛṇ"),
    CorrectionRule::plain("dåḍh→dṛḍh", "dåḍh", "dṛḍh"),
    CorrectionRule::plain("dåśy→dṛśy", "dåśy", "dṛśy"),
    CorrectionRule::plain("prakåt→prakṛt", "prakåt", "prakṛt"),
    // kṛta; 'i' before blocks adhikåta-style words, and a vowel must follow
    CorrectionRule {
        id: "kåt→kṛt",
        pattern: "kåt",
        replacement: "kṛt",
        preceded_by: &[],
        not_preceded_by: &['i'],
        followed_by: KRT_FOLLOWERS,
    },
    CorrectionRule::plain("vånd→vṛnd", "vånd", "vṛnd"),
    // Dhṛtarāṣṭra: the compound lost its vowel in the corruption
    CorrectionRule::plain("dhåtr→dhṛtar", "dhåtr", "dhṛtar"),
    // dhṛta; 'i' before keeps vidhātā intact
    CorrectionRule {
        id: "dhåt→dhṛt",
        pattern: "dhåt",
        replacement: "dhṛt",
        preceded_by: &[],
        not_preceded_by: &['i'],
        followed_by: &[],
    },
    CorrectionRule::plain("bhåg→bhṛg", "bhåg", "bhṛg"),
    CorrectionRule::plain("håda→hṛda", "håda", "hṛda"),
];

/// å-family default: the long vowel, never the vocalic r
pub const A_DEFAULT: CorrectionRule = CorrectionRule::plain("å→ā(default)", "å", "ā");

/// ñ-family priority rules.
///
/// Every non-shielded ñ resolves to ṣ; the specific entries exist so that
/// statistics report which corrupted cluster fired rather than a single
/// undifferentiated default count.
pub const N_RULES: &[CorrectionRule] = &[
    CorrectionRule::plain("ñṇ→ṣṇ", "ñṇ", "ṣṇ"),
    CorrectionRule::plain("viñ→viṣ", "viñ", "viṣ"),
    CorrectionRule::plain("kñ→kṣ", "kñ", "kṣ"),
    CorrectionRule::plain("rña→rṣa", "rña", "rṣa"),
    CorrectionRule::plain("ñṭ→ṣṭ", "ñṭ", "ṣṭ"),
    CorrectionRule::plain("ñeka→ṣeka", "ñeka", "ṣeka"),
    CorrectionRule::plain("śiñya→śiṣya", "śiñya", "śiṣya"),
    CorrectionRule::plain("ñya→ṣya", "ñya", "ṣya"),
    CorrectionRule::plain("ñma→ṣma", "ñma", "ṣma"),
];

/// ñ-family default
pub const N_DEFAULT: CorrectionRule = CorrectionRule::plain("ñ→ṣ(default)", "ñ", "ṣ");

const NJ_VOWELS: &[char] = &['a', 'ā', 'i', 'ī', 'u', 'ū', 'ṛ', 'e', 'ē', 'o', 'ō'];

/// The only legitimate ñ contexts in Sanskrit IAST. Shielded before any
/// ñ-family rule runs and restored verbatim afterwards. Longest pattern
/// first so ñch is protected as a unit.
pub const N_EXCEPTIONS: &[ExceptionPattern] = &[
    // jñāna, vijñāna, ajñāna
    ExceptionPattern {
        id: "jñ",
        pattern: "jñ",
        preceded_by: &[],
    },
    // pañcha-style aspirated cluster
    ExceptionPattern {
        id: "ñch",
        pattern: "ñch",
        preceded_by: &[],
    },
    // pañca, pañcama
    ExceptionPattern {
        id: "ñc",
        pattern: "ñc",
        preceded_by: &[],
    },
    // sañjaya, rañjana; only mid-word after a vowel, never word-initial
    ExceptionPattern {
        id: "ñj",
        pattern: "ñj",
        preceded_by: NJ_VOWELS,
    },
];

/// Legal IAST alphabet (lowercase). Vowels incl. vocalics, anusvāra in both
/// notations, visarga, and the consonant set.
const VALID_IAST_LOWER: &str = "aāiīuūṛṝḷḹeoṁṃḥkghṅcjñṭḍṇtdnpbmyrlvśṣs";

/// Whether an alphabetic character belongs to the legal IAST alphabet
pub fn is_valid_iast(c: char) -> bool {
    let lower = c.to_lowercase().next().unwrap_or(c);
    VALID_IAST_LOWER.contains(lower)
}
