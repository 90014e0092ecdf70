//! IAST Repair Library
//!
//! Deterministic repair of OCR-corrupted Sanskrit diacritics in IAST
//! transliteration. PDF extraction maps many IAST code points onto lookalike
//! Latin glyphs; most are fixed by a direct character map, while å and ñ are
//! genuinely ambiguous (å may stand for ṛ or ā, ñ for ṣ or a real ñ) and go
//! through context-aware rules with confidence scoring and validation.
//!
//! # Example
//!
//! ```no_run
//! use iast_repair::prelude::*;
//!
//! let params = EngineParams::default();
//! let result = process_page("Kåñṇa instructs Arjuna on småti.", 1, &params);
//!
//! assert_eq!(result.corrected_text, "Kṛṣṇa instructs Arjuna on smṛti.");
//! println!("{} words changed", result.statistics.words_changed);
//! ```
//!
//! # Single-word Example
//!
//! ```no_run
//! use iast_repair::prelude::*;
//!
//! let params = EngineParams::default();
//! let result = correct_word("bhagavån", &params);
//!
//! assert_eq!(result.corrected, "bhagavān");
//! for rule in &result.rules_applied {
//!     println!("applied: {}", rule);
//! }
//! ```

pub mod charmap;
pub mod classify;
pub mod correct;
pub mod input;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod rules;
pub mod tokenize;
pub mod validate;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::charmap::{apply_char_map, apply_char_map_with, CharMapEntry, CHAR_MAP};
    pub use crate::classify::{classify, detect_case_pattern, marker_profile};
    pub use crate::correct::{correct_word, restore_case_pattern};
    pub use crate::input::{load_pages, InputError};
    pub use crate::models::{
        Anomaly, AnomalyReason, CasePattern, CorrectionResult, EngineParams, MarkerProfile,
        PageResult, PageStatistics, Token, TokenKind, ValidationReport, WordClass,
    };
    pub use crate::output::{
        format_correction, print_corrections, print_summary, write_csv, write_csv_file,
        write_json, write_json_file, write_text, write_text_file, OutputError,
    };
    pub use crate::pipeline::{process_page, process_pages};
    pub use crate::rules::{
        is_valid_iast, CorrectionRule, ExceptionPattern, A_DEFAULT, A_RULES, COMBINED_RULE,
        MARKER_A, MARKER_N, N_DEFAULT, N_EXCEPTIONS, N_RULES,
    };
    pub use crate::tokenize::{is_word_char, tokenize};
    pub use crate::validate::validate;
}

// Re-export commonly used types at the crate root
pub use models::{CorrectionResult, EngineParams, PageResult, ValidationReport, WordClass};
