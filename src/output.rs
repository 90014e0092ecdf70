//! Output formatting for repair results (corrected text, JSON, CSV).

use crate::models::PageResult;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write page results as JSON.
pub fn write_json<W: Write>(results: &[PageResult], writer: &mut W) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(results)?;
    writer.write_all(json.as_bytes())?;
    Ok(())
}

/// Write page results as JSON to a file.
pub fn write_json_file(results: &[PageResult], path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_json(results, &mut file)
}

/// Write the corrected text of all pages, form-feed separated.
pub fn write_text<W: Write>(results: &[PageResult], writer: &mut W) -> Result<(), OutputError> {
    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            writer.write_all("\u{000C}".as_bytes())?;
        }
        writer.write_all(result.corrected_text.as_bytes())?;
    }
    Ok(())
}

/// Write the corrected text to a file.
pub fn write_text_file(results: &[PageResult], path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_text(results, &mut file)
}

/// Write every correction as CSV, one row per word token that changed or
/// was flagged.
pub fn write_csv<W: Write>(results: &[PageResult], writer: &mut W) -> Result<(), OutputError> {
    // Write header
    writeln!(
        writer,
        "page,word_index,original,corrected,word_class,rules_applied,\
         base_confidence,confidence,passed,needs_review"
    )?;

    // Write rows
    for result in results {
        for (idx, (correction, report)) in result
            .corrections
            .iter()
            .zip(result.reports.iter())
            .enumerate()
        {
            if !correction.changed && report.passed && !report.needs_review {
                continue;
            }
            writeln!(
                writer,
                "{},{},{},{},{},{},{:.4},{:.4},{},{}",
                result.page_number,
                idx,
                correction.original,
                correction.corrected,
                correction.word_class.name(),
                correction.rules_applied.join(";"),
                correction.confidence,
                report.confidence,
                report.passed,
                report.needs_review
            )?;
        }
    }

    Ok(())
}

/// Write corrections as CSV to a file.
pub fn write_csv_file(results: &[PageResult], path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_csv(results, &mut file)
}

/// Write a summary report to stdout.
pub fn print_summary(results: &[PageResult]) {
    let pages = results.len();
    let words_total: usize = results.iter().map(|r| r.statistics.words_total).sum();
    let words_changed: usize = results.iter().map(|r| r.statistics.words_changed).sum();
    let char_map: usize = results
        .iter()
        .flat_map(|r| r.statistics.char_map_replacements.values())
        .sum();
    let n_corrections: usize = results.iter().map(|r| r.statistics.n_corrections).sum();
    let a_corrections: usize = results.iter().map(|r| r.statistics.a_corrections).sum();
    let combined: usize = results
        .iter()
        .map(|r| r.statistics.combined_corrections)
        .sum();
    let errors: usize = results.iter().map(|r| r.statistics.validation_errors).sum();
    let review: usize = results.iter().map(|r| r.statistics.needs_review).sum();
    let time_ms: f64 = results.iter().map(|r| r.statistics.processing_time_ms).sum();
    let high: usize = results
        .iter()
        .map(|r| r.statistics.high_confidence_count)
        .sum();
    let medium: usize = results
        .iter()
        .map(|r| r.statistics.medium_confidence_count)
        .sum();
    let low: usize = results
        .iter()
        .map(|r| r.statistics.low_confidence_count)
        .sum();

    let mut classes: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    let mut rules: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    for result in results {
        for (class, count) in &result.statistics.class_distribution {
            *classes.entry(class.as_str()).or_insert(0) += count;
        }
        for (rule, count) in &result.statistics.rules_fired {
            *rules.entry(rule.as_str()).or_insert(0) += count;
        }
    }

    println!("\n=== Repair Summary ===");
    println!("Pages processed: {}", pages);
    println!("Words: {} total, {} changed", words_total, words_changed);
    println!();
    println!("Word classes:");
    let mut class_rows: Vec<_> = classes.into_iter().collect();
    class_rows.sort_by(|a, b| b.1.cmp(&a.1));
    for (class, count) in class_rows {
        println!("  {}: {}", class, count);
    }
    println!();
    println!("Corrections:");
    println!("  Character map: {}", char_map);
    println!("  ñ family: {}", n_corrections);
    println!("  å family: {}", a_corrections);
    println!("  Combined åñ: {}", combined);
    println!();
    let mut rule_rows: Vec<_> = rules.into_iter().collect();
    rule_rows.sort_by(|a, b| b.1.cmp(&a.1));
    if !rule_rows.is_empty() {
        println!("Top rules:");
        for (rule, count) in rule_rows.iter().take(5) {
            println!("  {}: {}", rule, count);
        }
        println!();
    }
    println!("Confidence:");
    println!("  High (≥0.95): {}", high);
    println!("  Medium: {}", medium);
    println!("  Low (<0.90): {}", low);
    println!();
    println!("Validation:");
    println!("  Errors: {}", errors);
    println!("  Flagged for review: {}", review);
    println!();
    println!("Processing time: {:.1} ms", time_ms);
}

/// Format one correction as a human-readable string.
pub fn format_correction(page: u32, correction: &crate::models::CorrectionResult) -> String {
    format!(
        "p{} {} → {} [{}] ({:.2})",
        page,
        correction.original,
        correction.corrected,
        correction.rules_applied.join(", "),
        correction.confidence
    )
}

/// Print changed words in a human-readable format.
pub fn print_corrections(results: &[PageResult], limit: Option<usize>) {
    let changed: Vec<(u32, &crate::models::CorrectionResult)> = results
        .iter()
        .flat_map(|r| {
            r.corrections
                .iter()
                .filter(|c| c.changed)
                .map(move |c| (r.page_number, c))
        })
        .collect();

    let to_print = match limit {
        Some(n) => &changed[..n.min(changed.len())],
        None => &changed[..],
    };

    for (page, correction) in to_print {
        println!("{}", format_correction(*page, correction));
    }

    if let Some(n) = limit {
        if changed.len() > n {
            println!("... and {} more corrections", changed.len() - n);
        }
    }
}
