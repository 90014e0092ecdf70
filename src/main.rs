//! IAST Repair Pipeline
//!
//! Deterministic repair of OCR-corrupted Sanskrit diacritics in IAST
//! transliteration. Fixes glyph confusions from PDF font mis-mapping and
//! resolves the ambiguous å and ñ markers with context-aware rules.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod charmap;
mod classify;
mod correct;
mod input;
mod models;
mod output;
mod pipeline;
mod rules;
mod tokenize;
mod validate;

use input::load_pages;
use models::EngineParams;
use output::{
    print_corrections, print_summary, write_csv_file, write_json_file, write_text_file,
};

#[derive(Parser)]
#[command(name = "iast-repair")]
#[command(about = "Repair OCR-corrupted Sanskrit IAST diacritics")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Report format for correction details
#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportFormat {
    /// JSON file with full per-page results
    Json,
    /// CSV file of changed and flagged words
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Repair a text file or a directory of page files
    ///
    /// Thresholds default to EngineParams::default(). Override any value
    /// explicitly to customize behavior.
    Fix {
        /// Input file, or directory of .txt page files
        #[arg(long)]
        input: PathBuf,

        /// Corrected text output path (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write a correction report next to the output
        #[arg(long)]
        report: Option<PathBuf>,

        /// Report format: json or csv
        #[arg(long, value_enum, default_value = "json")]
        format: ReportFormat,

        /// Split a single input file into pages at form feeds
        #[arg(long)]
        split_pages: bool,

        /// Skip å-family corrections
        #[arg(long)]
        skip_a_family: bool,

        /// Skip ñ-family corrections
        #[arg(long)]
        skip_n_family: bool,

        // === Thresholds that inherit from EngineParams::default() ===

        /// High-confidence threshold [default: 0.95]
        #[arg(long)]
        high_confidence: Option<f32>,

        /// Manual review threshold [default: 0.90]
        #[arg(long)]
        review_threshold: Option<f32>,

        /// Suppress progress output
        #[arg(long)]
        quiet: bool,

        /// Print first N corrections to console
        #[arg(long)]
        show_corrections: Option<usize>,
    },

    /// Correct individual words and show the rules that fired
    Words {
        /// Words to correct
        words: Vec<String>,

        /// Skip å-family corrections
        #[arg(long)]
        skip_a_family: bool,

        /// Skip ñ-family corrections
        #[arg(long)]
        skip_n_family: bool,
    },

    /// Benchmark pipeline performance
    Benchmark {
        /// Number of iterations per measurement
        #[arg(long, default_value = "1000")]
        iterations: usize,

        /// Page size in words
        #[arg(long, default_value = "500")]
        size: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fix {
            input,
            output,
            report,
            format,
            split_pages,
            skip_a_family,
            skip_n_family,
            high_confidence,
            review_threshold,
            quiet,
            show_corrections,
        } => {
            // Start with library defaults
            let defaults = EngineParams::default();

            // Build params by overlaying user-specified values onto defaults
            let params = EngineParams {
                fix_a_family: !skip_a_family,
                fix_n_family: !skip_n_family,
                high_confidence: high_confidence.unwrap_or(defaults.high_confidence),
                review_threshold: review_threshold.unwrap_or(defaults.review_threshold),
            };

            let pages = load_pages(&input, split_pages)?;
            if !quiet {
                eprintln!("Loaded {} page(s) from {}", pages.len(), input.display());
            }

            let results = pipeline::process_pages(&pages, &params, !quiet);

            match output {
                Some(path) => {
                    write_text_file(&results, &path)?;
                    if !quiet {
                        eprintln!("Corrected text: {}", path.display());
                    }
                }
                None => {
                    let mut stdout = std::io::stdout();
                    output::write_text(&results, &mut stdout)?;
                    println!();
                }
            }

            if let Some(report_path) = report {
                match format {
                    ReportFormat::Json => {
                        write_json_file(&results, &report_path)?;
                    }
                    ReportFormat::Csv => {
                        write_csv_file(&results, &report_path)?;
                    }
                }
                if !quiet {
                    eprintln!("Report: {}", report_path.display());
                }
            }

            if !quiet {
                print_summary(&results);
            }

            if let Some(limit) = show_corrections {
                println!("\n=== Sample Corrections ===");
                print_corrections(&results, Some(limit));
            }
        }

        Commands::Words {
            words,
            skip_a_family,
            skip_n_family,
        } => {
            let params = EngineParams {
                fix_a_family: !skip_a_family,
                fix_n_family: !skip_n_family,
                ..Default::default()
            };

            for word in &words {
                let result = correct::correct_word(word, &params);
                let report = validate::validate(&result, &params);
                println!(
                    "{} → {} [{}] confidence {:.2}{}",
                    result.original,
                    result.corrected,
                    result.rules_applied.join(", "),
                    report.confidence,
                    if report.needs_review { " (review)" } else { "" }
                );
            }
        }

        Commands::Benchmark { iterations, size } => {
            run_benchmark(iterations, size);
        }
    }

    Ok(())
}

/// Run pipeline benchmark to measure performance.
fn run_benchmark(iterations: usize, size: usize) {
    use std::time::Instant;

    println!("=== Pipeline Benchmark ===");
    println!("Iterations: {}", iterations);
    println!("Page size: {} words", size);

    let params = EngineParams::default();

    // Representative corrupted vocabulary, cycled to page length
    let vocabulary = [
        "kåñṇa", "dharma", "bhagavån", "viñṇu", "småti", "jñāna", "arjuna", "våndāvana",
        "pañca", "yoga",
    ];
    let page: String = (0..size)
        .map(|i| vocabulary[i % vocabulary.len()])
        .collect::<Vec<_>>()
        .join(" ");

    // Benchmark clean text (no markers)
    let clean_page: String = (0..size).map(|_| "dharma").collect::<Vec<_>>().join(" ");
    println!("\nClean text:");
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = pipeline::process_page(&clean_page, 1, &params);
    }
    report_timing(start.elapsed(), iterations);

    // Benchmark corrupted text
    println!("\nCorrupted text (~60% marker words):");
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = pipeline::process_page(&page, 1, &params);
    }
    report_timing(start.elapsed(), iterations);

    // Benchmark single-word path
    println!("\nSingle word:");
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = correct::correct_word("kåñṇa", &params);
    }
    report_timing(start.elapsed(), iterations);
}

fn report_timing(elapsed: std::time::Duration, iterations: usize) {
    let total_ms = elapsed.as_secs_f64() * 1000.0;
    println!("  Total: {:.1} ms", total_ms);
    println!("  Per iteration: {:.3} ms", total_ms / iterations as f64);
}
