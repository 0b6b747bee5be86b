//! pdfoutline CLI - document title and heading outline extraction

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::provider::TokenProvider;
use pdfoutline::{
    BatchOutcome, BatchProcessor, ClassifiedLayout, Confidence, HeadingClassifier, JsonFormat,
    LayoutDump, OutlineOptions, Outliner,
};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(version)]
#[command(about = "Extract document titles and H1-H3 outlines from layout dumps", long_about = None)]
struct Cli {
    /// Disable parallel processing
    #[arg(long, global = true, env = "PDFOUTLINE_SEQUENTIAL")]
    sequential: bool,

    /// Match heading patterns without regard to case
    #[arg(long, global = true)]
    ignore_case_patterns: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the outline of one layout dump
    Outline {
        /// Input layout dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Build outlines for every layout dump in a directory
    Batch {
        /// Directory of layout dumps
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Directory for outline files
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,
    },

    /// Show font hierarchies and heading candidates of a layout dump
    Inspect {
        /// Input layout dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let mut options = OutlineOptions::new().with_parallel(!cli.sequential);
    if cli.ignore_case_patterns {
        options = options.ignore_pattern_case();
    }

    let result = match cli.command {
        Commands::Outline {
            input,
            output,
            compact,
        } => cmd_outline(&input, output.as_deref(), compact, options),
        Commands::Batch { input, output } => cmd_batch(&input, &output, options),
        Commands::Inspect { input, json } => cmd_inspect(&input, json, options),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    options: OutlineOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = Outliner::new().with_options(options).run_file(input)?;

    for failure in &report.failures {
        eprintln!("{}: {}", "Warning".yellow().bold(), failure);
    }

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = pdfoutline::render::to_json(&report.outline, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    options: OutlineOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let total = pdfoutline::batch::collect_inputs(input)?.len();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let processor = BatchProcessor::new(options);
    let summary = processor.run_with_progress(input, output, |outcome| {
        if let Some(name) = outcome.input().file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    println!();
    for outcome in &summary.outcomes {
        match outcome {
            BatchOutcome::Written {
                output,
                headings,
                failures,
                ..
            } => {
                println!(
                    "  {} {} ({} headings)",
                    "✓".green(),
                    output.display(),
                    headings
                );
                for failure in failures {
                    println!("    {} {}", "!".yellow(), failure.dimmed());
                }
            }
            BatchOutcome::Failed { input, error } => {
                println!("  {} {}: {}", "✗".red(), input.display(), error);
            }
        }
    }

    println!(
        "\n{} {} written, {} skipped",
        "Done!".green().bold(),
        summary.succeeded(),
        summary.failed()
    );

    Ok(())
}

fn cmd_inspect(
    input: &Path,
    json: bool,
    options: OutlineOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let dump = LayoutDump::from_file(input)?;
    let report = Outliner::new().with_options(options.clone()).run_dump(&dump);

    if json {
        println!("{}", serde_json::to_string_pretty(&report.stats)?);
        return Ok(());
    }

    println!("{}", "Document Outline".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Title".bold(), report.outline.title);

    let classifier = HeadingClassifier::new(&options);
    let providers = [dump.char_provider(options.grouping), dump.line_provider()];
    for provider in &providers {
        println!();
        println!(
            "{} {}",
            "Provider".cyan().bold(),
            provider.name().cyan().bold()
        );
        println!("{}", "─".repeat(40).dimmed());

        let layout = match provider.extract() {
            Ok(layout) => layout,
            Err(e) => {
                println!("{}: {}", "Unavailable".red(), e);
                continue;
            }
        };
        let classified = ClassifiedLayout::new(layout, &classifier);
        let layout = classified.layout();
        let hierarchy = classified.hierarchy();

        println!("{}: {}", "Pages".bold(), layout.page_count());
        println!("{}: {}", "Tokens".bold(), layout.token_count());
        println!("{}: {:.1}", "Body size".bold(), hierarchy.body_size());
        if let Some(pct) = hierarchy.percentiles() {
            println!(
                "{}: p95={:.1} p85={:.1} p75={:.1} p65={:.1}",
                "Percentiles".bold(),
                pct.p95,
                pct.p85,
                pct.p75,
                pct.p65
            );
        }
        for (signature, level) in hierarchy.entries() {
            println!("  {:<5} {}", level.as_str().bold(), signature);
        }
        println!("{}: {}", "Labeled headings".bold(), classified.heading_count());
    }

    println!();
    println!("{}", "Candidates".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for candidate in &report.candidates {
        let confidence = match candidate.confidence {
            Confidence::High => "high".green(),
            Confidence::Medium => "medium".yellow(),
        };
        println!(
            "  p{:<3} {:<3} {:<7} {}",
            candidate.page,
            candidate.level.as_str(),
            confidence,
            candidate.text
        );
    }

    if report.has_failures() {
        println!();
        println!("{}", "Failures".red().bold());
        for failure in &report.failures {
            println!("  {}", failure);
        }
    }

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "pdfoutline".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Document title and heading outline extraction tool");
    println!();
    println!("License: MIT");
}
