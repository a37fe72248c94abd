//! Double-sided merge CLI tool
//!
//! Combines PDFs into one document in which every input starts on an odd
//! page, so the result can be printed duplex.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pdf_exhibits::inputs::expand_globs;
use pdf_exhibits::pdf::{merge_double_sided, MergeOptions};

/// Combine PDFs so each one starts on a new sheet when printed double-sided
#[derive(Parser)]
#[command(name = "double-combine")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Writes combined-3-files.pdf
    double-combine Exhibit_A.pdf Exhibit_B.pdf Exhibit_C.pdf

    # Inputs in name order
    double-combine \"Exhibit_*.pdf\"")]
struct Cli {
    /// Input PDF files (in order). Supports glob patterns like "*.pdf"
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output PDF file path (default: combined-<N>-files.pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = cmd_combine(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_combine(cli: Cli) -> Result<()> {
    let inputs = expand_globs(&cli.inputs)?;

    let mut options = MergeOptions::double_sided(inputs);
    if let Some(output) = cli.output {
        options.output_path = output;
    }

    eprintln!("Merging {} PDF files...", options.input_paths.len());

    let report = merge_double_sided(&options)
        .with_context(|| format!("Could not build {}", options.output_path.display()))?;

    eprintln!(
        "Merged to: {} ({} pages, {} blank)",
        report.output_path.display(),
        report.page_count,
        report.blank_pages
    );

    Ok(())
}
