//! Exhibit slipsheet CLI tool
//!
//! Generates "Exhibit A" style slipsheets, either standalone or prepended to
//! existing PDFs.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use pdf_exhibits::inputs::expand_globs;
use pdf_exhibits::sequence::{run, ExhibitOptions, Inputs};
use pdf_exhibits::{Error, Label, Orientation};

/// Input token meaning "no file, generate standalone slipsheets"
const NO_INPUT: &str = "NONE";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Orientation::Portrait,
            OrientationArg::Landscape => Orientation::Landscape,
        }
    }
}

/// Generate legal exhibit slipsheets and prepend them to PDFs
#[derive(Parser)]
#[command(name = "pdf-exhibit")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Prepend slipsheets to two files, labelled from their names (edited in place)
    pdf-exhibit \"Exhibit_A_lease.pdf\" \"Exhibit_B_invoice.pdf\"

    # Label files C, D, E... writing Ex_C_<name>.pdf copies
    pdf-exhibit -l C first.pdf second.pdf third.pdf

    # Five standalone landscape slipsheets numbered 12-16
    pdf-exhibit -l 12 -o landscape -c 5 NONE")]
struct Cli {
    /// Number or letter to use as the initial label (e.g. "A" or "1").
    /// Omit to read the label from each input file name
    #[arg(short, long, value_parser = parse_label)]
    label: Option<Label>,

    /// Slipsheet orientation (default: match each input's first page, else portrait)
    #[arg(short, long, value_enum)]
    orientation: Option<OrientationArg>,

    /// Number of slipsheets to generate when the input is NONE
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Directory for renamed copies and standalone slipsheets
    #[arg(short = 'd', long, default_value = ".")]
    output_dir: PathBuf,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// PDF files to add a slipsheet to, or NONE for standalone slipsheets.
    /// Supports glob patterns like "*.pdf"
    #[arg(required = true)]
    infile: Vec<String>,
}

fn parse_label(token: &str) -> std::result::Result<Label, String> {
    Label::parse(token).map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = cmd_exhibit(cli) {
        if let Some(err) = e.downcast_ref::<Error>() {
            if err.is_usage() {
                Cli::command().error(ErrorKind::MissingRequiredArgument, err).exit();
            }
        }
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

fn cmd_exhibit(cli: Cli) -> Result<()> {
    let standalone = cli.infile.iter().any(|f| f == NO_INPUT);
    if standalone && cli.infile.len() > 1 {
        return Err(Error::MissingInput(format!("{} cannot be combined with input files", NO_INPUT)).into());
    }

    let inputs = if standalone {
        Inputs::Standalone { count: cli.count }
    } else {
        if cli.count != 1 {
            warn!(count = cli.count, "--count is ignored when input files are given");
        }
        Inputs::Files(expand_globs(&cli.infile)?)
    };

    let options = ExhibitOptions {
        label: cli.label,
        orientation: cli.orientation.map(Orientation::from),
        inputs,
        output_dir: cli.output_dir,
        ..Default::default()
    };

    for record in run(&options)? {
        match &record.source {
            Some(source) => eprintln!(
                "Exhibit {}: {} -> {}",
                record.label,
                source.display(),
                record.output.display()
            ),
            None => eprintln!("Exhibit {}: {}", record.label, record.output.display()),
        }
    }

    Ok(())
}
