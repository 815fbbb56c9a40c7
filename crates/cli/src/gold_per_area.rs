//! gold-per-area - immunogold density from an IMOD area log
//!
//! Reads the `areas.log` written by `areas.com`, sums the area of the
//! structure of interest and the gold particles modelled on it for every
//! image, and writes gold per area for each image and for the stack.

mod input;
mod logging;

use clap::{ArgAction, Parser, ValueEnum};
use goldarea_core::api::{
    AnalysisOptions, DEFAULT_MARKER, DEFAULT_STRUCTURE, analyze_log, default_report_name,
};
use goldarea_core::converter::{ReportFormat, write_report};
use goldarea_core::density::UnitScale;
use goldarea_core::parser::DEFAULT_BOUNDARY;
use goldarea_core::{GoldAreaError, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// Output type for the report.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputType {
    /// CSV table (default)
    #[default]
    Csv,
    /// JSON document
    Json,
}

impl From<OutputType> for ReportFormat {
    fn from(value: OutputType) -> Self {
        match value {
            OutputType::Csv => ReportFormat::Csv,
            OutputType::Json => ReportFormat::Json,
        }
    }
}

/// Calculate gold particles per area from an IMOD areas.log file.
#[derive(Parser, Debug)]
#[command(name = "gold-per-area")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
struct Args {
    /// Path to the areas.log file generated by areas.com
    logfile: PathBuf,

    /// Print version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: (),

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    // === Model options ===
    /// Name of the structure of interest in the model
    #[arg(short = 's', long, default_value = DEFAULT_STRUCTURE)]
    structure: String,

    /// Name of the scattered points object used to model gold
    #[arg(short = 'g', long, default_value = DEFAULT_MARKER)]
    gold: String,

    /// Name of an inner structure whose area is subtracted from the structure
    #[arg(short = 'x', long = "subtract")]
    subtract: Option<String>,

    /// Keep model units instead of converting nm to um
    #[arg(short = 'k', long = "keep-units", action = ArgAction::SetTrue)]
    keep_units: bool,

    // === Parser options ===
    /// Phrase starting each image in the log
    #[arg(short = 'b', long, default_value = DEFAULT_BOUNDARY)]
    boundary: String,

    /// Number of threads used to parse images (1 = sequential)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    // === Output options ===
    /// Path to file where the report is written, or "-" for stdout.
    /// Defaults to <structure>_gold_per_area.csv
    #[arg(short = 'o', long)]
    outfile: Option<String>,

    /// Type of report to generate
    #[arg(short = 't', long = "output-type", value_enum)]
    output_type: Option<OutputType>,
}

/// Infer output type from file extension.
fn infer_output_type(path: &str) -> Option<OutputType> {
    let path_lower = path.to_lowercase();
    if path_lower.ends_with(".json") {
        Some(OutputType::Json)
    } else if path_lower.ends_with(".csv") {
        Some(OutputType::Csv)
    } else {
        None
    }
}

/// Build AnalysisOptions from command line arguments.
fn build_options(args: &Args) -> AnalysisOptions {
    let scale = if args.keep_units {
        UnitScale::Native
    } else {
        UnitScale::NanometersToMicrometers
    };
    AnalysisOptions::new(args.structure.clone(), args.gold.clone())
        .with_subtraction(args.subtract.clone())
        .with_scale(scale)
        .with_boundary(args.boundary.clone())
        .with_threads(args.threads)
}

fn run(args: &Args) -> Result<()> {
    let options = build_options(args);
    options.validate()?;

    let text = input::load_log(&args.logfile)?;
    let report = analyze_log(&text, &options)?;

    let outfile = args
        .outfile
        .clone()
        .unwrap_or_else(|| default_report_name(&args.structure));
    let output_type = args
        .output_type
        .or_else(|| infer_output_type(&outfile))
        .unwrap_or_default();

    // Render before touching the output so a failed run leaves no file.
    let mut rendered = Vec::new();
    write_report(&mut rendered, &report, output_type.into())?;

    if outfile == "-" {
        let stdout = io::stdout();
        let mut output = BufWriter::new(stdout.lock());
        output.write_all(&rendered)?;
        output.flush()?;
    } else {
        info!(path = %outfile, "writing report");
        let file = File::create(&outfile)?;
        let mut output = BufWriter::new(file);
        output.write_all(&rendered)?;
        output.flush()?;
    }

    info!(
        images = report.images.len(),
        density = report.total.density,
        "done"
    );
    Ok(())
}

fn main() {
    let args = Args::parse();
    logging::init(args.debug);

    if let Err(e) = run(&args) {
        report_failure(&e);
        std::process::exit(1);
    }
}

fn report_failure(e: &GoldAreaError) {
    eprintln!("error during {}: {}", e.stage(), e);
}
