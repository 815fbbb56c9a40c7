//! dumplog - dump the parsed structure of an IMOD area log as JSON
//!
//! Shows the images, objects and contours the parser found, which helps
//! when a density run reports unexpected numbers.

mod input;
mod logging;

use clap::{ArgAction, Parser};
use goldarea_core::api::{AnalysisOptions, parse_log};
use goldarea_core::model::{ObjectType, Stack};
use goldarea_core::parser::DEFAULT_BOUNDARY;
use goldarea_core::{GoldAreaError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// A command line tool for dumping a parsed area log as JSON.
#[derive(Parser, Debug)]
#[command(name = "dumplog")]
#[command(author, version, about = "Dump a parsed IMOD area log as JSON", long_about = None)]
#[command(disable_version_flag = true)]
struct Args {
    /// One or more area log files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: (),

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Phrase starting each image in the log
    #[arg(short = 'b', long, default_value = DEFAULT_BOUNDARY)]
    boundary: String,

    /// Only dump images with these numbers (1-indexed, comma-separated)
    #[arg(short = 'i', long = "images", value_delimiter = ',')]
    images: Option<Vec<usize>>,

    /// Print a per-name summary instead of the full structure
    #[arg(short = 'S', long = "summary", action = ArgAction::SetTrue)]
    summary: bool,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,
}

/// Totals for all objects sharing a name.
#[derive(Debug, Default, Serialize)]
struct NameSummary {
    #[serde(rename = "type")]
    object_type: Option<ObjectType>,
    objects: usize,
    contours: usize,
    points: u64,
    area: f64,
}

#[derive(Debug, Serialize)]
struct StackSummary {
    images: usize,
    objects: usize,
    contours: usize,
    names: BTreeMap<String, NameSummary>,
}

fn summarize(stack: &Stack) -> StackSummary {
    let mut names: BTreeMap<String, NameSummary> = BTreeMap::new();
    for image in stack {
        for obj in image.objects() {
            let entry = names.entry(obj.name().to_string()).or_default();
            entry.object_type.get_or_insert(obj.object_type());
            entry.objects += 1;
            entry.contours += obj.contours().len();
            entry.points += obj.point_count();
            entry.area += obj.area();
        }
    }
    StackSummary {
        images: stack.len(),
        objects: stack.object_count(),
        contours: stack.contour_count(),
        names,
    }
}

/// JSON value for one parsed log, shaped by the dump options.
fn dump_value(stack: &Stack, args: &Args) -> Result<serde_json::Value> {
    let value = if args.summary {
        serde_json::to_value(summarize(stack))?
    } else if let Some(ref wanted) = args.images {
        let selected: Vec<_> = stack
            .iter()
            .filter(|image| wanted.contains(&image.index()))
            .collect();
        serde_json::to_value(selected)?
    } else {
        serde_json::to_value(stack.images())?
    };
    Ok(value)
}

/// Write the dumps as one JSON document. Several input files are keyed
/// by their path.
fn dumplog<W: Write>(out: &mut W, dumps: Vec<(String, serde_json::Value)>) -> Result<()> {
    let document = if dumps.len() == 1 {
        dumps.into_iter().map(|(_, value)| value).next().unwrap_or_default()
    } else {
        serde_json::Value::Object(dumps.into_iter().collect())
    };
    serde_json::to_writer_pretty(&mut *out, &document)?;
    writeln!(out)?;
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let options = AnalysisOptions::default().with_boundary(args.boundary.clone());

    // Parse everything before opening the output so failures leave no file.
    let mut dumps = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let text = input::load_log(path)?;
        let stack = parse_log(&text, &options)?;
        dumps.push((path.display().to_string(), dump_value(&stack, args)?));
    }

    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        Box::new(BufWriter::new(File::create(&args.outfile)?))
    };
    dumplog(&mut output, dumps)?;
    output.flush()?;
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
