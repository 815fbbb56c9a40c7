//! High-level pipeline API.
//!
//! - `parse_log()` - split and parse an area log into a `Stack`
//! - `analyze_log()` - parse and compute the density report
//! - `analyze_file()` - the same, reading the log from disk
//! - `analyze_log_to_fp()` - analyze and write the report to a writer

use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::converter::{ReportFormat, write_report};
use crate::density::{DensityParams, DensityReport, UnitScale, density_report};
use crate::error::{GoldAreaError, Result};
use crate::model::Stack;
use crate::parser::{DEFAULT_BOUNDARY, parse_stack};

/// Structure of interest used when none is configured.
pub const DEFAULT_STRUCTURE: &str = "flagellum_area";

/// Gold marker object used when none is configured.
pub const DEFAULT_MARKER: &str = "Gold";

/// Everything a density run needs to know.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    /// Name of the structure of interest.
    pub structure_name: String,

    /// Name of the scattered-points object modelling gold particles.
    pub marker_name: String,

    /// Inner structure whose area is subtracted. None disables subtraction.
    pub subtraction_name: Option<String>,

    /// Unit conversion applied to reported areas and densities.
    pub scale: UnitScale,

    /// Phrase marking the start of each image in the log.
    pub boundary_phrase: String,

    /// Worker threads for parsing images. None or 1 parses sequentially.
    pub threads: Option<usize>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self::new(DEFAULT_STRUCTURE, DEFAULT_MARKER)
    }
}

impl AnalysisOptions {
    pub fn new(structure_name: impl Into<String>, marker_name: impl Into<String>) -> Self {
        Self {
            structure_name: structure_name.into(),
            marker_name: marker_name.into(),
            subtraction_name: None,
            scale: UnitScale::default(),
            boundary_phrase: DEFAULT_BOUNDARY.to_string(),
            threads: None,
        }
    }

    pub fn with_subtraction(mut self, name: Option<String>) -> Self {
        self.subtraction_name = name;
        self
    }

    pub fn with_scale(mut self, scale: UnitScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_boundary(mut self, phrase: impl Into<String>) -> Self {
        self.boundary_phrase = phrase.into();
        self
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    /// Density parameters borrowed from these options.
    pub fn density_params(&self) -> DensityParams<'_> {
        DensityParams::new(&self.structure_name, &self.marker_name)
            .with_subtraction(self.subtraction_name.as_deref())
            .with_scale(self.scale)
    }

    pub fn validate(&self) -> Result<()> {
        if self.boundary_phrase.trim().is_empty() {
            return Err(GoldAreaError::EmptyConfiguration(
                "image boundary phrase is empty".into(),
            ));
        }
        if self.threads == Some(0) {
            return Err(GoldAreaError::EmptyConfiguration(
                "thread count must be at least 1".into(),
            ));
        }
        self.density_params().validate()
    }
}

/// Default report file name for a structure: `<structure>_gold_per_area.csv`.
pub fn default_report_name(structure_name: &str) -> String {
    format!("{structure_name}_gold_per_area.csv")
}

/// Read a log file. Bytes that are not UTF-8 are replaced.
pub fn read_log(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| GoldAreaError::ReadLog {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode_log(&bytes).into_owned())
}

/// Decode raw log bytes, replacing invalid UTF-8.
pub fn decode_log(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Split and parse an area log into a `Stack`.
pub fn parse_log(text: &str, options: &AnalysisOptions) -> Result<Stack> {
    info!("importing data");
    parse_stack(text, &options.boundary_phrase, options.threads)
}

/// Parse an area log and compute its density report.
pub fn analyze_log(text: &str, options: &AnalysisOptions) -> Result<DensityReport> {
    options.validate()?;
    let stack = parse_log(text, options)?;
    density_report(&stack, &options.density_params())
}

/// Read, parse and analyze the log at `path`.
pub fn analyze_file(path: &Path, options: &AnalysisOptions) -> Result<DensityReport> {
    let text = read_log(path)?;
    analyze_log(&text, options)
}

/// Analyze a log and write the report to `writer`.
///
/// Nothing is written if any stage fails.
pub fn analyze_log_to_fp<W: Write>(
    text: &str,
    writer: &mut W,
    options: &AnalysisOptions,
    format: ReportFormat,
) -> Result<DensityReport> {
    let report = analyze_log(text, options)?;
    info!("writing report");
    write_report(writer, &report, format)?;
    Ok(report)
}
