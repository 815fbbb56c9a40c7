//! Report converters.
//!
//! - `csv`: the tabular gold-per-area report (CsvConverter)
//! - `json`: the same report as JSON (JsonConverter)

pub mod csv;
pub mod json;

pub use csv::CsvConverter;
pub use json::JsonConverter;

use std::io::Write;

use crate::density::DensityReport;
use crate::error::Result;

/// Output format of a density report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

/// Write `report` to `outfp` in `format`.
pub fn write_report<W: Write>(
    outfp: &mut W,
    report: &DensityReport,
    format: ReportFormat,
) -> Result<()> {
    match format {
        ReportFormat::Csv => CsvConverter::new(outfp).receive_report(report),
        ReportFormat::Json => JsonConverter::new(outfp).receive_report(report),
    }
}
