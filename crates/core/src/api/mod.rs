//! High-level API module for gold-per-area analysis.
//!
//! # Example
//!
//! ```ignore
//! use goldarea_core::api::{AnalysisOptions, analyze_file};
//!
//! let options = AnalysisOptions::new("flagellum_area", "Gold");
//! let report = analyze_file("areas.log".as_ref(), &options)?;
//! println!("{}", report.total.density);
//! ```

pub mod high_level;

// Re-export for convenience
pub use high_level::{
    AnalysisOptions, DEFAULT_MARKER, DEFAULT_STRUCTURE, analyze_file, analyze_log,
    analyze_log_to_fp, decode_log, default_report_name, parse_log, read_log,
};
