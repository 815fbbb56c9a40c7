//! Error types for goldarea log parsing and density computation.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Pipeline stage an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Configuration,
    Splitting,
    Parsing,
    Aggregating,
    Emitting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configuration => "configuration",
            Self::Splitting => "splitting",
            Self::Parsing => "parsing",
            Self::Aggregating => "aggregating",
            Self::Emitting => "emitting",
        };
        f.write_str(name)
    }
}

/// Primary error type for log parsing and density operations.
#[derive(Error, Debug)]
pub enum GoldAreaError {
    #[error("cannot read log {}: {source}", .path.display())]
    ReadLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image boundary phrase {phrase:?} never occurs in the log")]
    MissingBoundary { phrase: String },

    #[error(
        "image {image}, object {object} (line {line}): none of closed/open/scattered found in object block"
    )]
    UndefinedObjectType {
        image: usize,
        object: usize,
        line: usize,
    },

    #[error("image {image}, object {object}, line {line}: missing {field} in {text:?}")]
    MalformedField {
        image: usize,
        object: usize,
        line: usize,
        field: &'static str,
        text: String,
    },

    #[error(
        "{scope}: net structure area is not positive ({structure_area} - {subtraction_area})"
    )]
    NonPositiveArea {
        scope: String,
        structure_area: f64,
        subtraction_area: f64,
    },

    #[error("image {image}: object {name:?} is {found}, expected {expected}")]
    WrongObjectType {
        image: usize,
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid configuration: {0}")]
    EmptyConfiguration(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GoldAreaError {
    /// The pipeline stage this error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            Self::ReadLog { .. } | Self::MissingBoundary { .. } => Stage::Splitting,
            Self::UndefinedObjectType { .. } | Self::MalformedField { .. } => Stage::Parsing,
            Self::NonPositiveArea { .. } | Self::WrongObjectType { .. } => Stage::Aggregating,
            Self::EmptyConfiguration(_) => Stage::Configuration,
            Self::Io(_) | Self::Json(_) => Stage::Emitting,
        }
    }
}

/// Convenience Result type alias for GoldAreaError.
pub type Result<T> = std::result::Result<T, GoldAreaError>;
