//! Log splitter - groups the lines of an area log by image.
//!
//! A boundary phrase starts each image's data. Everything from one
//! boundary line up to the next belongs to the same image; lines before
//! the first boundary are discarded and blank lines are dropped.

use crate::error::{GoldAreaError, Result};

/// Phrase written by `areas.com` before each image's `imodinfo` output.
pub const DEFAULT_BOUNDARY: &str = "Entries to program clipmodel";

/// A non-blank log line with its 1-based line number in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl<'a> LogLine<'a> {
    pub fn new(number: usize, text: &'a str) -> Self {
        Self { number, text }
    }
}

/// The lines belonging to one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSegment<'a> {
    index: usize,
    lines: Vec<LogLine<'a>>,
}

impl<'a> ImageSegment<'a> {
    /// 1-based image index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Lines of this image, starting with the boundary line.
    pub fn lines(&self) -> &[LogLine<'a>] {
        &self.lines
    }
}

/// Splits a multi-image log on a boundary phrase.
#[derive(Debug, Clone, Copy)]
pub struct LogSplitter<'p> {
    boundary: &'p str,
}

impl Default for LogSplitter<'static> {
    fn default() -> Self {
        Self::new(DEFAULT_BOUNDARY)
    }
}

impl<'p> LogSplitter<'p> {
    pub fn new(boundary: &'p str) -> Self {
        Self { boundary }
    }

    pub fn boundary(&self) -> &'p str {
        self.boundary
    }

    /// Split `text` into per-image segments in boundary-encounter order.
    ///
    /// Fails with `MissingBoundary` when the phrase never occurs.
    pub fn split<'a>(&self, text: &'a str) -> Result<Vec<ImageSegment<'a>>> {
        let mut segments: Vec<ImageSegment<'a>> = Vec::new();

        for (i, line) in text.lines().enumerate() {
            if line.contains(self.boundary) {
                segments.push(ImageSegment {
                    index: segments.len() + 1,
                    lines: Vec::new(),
                });
            }
            if line.trim().is_empty() {
                continue;
            }
            // Preamble before the first boundary has no image.
            if let Some(current) = segments.last_mut() {
                current.lines.push(LogLine::new(i + 1, line));
            }
        }

        if segments.is_empty() {
            return Err(GoldAreaError::MissingBoundary {
                phrase: self.boundary.to_string(),
            });
        }

        Ok(segments)
    }
}

/// Split `text` on `boundary`. See [`LogSplitter::split`].
pub fn split_log<'a>(text: &'a str, boundary: &str) -> Result<Vec<ImageSegment<'a>>> {
    LogSplitter::new(boundary).split(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_two_images() {
        let log = "preamble\n\
                   Entries to program clipmodel\n\
                   OBJECT #1\n\
                   \n\
                   Entries to program clipmodel\n\
                   OBJECT #2\n";
        let segments = LogSplitter::default().split(log).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].index(), 1);
        assert_eq!(segments[1].index(), 2);
        let first: Vec<_> = segments[0].lines().iter().map(|l| l.text).collect();
        assert_eq!(first, vec!["Entries to program clipmodel", "OBJECT #1"]);
        assert_eq!(segments[1].lines()[1], LogLine::new(6, "OBJECT #2"));
    }

    #[test]
    fn test_split_drops_blank_and_preamble_lines() {
        let log = "header\n   \nEntries to program clipmodel\n\n\t\nOBJECT #1\n";
        let segments = split_log(log, DEFAULT_BOUNDARY).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].lines().len(), 2);
        assert!(segments[0].lines().iter().all(|l| !l.text.trim().is_empty()));
    }

    #[test]
    fn test_split_missing_boundary() {
        let err = split_log("OBJECT #1\nNAME: Gold\n", DEFAULT_BOUNDARY).unwrap_err();
        assert!(matches!(err, GoldAreaError::MissingBoundary { .. }));
    }

    #[test]
    fn test_split_custom_boundary() {
        let log = "=== image\na\n=== image\nb\n=== image\n";
        let segments = split_log(log, "=== image").unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2].lines().len(), 1);
    }
}
