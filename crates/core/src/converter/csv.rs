//! CSV Converter - writes a density report as a CSV table.
//!
//! Dialect: `,` delimiter, `|` quote character with minimal quoting,
//! CRLF row terminator.

use std::io::Write;

use itertools::Itertools;

use crate::density::DensityReport;
use crate::error::Result;

pub const DELIMITER: char = ',';
pub const QUOTE_CHAR: char = '|';
pub const LINE_TERMINATOR: &str = "\r\n";

pub const TOTAL_LABEL: &str = "Total gold per area";
pub const IMAGE_COLUMN: &str = "Image number";
pub const COUNT_COLUMN: &str = "number gold particles";
pub const DENSITY_COLUMN: &str = "gold per area";

/// Quote a field if it contains the delimiter, the quote character or a
/// line break. Embedded quote characters are doubled.
pub fn escape_field(field: &str) -> String {
    let needs_quotes = field
        .chars()
        .any(|c| c == DELIMITER || c == QUOTE_CHAR || c == '\r' || c == '\n');
    if !needs_quotes {
        return field.to_string();
    }
    let doubled = QUOTE_CHAR.to_string().repeat(2);
    let mut out = String::with_capacity(field.len() + 2);
    out.push(QUOTE_CHAR);
    out.push_str(&field.replace(QUOTE_CHAR, &doubled));
    out.push(QUOTE_CHAR);
    out
}

/// Writes a `DensityReport` as CSV rows.
pub struct CsvConverter<'a, W: Write> {
    outfp: &'a mut W,
}

impl<'a, W: Write> CsvConverter<'a, W> {
    pub fn new(outfp: &'a mut W) -> Self {
        Self { outfp }
    }

    /// Write one row of already-formatted fields.
    pub fn write_row<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<()> {
        let row = fields
            .iter()
            .map(|f| escape_field(f.as_ref()))
            .join(&DELIMITER.to_string());
        self.outfp.write_all(row.as_bytes())?;
        self.outfp.write_all(LINE_TERMINATOR.as_bytes())?;
        Ok(())
    }

    /// Render the whole report: total row, blank row, column header, one
    /// row per image.
    pub fn receive_report(&mut self, report: &DensityReport) -> Result<()> {
        self.write_row(&[TOTAL_LABEL.to_string(), report.total.density.to_string()])?;
        self.write_row::<&str>(&[])?;

        let mut header = vec![IMAGE_COLUMN, report.structure.as_str(), COUNT_COLUMN];
        if let Some(ref subtraction) = report.subtraction {
            header.push(subtraction.as_str());
        }
        header.push(DENSITY_COLUMN);
        self.write_row(&header)?;

        for record in &report.images {
            let mut row = vec![
                record.image.to_string(),
                record.structure_area.to_string(),
                record.marker_count.to_string(),
            ];
            if report.subtraction.is_some() {
                row.push(record.subtraction_area.to_string());
            }
            row.push(record.density.to_string());
            self.write_row(&row)?;
        }

        self.outfp.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("flagellum_area"), "flagellum_area");
        assert_eq!(escape_field("a,b"), "|a,b|");
        assert_eq!(escape_field("a|b"), "|a||b|");
        assert_eq!(escape_field(""), "");
    }

    #[test]
    fn test_write_row() {
        let mut out = Vec::new();
        let mut converter = CsvConverter::new(&mut out);
        converter.write_row(&["1", "x,y", "3"]).unwrap();
        converter.write_row::<&str>(&[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1,|x,y|,3\r\n\r\n");
    }
}
