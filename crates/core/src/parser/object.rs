//! Object parser - turns one object's block of lines into an `ImodObject`.

use itertools::Itertools;
use tracing::debug;

use crate::error::{GoldAreaError, Result};
use crate::model::{Contour, ImodObject, ObjectType};

use super::fields::{FieldLocator, contour_ordinal, strip_trailing_unit, value_after_equals};
use super::splitter::LogLine;

pub const NAME_MARKER: &str = "NAME";
pub const CONTOUR_MARKER: &str = "CONTOUR";
pub const SURFACE_AREA_LABEL: &str = "Total cylinder surface area";

const CLOSED_POINTS_LABEL: &str = "points,";
const SCATTERED_POINTS_LABEL: &str = "points";
const LENGTH_LABEL: &str = "length";
const AREA_LABEL: &str = "area";

/// Where an object block sits in the log, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectLocation {
    /// 1-based image index.
    pub image: usize,
    /// 1-based position of the object within its image.
    pub object: usize,
}

impl ObjectLocation {
    pub fn new(image: usize, object: usize) -> Self {
        Self { image, object }
    }

    fn malformed(&self, line: &LogLine<'_>, field: &'static str) -> GoldAreaError {
        GoldAreaError::MalformedField {
            image: self.image,
            object: self.object,
            line: line.number,
            field,
            text: line.text.trim().to_string(),
        }
    }
}

/// Parse one object block. The first line is the `OBJECT` marker line.
pub fn parse_object(lines: &[LogLine<'_>], location: ObjectLocation) -> Result<ImodObject> {
    let first_line = lines.first().map_or(0, |l| l.number);

    let combined = lines.iter().map(|l| l.text).join("\n");
    let object_type =
        ObjectType::detect(&combined).ok_or(GoldAreaError::UndefinedObjectType {
            image: location.image,
            object: location.object,
            line: first_line,
        })?;

    let name = parse_name(lines, location)?;

    let (total_surface_area, contours) = match object_type {
        ObjectType::Closed => parse_closed(lines, location)?,
        ObjectType::ScatteredPoints => (None, parse_scattered(lines, location)?),
        ObjectType::Open => (None, Vec::new()),
    };

    debug!(
        image = location.image,
        object = location.object,
        name = %name,
        object_type = object_type.as_str(),
        contours = contours.len(),
        "parsed object"
    );

    Ok(ImodObject::new(
        name,
        object_type,
        total_surface_area,
        contours,
    ))
}

/// Name is every token after the `NAME` marker token, space-joined.
///
/// When several lines carry a marker, the last one wins.
fn parse_name(lines: &[LogLine<'_>], location: ObjectLocation) -> Result<String> {
    let name = lines.iter().rev().find_map(|line| {
        let tokens: Vec<&str> = line.text.split_whitespace().collect();
        let marker = tokens.iter().position(|tok| tok.starts_with(NAME_MARKER))?;
        Some(tokens[marker + 1..].iter().join(" "))
    });

    name.ok_or_else(|| {
        let line = lines.first().copied().unwrap_or(LogLine::new(0, ""));
        location.malformed(&line, "object name")
    })
}

fn parse_closed(
    lines: &[LogLine<'_>],
    location: ObjectLocation,
) -> Result<(Option<f64>, Vec<Contour>)> {
    let mut total_surface_area = None;
    let mut contours = Vec::new();

    for line in lines {
        if line.text.contains(SURFACE_AREA_LABEL) {
            let value = value_after_equals(line.text)
                .and_then(|v| v.parse::<f64>().ok())
                .ok_or_else(|| location.malformed(line, "total surface area"))?;
            total_surface_area = Some(value);
        }
        if line.text.contains(CONTOUR_MARKER) {
            contours.push(parse_closed_contour(line, location)?);
        }
    }

    Ok((total_surface_area, contours))
}

fn parse_closed_contour(line: &LogLine<'_>, location: ObjectLocation) -> Result<Contour> {
    let ordinal = contour_ordinal(line.text).ok_or_else(|| location.malformed(line, "#"))?;

    let fields = FieldLocator::locate(line.text, &[CLOSED_POINTS_LABEL, LENGTH_LABEL, AREA_LABEL]);

    let points = fields
        .before(CLOSED_POINTS_LABEL)
        .and_then(|tok| tok.parse::<u64>().ok())
        .ok_or_else(|| location.malformed(line, "points,"))?;
    let length = fields
        .after(LENGTH_LABEL, 2)
        .and_then(|tok| strip_trailing_unit(tok).parse::<f64>().ok())
        .ok_or_else(|| location.malformed(line, "length"))?;
    let area = fields
        .after(AREA_LABEL, 2)
        .and_then(|tok| tok.parse::<f64>().ok())
        .ok_or_else(|| location.malformed(line, "area"))?;

    Ok(Contour::closed(ordinal, points, length, area))
}

fn parse_scattered(lines: &[LogLine<'_>], location: ObjectLocation) -> Result<Vec<Contour>> {
    lines
        .iter()
        .filter(|line| line.text.contains(CONTOUR_MARKER))
        .map(|line| {
            let ordinal =
                contour_ordinal(line.text).ok_or_else(|| location.malformed(line, "#"))?;
            let fields = FieldLocator::locate(line.text, &[SCATTERED_POINTS_LABEL]);
            let points = fields
                .before(SCATTERED_POINTS_LABEL)
                .and_then(|tok| tok.parse::<u64>().ok())
                .ok_or_else(|| location.malformed(line, "points"))?;
            Ok(Contour::scattered(ordinal, points))
        })
        .collect()
}
