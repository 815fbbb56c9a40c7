//! Contour records.

use serde::Serialize;
use smol_str::SmolStr;

/// One traced boundary (closed objects) or point set (scattered objects).
///
/// Length and area only exist for closed contours; the point count exists
/// for both kinds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contour {
    ordinal: SmolStr,
    points: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    area: Option<f64>,
}

impl Contour {
    /// Create a contour of a closed object.
    pub fn closed(ordinal: impl Into<SmolStr>, points: u64, length: f64, area: f64) -> Self {
        Self {
            ordinal: ordinal.into(),
            points,
            length: Some(length),
            area: Some(area),
        }
    }

    /// Create a contour of a scattered-points object.
    pub fn scattered(ordinal: impl Into<SmolStr>, points: u64) -> Self {
        Self {
            ordinal: ordinal.into(),
            points,
            length: None,
            area: None,
        }
    }

    /// Contour number as written after `#` in the log.
    pub fn ordinal(&self) -> &str {
        &self.ordinal
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn length(&self) -> Option<f64> {
        self.length
    }

    pub fn area(&self) -> Option<f64> {
        self.area
    }

    pub fn is_closed(&self) -> bool {
        self.area.is_some()
    }
}
