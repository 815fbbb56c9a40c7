//! IMOD object records.

use serde::Serialize;

use super::contour::Contour;

/// Contour type of an IMOD object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    Closed,
    Open,
    ScatteredPoints,
}

impl ObjectType {
    /// Detection order: the first keyword found in an object block wins.
    pub const DETECTION_ORDER: [Self; 3] = [Self::Closed, Self::Open, Self::ScatteredPoints];

    /// Keyword identifying this type in `imodinfo` output.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
            Self::ScatteredPoints => "scattered",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
            Self::ScatteredPoints => "scattered_points",
        }
    }

    /// Detect the type from an object's block text.
    ///
    /// Returns `None` when no keyword occurs.
    pub fn detect(text: &str) -> Option<Self> {
        Self::DETECTION_ORDER
            .into_iter()
            .find(|kind| text.contains(kind.keyword()))
    }
}

/// A named object drawn on one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImodObject {
    name: String,
    #[serde(rename = "type")]
    object_type: ObjectType,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_surface_area: Option<f64>,
    contours: Vec<Contour>,
}

impl ImodObject {
    pub fn new(
        name: impl Into<String>,
        object_type: ObjectType,
        total_surface_area: Option<f64>,
        contours: Vec<Contour>,
    ) -> Self {
        Self {
            name: name.into(),
            object_type,
            total_surface_area,
            contours,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    /// Total cylinder surface area reported for closed objects.
    pub fn total_surface_area(&self) -> Option<f64> {
        self.total_surface_area
    }

    /// Contours in the order they appear in the log.
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    /// Sum of contour areas. Contours without an area contribute nothing.
    pub fn area(&self) -> f64 {
        self.contours.iter().filter_map(Contour::area).sum()
    }

    /// Sum of contour point counts.
    pub fn point_count(&self) -> u64 {
        self.contours.iter().map(Contour::points).sum()
    }
}
