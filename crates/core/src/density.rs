//! Density calculator - marker particles per unit of structure area.
//!
//! Areas are summed over every contour of the structure objects, minus
//! the contours of the optional subtraction structure. Marker counts are
//! the summed point counts of the marker objects. The total density
//! divides the summed counts by the summed net area; it is not the mean
//! of the per-image densities.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{GoldAreaError, Result};
use crate::model::{ImodObject, ObjectType, Stack, StackImage};

/// Unit handling for reported areas and densities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitScale {
    /// Report in the model's own units.
    Native,
    /// Model units are nm; report areas in µm² and densities per µm².
    #[default]
    NanometersToMicrometers,
}

impl UnitScale {
    /// nm² in one µm².
    pub const NM2_PER_UM2: f64 = 1e6;

    pub const fn factor(self) -> f64 {
        match self {
            Self::Native => 1.0,
            Self::NanometersToMicrometers => Self::NM2_PER_UM2,
        }
    }

    /// Convert an area from model units.
    pub fn area(self, area: f64) -> f64 {
        area / self.factor()
    }

    /// Convert a density (count per model area unit).
    pub fn density(self, density: f64) -> f64 {
        density * self.factor()
    }
}

/// Which objects feed the density computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DensityParams<'a> {
    /// Object whose area is the denominator.
    pub structure: &'a str,
    /// Scattered-points object counting the gold particles.
    pub marker: &'a str,
    /// Inner object whose area is removed from the structure's area.
    pub subtraction: Option<&'a str>,
    pub scale: UnitScale,
}

impl<'a> DensityParams<'a> {
    pub fn new(structure: &'a str, marker: &'a str) -> Self {
        Self {
            structure,
            marker,
            subtraction: None,
            scale: UnitScale::default(),
        }
    }

    pub fn with_subtraction(mut self, subtraction: Option<&'a str>) -> Self {
        self.subtraction = subtraction;
        self
    }

    pub fn with_scale(mut self, scale: UnitScale) -> Self {
        self.scale = scale;
        self
    }

    /// Reject blank object names.
    pub fn validate(&self) -> Result<()> {
        if self.structure.trim().is_empty() {
            return Err(GoldAreaError::EmptyConfiguration(
                "structure name is empty".into(),
            ));
        }
        if self.marker.trim().is_empty() {
            return Err(GoldAreaError::EmptyConfiguration(
                "marker name is empty".into(),
            ));
        }
        if self.subtraction.is_some_and(|s| s.trim().is_empty()) {
            return Err(GoldAreaError::EmptyConfiguration(
                "subtraction structure name is empty".into(),
            ));
        }
        Ok(())
    }
}

/// Density figures for one image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityRecord {
    pub image: usize,
    pub structure_area: f64,
    pub marker_count: u64,
    /// Zero when no subtraction structure is configured.
    pub subtraction_area: f64,
    pub density: f64,
}

/// Density figures summed over the whole stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TotalDensity {
    pub structure_area: f64,
    pub marker_count: u64,
    pub subtraction_area: f64,
    pub density: f64,
}

/// Complete result of a density run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityReport {
    pub structure: String,
    pub marker: String,
    pub subtraction: Option<String>,
    pub scale: UnitScale,
    pub total: TotalDensity,
    pub images: Vec<DensityRecord>,
}

/// Running sums in model units.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    structure_area: f64,
    subtraction_area: f64,
    marker_count: u64,
}

impl Tally {
    fn add_image(&mut self, image: &StackImage, params: &DensityParams<'_>) -> Result<()> {
        for obj in image.objects() {
            if obj.name() == params.structure {
                self.structure_area += area_of(obj, image.index())?;
            }
            if let Some(subtraction) = params.subtraction
                && obj.name() == subtraction
            {
                self.subtraction_area += area_of(obj, image.index())?;
            }
            if obj.name() == params.marker {
                self.marker_count += obj.point_count();
            }
        }
        Ok(())
    }

    fn net_area(&self) -> f64 {
        self.structure_area - self.subtraction_area
    }

    fn non_positive(&self, scope: String) -> GoldAreaError {
        GoldAreaError::NonPositiveArea {
            scope,
            structure_area: self.structure_area,
            subtraction_area: self.subtraction_area,
        }
    }
}

/// Area of an object used as a structure. Scattered points carry no area.
fn area_of(obj: &ImodObject, image: usize) -> Result<f64> {
    if obj.object_type() == ObjectType::ScatteredPoints {
        return Err(GoldAreaError::WrongObjectType {
            image,
            name: obj.name().to_string(),
            expected: "closed",
            found: obj.object_type().as_str(),
        });
    }
    Ok(obj.area())
}

/// Gold count over net structure area for the whole stack.
///
/// Fails with `NonPositiveArea` when the summed net area is zero or
/// negative.
pub fn total_density(stack: &Stack, params: &DensityParams<'_>) -> Result<TotalDensity> {
    let mut tally = Tally::default();
    for image in stack {
        tally.add_image(image, params)?;
    }

    let net = tally.net_area();
    if net <= 0.0 || net.is_nan() {
        return Err(tally.non_positive("all images".to_string()));
    }
    let density = tally.marker_count as f64 / net;

    Ok(TotalDensity {
        structure_area: params.scale.area(tally.structure_area),
        marker_count: tally.marker_count,
        subtraction_area: params.scale.area(tally.subtraction_area),
        density: params.scale.density(density),
    })
}

/// Per-image density records in image-index order.
///
/// An image whose net area is exactly zero gets a density of zero.
pub fn image_densities(stack: &Stack, params: &DensityParams<'_>) -> Result<Vec<DensityRecord>> {
    stack
        .iter()
        .map(|image| {
            debug!(image = image.index(), "calculating gold per area");
            let mut tally = Tally::default();
            tally.add_image(image, params)?;

            let net = tally.net_area();
            let density = if net == 0.0 {
                0.0
            } else if net > 0.0 {
                tally.marker_count as f64 / net
            } else {
                return Err(tally.non_positive(format!("image {}", image.index())));
            };

            Ok(DensityRecord {
                image: image.index(),
                structure_area: params.scale.area(tally.structure_area),
                marker_count: tally.marker_count,
                subtraction_area: params.scale.area(tally.subtraction_area),
                density: params.scale.density(density),
            })
        })
        .collect()
}

/// Compute the total and per-image densities of a stack.
pub fn density_report(stack: &Stack, params: &DensityParams<'_>) -> Result<DensityReport> {
    params.validate()?;
    warn_unmatched(stack, params);

    info!("calculating total gold per area");
    let total = total_density(stack, params)?;
    let images = image_densities(stack, params)?;
    if params.scale != UnitScale::Native {
        info!("converted units from nm to um");
    }

    Ok(DensityReport {
        structure: params.structure.to_string(),
        marker: params.marker.to_string(),
        subtraction: params.subtraction.map(str::to_string),
        scale: params.scale,
        total,
        images,
    })
}

fn warn_unmatched(stack: &Stack, params: &DensityParams<'_>) {
    let names = [Some(params.structure), Some(params.marker), params.subtraction];
    for name in names.into_iter().flatten() {
        if stack.objects_named(name).next().is_none() {
            warn!(name, "no object with this name in any image");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Contour;

    fn closed(name: &str, areas: &[f64]) -> ImodObject {
        let contours = areas
            .iter()
            .enumerate()
            .map(|(i, &a)| Contour::closed((i + 1).to_string(), 10, 1.0, a))
            .collect();
        ImodObject::new(name, ObjectType::Closed, None, contours)
    }

    fn gold(name: &str, points: &[u64]) -> ImodObject {
        let contours = points
            .iter()
            .enumerate()
            .map(|(i, &p)| Contour::scattered((i + 1).to_string(), p))
            .collect();
        ImodObject::new(name, ObjectType::ScatteredPoints, None, contours)
    }

    #[test]
    fn test_total_density_native() {
        let stack = Stack::from_objects(vec![
            vec![closed("flagellum_area", &[2.0]), gold("Gold", &[4])],
        ]);
        let params = DensityParams::new("flagellum_area", "Gold").with_scale(UnitScale::Native);
        let total = total_density(&stack, &params).unwrap();
        assert_eq!(total.density, 2.0);
        assert_eq!(total.marker_count, 4);
    }

    #[test]
    fn test_total_density_converted() {
        let stack = Stack::from_objects(vec![
            vec![closed("flagellum_area", &[2.0]), gold("Gold", &[4])],
        ]);
        let params = DensityParams::new("flagellum_area", "Gold");
        let total = total_density(&stack, &params).unwrap();
        assert!((total.density - 2_000_000.0).abs() < 1e-6);

        let images = image_densities(&stack, &params).unwrap();
        assert!((images[0].structure_area - 2.0e-6).abs() < 1e-18);
        assert!((images[0].density - 2_000_000.0).abs() < 1e-6);
        assert_eq!(images[0].marker_count, 4);
    }

    #[test]
    fn test_total_is_not_mean_of_images() {
        let stack = Stack::from_objects(vec![
            vec![closed("s", &[1.0]), gold("g", &[1])],
            vec![closed("s", &[3.0]), gold("g", &[9])],
        ]);
        let params = DensityParams::new("s", "g").with_scale(UnitScale::Native);
        let total = total_density(&stack, &params).unwrap();
        assert_eq!(total.density, 10.0 / 4.0);
        let images = image_densities(&stack, &params).unwrap();
        assert_eq!(images[0].density, 1.0);
        assert_eq!(images[1].density, 3.0);
    }

    #[test]
    fn test_subtraction() {
        let stack = Stack::from_objects(vec![vec![
            closed("flagellum", &[10.0, 6.0]),
            closed("Mitochondria", &[4.0]),
            gold("Gold", &[3, 3]),
        ]]);
        let params = DensityParams::new("flagellum", "Gold")
            .with_subtraction(Some("Mitochondria"))
            .with_scale(UnitScale::Native);
        let total = total_density(&stack, &params).unwrap();
        assert_eq!(total.subtraction_area, 4.0);
        assert_eq!(total.density, 0.5);
    }

    #[test]
    fn test_zero_area_image_has_zero_density() {
        let stack = Stack::from_objects(vec![
            vec![closed("s", &[4.0]), gold("g", &[2])],
            vec![gold("g", &[5])],
        ]);
        let params = DensityParams::new("s", "g").with_scale(UnitScale::Native);
        let images = image_densities(&stack, &params).unwrap();
        assert_eq!(images[1].density, 0.0);
        assert_eq!(images[1].marker_count, 5);
    }

    #[test]
    fn test_total_zero_area_fails() {
        let stack = Stack::from_objects(vec![vec![gold("g", &[5])]]);
        let params = DensityParams::new("s", "g");
        let err = total_density(&stack, &params).unwrap_err();
        assert!(matches!(err, GoldAreaError::NonPositiveArea { .. }));
    }

    #[test]
    fn test_negative_image_area_fails() {
        let stack = Stack::from_objects(vec![vec![closed("s", &[1.0]), closed("inner", &[2.0])]]);
        let params = DensityParams::new("s", "g")
            .with_subtraction(Some("inner"))
            .with_scale(UnitScale::Native);
        let err = image_densities(&stack, &params).unwrap_err();
        match err {
            GoldAreaError::NonPositiveArea { scope, .. } => assert_eq!(scope, "image 1"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_scattered_structure_is_rejected() {
        let stack = Stack::from_objects(vec![vec![gold("s", &[1])]]);
        let params = DensityParams::new("s", "g");
        let err = total_density(&stack, &params).unwrap_err();
        assert!(matches!(err, GoldAreaError::WrongObjectType { image: 1, .. }));
    }

    #[test]
    fn test_blank_names_rejected() {
        assert!(DensityParams::new(" ", "Gold").validate().is_err());
        assert!(DensityParams::new("s", "").validate().is_err());
        assert!(
            DensityParams::new("s", "g")
                .with_subtraction(Some(""))
                .validate()
                .is_err()
        );
        assert!(DensityParams::new("s", "g").validate().is_ok());
    }

    #[test]
    fn test_unit_scale_round_trip() {
        let scale = UnitScale::NanometersToMicrometers;
        let area = 123_456.789;
        let density = 0.0042;
        assert!((scale.area(area) * 1e6 - area).abs() < 1e-6);
        assert!((scale.density(density) / 1e6 - density).abs() < 1e-15);
        assert_eq!(UnitScale::Native.area(area), area);
    }
}
