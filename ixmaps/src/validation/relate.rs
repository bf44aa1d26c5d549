//! Polygon predicates shared by the containment and overlap checks.

use geo::coordinate_position::CoordPos;
use geo::dimensions::Dimensions;
use geo::{MultiPolygon, Relate};
use ixmaps_types::Feature;
use thiserror::Error;

use crate::convert;

/// Reasons a feature cannot take part in a spatial comparison.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComparisonError {
    /// Feature without geometry.
    #[error("feature has no geometry")]
    NoGeometry,
    /// Geometry of another type.
    #[error("geometry must be a Polygon or MultiPolygon, got {0}")]
    NotPolygonal(&'static str),
    /// Polygonal geometry without rings.
    #[error("geometry has no polygons")]
    Empty,
    /// NaN or infinite coordinates.
    #[error("geometry has non-finite coordinates")]
    NonFinite,
    /// Ring too short to enclose an area.
    #[error("polygon ring has {0} coordinates, at least 4 are required")]
    ShortRing(usize),
}

/// Converts the feature geometry into a multipolygon the predicates can work with.
pub(crate) fn areal(feature: &Feature) -> Result<MultiPolygon<f64>, ComparisonError> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or(ComparisonError::NoGeometry)?;

    let polygons = geometry.polygons();
    if !geometry.is_polygonal() {
        return Err(ComparisonError::NotPolygonal(geometry.type_name()));
    }
    if polygons.iter().all(|rings| rings.is_empty()) {
        return Err(ComparisonError::Empty);
    }

    for ring in polygons.iter().flat_map(|rings| rings.iter()) {
        if ring.len() < 4 {
            return Err(ComparisonError::ShortRing(ring.len()));
        }
        if ring.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(ComparisonError::NonFinite);
        }
    }

    convert::multi_polygon(geometry).ok_or(ComparisonError::NotPolygonal(geometry.type_name()))
}

/// True if the interiors of the two features share at least one point. Touching boundaries do not count.
pub(crate) fn interiors_intersect(a: &Feature, b: &Feature) -> Result<bool, ComparisonError> {
    let matrix = areal(a)?.relate(&areal(b)?);
    Ok(matrix.get(CoordPos::Inside, CoordPos::Inside) != Dimensions::Empty)
}

/// True if `candidate` lies completely inside `container`.
pub(crate) fn contains(container: &Feature, candidate: &Feature) -> Result<bool, ComparisonError> {
    Ok(areal(container)?.relate(&areal(candidate)?).is_contains())
}
