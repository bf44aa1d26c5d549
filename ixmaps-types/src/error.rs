//! Error types used by the crate.

use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::geo::ProjectionKind;

/// Error constructing the typed geometry model from external data.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The `type` tag of a geometry is not one of the GeoJSON geometry types.
    #[error("unsupported geometry type: {0}")]
    UnsupportedGeometryType(String),
    /// A position has less than 2 dimensions or non-numeric members.
    #[error("invalid position: {0}")]
    InvalidPosition(String),
    /// The input is not a GeoJSON object of the expected kind.
    #[error("invalid input geometry: {0}")]
    Conversion(String),
    /// The input could not be parsed.
    #[error("failed to parse GeoJSON: {0}")]
    Parse(#[from] geojson::Error),
}

/// The reason a coordinate was rejected by the transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateIssue {
    /// One of the members is NaN or infinite.
    NotFinite,
    /// Longitude is outside of `[-180, 180]`.
    LongitudeOutOfRange,
    /// Latitude is outside of `[-90, 90]`.
    LatitudeOutOfRange,
}

impl Display for CoordinateIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateIssue::NotFinite => write!(f, "coordinate members must be finite numbers"),
            CoordinateIssue::LongitudeOutOfRange => {
                write!(f, "longitude must be within [-180, 180]")
            }
            CoordinateIssue::LatitudeOutOfRange => write!(f, "latitude must be within [-90, 90]"),
        }
    }
}

/// Error transforming a geometry from WGS84 into a projected space.
///
/// These errors mean the caller violated a precondition of the transform, so they are raised instead of being
/// reported as a validation outcome.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Input coordinate is not a valid WGS84 longitude/latitude pair.
    #[error("invalid coordinate [{lon}, {lat}]: {issue}")]
    InvalidCoordinate {
        /// Longitude as given.
        lon: f64,
        /// Latitude as given.
        lat: f64,
        /// What is wrong with it.
        issue: CoordinateIssue,
    },
    /// A single point cannot be represented in the target projection.
    #[error("point [{lon}, {lat}] cannot be represented in {projection} projection")]
    Unprojectable {
        /// Longitude of the point.
        lon: f64,
        /// Latitude of the point.
        lat: f64,
        /// Target projection.
        projection: ProjectionKind,
    },
    /// Dropping unprojectable vertices left a line or a ring with too few coordinates.
    #[error("{kind} collapsed to {remaining} coordinates after dropping unprojectable vertices (at least {required} required)")]
    CollapsedGeometry {
        /// `"line"` or `"ring"`.
        kind: &'static str,
        /// Coordinates left after filtering.
        remaining: usize,
        /// Minimum valid length.
        required: usize,
    },
    /// Raw input could not be converted into a typed geometry.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
