//! Validation of user-drawn geometries before they are stored.
//!
//! Every check returns a result value describing the outcome. Invalid input, including a feature without
//! geometry, produces a failed result rather than an error.

use std::fmt::{Display, Formatter};

use ixmaps_types::Feature;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ValidatorConfig;
use crate::scale::{AreaCalculation, ScaleCorrection};

mod area;
mod containment;
mod coordinates;
mod overlap;
mod relate;
mod report;
mod result;
mod topology;
mod vertices;

pub use area::validate_min_max_area;
pub use containment::validate_boundary_containment;
pub use coordinates::{validate_coordinate_values, validate_coordinates, validate_feature_coordinates};
pub use overlap::validate_overlap;
pub use relate::ComparisonError;
pub use report::{GeometryMetadata, GeometryReport, ValidationContext};
pub use result::{AreaValidationResult, OverlapResult, TopologyResult, ValidationResult, VertexCountResult};
pub use topology::validate_topology;
pub use vertices::validate_vertex_count;

const NO_GEOMETRY: &str = "Feature has no geometry";
const NOT_POLYGONAL: &str = "Geometry must be a Polygon or MultiPolygon";

/// Kind of a user-drawn geometry. Selects the area bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryKind {
    /// Administrative subdivision of a country.
    Subdivision,
    /// City.
    City,
    /// Point of interest.
    #[serde(alias = "poi")]
    PointOfInterest,
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Subdivision => "subdivision",
            Self::City => "city",
            Self::PointOfInterest => "point of interest",
        })
    }
}

/// Runs the geometry checks with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct SpatialValidator {
    config: ValidatorConfig,
    scale: ScaleCorrection,
}

impl SpatialValidator {
    /// Creates a validator.
    pub fn new(config: ValidatorConfig) -> Self {
        let scale = ScaleCorrection::new(config.scale_factor);
        Self { config, scale }
    }

    /// Configuration of the validator.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Scale correction used for areas.
    pub fn scale(&self) -> &ScaleCorrection {
        &self.scale
    }

    /// See [`validate_coordinates`].
    pub fn validate_coordinates(&self, lon: f64, lat: f64) -> ValidationResult {
        validate_coordinates(lon, lat)
    }

    /// See [`validate_coordinate_values`].
    pub fn validate_coordinate_values(&self, lon: &Value, lat: &Value) -> ValidationResult {
        validate_coordinate_values(lon, lat)
    }

    /// See [`validate_topology`].
    pub fn validate_topology(&self, feature: &Feature) -> TopologyResult {
        validate_topology(feature)
    }

    /// Checks the vertex count against the configured limits.
    pub fn validate_vertex_count(&self, feature: &Feature) -> VertexCountResult {
        validate_vertex_count(feature, &self.config.vertex_limits)
    }

    /// Checks the canonical area against the configured bounds for `kind`.
    pub fn validate_min_max_area(&self, feature: &Feature, kind: GeometryKind) -> AreaValidationResult {
        validate_min_max_area(
            feature,
            kind,
            self.config.area_thresholds.get(kind),
            self.config.warning_margin,
            &self.scale,
        )
    }

    /// See [`validate_boundary_containment`].
    pub fn validate_boundary_containment(&self, candidate: &Feature, boundary: &Feature) -> ValidationResult {
        validate_boundary_containment(candidate, boundary)
    }

    /// See [`validate_overlap`].
    pub fn validate_overlap(&self, candidate: &Feature, existing: &[Feature]) -> OverlapResult {
        validate_overlap(candidate, existing)
    }

    /// Area of the feature geometry with the configured scale factor.
    pub fn calculate_area(&self, feature: &Feature) -> Option<AreaCalculation> {
        self.scale.calculate_area(feature.geometry.as_ref()?)
    }
}
