use ixmaps_types::geo::GeoPoint;
use ixmaps_types::Feature;
use serde::Serialize;

use super::coordinates::validate_feature_coordinates;
use super::vertices::vertex_count;
use super::{GeometryKind, SpatialValidator, NO_GEOMETRY};
use crate::scale;

/// Features a candidate geometry is compared against.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationContext<'a> {
    /// If set, the candidate must lie inside this boundary.
    pub country_boundary: Option<&'a Feature>,
    /// The candidate must not overlap any of these.
    pub existing_features: &'a [Feature],
}

/// Measurements of the validated geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryMetadata {
    /// Number of distinct ring vertices.
    pub vertex_count: usize,
    /// Canonical area, km². Zero for non-polygonal geometries.
    pub area_km2: f64,
    /// Canonical area, mi². Zero for non-polygonal geometries.
    pub area_mi2: f64,
    /// `[min_lon, min_lat, max_lon, max_lat]`.
    pub bbox: Option<[f64; 4]>,
    /// `[lon, lat]`.
    pub centroid: Option<[f64; 2]>,
}

/// Result of [`SpatialValidator::validate_geometry`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryReport {
    /// True if there are no errors. Warnings do not affect validity.
    pub is_valid: bool,
    /// Errors of all failed checks.
    pub errors: Vec<String>,
    /// Warnings of all checks.
    pub warnings: Vec<String>,
    /// Measurements of the geometry.
    pub metadata: GeometryMetadata,
}

impl SpatialValidator {
    /// Runs all checks on the feature and collects their errors and warnings.
    pub fn validate_geometry(
        &self,
        feature: &Feature,
        kind: GeometryKind,
        context: ValidationContext<'_>,
    ) -> GeometryReport {
        let Some(geometry) = &feature.geometry else {
            return GeometryReport {
                is_valid: false,
                errors: vec![NO_GEOMETRY.to_string()],
                ..Default::default()
            };
        };

        let mut errors = vec![];
        let mut warnings = vec![];

        errors.extend(validate_feature_coordinates(feature).error);
        errors.extend(self.validate_topology(feature).issues);

        let vertices = self.validate_vertex_count(feature);
        errors.extend(vertices.error);
        warnings.extend(vertices.warning);

        let area = self.validate_min_max_area(feature, kind);
        errors.extend(area.error);
        warnings.extend(area.warning);

        if let Some(boundary) = context.country_boundary {
            errors.extend(self.validate_boundary_containment(feature, boundary).error);
        }

        if !context.existing_features.is_empty() {
            errors.extend(self.validate_overlap(feature, context.existing_features).error);
        }

        let metadata = GeometryMetadata {
            vertex_count: vertex_count(geometry),
            area_km2: area.area.map_or(0.0, |a| a.canonical_km2),
            area_mi2: area.area.map_or(0.0, |a| a.canonical_mi2),
            bbox: scale::bounding_box(geometry).map(|r| r.to_array()),
            centroid: scale::centroid(geometry).map(|p| [p.lon(), p.lat()]),
        };

        GeometryReport {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            metadata,
        }
    }
}
