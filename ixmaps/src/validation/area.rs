use ixmaps_types::Feature;

use super::result::AreaValidationResult;
use super::{GeometryKind, NOT_POLYGONAL, NO_GEOMETRY};
use crate::config::AreaBounds;
use crate::scale::ScaleCorrection;

/// Checks the canonical area of a polygon against the bounds of its kind.
///
/// An area inside the bounds but closer than `warning_margin` (relative) to one of them is valid and carries a
/// warning.
pub fn validate_min_max_area(
    feature: &Feature,
    kind: GeometryKind,
    bounds: AreaBounds,
    warning_margin: f64,
    scale: &ScaleCorrection,
) -> AreaValidationResult {
    let invalid = |error: &str| AreaValidationResult {
        valid: false,
        error: Some(error.to_string()),
        warning: None,
        area: None,
    };

    let Some(geometry) = &feature.geometry else {
        return invalid(NO_GEOMETRY);
    };
    let Some(area) = scale.calculate_area(geometry) else {
        return invalid(NOT_POLYGONAL);
    };

    let km2 = area.canonical_km2;
    let mut error = None;
    let mut warning = None;

    if km2 < bounds.min_km2 {
        error = Some(format!(
            "Area of {km2:.4} km² is below the minimum of {} km² for a {kind}",
            bounds.min_km2
        ));
    } else if km2 > bounds.max_km2 {
        error = Some(format!(
            "Area of {km2:.4} km² exceeds the maximum of {} km² for a {kind}",
            bounds.max_km2
        ));
    } else if km2 < bounds.min_km2 * (1.0 + warning_margin) {
        warning = Some(format!(
            "Area of {km2:.4} km² is close to the minimum of {} km² for a {kind}",
            bounds.min_km2
        ));
    } else if km2 > bounds.max_km2 * (1.0 - warning_margin) {
        warning = Some(format!(
            "Area of {km2:.4} km² is close to the maximum of {} km² for a {kind}",
            bounds.max_km2
        ));
    }

    AreaValidationResult {
        valid: error.is_none(),
        error,
        warning,
        area: Some(area),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AreaThresholds;
    use ixmaps_types::{Geometry, Position};

    /// Square at the equator with the given canonical area.
    fn square_km2(canonical_km2: f64, scale: &ScaleCorrection) -> Feature {
        let unit = scale
            .calculate_area(&square(1.0))
            .map(|a| a.canonical_km2)
            .unwrap();
        Feature::new(square((canonical_km2 / unit).sqrt()))
    }

    fn square(size: f64) -> Geometry {
        Geometry::Polygon(vec![vec![
            Position { x: 0.0, y: 0.0 },
            Position { x: size, y: 0.0 },
            Position { x: size, y: size },
            Position { x: 0.0, y: size },
            Position { x: 0.0, y: 0.0 },
        ]])
    }

    fn check(canonical_km2: f64, kind: GeometryKind) -> AreaValidationResult {
        let scale = ScaleCorrection::default();
        validate_min_max_area(
            &square_km2(canonical_km2, &scale),
            kind,
            AreaThresholds::default().get(kind),
            0.1,
            &scale,
        )
    }

    #[test]
    fn small_subdivision_is_invalid() {
        let result = check(5.0, GeometryKind::Subdivision);
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("10 km²"));
        assert!(result.area.is_some());
    }

    #[test]
    fn near_minimum_produces_warning() {
        let result = check(10.5, GeometryKind::Subdivision);
        assert!(result.valid);
        assert!(result.warning.unwrap().contains("minimum"));
    }

    #[test]
    fn comfortable_area_is_silent() {
        let result = check(500.0, GeometryKind::City);
        assert!(result.valid);
        assert_eq!(result.warning, None);
        assert_eq!(result.error, None);
    }

    #[test]
    fn too_large_city() {
        let result = check(20_000.0, GeometryKind::City);
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("maximum"));
    }

    #[test]
    fn non_polygonal_geometry() {
        let feature = Feature::new(Geometry::Point(Position { x: 1.0, y: 1.0 }));
        let result = validate_min_max_area(
            &feature,
            GeometryKind::PointOfInterest,
            AreaThresholds::default().point_of_interest,
            0.1,
            &ScaleCorrection::default(),
        );
        assert!(!result.valid);
        assert_eq!(result.area, None);
    }
}
