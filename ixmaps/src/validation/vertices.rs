use ixmaps_types::{Feature, Geometry, Position};

use super::result::VertexCountResult;
use super::{NOT_POLYGONAL, NO_GEOMETRY};
use crate::config::VertexLimits;

/// Number of distinct vertices of a ring: the closing vertex of a closed ring is not counted.
pub(crate) fn ring_vertex_count(ring: &[Position]) -> usize {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 1 && first == last => ring.len() - 1,
        _ => ring.len(),
    }
}

/// Number of distinct vertices over all rings of a polygonal geometry.
pub(crate) fn vertex_count(geometry: &Geometry) -> usize {
    geometry
        .polygons()
        .into_iter()
        .flatten()
        .map(|ring| ring_vertex_count(ring))
        .sum()
}

/// Checks that the number of vertices of a polygon is inside the limits.
pub fn validate_vertex_count(feature: &Feature, limits: &VertexLimits) -> VertexCountResult {
    let invalid = |error: &str| VertexCountResult {
        valid: false,
        error: Some(error.to_string()),
        warning: None,
        count: 0,
    };

    let Some(geometry) = &feature.geometry else {
        return invalid(NO_GEOMETRY);
    };
    if !geometry.is_polygonal() {
        return invalid(NOT_POLYGONAL);
    }

    let count = vertex_count(geometry);
    let (error, warning) = if count < limits.min {
        (
            Some(format!(
                "Polygon must have at least {} vertices (found {count})",
                limits.min
            )),
            None,
        )
    } else if count > limits.max {
        (
            Some(format!(
                "Polygon has too many vertices ({count}), the maximum is {}",
                limits.max
            )),
            None,
        )
    } else if count >= limits.warn {
        (
            None,
            Some(format!(
                "Polygon has {count} vertices, editing and rendering it may be slow"
            )),
        )
    } else {
        (None, None)
    };

    VertexCountResult {
        valid: error.is_none(),
        error,
        warning,
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(vertices: usize) -> Feature {
        let mut ring: Vec<Position> = (0..vertices)
            .map(|i| {
                let angle = i as f64 / vertices as f64 * std::f64::consts::TAU;
                Position {
                    x: angle.cos(),
                    y: angle.sin(),
                }
            })
            .collect();
        ring.push(ring[0]);
        Feature::new(Geometry::Polygon(vec![ring]))
    }

    #[test]
    fn triangle_is_valid() {
        let result = validate_vertex_count(&circle(3), &VertexLimits::default());
        assert!(result.valid);
        assert_eq!(result.count, 3);
        assert_eq!(result.warning, None);
    }

    #[test]
    fn too_many_vertices() {
        let result = validate_vertex_count(&circle(10_001), &VertexLimits::default());
        assert!(!result.valid);
        assert_eq!(result.count, 10_001);
    }

    #[test]
    fn large_polygons_produce_warning() {
        let result = validate_vertex_count(&circle(1_500), &VertexLimits::default());
        assert!(result.valid);
        assert!(result.warning.is_some());
    }

    #[test]
    fn warning_band_starts_at_limit() {
        let limits = VertexLimits::default();

        let at_limit = validate_vertex_count(&circle(limits.warn), &limits);
        assert!(at_limit.valid);
        assert!(at_limit.warning.is_some());

        let below = validate_vertex_count(&circle(limits.warn - 1), &limits);
        assert_eq!(below.warning, None);
    }

    #[test]
    fn holes_are_counted() {
        let Some(Geometry::Polygon(mut rings)) = circle(4).geometry else {
            unreachable!()
        };
        let Some(Geometry::Polygon(hole)) = circle(5).geometry else {
            unreachable!()
        };
        rings.extend(hole);

        let result = validate_vertex_count(&Feature::new(Geometry::Polygon(rings)), &VertexLimits::default());
        assert_eq!(result.count, 9);
    }

    #[test]
    fn degenerate_polygon_is_invalid() {
        let feature = Feature::new(Geometry::Polygon(vec![vec![
            Position { x: 0.0, y: 0.0 },
            Position { x: 1.0, y: 0.0 },
            Position { x: 0.0, y: 0.0 },
        ]]));
        let result = validate_vertex_count(&feature, &VertexLimits::default());
        assert!(!result.valid);
        assert_eq!(result.count, 2);
    }
}
