use geo::algorithm::line_intersection::line_intersection;
use geo::Line;
use ixmaps_types::{Feature, Position};

use super::result::TopologyResult;
use super::{NOT_POLYGONAL, NO_GEOMETRY};

/// Checks that every ring of a polygon is closed, long enough, not degenerate and that the polygon does not
/// intersect itself. All issues are collected.
pub fn validate_topology(feature: &Feature) -> TopologyResult {
    let invalid = |error: &str| TopologyResult {
        valid: false,
        error: Some(error.to_string()),
        issues: vec![error.to_string()],
        kinks: 0,
    };

    let Some(geometry) = &feature.geometry else {
        return invalid(NO_GEOMETRY);
    };
    if !geometry.is_polygonal() {
        return invalid(NOT_POLYGONAL);
    }

    let polygons = geometry.polygons();
    let multiple = polygons.len() > 1;
    let mut issues = vec![];
    let mut kinks = 0;

    for (polygon_index, rings) in polygons.iter().enumerate() {
        let prefix = if multiple {
            format!("Polygon {}, ", polygon_index + 1)
        } else {
            String::new()
        };

        if rings.is_empty() {
            issues.push(format!("{prefix}polygon has no exterior ring"));
            continue;
        }

        for (ring_index, ring) in rings.iter().enumerate() {
            let name = if ring_index == 0 {
                format!("{prefix}exterior ring")
            } else {
                format!("{prefix}hole {ring_index}")
            };

            if ring.len() < 4 {
                issues.push(format!(
                    "{name} must have at least 4 coordinates (found {})",
                    ring.len()
                ));
            }

            if ring.first() != ring.last() {
                issues.push(format!("{name} is not closed"));
            }

            if ring.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
                issues.push(format!("{name} is degenerate: it has non-finite coordinates"));
            } else if ring.len() >= 3 && area_signed(ring) == 0.0 {
                issues.push(format!("{name} is degenerate: it has zero area"));
            }
        }

        kinks += count_kinks(rings);
    }

    if kinks > 0 {
        issues.push(format!("Geometry has {kinks} self-intersection(s)"));
    }

    TopologyResult {
        valid: issues.is_empty(),
        error: (!issues.is_empty()).then(|| issues.join("; ")),
        issues,
        kinks,
    }
}

fn area_signed(ring: &[Position]) -> f64 {
    let Some(&first) = ring.first() else {
        return 0.0;
    };

    let mut prev = first;
    let mut aggr = 0.0;
    for &p in ring[1..].iter().chain(std::iter::once(&first)) {
        aggr += prev.x * p.y - p.x * prev.y;
        prev = p;
    }

    aggr / 2.0
}

struct Segment {
    ring: usize,
    index: usize,
    line: Line<f64>,
}

impl Segment {
    fn bbox_disjoint(&self, other: &Segment) -> bool {
        let (a, b) = (&self.line, &other.line);
        a.start.x.max(a.end.x) < b.start.x.min(b.end.x)
            || b.start.x.max(b.end.x) < a.start.x.min(a.end.x)
            || a.start.y.max(a.end.y) < b.start.y.min(b.end.y)
            || b.start.y.max(b.end.y) < a.start.y.min(a.end.y)
    }
}

/// Number of intersecting pairs of non-adjacent segments over all rings of a polygon.
fn count_kinks(rings: &[Vec<Position>]) -> usize {
    let mut segments = vec![];
    let mut segment_counts = vec![];
    let mut closed = vec![];

    for (ring_index, ring) in rings.iter().enumerate() {
        let mut vertices: Vec<Position> = ring.clone();
        vertices.dedup();
        if vertices.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            vertices.clear();
        }

        let count = vertices.len().saturating_sub(1);
        segments.extend(vertices.windows(2).enumerate().map(|(index, w)| Segment {
            ring: ring_index,
            index,
            line: Line::new(w[0], w[1]),
        }));
        segment_counts.push(count);
        closed.push(vertices.len() > 3 && vertices.first() == vertices.last());
    }

    let adjacent = |a: &Segment, b: &Segment| {
        if a.ring != b.ring {
            return false;
        }

        let last = segment_counts[a.ring] - 1;
        a.index.abs_diff(b.index) == 1
            || (closed[a.ring] && a.index.min(b.index) == 0 && a.index.max(b.index) == last)
    };

    let mut kinks = 0;
    for (i, a) in segments.iter().enumerate() {
        for b in &segments[i + 1..] {
            if adjacent(a, b) || a.bbox_disjoint(b) {
                continue;
            }

            if line_intersection(a.line, b.line).is_some() {
                kinks += 1;
            }
        }
    }

    kinks
}

#[cfg(test)]
mod tests {
    use super::*;
    use ixmaps_types::Geometry;

    fn polygon(rings: &[&[(f64, f64)]]) -> Feature {
        Feature::new(Geometry::Polygon(
            rings
                .iter()
                .map(|r| r.iter().map(|&(x, y)| Position { x, y }).collect())
                .collect(),
        ))
    }

    const SQUARE: &[(f64, f64)] = &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)];
    const HOLE: &[(f64, f64)] = &[(1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (2.0, 1.0), (1.0, 1.0)];

    #[test]
    fn valid_polygon_with_hole() {
        let result = validate_topology(&polygon(&[SQUARE, HOLE]));
        assert!(result.valid, "{:?}", result.issues);
        assert_eq!(result.kinks, 0);
        assert_eq!(result.error, None);
    }

    #[test]
    fn bow_tie_has_one_kink() {
        let result = validate_topology(&polygon(&[&[
            (0.0, 0.0),
            (1.0, 1.0),
            (1.0, 0.0),
            (0.0, 1.0),
            (0.0, 0.0),
        ]]));
        assert!(!result.valid);
        assert_eq!(result.kinks, 1);
    }

    #[test]
    fn hole_crossing_exterior_is_a_kink() {
        let hole: &[(f64, f64)] = &[(3.0, 1.0), (3.0, 2.0), (5.0, 2.0), (5.0, 1.0), (3.0, 1.0)];
        let result = validate_topology(&polygon(&[SQUARE, hole]));
        assert!(!result.valid);
        assert_eq!(result.kinks, 2);
    }

    #[test]
    fn all_issues_are_collected() {
        let result = validate_topology(&polygon(&[SQUARE, &[(1.0, 1.0), (2.0, 2.0), (1.0, 2.0)]]));
        assert!(!result.valid);
        assert_eq!(result.issues.len(), 2, "{:?}", result.issues);
        assert!(result.issues.iter().any(|i| i.contains("hole 1 must have at least 4")));
        assert!(result.issues.iter().any(|i| i.contains("hole 1 is not closed")));
        assert!(result.error.unwrap().contains("; "));
    }

    #[test]
    fn zero_area_ring_is_degenerate() {
        let result = validate_topology(&polygon(&[&[
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (0.0, 0.0),
        ]]));
        assert!(!result.valid);
        assert!(result.issues.iter().any(|i| i.contains("zero area")));
    }

    #[test]
    fn duplicate_vertices_are_not_kinks() {
        let result = validate_topology(&polygon(&[&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 0.0),
            (4.0, 4.0),
            (0.0, 4.0),
            (0.0, 0.0),
        ]]));
        assert!(result.valid, "{:?}", result.issues);
    }

    #[test]
    fn multi_polygon_issues_name_the_part() {
        let feature = Feature::new(Geometry::MultiPolygon(vec![
            vec![SQUARE.iter().map(|&(x, y)| Position { x, y }).collect()],
            vec![SQUARE[..4].iter().map(|&(x, y)| Position { x, y }).collect()],
        ]));
        let result = validate_topology(&feature);
        assert_eq!(result.issues, vec!["Polygon 2, exterior ring is not closed".to_string()]);
    }

    #[test]
    fn missing_geometry() {
        assert!(!validate_topology(&Feature::default()).valid);
    }
}
