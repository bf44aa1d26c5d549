//! Conversion of the typed model into [`geo`] geometries for the geometric predicates.

use geo::{Coord, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use ixmaps_types::{Geometry, Position};

fn line_string(positions: &[Position]) -> LineString<f64> {
    LineString::new(positions.to_vec())
}

/// Builds a polygon from an exterior ring and holes. Returns `None` if there are no rings.
pub(crate) fn polygon(rings: &[Vec<Position>]) -> Option<Polygon<f64>> {
    let (exterior, interiors) = rings.split_first()?;
    Some(Polygon::new(
        line_string(exterior),
        interiors.iter().map(|r| line_string(r)).collect(),
    ))
}

/// Converts a `Polygon` or `MultiPolygon` into a multipolygon. `None` for other geometry types.
pub(crate) fn multi_polygon(geometry: &Geometry) -> Option<MultiPolygon<f64>> {
    match geometry {
        Geometry::Polygon(rings) => Some(MultiPolygon::new(polygon(rings).into_iter().collect())),
        Geometry::MultiPolygon(polygons) => Some(MultiPolygon::new(
            polygons.iter().filter_map(|p| polygon(p)).collect(),
        )),
        _ => None,
    }
}

/// Converts any geometry. Polygons without rings become empty polygons.
pub(crate) fn geometry(geometry: &Geometry) -> geo::Geometry<f64> {
    match geometry {
        Geometry::Point(p) => geo::Geometry::Point(Point::from(*p)),
        Geometry::MultiPoint(points) => geo::Geometry::MultiPoint(MultiPoint::new(
            points.iter().map(|p| Point::from(*p)).collect(),
        )),
        Geometry::LineString(line) => geo::Geometry::LineString(line_string(line)),
        Geometry::MultiLineString(lines) => geo::Geometry::MultiLineString(MultiLineString::new(
            lines.iter().map(|l| line_string(l)).collect(),
        )),
        Geometry::Polygon(rings) => geo::Geometry::Polygon(
            polygon(rings).unwrap_or_else(|| Polygon::new(LineString::new(Vec::<Coord>::new()), vec![])),
        ),
        Geometry::MultiPolygon(_) => {
            geo::Geometry::MultiPolygon(multi_polygon(geometry).unwrap_or_else(|| MultiPolygon::new(vec![])))
        }
        Geometry::GeometryCollection(geometries) => geo::Geometry::GeometryCollection(
            geo::GeometryCollection::new_from(geometries.iter().map(self::geometry).collect()),
        ),
    }
}
