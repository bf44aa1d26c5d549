//! Strongly typed geometry model.
//!
//! Geometries are built once at the boundary (see [`crate::geojson`]) and then passed through the pipeline without
//! re-validating their shape. Coordinates are stored as [`Position`] with `x` being longitude and `y` being latitude
//! for WGS84 data, or planar `x`/`y` after projection. Rings are stored exactly as given: a ring that is not closed
//! stays unclosed, so the validator can report it.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::cartesian::Rect;

/// A single coordinate pair.
pub type Position = geo_types::Coord<f64>;

/// Properties of a feature.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Tagged union of all GeoJSON geometry types.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Single position.
    Point(Position),
    /// Unordered set of positions.
    MultiPoint(Vec<Position>),
    /// Polyline.
    LineString(Vec<Position>),
    /// Set of polylines.
    MultiLineString(Vec<Vec<Position>>),
    /// Exterior ring followed by holes.
    Polygon(Vec<Vec<Position>>),
    /// Set of polygons.
    MultiPolygon(Vec<Vec<Vec<Position>>>),
    /// Heterogeneous set of geometries.
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    /// GeoJSON name of the geometry type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::GeometryCollection(_) => "GeometryCollection",
        }
    }

    /// Calls `f` for every position of the geometry, in storage order.
    pub fn for_each_position(&self, f: &mut impl FnMut(&Position)) {
        match self {
            Geometry::Point(p) => f(p),
            Geometry::MultiPoint(points) | Geometry::LineString(points) => points.iter().for_each(f),
            Geometry::MultiLineString(lines) | Geometry::Polygon(lines) => {
                lines.iter().flatten().for_each(f)
            }
            Geometry::MultiPolygon(polygons) => polygons.iter().flatten().flatten().for_each(f),
            Geometry::GeometryCollection(geometries) => {
                for geometry in geometries {
                    geometry.for_each_position(f);
                }
            }
        }
    }

    /// Total number of stored positions, including duplicated ring closing positions.
    pub fn position_count(&self) -> usize {
        let mut count = 0;
        self.for_each_position(&mut |_| count += 1);
        count
    }

    /// Returns the rings of every polygon of the geometry. Empty for non-polygonal geometries.
    pub fn polygons(&self) -> Vec<&[Vec<Position>]> {
        match self {
            Geometry::Polygon(rings) => vec![rings.as_slice()],
            Geometry::MultiPolygon(polygons) => polygons.iter().map(|p| p.as_slice()).collect(),
            Geometry::GeometryCollection(geometries) => {
                geometries.iter().flat_map(|g| g.polygons()).collect()
            }
            _ => vec![],
        }
    }

    /// Returns true for `Polygon` and `MultiPolygon`.
    pub fn is_polygonal(&self) -> bool {
        matches!(self, Geometry::Polygon(_) | Geometry::MultiPolygon(_))
    }

    /// Bounding rectangle of all positions. `None` if the geometry has no positions.
    pub fn bounding_rect(&self) -> Option<Rect> {
        let mut rect: Option<Rect> = None;
        self.for_each_position(&mut |p| {
            let point_rect = Rect::new(p.x, p.y, p.x, p.y);
            rect = Some(match rect {
                Some(r) => r.merge(point_rect),
                None => point_rect,
            });
        });

        rect
    }
}

/// Identifier of a feature.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureId {
    /// String identifier.
    String(String),
    /// Numeric identifier.
    Number(serde_json::Number),
}

impl Display for FeatureId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureId::String(v) => write!(f, "{v}"),
            FeatureId::Number(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for FeatureId {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// A geometry with an opaque property bag and an optional identifier.
///
/// Properties are shared behind an [`Arc`], so transforming a feature never copies the bag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Feature {
    /// Feature identifier.
    pub id: Option<FeatureId>,
    /// Geometry of the feature. GeoJSON allows features without geometry.
    pub geometry: Option<Geometry>,
    /// Property bag.
    pub properties: Option<Arc<JsonObject>>,
}

impl Feature {
    /// Creates a feature with the given geometry and no id or properties.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: None,
            geometry: Some(geometry),
            properties: None,
        }
    }

    /// Sets the identifier.
    pub fn with_id(mut self, id: impl Into<FeatureId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the properties.
    pub fn with_properties(mut self, properties: JsonObject) -> Self {
        self.properties = Some(Arc::new(properties));
        self
    }

    /// Returns a property value by its name.
    pub fn property(&self, name: &str) -> Option<&serde_json::Value> {
        self.properties.as_ref().and_then(|p| p.get(name))
    }
}

/// Ordered sequence of features.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureCollection {
    /// Features in their original order.
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Creates a collection from features.
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Creates an empty collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if there are no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<T: IntoIterator<Item = Feature>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
