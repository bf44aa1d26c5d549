//! Structure preserving projection of geometries, features and feature collections.
//!
//! Every input coordinate must be a valid WGS84 longitude/latitude pair, otherwise the transform fails with
//! [`TransformError::InvalidCoordinate`]. Vertices the projection cannot represent are handled depending on the
//! geometry type:
//!
//! * a `Point` fails with [`TransformError::Unprojectable`];
//! * in every other geometry the vertex is dropped and counted in [`Transformed::dropped_vertices`]. If dropping
//!   leaves a line with less than 2 or a ring with less than 4 coordinates, the transform fails with
//!   [`TransformError::CollapsedGeometry`].
//!
//! Feature ids and properties are passed through untouched.

use log::debug;

use crate::error::TransformError;
use crate::geo::{Datum, GeoPoint2d, MapProjection, Projection, ProjectionKind};
use crate::geometry::{Feature, FeatureCollection, Geometry, Position};

const MIN_LINE_LENGTH: usize = 2;
const MIN_RING_LENGTH: usize = 4;

/// Result of a transform together with the number of vertices that were dropped as unprojectable.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed<T> {
    /// Transformed value.
    pub value: T,
    /// Number of input vertices removed because the projection could not represent them.
    pub dropped_vertices: usize,
}

impl<T> Transformed<T> {
    fn unchanged(value: T) -> Self {
        Self {
            value,
            dropped_vertices: 0,
        }
    }
}

/// Projects a single WGS84 position.
///
/// Returns `Ok(None)` if the coordinate is valid but the projection cannot represent it.
pub fn transform_coordinate<P>(
    position: Position,
    projection: &P,
) -> Result<Option<Position>, TransformError>
where
    P: Projection<InPoint = GeoPoint2d, OutPoint = crate::cartesian::Point2d> + ?Sized,
{
    let point = GeoPoint2d::try_lonlat(position.x, position.y)?;
    Ok(projection.project(&point).map(|p| Position { x: p.x(), y: p.y() }))
}

/// Applies a projection to geometry trees.
pub struct GeometryTransformer<'a, P: ?Sized> {
    projection: &'a P,
    kind: ProjectionKind,
}

impl<'a, P> GeometryTransformer<'a, P>
where
    P: Projection<InPoint = GeoPoint2d, OutPoint = crate::cartesian::Point2d> + ?Sized,
{
    /// Creates a transformer. `kind` is only used to name the projection in errors.
    pub fn new(projection: &'a P, kind: ProjectionKind) -> Self {
        Self { projection, kind }
    }

    /// Transforms a geometry.
    pub fn transform_geometry(
        &self,
        geometry: &Geometry,
    ) -> Result<Transformed<Geometry>, TransformError> {
        let mut walk = Walk {
            transformer: self,
            dropped: 0,
        };
        let value = walk.geometry(geometry)?;

        Ok(Transformed {
            value,
            dropped_vertices: walk.dropped,
        })
    }

    /// Transforms the geometry of a feature, keeping its id and properties.
    pub fn transform_feature(&self, feature: &Feature) -> Result<Transformed<Feature>, TransformError> {
        let mut walk = Walk {
            transformer: self,
            dropped: 0,
        };
        let value = walk.feature(feature)?;

        Ok(Transformed {
            value,
            dropped_vertices: walk.dropped,
        })
    }

    /// Transforms every feature of the collection, preserving order. The first failing feature fails the whole
    /// collection.
    pub fn transform_collection(
        &self,
        collection: &FeatureCollection,
    ) -> Result<Transformed<FeatureCollection>, TransformError> {
        let mut walk = Walk {
            transformer: self,
            dropped: 0,
        };
        let features = collection
            .features
            .iter()
            .map(|f| walk.feature(f))
            .collect::<Result<Vec<_>, _>>()?;

        if walk.dropped > 0 {
            debug!(
                "Dropped {} unprojectable vertices while projecting {} features to {}",
                walk.dropped,
                features.len(),
                self.kind
            );
        }

        Ok(Transformed {
            value: FeatureCollection::new(features),
            dropped_vertices: walk.dropped,
        })
    }
}

struct Walk<'t, 'a, P: ?Sized> {
    transformer: &'t GeometryTransformer<'a, P>,
    dropped: usize,
}

impl<P> Walk<'_, '_, P>
where
    P: Projection<InPoint = GeoPoint2d, OutPoint = crate::cartesian::Point2d> + ?Sized,
{
    fn feature(&mut self, feature: &Feature) -> Result<Feature, TransformError> {
        Ok(Feature {
            id: feature.id.clone(),
            geometry: feature
                .geometry
                .as_ref()
                .map(|g| self.geometry(g))
                .transpose()?,
            properties: feature.properties.clone(),
        })
    }

    fn geometry(&mut self, geometry: &Geometry) -> Result<Geometry, TransformError> {
        Ok(match geometry {
            Geometry::Point(p) => Geometry::Point(self.point(*p)?),
            Geometry::MultiPoint(points) => Geometry::MultiPoint(self.positions(points)?),
            Geometry::LineString(line) => Geometry::LineString(self.line(line, MIN_LINE_LENGTH)?),
            Geometry::MultiLineString(lines) => Geometry::MultiLineString(
                lines
                    .iter()
                    .map(|l| self.line(l, MIN_LINE_LENGTH))
                    .collect::<Result<_, _>>()?,
            ),
            Geometry::Polygon(rings) => Geometry::Polygon(self.rings(rings)?),
            Geometry::MultiPolygon(polygons) => Geometry::MultiPolygon(
                polygons
                    .iter()
                    .map(|p| self.rings(p))
                    .collect::<Result<_, _>>()?,
            ),
            Geometry::GeometryCollection(geometries) => Geometry::GeometryCollection(
                geometries
                    .iter()
                    .map(|g| self.geometry(g))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }

    fn point(&mut self, position: Position) -> Result<Position, TransformError> {
        transform_coordinate(position, self.transformer.projection)?.ok_or(
            TransformError::Unprojectable {
                lon: position.x,
                lat: position.y,
                projection: self.transformer.kind,
            },
        )
    }

    fn positions(&mut self, positions: &[Position]) -> Result<Vec<Position>, TransformError> {
        let mut projected = Vec::with_capacity(positions.len());
        for position in positions {
            match transform_coordinate(*position, self.transformer.projection)? {
                Some(p) => projected.push(p),
                None => self.dropped += 1,
            }
        }

        Ok(projected)
    }

    fn line(&mut self, line: &[Position], min_length: usize) -> Result<Vec<Position>, TransformError> {
        let projected = self.positions(line)?;
        if projected.len() < line.len() && projected.len() < min_length {
            return Err(TransformError::CollapsedGeometry {
                kind: if min_length == MIN_RING_LENGTH {
                    "ring"
                } else {
                    "line"
                },
                remaining: projected.len(),
                required: min_length,
            });
        }

        Ok(projected)
    }

    fn rings(&mut self, rings: &[Vec<Position>]) -> Result<Vec<Vec<Position>>, TransformError> {
        rings
            .iter()
            .map(|r| self.line(r, MIN_RING_LENGTH))
            .collect()
    }
}

/// Transforms a geometry into the given projection. Pass-through projections return an unchanged copy.
pub fn transform_geometry(
    geometry: &Geometry,
    kind: ProjectionKind,
    datum: Datum,
) -> Result<Transformed<Geometry>, TransformError> {
    match kind.get_projection(datum) {
        Some(projection) => {
            GeometryTransformer::<MapProjection>::new(projection.as_ref(), kind)
                .transform_geometry(geometry)
        }
        None => Ok(Transformed::unchanged(geometry.clone())),
    }
}

/// Transforms a feature into the given projection. Pass-through projections return an unchanged copy.
pub fn transform_feature(
    feature: &Feature,
    kind: ProjectionKind,
    datum: Datum,
) -> Result<Transformed<Feature>, TransformError> {
    match kind.get_projection(datum) {
        Some(projection) => {
            GeometryTransformer::<MapProjection>::new(projection.as_ref(), kind)
                .transform_feature(feature)
        }
        None => Ok(Transformed::unchanged(feature.clone())),
    }
}

/// Transforms a feature collection into the given projection. Pass-through projections return an unchanged copy.
pub fn transform_collection(
    collection: &FeatureCollection,
    kind: ProjectionKind,
    datum: Datum,
) -> Result<Transformed<FeatureCollection>, TransformError> {
    match kind.get_projection(datum) {
        Some(projection) => {
            GeometryTransformer::<MapProjection>::new(projection.as_ref(), kind)
                .transform_collection(collection)
        }
        None => Ok(Transformed::unchanged(collection.clone())),
    }
}
