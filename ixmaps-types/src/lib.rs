//! Typed geometry model and projection math of IxMaps.
//!
//! * [`geometry`] holds the [`Geometry`], [`Feature`] and [`FeatureCollection`] types. They are built from GeoJSON
//!   once, at the boundary, with the `TryFrom`/`FromStr` implementations of this crate.
//! * [`geo`] defines the [`Projection`](geo::Projection) contract and the supported
//!   [`ProjectionKind`](geo::ProjectionKind)s.
//! * [`transform`] applies a projection to whole geometry trees.
//! * [`dateline`] cuts features crossing the antimeridian.

pub mod cartesian;
pub mod dateline;
pub mod error;
pub mod geo;
mod geojson;
pub mod geometry;
pub mod transform;

pub use error::{CoordinateIssue, GeometryError, TransformError};
pub use geometry::{Feature, FeatureCollection, FeatureId, Geometry, JsonObject, Position};
pub use transform::{GeometryTransformer, Transformed};
