//! Geographic points, the projection contract and the supported projection family.

mod datum;
pub mod impls;
mod kind;
mod traits;

pub use datum::Datum;
pub use impls::point::{check_lonlat, GeoPoint2d};
pub use kind::{ProjectionKind, UnknownProjection};
pub use traits::point::{GeoPoint, NewGeoPoint};
pub use traits::projection::{MapProjection, Projection};
