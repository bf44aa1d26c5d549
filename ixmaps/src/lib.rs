//! IxMaps serves reference map layers of the IxEarth world in several map projections and validates geometries drawn
//! by users before they are stored.
//!
//! * [`layer::LayerCache`] fetches raw WGS84 layers from a [`layer::LayerSource`], projects them with
//!   [`ixmaps_types::transform`] and keeps one shared result per projection and layer.
//! * [`validation::SpatialValidator`] checks coordinates, topology, vertex counts, areas, containment in a country
//!   boundary and overlaps with existing features.
//! * [`scale`] converts true-Earth measurements into the canonical IxEarth scale.
//!
//! # Example
//!
//! ```no_run
//! use ixmaps::layer::{FileLayerSource, LayerCache, LayerName};
//! use ixmaps::validation::{GeometryKind, SpatialValidator, ValidationContext};
//! use ixmaps::ixmaps_types::geo::ProjectionKind;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let cache = LayerCache::new(FileLayerSource::new("data/layers"));
//! let political = cache
//!     .fetch_transformed_geojson(LayerName::Political, ProjectionKind::EqualEarth)
//!     .await;
//!
//! let validator = SpatialValidator::default();
//! let report = validator.validate_geometry(
//!     &political.features[0],
//!     GeometryKind::Subdivision,
//!     ValidationContext::default(),
//! );
//! println!("valid: {}", report.is_valid);
//! # });
//! ```

pub mod config;
mod convert;
pub mod error;
pub mod layer;
pub mod scale;
pub mod validation;

pub use config::{LayerCacheConfig, ValidatorConfig};
pub use error::LayerError;
pub use ixmaps_types;
