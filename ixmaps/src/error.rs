//! Error types used by the crate.

use std::time::Duration;

use ixmaps_types::GeometryError;
use thiserror::Error;

/// Error obtaining raw layer geometry from a geometry store.
///
/// The [`LayerCache`](crate::layer::LayerCache) never surfaces these errors to its callers: it logs them and
/// serves an empty collection instead.
#[derive(Debug, Error)]
pub enum LayerError {
    /// Reading the layer data failed.
    #[error("failed to read layer data: {0}")]
    Io(#[from] std::io::Error),
    /// The layer data is not valid GeoJSON.
    #[error("failed to decode layer data: {0}")]
    Decoding(#[from] GeometryError),
    /// The store did not answer in time.
    #[error("layer fetch timed out after {0:?}")]
    Timeout(Duration),
    /// The request was cancelled by the caller.
    #[error("layer fetch was cancelled")]
    Cancelled,
    /// Store specific failure - details are inside.
    #[error("{0}")]
    Generic(String),
}
