use std::collections::HashMap;
use std::sync::Arc;

use ixmaps_types::geo::{Datum, ProjectionKind};
use ixmaps_types::transform::transform_collection;
use ixmaps_types::FeatureCollection;
use log::{debug, warn};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;

use crate::config::LayerCacheConfig;
use crate::error::LayerError;
use crate::layer::{LayerName, LayerSource};

type CacheKey = (ProjectionKind, LayerName);
type CacheCell = Arc<OnceCell<Arc<FeatureCollection>>>;

/// Number and names of the populated cache entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of layers stored in the cache.
    pub size: usize,
    /// Keys of the stored layers in `projection:layer` form, sorted.
    pub keys: Vec<String>,
}

/// Fetches layers from a [`LayerSource`], projects them and keeps the result for the lifetime of the cache.
///
/// Entries are keyed by `(projection, layer)` and are only removed by [`LayerCache::clear_cache`]. Concurrent
/// requests for the same key share a single fetch.
///
/// The cache never fails: if the store returns an error, times out or the request is cancelled, an empty
/// collection is returned and nothing is stored, so the next request tries again. If the projection fails, the
/// untransformed layer is returned (and stored) instead.
pub struct LayerCache<S> {
    source: S,
    config: LayerCacheConfig,
    datum: Datum,
    entries: Mutex<HashMap<CacheKey, CacheCell, ahash::RandomState>>,
}

impl<S: LayerSource> LayerCache<S> {
    /// Creates a new cache with default configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, LayerCacheConfig::default())
    }

    /// Creates a new cache.
    pub fn with_config(source: S, config: LayerCacheConfig) -> Self {
        Self {
            source,
            config,
            datum: Datum::WGS84,
            entries: Mutex::new(HashMap::default()),
        }
    }

    /// Returns the layer in the given projection.
    pub async fn fetch_transformed_geojson(
        &self,
        layer: LayerName,
        projection: ProjectionKind,
    ) -> Arc<FeatureCollection> {
        self.fetch_transformed_geojson_cancellable(layer, projection, &CancellationToken::new())
            .await
    }

    /// Returns the layer in the given projection. If `cancellation` is triggered before the store answers, an
    /// empty collection is returned.
    pub async fn fetch_transformed_geojson_cancellable(
        &self,
        layer: LayerName,
        projection: ProjectionKind,
        cancellation: &CancellationToken,
    ) -> Arc<FeatureCollection> {
        let cell = self.get_cell((projection, layer));
        if let Some(collection) = cell.get() {
            debug!("Layer {layer} in {projection} projection is taken from cache");
            return collection.clone();
        }

        // Callers joining a fetch started by someone else still leave as soon as their own token is cancelled.
        let result = tokio::select! {
            biased;
            _ = cancellation.cancelled() => Err(LayerError::Cancelled),
            result = cell.get_or_try_init(|| self.load(layer, projection, cancellation)) => result.cloned(),
        };

        match result {
            Ok(collection) => collection,
            Err(err) => {
                warn!("Failed to load layer {layer}, serving empty collection: {err}");
                Arc::new(FeatureCollection::empty())
            }
        }
    }

    /// Removes all entries.
    pub fn clear_cache(&self) {
        let mut entries = self.entries.lock();
        debug!("Clearing {} layer cache entries", entries.len());
        entries.clear();
    }

    /// Returns the populated entries.
    pub fn cache_stats(&self) -> CacheStats {
        let entries = self.entries.lock();
        let mut keys: Vec<String> = entries
            .iter()
            .filter(|(_, cell)| cell.initialized())
            .map(|((projection, layer), _)| format!("{projection}:{layer}"))
            .collect();
        keys.sort();

        CacheStats {
            size: keys.len(),
            keys,
        }
    }

    fn get_cell(&self, key: CacheKey) -> CacheCell {
        self.entries.lock().entry(key).or_default().clone()
    }

    async fn load(
        &self,
        layer: LayerName,
        projection: ProjectionKind,
        cancellation: &CancellationToken,
    ) -> Result<Arc<FeatureCollection>, LayerError> {
        let raw = self.fetch_raw(layer, cancellation).await?;
        debug!(
            "Loaded layer {layer} with {} features from the geometry store",
            raw.len()
        );

        Ok(Arc::new(self.transform(layer, projection, raw)))
    }

    async fn fetch_raw(
        &self,
        layer: LayerName,
        cancellation: &CancellationToken,
    ) -> Result<FeatureCollection, LayerError> {
        let timeout = self.config.fetch_timeout;
        tokio::select! {
            biased;
            _ = cancellation.cancelled() => Err(LayerError::Cancelled),
            result = tokio::time::timeout(timeout, self.source.fetch_raw_layer(layer)) => {
                result.map_err(|_| LayerError::Timeout(timeout))?
            }
        }
    }

    fn transform(
        &self,
        layer: LayerName,
        projection: ProjectionKind,
        raw: FeatureCollection,
    ) -> FeatureCollection {
        if projection.is_passthrough() {
            return raw;
        }

        match transform_collection(&raw, projection, self.datum) {
            Ok(transformed) => {
                if transformed.dropped_vertices > 0 {
                    warn!(
                        "{} vertices of layer {layer} cannot be represented in {projection} projection and were dropped",
                        transformed.dropped_vertices
                    );
                }
                transformed.value
            }
            Err(err) => {
                warn!("Failed to project layer {layer} to {projection}, serving untransformed geometry: {err}");
                raw
            }
        }
    }
}
