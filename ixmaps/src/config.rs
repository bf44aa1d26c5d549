//! Configuration of the layer cache and the spatial validator.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::scale::IXEARTH_SCALE_FACTOR;
use crate::validation::GeometryKind;

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration of a [`LayerCache`](crate::layer::LayerCache).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerCacheConfig {
    /// Maximum time a single fetch from the geometry store may take.
    pub fetch_timeout: Duration,
}

impl Default for LayerCacheConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl LayerCacheConfig {
    /// Sets the fetch timeout.
    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }
}

/// Allowed range of vertices per polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VertexLimits {
    /// Fewer vertices is an error.
    pub min: usize,
    /// This many vertices or more produces a performance warning.
    pub warn: usize,
    /// More vertices is an error.
    pub max: usize,
}

impl Default for VertexLimits {
    fn default() -> Self {
        Self {
            min: 3,
            warn: 1_000,
            max: 10_000,
        }
    }
}

/// Allowed area range in canonical km².
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaBounds {
    /// Minimum area, canonical km².
    pub min_km2: f64,
    /// Maximum area, canonical km².
    pub max_km2: f64,
}

/// Area bounds for every [`GeometryKind`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaThresholds {
    /// Administrative subdivisions.
    pub subdivision: AreaBounds,
    /// Cities.
    pub city: AreaBounds,
    /// Points of interest.
    pub point_of_interest: AreaBounds,
}

impl Default for AreaThresholds {
    fn default() -> Self {
        Self {
            subdivision: AreaBounds {
                min_km2: 10.0,
                max_km2: 5_000_000.0,
            },
            city: AreaBounds {
                min_km2: 0.01,
                max_km2: 10_000.0,
            },
            point_of_interest: AreaBounds {
                min_km2: 0.0001,
                max_km2: 100.0,
            },
        }
    }
}

impl AreaThresholds {
    /// Bounds for the given kind.
    pub fn get(&self, kind: GeometryKind) -> AreaBounds {
        match kind {
            GeometryKind::Subdivision => self.subdivision,
            GeometryKind::City => self.city,
            GeometryKind::PointOfInterest => self.point_of_interest,
        }
    }
}

/// Configuration of a [`SpatialValidator`](crate::validation::SpatialValidator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Vertex count limits.
    pub vertex_limits: VertexLimits,
    /// Area limits per geometry kind.
    pub area_thresholds: AreaThresholds,
    /// Relative distance to an area bound that produces a warning.
    pub warning_margin: f64,
    /// Factor converting Earth-scale distances into canonical ones.
    pub scale_factor: f64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            vertex_limits: VertexLimits::default(),
            area_thresholds: AreaThresholds::default(),
            warning_margin: 0.1,
            scale_factor: IXEARTH_SCALE_FACTOR,
        }
    }
}
