//! Conversion of true-Earth measurements into the canonical IxEarth scale.
//!
//! All measurements are computed once on the raw WGS84 geometry and then scaled by a single linear factor. Areas
//! are scaled the same way: the Earth-scale square miles are multiplied by the factor, and canonical square
//! kilometers are derived from the canonical square miles by unit conversion.

use geo::{Centroid, ChamberlainDuquetteArea, HaversineDistance, Point};
use ixmaps_types::cartesian::Rect;
use ixmaps_types::geo::{GeoPoint, GeoPoint2d};
use ixmaps_types::Geometry;
use serde::{Deserialize, Serialize};

use crate::convert;

/// Factor converting Earth-scale linear measurements into IxEarth ones.
pub const IXEARTH_SCALE_FACTOR: f64 = 1.4777;
/// Square miles in one square kilometer.
pub const KM2_TO_MI2: f64 = 0.386102;
/// Square kilometers in one square mile.
pub const MI2_TO_KM2: f64 = 2.58999;
/// Miles in one kilometer.
pub const KM_TO_MI: f64 = 0.621371;

/// Unit of a linear distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    /// Kilometers.
    #[default]
    Kilometers,
    /// Miles.
    Miles,
}

/// Area of a geometry in Earth and canonical scale.
///
/// The canonical values are always derived from the Earth-scale ones with the same factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaCalculation {
    /// True-Earth area, km².
    pub earth_km2: f64,
    /// True-Earth area, mi².
    pub earth_mi2: f64,
    /// Canonical area, km².
    pub canonical_km2: f64,
    /// Canonical area, mi².
    pub canonical_mi2: f64,
}

/// Applies the scale-correction factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleCorrection {
    factor: f64,
}

impl Default for ScaleCorrection {
    fn default() -> Self {
        Self::new(IXEARTH_SCALE_FACTOR)
    }
}

impl ScaleCorrection {
    /// Creates a correction with the given factor.
    pub const fn new(factor: f64) -> Self {
        Self { factor }
    }

    /// The factor.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Converts an Earth-scale distance into canonical one.
    pub fn scale_distance(&self, earth: f64) -> f64 {
        earth * self.factor
    }

    /// Builds the area report from an Earth-scale area in square meters.
    pub fn area_from_square_meters(&self, square_meters: f64) -> AreaCalculation {
        let earth_km2 = square_meters / 1_000_000.0;
        let earth_mi2 = earth_km2 * KM2_TO_MI2;
        let canonical_mi2 = earth_mi2 * self.factor;
        let canonical_km2 = canonical_mi2 * MI2_TO_KM2;

        AreaCalculation {
            earth_km2,
            earth_mi2,
            canonical_km2,
            canonical_mi2,
        }
    }

    /// Area of a `Polygon` or `MultiPolygon` given in WGS84. `None` for other geometry types.
    ///
    /// The area is computed on a sphere with the algorithm of Chamberlain and Duquette.
    pub fn calculate_area(&self, geometry: &Geometry) -> Option<AreaCalculation> {
        let polygon = convert::multi_polygon(geometry)?;
        Some(self.area_from_square_meters(polygon.chamberlain_duquette_unsigned_area()))
    }

    /// Great-circle distance between two points, scaled into canonical units.
    pub fn distance(&self, from: &GeoPoint2d, to: &GeoPoint2d, unit: DistanceUnit) -> f64 {
        let from = Point::new(from.lon(), from.lat());
        let to = Point::new(to.lon(), to.lat());
        let km = from.haversine_distance(&to) / 1000.0;

        let earth = match unit {
            DistanceUnit::Kilometers => km,
            DistanceUnit::Miles => km * KM_TO_MI,
        };

        self.scale_distance(earth)
    }
}

/// Bounding box of the raw WGS84 geometry.
pub fn bounding_box(geometry: &Geometry) -> Option<Rect> {
    geometry.bounding_rect()
}

/// Centroid of the raw WGS84 geometry, as a longitude/latitude point.
pub fn centroid(geometry: &Geometry) -> Option<GeoPoint2d> {
    convert::geometry(geometry)
        .centroid()
        .map(|p| ixmaps_types::lonlat!(p.x(), p.y()))
}
