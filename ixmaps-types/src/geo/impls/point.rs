use serde::{Deserialize, Serialize};

use crate::error::{CoordinateIssue, TransformError};
use crate::geo::traits::point::{GeoPoint, NewGeoPoint};

/// 2d point on the surface of the Earth.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GeoPoint2d {
    lat: f64,
    lon: f64,
}

impl GeoPoint for GeoPoint2d {
    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }
}

impl NewGeoPoint for GeoPoint2d {
    fn latlon(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl GeoPoint2d {
    /// Creates a point from a longitude/latitude pair, checking that it is a valid WGS84 coordinate.
    pub fn try_lonlat(lon: f64, lat: f64) -> Result<Self, TransformError> {
        match check_lonlat(lon, lat) {
            Ok(()) => Ok(Self { lat, lon }),
            Err(issue) => Err(TransformError::InvalidCoordinate { lon, lat, issue }),
        }
    }
}

/// Checks that the pair is finite and inside WGS84 bounds.
pub fn check_lonlat(lon: f64, lat: f64) -> Result<(), CoordinateIssue> {
    if !lon.is_finite() || !lat.is_finite() {
        return Err(CoordinateIssue::NotFinite);
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Err(CoordinateIssue::LongitudeOutOfRange);
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(CoordinateIssue::LatitudeOutOfRange);
    }

    Ok(())
}

/// Creates a new GeoPoint2d from longitude and latitude values (in degrees).
///
/// ```
/// use ixmaps_types::geo::GeoPoint;
/// use ixmaps_types::lonlat;
///
/// let point = lonlat!(52.0, 38.0);
/// assert_eq!(point.lat(), 38.0);
/// ```
#[macro_export]
macro_rules! lonlat {
    ($lon:expr, $lat:expr) => {
        <$crate::geo::GeoPoint2d as $crate::geo::NewGeoPoint>::lonlat($lon, $lat)
    };
}
