use std::f64::consts::{FRAC_PI_4, PI};

use crate::cartesian::Point2d;
use crate::geo::datum::Datum;
use crate::geo::impls::point::GeoPoint2d;
use crate::geo::traits::point::{GeoPoint, NewGeoPoint};
use crate::geo::traits::projection::Projection;

use super::finite_point;

/// Latitude compression of the IxMaps world frame.
const LAT_COMPRESSION: f64 = 0.8;
/// Rounding slack of degree to radian conversion at the map edges.
const EDGE_TOLERANCE: f64 = 1e-9;

/// Cylindrical projection used by the IxMaps world frame.
///
/// Latitudes follow a Miller-style compressed Mercator curve (`y = ln(tan(π/4 + 0.8φ/2)) / 0.8`), which keeps the
/// poles at a finite distance, and longitudes are measured from a configurable central meridian and wrapped into
/// `[-180, 180]`.
#[derive(Debug, Copy, Clone)]
pub struct IxMapsProjection {
    datum: Datum,
    central_meridian: f64,
}

impl IxMapsProjection {
    /// Creates a projection centered on the Greenwich meridian.
    pub fn new(datum: Datum) -> Self {
        Self {
            datum,
            central_meridian: 0.0,
        }
    }

    /// Sets the central meridian, in degrees.
    pub fn with_central_meridian(mut self, central_meridian: f64) -> Self {
        self.central_meridian = central_meridian;
        self
    }
}

impl Default for IxMapsProjection {
    fn default() -> Self {
        Self::new(Datum::WGS84)
    }
}

/// Wraps into `[-π, π]`. Values within [`EDGE_TOLERANCE`] of an edge stay on that edge, so that `-180°` is not
/// moved to the opposite side of the map.
fn wrap_radians(mut lambda: f64) -> f64 {
    if lambda > PI + EDGE_TOLERANCE {
        lambda -= 2.0 * PI;
    } else if lambda < -PI - EDGE_TOLERANCE {
        lambda += 2.0 * PI;
    }

    lambda.clamp(-PI, PI)
}

impl Projection for IxMapsProjection {
    type InPoint = GeoPoint2d;
    type OutPoint = Point2d;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        let r = self.datum.semimajor();
        let lambda = wrap_radians(input.lon_rad() - self.central_meridian.to_radians());
        let y = (FRAC_PI_4 + LAT_COMPRESSION * input.lat_rad() / 2.0).tan().ln() / LAT_COMPRESSION;

        finite_point(r * lambda, r * y)
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        let r = self.datum.semimajor();
        let lambda = input.x() / r;
        if !lambda.is_finite() || lambda.abs() > PI + EDGE_TOLERANCE {
            return None;
        }

        let phi = (2.0 * (LAT_COMPRESSION * input.y() / r).exp().atan() - 2.0 * FRAC_PI_4)
            / LAT_COMPRESSION;
        if !phi.is_finite() || phi.abs() > PI / 2.0 + 1e-12 {
            return None;
        }

        let lon = wrap_radians(lambda + self.central_meridian.to_radians());
        Some(GeoPoint2d::latlon(phi.to_degrees(), lon.to_degrees()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lonlat;
    use approx::assert_abs_diff_eq;

    #[test]
    fn poles_are_finite() {
        let projection = IxMapsProjection::default();
        let north = projection.project(&lonlat!(0.0, 90.0)).unwrap();
        let south = projection.project(&lonlat!(0.0, -90.0)).unwrap();
        assert!(north.y().is_finite());
        assert_abs_diff_eq!(north.y(), -south.y(), epsilon = 1e-6);
    }

    #[test]
    fn round_trip() {
        let projection = IxMapsProjection::default();
        for lon in (-180..=180).step_by(15) {
            for lat in (-90..=90).step_by(15) {
                let point = lonlat!(lon as f64, lat as f64);
                let projected = projection.project(&point).unwrap();
                let restored = projection.unproject(&projected).unwrap();
                assert_abs_diff_eq!(restored.lat(), point.lat(), epsilon = 1e-7);
                assert_abs_diff_eq!(restored.lon(), point.lon(), epsilon = 1e-7);
            }
        }
    }

    #[test]
    fn antimeridian_stays_on_its_side() {
        let projection = IxMapsProjection::new(Datum::new(1.0));

        let west = projection.project(&lonlat!(-180.0, -75.0)).unwrap();
        let east = projection.project(&lonlat!(180.0, -75.0)).unwrap();
        assert_abs_diff_eq!(west.x(), -PI, epsilon = 1e-12);
        assert_abs_diff_eq!(east.x(), PI, epsilon = 1e-12);

        let restored = projection.unproject(&west).unwrap();
        assert_abs_diff_eq!(restored.lon(), -180.0, epsilon = 1e-9);
    }

    #[test]
    fn central_meridian_shifts_and_wraps() {
        let projection = IxMapsProjection::new(Datum::new(1.0)).with_central_meridian(30.0);
        let projected = projection.project(&lonlat!(30.0, 0.0)).unwrap();
        assert_abs_diff_eq!(projected.x(), 0.0, epsilon = 1e-12);

        let projected = projection.project(&lonlat!(-170.0, 10.0)).unwrap();
        assert_abs_diff_eq!(projected.x(), 160f64.to_radians(), epsilon = 1e-12);

        let restored = projection.unproject(&projected).unwrap();
        assert_abs_diff_eq!(restored.lon(), -170.0, epsilon = 1e-9);
        assert_abs_diff_eq!(restored.lat(), 10.0, epsilon = 1e-9);
    }
}
