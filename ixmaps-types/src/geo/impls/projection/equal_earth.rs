use std::f64::consts::PI;

use crate::cartesian::Point2d;
use crate::geo::datum::Datum;
use crate::geo::impls::point::GeoPoint2d;
use crate::geo::traits::point::{GeoPoint, NewGeoPoint};
use crate::geo::traits::projection::Projection;

use super::finite_point;

const A1: f64 = 1.340264;
const A2: f64 = -0.081106;
const A3: f64 = 0.000893;
const A4: f64 = 0.003796;
const MAX_ITERATIONS: usize = 12;
const EPSILON: f64 = 1e-12;

/// Equal Earth projection (Šavrič, Patterson, Jenny, 2018) on a sphere with the datum's radius.
#[derive(Debug, Copy, Clone)]
pub struct EqualEarth {
    datum: Datum,
}

impl EqualEarth {
    /// Creates a new instance.
    pub fn new(datum: Datum) -> Self {
        Self { datum }
    }
}

impl Default for EqualEarth {
    fn default() -> Self {
        Self::new(Datum::WGS84)
    }
}

fn m() -> f64 {
    3f64.sqrt() / 2.0
}

fn y_poly(theta: f64) -> f64 {
    let t2 = theta * theta;
    let t6 = t2 * t2 * t2;
    theta * (A1 + A2 * t2 + t6 * (A3 + A4 * t2))
}

fn y_poly_derivative(theta: f64) -> f64 {
    let t2 = theta * theta;
    let t6 = t2 * t2 * t2;
    A1 + 3.0 * A2 * t2 + t6 * (7.0 * A3 + 9.0 * A4 * t2)
}

impl Projection for EqualEarth {
    type InPoint = GeoPoint2d;
    type OutPoint = Point2d;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        let lambda = input.lon_rad();
        let theta = (m() * input.lat_rad().sin()).asin();
        let r = self.datum.semimajor();

        let x = r * lambda * theta.cos() / (m() * y_poly_derivative(theta));
        let y = r * y_poly(theta);

        finite_point(x, y)
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        let r = self.datum.semimajor();
        let x = input.x() / r;
        let y = input.y() / r;

        let mut theta = y;
        for _ in 0..MAX_ITERATIONS {
            let delta = (y_poly(theta) - y) / y_poly_derivative(theta);
            theta -= delta;
            if delta.abs() < EPSILON {
                break;
            }
        }

        let lambda = m() * x * y_poly_derivative(theta) / theta.cos();
        let phi = (theta.sin() / m()).clamp(-1.0, 1.0).asin();

        if !lambda.is_finite() || !phi.is_finite() || lambda.abs() > PI + EPSILON {
            return None;
        }

        Some(GeoPoint2d::latlon(phi.to_degrees(), lambda.to_degrees()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lonlat;
    use approx::assert_abs_diff_eq;

    #[test]
    fn origin_maps_to_origin() {
        let projected = EqualEarth::default().project(&lonlat!(0.0, 0.0)).unwrap();
        assert_abs_diff_eq!(projected.x(), 0.0);
        assert_abs_diff_eq!(projected.y(), 0.0);
    }

    #[test]
    fn known_values() {
        let projection = EqualEarth::new(Datum::new(1.0));
        let p = projection.project(&lonlat!(180.0, 0.0)).unwrap();
        assert_abs_diff_eq!(p.x(), 2.7066299836960748, epsilon = 1e-9);
        let p = projection.project(&lonlat!(0.0, 90.0)).unwrap();
        assert_abs_diff_eq!(p.y(), 1.3173627591574133, epsilon = 1e-9);
    }

    #[test]
    fn round_trip() {
        let projection = EqualEarth::default();
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
}
