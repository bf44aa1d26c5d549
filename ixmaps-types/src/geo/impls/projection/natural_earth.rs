use std::f64::consts::PI;

use crate::cartesian::Point2d;
use crate::geo::datum::Datum;
use crate::geo::impls::point::GeoPoint2d;
use crate::geo::traits::point::{GeoPoint, NewGeoPoint};
use crate::geo::traits::projection::Projection;

use super::finite_point;

const MAX_ITERATIONS: usize = 25;
const EPSILON: f64 = 1e-12;

/// Natural Earth projection (Šavrič et al., 2011), polynomial form.
#[derive(Debug, Copy, Clone)]
pub struct NaturalEarth {
    datum: Datum,
}

impl NaturalEarth {
    /// Creates a new instance.
    pub fn new(datum: Datum) -> Self {
        Self { datum }
    }
}

impl Default for NaturalEarth {
    fn default() -> Self {
        Self::new(Datum::WGS84)
    }
}

fn x_scale(phi: f64) -> f64 {
    let phi2 = phi * phi;
    let phi4 = phi2 * phi2;
    0.8707 - 0.131979 * phi2 + phi4 * (-0.013791 + phi4 * (0.003971 * phi2 - 0.001529 * phi4))
}

fn y_poly(phi: f64) -> f64 {
    let phi2 = phi * phi;
    let phi4 = phi2 * phi2;
    phi * (1.007226 + phi2 * (0.015085 + phi4 * (-0.044475 + 0.028874 * phi2 - 0.005916 * phi4)))
}

fn y_poly_derivative(phi: f64) -> f64 {
    let phi2 = phi * phi;
    let phi4 = phi2 * phi2;
    1.007226
        + phi2
            * (0.015085 * 3.0
                + phi4 * (-0.044475 * 7.0 + 0.028874 * 9.0 * phi2 - 0.005916 * 11.0 * phi4))
}

impl Projection for NaturalEarth {
    type InPoint = GeoPoint2d;
    type OutPoint = Point2d;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        let phi = input.lat_rad();
        let r = self.datum.semimajor();

        finite_point(r * input.lon_rad() * x_scale(phi), r * y_poly(phi))
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        let r = self.datum.semimajor();
        let x = input.x() / r;
        let y = input.y() / r;

        let mut phi = y;
        for _ in 0..MAX_ITERATIONS {
            let delta = (y_poly(phi) - y) / y_poly_derivative(phi);
            phi -= delta;
            if delta.abs() < EPSILON {
                break;
            }
        }

        let lambda = x / x_scale(phi);
        if !lambda.is_finite()
            || !phi.is_finite()
            || lambda.abs() > PI + EPSILON
            || phi.abs() > PI / 2.0 + EPSILON
        {
            return None;
        }

        Some(GeoPoint2d::latlon(phi.to_degrees(), lambda.to_degrees()))
    }
}
