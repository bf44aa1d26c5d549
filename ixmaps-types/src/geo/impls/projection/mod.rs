//! Implementations of the supported map projections.
mod equal_earth;
mod ixmaps;
mod natural_earth;

pub use equal_earth::EqualEarth;
pub use ixmaps::IxMapsProjection;
pub use natural_earth::NaturalEarth;

/// Builds the output point, rejecting non-finite results.
fn finite_point(x: f64, y: f64) -> Option<crate::cartesian::Point2d> {
    if x.is_finite() && y.is_finite() {
        Some(crate::cartesian::Point2d::new(x, y))
    } else {
        None
    }
}
