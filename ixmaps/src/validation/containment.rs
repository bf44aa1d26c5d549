use ixmaps_types::Feature;
use log::warn;

use super::relate;
use super::result::ValidationResult;

/// Checks that the candidate lies completely inside the boundary.
pub fn validate_boundary_containment(candidate: &Feature, boundary: &Feature) -> ValidationResult {
    match relate::contains(boundary, candidate) {
        Ok(true) => ValidationResult::ok(),
        Ok(false) => ValidationResult::fail("Geometry extends outside boundaries"),
        Err(err) => {
            warn!("Failed to check boundary containment: {err}");
            ValidationResult::fail(format!("Boundary containment could not be checked: {err}"))
        }
    }
}
