use ixmaps_types::Feature;
use log::warn;
use serde_json::Value;

use super::relate;
use super::result::OverlapResult;

/// Human-readable identifier of a feature: its id, or the `id` or `name` property, or its position in the list.
pub(crate) fn feature_label(feature: &Feature, index: usize) -> String {
    if let Some(id) = &feature.id {
        return id.to_string();
    }

    for key in ["id", "name"] {
        match feature.property(key) {
            Some(Value::String(s)) => return s.clone(),
            Some(Value::Number(n)) => return n.to_string(),
            _ => {}
        }
    }

    format!("feature {index}")
}

/// Checks that the candidate does not overlap any of the existing features.
///
/// Features that cannot be compared with the candidate are logged and skipped.
pub fn validate_overlap(candidate: &Feature, existing: &[Feature]) -> OverlapResult {
    if let Err(err) = relate::areal(candidate) {
        return OverlapResult {
            valid: false,
            error: Some(format!("Overlap could not be checked: {err}")),
            overlaps: vec![],
        };
    }

    let mut overlaps = vec![];
    for (index, other) in existing.iter().enumerate() {
        match relate::interiors_intersect(candidate, other) {
            Ok(true) => overlaps.push(feature_label(other, index)),
            Ok(false) => {}
            Err(err) => warn!(
                "Skipping overlap check against {}: {err}",
                feature_label(other, index)
            ),
        }
    }

    if overlaps.is_empty() {
        OverlapResult {
            valid: true,
            error: None,
            overlaps,
        }
    } else {
        OverlapResult {
            valid: false,
            error: Some(format!(
                "Geometry overlaps with {} existing feature(s): {}",
                overlaps.len(),
                overlaps.join(", ")
            )),
            overlaps,
        }
    }
}
