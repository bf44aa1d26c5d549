use ixmaps_types::Feature;
use serde_json::Value;

use super::result::ValidationResult;
use super::NO_GEOMETRY;

/// Checks that a longitude/latitude pair is a usable WGS84 coordinate.
pub fn validate_coordinates(lon: f64, lat: f64) -> ValidationResult {
    if lon.is_nan() || lat.is_nan() {
        return ValidationResult::fail("Coordinates must not be NaN");
    }

    if lon.is_infinite() || lat.is_infinite() {
        return ValidationResult::fail("Coordinates must be finite");
    }

    if !(-180.0..=180.0).contains(&lon) {
        return ValidationResult::fail(format!(
            "Longitude {lon} is outside the valid range [-180, 180]"
        ));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return ValidationResult::fail(format!(
            "Latitude {lat} is outside the valid range [-90, 90]"
        ));
    }

    ValidationResult::ok()
}

/// Same as [`validate_coordinates`] for untyped JSON input.
pub fn validate_coordinate_values(lon: &Value, lat: &Value) -> ValidationResult {
    match (lon.as_f64(), lat.as_f64()) {
        (Some(lon), Some(lat)) => validate_coordinates(lon, lat),
        _ => ValidationResult::fail("Coordinates must be numbers"),
    }
}

/// Checks every coordinate of the feature, reporting the first invalid one.
pub fn validate_feature_coordinates(feature: &Feature) -> ValidationResult {
    let Some(geometry) = &feature.geometry else {
        return ValidationResult::fail(NO_GEOMETRY);
    };

    let mut result = ValidationResult::ok();
    let mut index = 0;
    geometry.for_each_position(&mut |p| {
        if result.valid {
            let check = validate_coordinates(p.x, p.y);
            if let Some(error) = check.error {
                result = ValidationResult::fail(format!("Vertex {index}: {error}"));
            }
        }
        index += 1;
    });

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use ixmaps_types::{Geometry, Position};
    use serde_json::json;

    #[test]
    fn each_failure_has_its_own_message() {
        let messages: Vec<_> = [
            validate_coordinate_values(&json!("10"), &json!(5)),
            validate_coordinates(f64::NAN, 5.0),
            validate_coordinates(f64::INFINITY, 5.0),
            validate_coordinates(181.0, 5.0),
            validate_coordinates(10.0, -91.0),
        ]
        .into_iter()
        .map(|r| {
            assert!(!r.valid);
            r.error.unwrap()
        })
        .collect();

        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn accepts_valid_coordinates() {
        assert!(validate_coordinates(-180.0, 90.0).valid);
        assert!(validate_coordinate_values(&json!(12.5), &json!(-4)).valid);
    }

    #[test]
    fn reports_first_bad_vertex() {
        let feature = ixmaps_types::Feature::new(Geometry::LineString(vec![
            Position { x: 0.0, y: 0.0 },
            Position { x: 0.0, y: 95.0 },
            Position { x: 500.0, y: 0.0 },
        ]));

        let result = validate_feature_coordinates(&feature);
        assert!(!result.valid);
        assert!(result.error.unwrap().starts_with("Vertex 1: Latitude 95"));
    }

    #[test]
    fn missing_geometry_is_invalid() {
        assert!(!validate_feature_coordinates(&Feature::default()).valid);
    }
}
