//! Handling of polygons crossing the antimeridian.
//!
//! Source layers contain countries that span the 180° meridian. Renderers draw such polygons as bands wrapping
//! around the whole world, so the layers are cut into a western and an eastern part before being served.

use std::sync::Arc;

use log::debug;

use crate::geometry::{Feature, FeatureCollection, Geometry, Position};

/// Longitude beyond which a vertex is considered to be near the antimeridian.
const DATELINE_THRESHOLD: f64 = 170.0;

/// Longitude span of an outer ring above which the ring is treated as wrapping around the antimeridian.
const WRAPPING_SPAN: f64 = 350.0;
/// A half of a split ring needs more raw coordinates than this to be kept.
const MIN_HALF_LENGTH: usize = 3;

/// Property set on features produced by splitting, numbered from 1.
pub const PART_PROPERTY: &str = "_part";

/// Wraps a longitude into `[-180, 180]`. Non-finite values are returned unchanged.
pub fn normalize_longitude(lon: f64) -> f64 {
    if !lon.is_finite() || (-180.0..=180.0).contains(&lon) {
        return lon;
    }

    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && lon > 0.0 {
        180.0
    } else {
        wrapped
    }
}

/// Minimum and maximum longitude of the geometry.
pub fn longitude_span(geometry: &Geometry) -> Option<(f64, f64)> {
    geometry
        .bounding_rect()
        .map(|rect| (rect.x_min, rect.x_max))
}

/// Returns true if a polygonal geometry has vertices on both sides of the antimeridian.
pub fn crosses_dateline(geometry: &Geometry) -> bool {
    geometry.is_polygonal()
        && longitude_span(geometry)
            .is_some_and(|(min, max)| min < -DATELINE_THRESHOLD && max > DATELINE_THRESHOLD)
}

/// Splits every `MultiPolygon` feature crossing the antimeridian into separate features for the eastern
/// (`lon > 0`) and western parts.
///
/// An outer ring spanning more than 350° of longitude is partitioned by hemisphere. Halves with 3 coordinates or
/// less are discarded, the others are re-closed. Holes of split polygons are discarded. Non-crossing polygons of a crossing feature are kept as
/// separate parts. All parts copy the properties of the source feature and get [`PART_PROPERTY`] if there is more
/// than one. Other features are kept unchanged and the order of the collection is preserved.
pub fn split_dateline_features(collection: &FeatureCollection) -> FeatureCollection {
    let mut features = Vec::with_capacity(collection.len());
    let mut split_count = 0;

    for feature in &collection.features {
        let Some(Geometry::MultiPolygon(polygons)) = &feature.geometry else {
            features.push(feature.clone());
            continue;
        };

        let mut has_crossing = false;
        let mut parts = vec![];
        for polygon in polygons {
            let Some(outer) = polygon.first() else {
                continue;
            };

            let (min, max) = outer
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), p| {
                    (min.min(p.x), max.max(p.x))
                });

            if max - min > WRAPPING_SPAN {
                has_crossing = true;
                let (east, west): (Vec<Position>, Vec<Position>) =
                    outer.iter().copied().partition(|p| p.x > 0.0);
                for half in [east, west] {
                    if half.len() <= MIN_HALF_LENGTH {
                        continue;
                    }
                    if let Some(ring) = close_ring(half) {
                        parts.push(vec![vec![ring]]);
                    }
                }
            } else {
                parts.push(vec![polygon.clone()]);
            }
        }

        if !has_crossing {
            features.push(feature.clone());
            continue;
        }

        split_count += 1;
        debug!(
            "Splitting feature {:?} crossing the antimeridian into {} parts",
            feature.id,
            parts.len()
        );

        let part_count = parts.len();
        for (index, part) in parts.into_iter().enumerate() {
            let mut properties = feature.properties.clone();
            if part_count > 1 {
                let mut bag = properties.map(|p| p.as_ref().clone()).unwrap_or_default();
                bag.insert(PART_PROPERTY.to_string(), (index + 1).into());
                properties = Some(Arc::new(bag));
            }

            features.push(Feature {
                id: feature.id.clone(),
                geometry: Some(Geometry::MultiPolygon(part)),
                properties,
            });
        }
    }

    if split_count > 0 {
        debug!(
            "Split {split_count} features crossing the antimeridian, {} features in total",
            features.len()
        );
    }

    FeatureCollection::new(features)
}

fn close_ring(mut ring: Vec<Position>) -> Option<Vec<Position>> {
    if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
        if first != last {
            ring.push(*first);
        }
    }

    (ring.len() > 3).then_some(ring)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use geo_types::coord;
    use serde_json::json;

    fn ring(coords: &[(f64, f64)]) -> Vec<Position> {
        coords.iter().map(|&(x, y)| coord! { x: x, y: y }).collect()
    }

    fn fiji() -> Feature {
        Feature::new(Geometry::MultiPolygon(vec![
            vec![ring(&[
                (177.0, -16.0),
                (179.5, -16.0),
                (179.8, -17.0),
                (-179.8, -17.0),
                (-179.5, -16.5),
                (-179.9, -16.0),
                (177.0, -16.0),
            ])],
            vec![ring(&[
                (178.0, -18.0),
                (179.0, -18.0),
                (179.0, -19.0),
                (178.0, -18.0),
            ])],
        ]))
        .with_id("fiji")
        .with_properties(json!({ "name": "Fiji" }).as_object().unwrap().clone())
    }

    #[test]
    fn normalizes_longitudes() {
        assert_abs_diff_eq!(normalize_longitude(190.0), -170.0);
        assert_abs_diff_eq!(normalize_longitude(-190.0), 170.0);
        assert_abs_diff_eq!(normalize_longitude(540.0), 180.0);
        assert_abs_diff_eq!(normalize_longitude(-180.0), -180.0);
        assert_abs_diff_eq!(normalize_longitude(45.0), 45.0);
    }

    #[test]
    fn detects_crossing() {
        assert!(crosses_dateline(fiji().geometry.as_ref().unwrap()));
        assert!(!crosses_dateline(&Geometry::LineString(ring(&[
            (-179.0, 0.0),
            (179.0, 0.0)
        ]))));
    }

    #[test]
    fn splits_crossing_features() {
        let collection = FeatureCollection::new(vec![
            Feature::new(Geometry::Point(coord! { x: 0.0, y: 0.0 })),
            fiji(),
        ]);

        let split = split_dateline_features(&collection);

        // point, eastern half, untouched second polygon; the western half has only 3 coordinates
        assert_eq!(split.len(), 3);
        assert_eq!(split.features[0], collection.features[0]);

        let parts = &split.features[1..];
        for (index, part) in parts.iter().enumerate() {
            assert_eq!(part.id, fiji().id);
            assert_eq!(part.property("name"), Some(&json!("Fiji")));
            assert_eq!(part.property(PART_PROPERTY), Some(&json!(index + 1)));

            let geometry = part.geometry.as_ref().unwrap();
            let (min, max) = longitude_span(geometry).unwrap();
            assert!(max - min < 180.0, "part {index} still wraps around the world");
        }

        let Some(Geometry::MultiPolygon(east)) = &parts[0].geometry else {
            panic!("expected multipolygon");
        };
        let east_ring = &east[0][0];
        assert_eq!(east_ring.first(), east_ring.last());
        assert!(east_ring.iter().all(|p| p.x > 0.0));
    }

    #[test]
    fn keeps_both_halves_with_enough_vertices() {
        let feature = Feature::new(Geometry::MultiPolygon(vec![vec![ring(&[
            (175.0, 10.0),
            (179.0, 10.0),
            (179.0, 12.0),
            (-179.0, 12.0),
            (-176.0, 12.0),
            (-176.0, 10.0),
            (-179.0, 10.0),
            (175.0, 10.0),
        ])]]));

        let split = split_dateline_features(&FeatureCollection::new(vec![feature]));
        assert_eq!(split.len(), 2);

        let Some(Geometry::MultiPolygon(west)) = &split.features[1].geometry else {
            panic!("expected multipolygon");
        };
        let west_ring = &west[0][0];
        assert_eq!(west_ring.len(), 5);
        assert_eq!(west_ring.first(), west_ring.last());
        assert!(west_ring.iter().all(|p| p.x < 0.0));
    }

    #[test]
    fn narrow_span_is_not_split() {
        let feature = Feature::new(Geometry::MultiPolygon(vec![vec![ring(&[
            (175.0, 0.0),
            (178.0, 0.0),
            (-175.0, 1.0),
            (-175.0, 2.0),
            (175.0, 0.0),
        ])]]));
        let collection = FeatureCollection::new(vec![feature]);
        assert_eq!(split_dateline_features(&collection), collection);
    }

    #[test]
    fn keeps_non_crossing_features() {
        let feature = Feature::new(Geometry::MultiPolygon(vec![vec![ring(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 0.0),
        ])]]));
        let collection = FeatureCollection::new(vec![feature]);
        assert_eq!(split_dateline_features(&collection), collection);
    }
}
