//! Conversion between [`geojson`] values and the typed model.
//!
//! This is the only place where external geometry data is checked for shape. After conversion the rest of the
//! pipeline works with [`Geometry`], [`Feature`] and [`FeatureCollection`].

use std::str::FromStr;
use std::sync::Arc;

use geojson::{GeoJson, LineStringType, PolygonType, Value};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::GeometryError;
use crate::geometry::{Feature, FeatureCollection, FeatureId, Geometry, Position};

const GEOMETRY_TYPES: [&str; 7] = [
    "Point",
    "MultiPoint",
    "LineString",
    "MultiLineString",
    "Polygon",
    "MultiPolygon",
    "GeometryCollection",
];

impl Geometry {
    /// Builds a geometry from an untyped JSON object, naming the tag if it is not a GeoJSON geometry type.
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self, GeometryError> {
        let tag = value
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| GeometryError::Conversion("geometry has no `type` member".into()))?;

        if !GEOMETRY_TYPES.contains(&tag) {
            return Err(GeometryError::UnsupportedGeometryType(tag.to_string()));
        }

        let geometry = geojson::Geometry::from_json_value(value.clone()).map_err(parse_error)?;
        Self::try_from(&geometry)
    }
}

/// Reports malformed positions found by the parser the same way as positions rejected by the conversion.
fn parse_error(err: geojson::Error) -> GeometryError {
    match err {
        geojson::Error::PositionTooShort(len) => GeometryError::InvalidPosition(format!(
            "position must contain at least 2 dimensions, got {len}"
        )),
        geojson::Error::ExpectedF64Value => {
            GeometryError::InvalidPosition("position members must be numbers".into())
        }
        err => GeometryError::Parse(err),
    }
}

impl TryFrom<&geojson::Geometry> for Geometry {
    type Error = GeometryError;

    fn try_from(value: &geojson::Geometry) -> Result<Self, Self::Error> {
        Ok(match &value.value {
            Value::Point(p) => Geometry::Point(convert_position(p)?),
            Value::MultiPoint(points) => Geometry::MultiPoint(convert_line(points)?),
            Value::LineString(points) => Geometry::LineString(convert_line(points)?),
            Value::MultiLineString(lines) => Geometry::MultiLineString(convert_rings(lines)?),
            Value::Polygon(polygon) => Geometry::Polygon(convert_rings(polygon)?),
            Value::MultiPolygon(mp) => Geometry::MultiPolygon(
                mp.iter()
                    .map(|p| convert_rings(p))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Value::GeometryCollection(geometries) => Geometry::GeometryCollection(
                geometries
                    .iter()
                    .map(Geometry::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        })
    }
}

fn convert_position(position: &[f64]) -> Result<Position, GeometryError> {
    if position.len() < 2 {
        return Err(GeometryError::InvalidPosition(format!(
            "position must contain at least 2 dimensions, got {}",
            position.len()
        )));
    }

    Ok(Position {
        x: position[0],
        y: position[1],
    })
}

fn convert_line(line: &LineStringType) -> Result<Vec<Position>, GeometryError> {
    line.iter().map(|p| convert_position(p)).collect()
}

fn convert_rings(rings: &PolygonType) -> Result<Vec<Vec<Position>>, GeometryError> {
    rings.iter().map(convert_line).collect()
}

impl From<&Geometry> for geojson::Geometry {
    fn from(value: &Geometry) -> Self {
        fn line(points: &[Position]) -> LineStringType {
            points.iter().map(|p| vec![p.x, p.y]).collect()
        }

        fn rings(rings: &[Vec<Position>]) -> PolygonType {
            rings.iter().map(|r| line(r)).collect()
        }

        let value = match value {
            Geometry::Point(p) => Value::Point(vec![p.x, p.y]),
            Geometry::MultiPoint(points) => Value::MultiPoint(line(points)),
            Geometry::LineString(points) => Value::LineString(line(points)),
            Geometry::MultiLineString(lines) => Value::MultiLineString(rings(lines)),
            Geometry::Polygon(polygon) => Value::Polygon(rings(polygon)),
            Geometry::MultiPolygon(mp) => Value::MultiPolygon(mp.iter().map(|p| rings(p)).collect()),
            Geometry::GeometryCollection(geometries) => Value::GeometryCollection(
                geometries.iter().map(geojson::Geometry::from).collect(),
            ),
        };

        geojson::Geometry::new(value)
    }
}

impl TryFrom<geojson::Feature> for Feature {
    type Error = GeometryError;

    fn try_from(value: geojson::Feature) -> Result<Self, Self::Error> {
        let geometry = value.geometry.as_ref().map(Geometry::try_from).transpose()?;
        let id = value.id.map(|id| match id {
            geojson::feature::Id::String(v) => FeatureId::String(v),
            geojson::feature::Id::Number(v) => FeatureId::Number(v),
        });

        Ok(Self {
            id,
            geometry,
            properties: value.properties.map(Arc::new),
        })
    }
}

impl From<&Feature> for geojson::Feature {
    fn from(value: &Feature) -> Self {
        geojson::Feature {
            bbox: None,
            geometry: value.geometry.as_ref().map(geojson::Geometry::from),
            id: value.id.as_ref().map(|id| match id {
                FeatureId::String(v) => geojson::feature::Id::String(v.clone()),
                FeatureId::Number(v) => geojson::feature::Id::Number(v.clone()),
            }),
            properties: value.properties.as_ref().map(|p| p.as_ref().clone()),
            foreign_members: None,
        }
    }
}

impl TryFrom<geojson::FeatureCollection> for FeatureCollection {
    type Error = GeometryError;

    fn try_from(value: geojson::FeatureCollection) -> Result<Self, Self::Error> {
        value
            .features
            .into_iter()
            .map(Feature::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(FeatureCollection::new)
    }
}

impl From<&FeatureCollection> for geojson::FeatureCollection {
    fn from(value: &FeatureCollection) -> Self {
        geojson::FeatureCollection {
            bbox: None,
            features: value.features.iter().map(geojson::Feature::from).collect(),
            foreign_members: None,
        }
    }
}

impl TryFrom<GeoJson> for FeatureCollection {
    type Error = GeometryError;

    /// A single feature or a bare geometry are wrapped into a one-element collection.
    fn try_from(value: GeoJson) -> Result<Self, Self::Error> {
        match value {
            GeoJson::FeatureCollection(fc) => FeatureCollection::try_from(fc),
            GeoJson::Feature(f) => Ok(FeatureCollection::new(vec![Feature::try_from(f)?])),
            GeoJson::Geometry(g) => Ok(FeatureCollection::new(vec![Feature::new(
                Geometry::try_from(&g)?,
            )])),
        }
    }
}

impl FromStr for FeatureCollection {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let geojson = GeoJson::from_str(s).map_err(parse_error)?;
        FeatureCollection::try_from(geojson)
    }
}

impl FeatureCollection {
    /// Serializes the collection into a GeoJSON string.
    pub fn to_geojson_string(&self) -> String {
        GeoJson::FeatureCollection(self.into()).to_string()
    }
}

impl Serialize for FeatureCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        geojson::FeatureCollection::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FeatureCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = geojson::FeatureCollection::deserialize(deserializer)?;
        FeatureCollection::try_from(raw).map_err(D::Error::custom)
    }
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        geojson::Feature::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Feature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = geojson::Feature::deserialize(deserializer)?;
        Feature::try_from(raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn parses_feature_collection() {
        let source = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "id": "caph",
                    "properties": { "name": "Caphiria" },
                    "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]] }
                },
                {
                    "type": "Feature",
                    "properties": null,
                    "geometry": { "type": "Point", "coordinates": [10.5, 20.25, 100.0] }
                }
            ]
        }"#;

        let collection: FeatureCollection = source.parse().unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.features[0].id, Some(FeatureId::from("caph")));
        assert_eq!(
            collection.features[0].property("name"),
            Some(&json!("Caphiria"))
        );
        assert_eq!(
            collection.features[1].geometry,
            Some(Geometry::Point(Position { x: 10.5, y: 20.25 }))
        );
    }

    #[test]
    fn keeps_unclosed_rings() {
        let value = json!({ "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1]]] });
        let geometry = Geometry::from_json_value(&value).unwrap();
        let Geometry::Polygon(rings) = geometry else {
            panic!("expected polygon");
        };
        assert_eq!(rings[0].len(), 3);
    }

    #[test]
    fn names_unsupported_tag() {
        let value = json!({ "type": "Circle", "coordinates": [0, 0], "radius": 5 });
        assert_matches!(
            Geometry::from_json_value(&value),
            Err(GeometryError::UnsupportedGeometryType(tag)) if tag == "Circle"
        );
    }

    #[test]
    fn rejects_short_positions() {
        let value = json!({ "type": "LineString", "coordinates": [[0, 0], [1]] });
        assert_matches!(
            Geometry::from_json_value(&value),
            Err(GeometryError::InvalidPosition(_))
        );
    }

    #[test]
    fn rejects_short_positions_in_documents() {
        let input = r#"{ "type": "Feature", "properties": {}, "geometry": { "type": "Point", "coordinates": [12] } }"#;
        assert_matches!(
            input.parse::<FeatureCollection>(),
            Err(GeometryError::InvalidPosition(_))
        );
    }

    #[test]
    fn rejects_short_positions_in_geojson_values() {
        let geometry = geojson::Geometry::new(Value::Point(vec![1.0]));
        assert_matches!(
            Geometry::try_from(&geometry),
            Err(GeometryError::InvalidPosition(_))
        );
    }

    #[test]
    fn serializes_back_to_geojson() {
        let collection = FeatureCollection::new(vec![Feature::new(Geometry::LineString(vec![
            Position { x: 1.0, y: 2.0 },
            Position { x: 3.0, y: 4.0 },
        ]))
        .with_id("river")]);

        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value["type"], json!("FeatureCollection"));
        assert_eq!(value["features"][0]["id"], json!("river"));
        assert_eq!(
            value["features"][0]["geometry"]["coordinates"],
            json!([[1.0, 2.0], [3.0, 4.0]])
        );

        let parsed: FeatureCollection = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, collection);
    }
}
