//! Feature model and GeoJSON (de)serialization.
//!
//! A feature pairs an optional geometry with an insertion-ordered property
//! map. Serialization targets standard GeoJSON `Feature` /
//! `FeatureCollection` objects; property order survives the roundtrip
//! because `serde_json` is built with `preserve_order`.

use geo_types::Geometry;
use serde_json::{json, Map, Value};

use crate::geometry::{self, GeometryError};

/// Error type for reading persisted feature collections.
#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    #[error("not a GeoJSON {expected} object")]
    WrongShape { expected: &'static str },
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// One reconstructed geographic object.
///
/// Immutable once built. A feature either carries a geometry in the run's
/// output CRS, or no geometry at all; partially-decoded geometries never
/// reach this type.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Option<Geometry<f64>>,
    pub properties: Map<String, Value>,
}

impl Feature {
    /// Serializes to a GeoJSON `Feature` object.
    pub fn to_value(&self) -> Value {
        json!({
            "type": "Feature",
            "geometry": self.geometry.as_ref().map(geometry::to_value),
            "properties": Value::Object(self.properties.clone()),
        })
    }

    /// Parses a GeoJSON `Feature` object.
    pub fn from_value(value: &Value) -> Result<Feature, FeatureError> {
        let object = value
            .as_object()
            .filter(|o| o.get("type").and_then(Value::as_str) == Some("Feature"))
            .ok_or(FeatureError::WrongShape {
                expected: "Feature",
            })?;

        let geometry = match object.get("geometry") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(geometry::from_value(raw)?),
        };
        let properties = match object.get("properties") {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };

        Ok(Feature {
            geometry,
            properties,
        })
    }
}

/// Serializes an ordered feature sequence to a GeoJSON `FeatureCollection`.
pub fn collection_to_value(features: &[Feature]) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": features.iter().map(Feature::to_value).collect::<Vec<_>>(),
    })
}

/// Parses a GeoJSON `FeatureCollection` into an ordered feature sequence.
pub fn collection_from_value(value: &Value) -> Result<Vec<Feature>, FeatureError> {
    let features = value
        .as_object()
        .filter(|o| o.get("type").and_then(Value::as_str) == Some("FeatureCollection"))
        .and_then(|o| o.get("features"))
        .and_then(Value::as_array)
        .ok_or(FeatureError::WrongShape {
            expected: "FeatureCollection",
        })?;

    features.iter().map(Feature::from_value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::Point;

    fn sample_feature() -> Feature {
        let mut properties = Map::new();
        properties.insert("zebra".to_string(), json!("first"));
        properties.insert("alpha".to_string(), json!(2));
        Feature {
            geometry: Some(Geometry::Point(Point::new(37.6, 55.7))),
            properties,
        }
    }

    #[test]
    fn test_feature_roundtrip_preserves_property_order() {
        let original = sample_feature();
        let parsed = Feature::from_value(&original.to_value()).unwrap();

        let keys: Vec<&String> = parsed.properties.keys().collect();
        assert_eq!(keys, ["zebra", "alpha"], "insertion order must survive");
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_geometryless_feature_serializes_null() {
        let feature = Feature {
            geometry: None,
            properties: Map::new(),
        };
        let value = feature.to_value();
        assert!(value["geometry"].is_null());

        let parsed = Feature::from_value(&value).unwrap();
        assert!(parsed.geometry.is_none());
    }

    #[test]
    fn test_collection_roundtrip() {
        let features = vec![sample_feature(), sample_feature()];
        let parsed = collection_from_value(&collection_to_value(&features)).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed, features);
    }

    #[test]
    fn test_wrong_shape_rejected() {
        assert!(Feature::from_value(&json!({"type": "Telemetry"})).is_err());
        assert!(collection_from_value(&json!([1, 2])).is_err());
    }
}
