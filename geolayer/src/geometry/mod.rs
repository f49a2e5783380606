//! Geometry conversion between GeoJSON-shaped JSON objects and `geo-types`.
//!
//! Embedded geometries arrive inside value tuples as plain JSON objects with
//! `type` and `coordinates` fields. Conversion is strict: a missing or
//! malformed field is an error, which callers treat as grounds to drop the
//! whole feature rather than emit a partial one.

pub mod reproject;

use geo_types::{
    Coord, Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
use serde_json::{json, Value};

/// Error type for geometry conversion.
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("geometry object has no 'type' field")]
    MissingType,
    #[error("unsupported geometry type '{0}'")]
    UnsupportedType(String),
    #[error("geometry object has no 'coordinates' field")]
    MissingCoordinates,
    #[error("malformed {kind} coordinates: {reason}")]
    MalformedCoordinates { kind: &'static str, reason: String },
}

fn malformed(kind: &'static str, reason: impl Into<String>) -> GeometryError {
    GeometryError::MalformedCoordinates {
        kind,
        reason: reason.into(),
    }
}

/// Builds a `geo-types` geometry from a GeoJSON-shaped JSON object.
///
/// Supports the six concrete GeoJSON geometry types. Coordinates beyond the
/// first two positions (elevation etc.) are discarded.
pub fn from_value(value: &Value) -> Result<Geometry<f64>, GeometryError> {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(GeometryError::MissingType)?;
    let coordinates = value
        .get("coordinates")
        .ok_or(GeometryError::MissingCoordinates)?;

    match kind {
        "Point" => Ok(Geometry::Point(Point(parse_position(
            coordinates,
            "Point",
        )?))),
        "MultiPoint" => {
            let points = parse_line(coordinates, "MultiPoint")?
                .into_iter()
                .map(Point)
                .collect();
            Ok(Geometry::MultiPoint(MultiPoint(points)))
        }
        "LineString" => Ok(Geometry::LineString(LineString(parse_line(
            coordinates,
            "LineString",
        )?))),
        "MultiLineString" => {
            let lines = as_array(coordinates, "MultiLineString")?
                .iter()
                .map(|line| parse_line(line, "MultiLineString").map(LineString))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Geometry::MultiLineString(MultiLineString(lines)))
        }
        "Polygon" => Ok(Geometry::Polygon(parse_polygon(coordinates)?)),
        "MultiPolygon" => {
            let polygons = as_array(coordinates, "MultiPolygon")?
                .iter()
                .map(parse_polygon)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Geometry::MultiPolygon(MultiPolygon(polygons)))
        }
        other => Err(GeometryError::UnsupportedType(other.to_string())),
    }
}

/// Serializes a geometry back into a GeoJSON-shaped JSON object.
pub fn to_value(geometry: &Geometry<f64>) -> Value {
    match geometry {
        Geometry::Point(p) => json!({"type": "Point", "coordinates": position(p.0)}),
        Geometry::MultiPoint(mp) => json!({
            "type": "MultiPoint",
            "coordinates": mp.0.iter().map(|p| position(p.0)).collect::<Vec<_>>(),
        }),
        Geometry::Line(l) => json!({
            "type": "LineString",
            "coordinates": [position(l.start), position(l.end)],
        }),
        Geometry::LineString(ls) => json!({"type": "LineString", "coordinates": line(ls)}),
        Geometry::MultiLineString(mls) => json!({
            "type": "MultiLineString",
            "coordinates": mls.0.iter().map(line).collect::<Vec<_>>(),
        }),
        Geometry::Polygon(p) => json!({"type": "Polygon", "coordinates": rings(p)}),
        Geometry::MultiPolygon(mp) => json!({
            "type": "MultiPolygon",
            "coordinates": mp.0.iter().map(rings).collect::<Vec<_>>(),
        }),
        Geometry::Rect(r) => to_value(&Geometry::Polygon(r.to_polygon())),
        Geometry::Triangle(t) => to_value(&Geometry::Polygon(t.to_polygon())),
        Geometry::GeometryCollection(gc) => json!({
            "type": "GeometryCollection",
            "geometries": gc.0.iter().map(to_value).collect::<Vec<_>>(),
        }),
    }
}

fn position(coord: Coord<f64>) -> Value {
    json!([coord.x, coord.y])
}

fn line(ls: &LineString<f64>) -> Vec<Value> {
    ls.0.iter().map(|c| position(*c)).collect()
}

fn rings(polygon: &Polygon<f64>) -> Vec<Vec<Value>> {
    let mut out = vec![line(polygon.exterior())];
    out.extend(polygon.interiors().iter().map(line));
    out
}

fn as_array<'a>(value: &'a Value, kind: &'static str) -> Result<&'a Vec<Value>, GeometryError> {
    value
        .as_array()
        .ok_or_else(|| malformed(kind, "expected an array"))
}

fn parse_position(value: &Value, kind: &'static str) -> Result<Coord<f64>, GeometryError> {
    let parts = as_array(value, kind)?;
    if parts.len() < 2 {
        return Err(malformed(kind, "position needs at least two numbers"));
    }
    let x = parts[0]
        .as_f64()
        .ok_or_else(|| malformed(kind, "x is not a number"))?;
    let y = parts[1]
        .as_f64()
        .ok_or_else(|| malformed(kind, "y is not a number"))?;
    Ok(Coord { x, y })
}

fn parse_line(value: &Value, kind: &'static str) -> Result<Vec<Coord<f64>>, GeometryError> {
    as_array(value, kind)?
        .iter()
        .map(|p| parse_position(p, kind))
        .collect()
}

fn parse_polygon(value: &Value) -> Result<Polygon<f64>, GeometryError> {
    let rings = as_array(value, "Polygon")?;
    let mut exterior = None;
    let mut interiors = Vec::new();
    for ring in rings {
        let coords = parse_line(ring, "Polygon")?;
        if exterior.is_none() {
            exterior = Some(LineString(coords));
        } else {
            interiors.push(LineString(coords));
        }
    }
    let exterior = exterior.ok_or_else(|| malformed("Polygon", "no exterior ring"))?;
    Ok(Polygon::new(exterior, interiors))
}
