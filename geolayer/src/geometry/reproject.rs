//! Coordinate reprojection between Web Mercator and WGS84.
//!
//! The pipeline only ever moves between EPSG:3857 (Web Mercator, meters) and
//! EPSG:4326 (WGS84, degrees), so the transform is the closed-form spherical
//! Mercator formula rather than a full projection library. Coordinates are
//! always interpreted as (x = easting/longitude, y = northing/latitude),
//! regardless of the EPSG definition's native axis order; EPSG:4326 formally
//! puts latitude first, and honoring that here would silently swap axes.

use geo::MapCoords;
use geo_types::{Coord, Geometry};

/// EPSG code for Web Mercator (Google Maps, OpenStreetMap, web tiles).
pub const EPSG_WEB_MERCATOR: u32 = 3857;

/// EPSG code for WGS84 (GPS, navigation).
pub const EPSG_WGS84: u32 = 4326;

/// Spherical earth radius used by Web Mercator, in meters.
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Error type for coordinate-system configuration.
///
/// `Display` and `Error` are implemented by hand because the `source` field
/// is an EPSG code, not a cause, and `thiserror` would otherwise treat a
/// field with that name as the error's `source()`.
#[derive(Debug)]
pub enum CrsError {
    UnsupportedCrs { source: u32, target: u32 },
}

impl std::fmt::Display for CrsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrsError::UnsupportedCrs { source, target } => write!(
                f,
                "no transform for EPSG:{source} -> EPSG:{target} (supported: {m} <-> {w})",
                m = EPSG_WEB_MERCATOR,
                w = EPSG_WGS84
            ),
        }
    }
}

impl std::error::Error for CrsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transform {
    Identity,
    MercatorToWgs84,
    Wgs84ToMercator,
}

/// Stateless coordinate transform for one fixed (source, target) CRS pair.
///
/// Built once at startup; an unsupported pair is a configuration error, not
/// a per-feature condition.
#[derive(Debug, Clone, Copy)]
pub struct Reprojector {
    source: u32,
    target: u32,
    transform: Transform,
}

impl Reprojector {
    /// Creates a reprojector for the given EPSG pair.
    ///
    /// # Errors
    ///
    /// Returns [`CrsError::UnsupportedCrs`] unless the pair is
    /// 3857 -> 4326, 4326 -> 3857, or two equal codes (identity).
    pub fn new(source: u32, target: u32) -> Result<Self, CrsError> {
        let transform = match (source, target) {
            (s, t) if s == t => Transform::Identity,
            (EPSG_WEB_MERCATOR, EPSG_WGS84) => Transform::MercatorToWgs84,
            (EPSG_WGS84, EPSG_WEB_MERCATOR) => Transform::Wgs84ToMercator,
            _ => return Err(CrsError::UnsupportedCrs { source, target }),
        };
        Ok(Reprojector {
            source,
            target,
            transform,
        })
    }

    /// Source EPSG code.
    pub fn source(&self) -> u32 {
        self.source
    }

    /// Target EPSG code.
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Transforms every coordinate of every part of the geometry,
    /// preserving topology and point order.
    pub fn reproject(&self, geometry: Geometry<f64>) -> Geometry<f64> {
        match self.transform {
            Transform::Identity => geometry,
            Transform::MercatorToWgs84 => geometry.map_coords(mercator_to_wgs84),
            Transform::Wgs84ToMercator => geometry.map_coords(wgs84_to_mercator),
        }
    }
}

fn mercator_to_wgs84(coord: Coord<f64>) -> Coord<f64> {
    let lon = (coord.x / EARTH_RADIUS_M).to_degrees();
    let lat = (2.0 * (coord.y / EARTH_RADIUS_M).exp().atan() - std::f64::consts::FRAC_PI_2)
        .to_degrees();
    Coord { x: lon, y: lat }
}

fn wgs84_to_mercator(coord: Coord<f64>) -> Coord<f64> {
    let x = EARTH_RADIUS_M * coord.x.to_radians();
    let y = EARTH_RADIUS_M * coord.y.to_radians().tan().asinh();
    Coord { x, y }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{LineString, Point, Polygon};

    #[test]
    fn test_equator_origin_maps_to_zero() {
        let reprojector = Reprojector::new(EPSG_WEB_MERCATOR, EPSG_WGS84).unwrap();
        let result = reprojector.reproject(Geometry::Point(Point::new(0.0, 0.0)));
        match result {
            Geometry::Point(p) => {
                assert!(p.x().abs() < 1e-9, "longitude should be 0, got {}", p.x());
                assert!(p.y().abs() < 1e-9, "latitude should be 0, got {}", p.y());
            }
            other => panic!("expected point, got {:?}", other),
        }
    }

    #[test]
    fn test_known_moscow_coordinates() {
        // Moscow in Web Mercator is roughly (4187591, 7509137)
        let reprojector = Reprojector::new(EPSG_WEB_MERCATOR, EPSG_WGS84).unwrap();
        let result = reprojector.reproject(Geometry::Point(Point::new(4_187_591.9, 7_509_137.5)));
        match result {
            Geometry::Point(p) => {
                assert!((p.x() - 37.6173).abs() < 0.01, "longitude {}", p.x());
                assert!((p.y() - 55.7558).abs() < 0.01, "latitude {}", p.y());
            }
            other => panic!("expected point, got {:?}", other),
        }
    }

    #[test]
    fn test_roundtrip_within_tolerance() {
        let forward = Reprojector::new(EPSG_WEB_MERCATOR, EPSG_WGS84).unwrap();
        let back = Reprojector::new(EPSG_WGS84, EPSG_WEB_MERCATOR).unwrap();

        let original = Point::new(4_187_591.9, 7_509_137.5);
        let there = forward.reproject(Geometry::Point(original));
        let and_back = back.reproject(there);

        match and_back {
            Geometry::Point(p) => {
                // Sub-meter tolerance after a full roundtrip
                assert!((p.x() - original.x()).abs() < 1e-6);
                assert!((p.y() - original.y()).abs() < 1e-6);
            }
            other => panic!("expected point, got {:?}", other),
        }
    }

    #[test]
    fn test_identity_pair_passes_through() {
        let reprojector = Reprojector::new(EPSG_WGS84, EPSG_WGS84).unwrap();
        let geometry = Geometry::Point(Point::new(37.6, 55.7));
        match reprojector.reproject(geometry) {
            Geometry::Point(p) => {
                assert_eq!(p.x(), 37.6);
                assert_eq!(p.y(), 55.7);
            }
            other => panic!("expected point, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_pair_is_configuration_error() {
        let result = Reprojector::new(3857, 2154);
        assert!(matches!(
            result,
            Err(CrsError::UnsupportedCrs {
                source: 3857,
                target: 2154
            })
        ));
    }

    #[test]
    fn test_polygon_parts_all_transformed() {
        let reprojector = Reprojector::new(EPSG_WGS84, EPSG_WEB_MERCATOR).unwrap();
        let polygon = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]),
            vec![],
        );
        match reprojector.reproject(Geometry::Polygon(polygon)) {
            Geometry::Polygon(p) => {
                let exterior: Vec<_> = p.exterior().coords().collect();
                assert_eq!(exterior.len(), 4, "ring length preserved");
                assert!((exterior[1].x - 111_319.49).abs() < 1.0, "1 degree lon is ~111.3 km");
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }
}
