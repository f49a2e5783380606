//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

use super::{
    DEFAULT_ATTRIBUTE_FALLBACK_COUNT, DEFAULT_OUTPUT_DIRECTORY, DEFAULT_SOURCE_EPSG,
    DEFAULT_TARGET_EPSG,
};

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    /// Coordinate reference system settings
    pub crs: CrsSettings,
    /// Tuple decoding settings
    pub decode: DecodeSettings,
    /// Output settings
    pub output: OutputSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Coordinate reference system configuration.
#[derive(Debug, Clone)]
pub struct CrsSettings {
    /// Whether geometries are reprojected at all. When false, coordinates
    /// pass through bit-identical in the source CRS.
    pub reproject: bool,
    /// EPSG code geometries arrive in (default: 3857, Web Mercator)
    pub source_epsg: u32,
    /// EPSG code geometries are emitted in (default: 4326, WGS84)
    pub target_epsg: u32,
}

/// Tuple decoding configuration.
#[derive(Debug, Clone)]
pub struct DecodeSettings {
    /// Number of synthesized `property_N` names available to layers whose
    /// attribute schema was never discovered. Tuples wider than this fail
    /// the cycle loudly rather than truncate.
    pub attribute_fallback_count: usize,
}

/// Output configuration.
#[derive(Debug, Clone)]
pub struct OutputSettings {
    /// Root directory for per-region GeoJSON output
    pub directory: PathBuf,
    /// Also write per-region and corpus-wide merged.geojson files
    pub merged_files: bool,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}

impl Default for ConfigFile {
    fn default() -> Self {
        ConfigFile {
            crs: CrsSettings {
                reproject: true,
                source_epsg: DEFAULT_SOURCE_EPSG,
                target_epsg: DEFAULT_TARGET_EPSG,
            },
            decode: DecodeSettings {
                attribute_fallback_count: DEFAULT_ATTRIBUTE_FALLBACK_COUNT,
            },
            output: OutputSettings {
                directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
                merged_files: false,
            },
            logging: LoggingSettings {
                file: PathBuf::from("logs/geolayer.log"),
            },
        }
    }
}
