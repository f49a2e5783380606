//! Configuration for the reconstruction pipeline.
//!
//! Settings load from `~/.geolayer/config.ini`, overlaying defaults with
//! whatever the file provides. Settings structs live in [`settings`],
//! loading and the error type in [`file`], INI key mapping in [`parser`].

mod file;
mod parser;
mod settings;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, CrsSettings, DecodeSettings, LoggingSettings, OutputSettings};

/// Default EPSG code documents arrive in (Web Mercator).
pub const DEFAULT_SOURCE_EPSG: u32 = crate::geometry::reproject::EPSG_WEB_MERCATOR;

/// Default EPSG code for emitted geometries (WGS84).
pub const DEFAULT_TARGET_EPSG: u32 = crate::geometry::reproject::EPSG_WGS84;

/// Default placeholder attribute-name count for layers without a schema.
pub const DEFAULT_ATTRIBUTE_FALLBACK_COUNT: usize = 128;

/// Default output directory for per-region GeoJSON files.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "result";
