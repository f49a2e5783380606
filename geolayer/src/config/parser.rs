//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in
/// the INI. Invalid values are rejected with the offending section and key
/// named, so the run aborts before any fetch cycle begins.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [crs] section
    if let Some(section) = ini.section(Some("crs")) {
        if let Some(v) = section.get("reproject") {
            config.crs.reproject = parse_bool(v, "crs", "reproject")?;
        }
        if let Some(v) = section.get("source_epsg") {
            config.crs.source_epsg = parse_epsg(v, "crs", "source_epsg")?;
        }
        if let Some(v) = section.get("target_epsg") {
            config.crs.target_epsg = parse_epsg(v, "crs", "target_epsg")?;
        }
    }

    // [decode] section
    if let Some(section) = ini.section(Some("decode")) {
        if let Some(v) = section.get("attribute_fallback_count") {
            let count: usize = v.parse().map_err(|_| invalid(
                "decode",
                "attribute_fallback_count",
                v,
                "must be a positive integer",
            ))?;
            if count == 0 {
                return Err(invalid(
                    "decode",
                    "attribute_fallback_count",
                    v,
                    "must be a positive integer",
                ));
            }
            config.decode.attribute_fallback_count = count;
        }
    }

    // [output] section
    if let Some(section) = ini.section(Some("output")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.output.directory = PathBuf::from(v);
            }
        }
        if let Some(v) = section.get("merged_files") {
            config.output.merged_files = parse_bool(v, "output", "merged_files")?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = PathBuf::from(v);
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_bool(value: &str, section: &str, key: &str) -> Result<bool, ConfigFileError> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(invalid(section, key, value, "must be 'true' or 'false'")),
    }
}

fn parse_epsg(value: &str, section: &str, key: &str) -> Result<u32, ConfigFileError> {
    value
        .parse()
        .map_err(|_| invalid(section, key, value, "must be a numeric EPSG code"))
}
