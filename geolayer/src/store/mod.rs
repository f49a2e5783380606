//! GeoJSON persistence for per-region layer collections.
//!
//! Output layout mirrors the site's region index:
//!
//! ```text
//! <out>/<county>/<region>/<layer title>.geojson   (pretty-printed)
//! <out>/<county>/<region>/merged.geojson          (compact, optional)
//! <out>/merged.geojson                            (compact, corpus merge)
//! ```
//!
//! Writes always overwrite; merging with pre-existing artifacts is never
//! attempted here.

use std::fs;
use std::path::{Path, PathBuf};

use crate::feature::{self, Feature, FeatureError};
use crate::layer::LayerCollection;

/// File name for merged feature collections, per region and corpus-wide.
pub const MERGED_FILE_NAME: &str = "merged.geojson";

/// Error type for persistence operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("'{path}' is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("'{path}' is not a feature collection: {source}")]
    InvalidCollection {
        path: PathBuf,
        #[source]
        source: FeatureError,
    },
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Writes one region's layer collection as per-layer GeoJSON files.
///
/// Creates `<out>/<county>/<region>/` as needed. When `write_merged` is
/// set, a compact `merged.geojson` concatenating every layer's features is
/// written alongside, in layer order; the corpus merger reads these back.
pub fn write_region(
    out_root: &Path,
    county: &str,
    region: &str,
    collection: &LayerCollection,
    write_merged: bool,
) -> Result<PathBuf, StoreError> {
    let region_dir = out_root.join(safe_file_name(county)).join(safe_file_name(region));
    fs::create_dir_all(&region_dir).map_err(io_error(&region_dir))?;

    for (title, features) in collection.iter() {
        let path = region_dir.join(format!("{}.geojson", safe_file_name(title)));
        write_collection(&path, features, true)?;
        tracing::info!(
            layer = title,
            features = features.len(),
            path = %path.display(),
            "wrote layer"
        );
    }

    if write_merged {
        let merged: Vec<Feature> = collection
            .iter()
            .flat_map(|(_, features)| features.iter().cloned())
            .collect();
        write_collection(&region_dir.join(MERGED_FILE_NAME), &merged, false)?;
    }

    Ok(region_dir)
}

/// Writes an ordered feature sequence as one GeoJSON FeatureCollection.
pub fn write_collection(
    path: &Path,
    features: &[Feature],
    pretty: bool,
) -> Result<(), StoreError> {
    let value = feature::collection_to_value(features);
    let serialized = if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, serialized).map_err(io_error(path))
}

/// Reads a persisted GeoJSON FeatureCollection back into features.
pub fn read_collection(path: &Path) -> Result<Vec<Feature>, StoreError> {
    let raw = fs::read_to_string(path).map_err(io_error(path))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    feature::collection_from_value(&value).map_err(|source| StoreError::InvalidCollection {
        path: path.to_path_buf(),
        source,
    })
}

/// Replaces path-hostile characters in a layer title or region name so it
/// can serve as a file name. The collection label itself is never altered.
fn safe_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            other => other,
        })
        .collect()
}
