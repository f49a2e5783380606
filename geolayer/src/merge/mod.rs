//! Corpus merging across previously persisted regions.
//!
//! Every region that was processed with merged output enabled left a
//! `merged.geojson` two levels below the output root. The merger
//! enumerates those files in lexicographic path order, concatenates their
//! features, and (optionally) writes the combined collection at the root.
//!
//! The merge is a pure function of persisted state: re-running it over
//! unchanged inputs produces the same concatenation. It never
//! deduplicates; stale artifacts from earlier runs accumulate unless the
//! caller clears the output directory first.

use std::fs;
use std::path::{Path, PathBuf};

use crate::feature::Feature;
use crate::store::{self, StoreError, MERGED_FILE_NAME};

/// Enumerates `<out>/<county>/<region>/merged.geojson` files in
/// lexicographic path order.
pub fn collect_region_files(out_root: &Path) -> Result<Vec<PathBuf>, StoreError> {
    let mut files = Vec::new();
    for county_dir in sorted_dirs(out_root)? {
        for region_dir in sorted_dirs(&county_dir)? {
            let candidate = region_dir.join(MERGED_FILE_NAME);
            if candidate.is_file() {
                files.push(candidate);
            }
        }
    }
    Ok(files)
}

/// Reads every per-region merged collection and concatenates the features
/// in traversal order.
pub fn merge_corpus(out_root: &Path) -> Result<Vec<Feature>, StoreError> {
    let mut corpus = Vec::new();
    for path in collect_region_files(out_root)? {
        let mut features = store::read_collection(&path)?;
        tracing::debug!(path = %path.display(), features = features.len(), "merging region");
        corpus.append(&mut features);
    }
    Ok(corpus)
}

/// Merges the corpus and writes it as `<out>/merged.geojson`.
///
/// Returns the number of features written.
pub fn write_merged_corpus(out_root: &Path) -> Result<usize, StoreError> {
    let corpus = merge_corpus(out_root)?;
    store::write_collection(&out_root.join(MERGED_FILE_NAME), &corpus, false)?;
    Ok(corpus.len())
}

fn sorted_dirs(parent: &Path) -> Result<Vec<PathBuf>, StoreError> {
    if !parent.is_dir() {
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(parent).map_err(|source| StoreError::Io {
        path: parent.to_path_buf(),
        source,
    })?;
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}
