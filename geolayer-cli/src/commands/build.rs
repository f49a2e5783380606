//! Build command - reconstruct GeoJSON layers from raw tile-server documents.
//!
//! Expects the input tree a fetch session leaves behind:
//!
//! ```text
//! <input>/<county>/<region>/*.json    (raw JSONP payloads, one per request)
//! ```
//!
//! Each region becomes one fetch cycle through the pipeline and is written
//! under the configured output root.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use geolayer::document::RawDocument;
use geolayer::merge as corpus;
use geolayer::pipeline::Pipeline;
use geolayer::store;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the build command.
pub struct BuildArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub force: bool,
    pub no_reproject: bool,
}

/// Run the build command.
pub fn run(args: BuildArgs) -> Result<(), CliError> {
    let mut runner = CliRunner::new()?;
    runner.log_startup("build");

    // CLI flags override the config file for this invocation only
    if args.no_reproject {
        runner.config_mut().crs.reproject = false;
    }
    if let Some(output) = args.output {
        runner.config_mut().output.directory = output;
    }
    let config = runner.config();

    let out_root = config.output.directory.clone();
    if out_root.exists() && !args.force && !confirm_overwrite(&out_root)? {
        println!("Aborted.");
        return Ok(());
    }

    let pipeline = Pipeline::new(config)?;
    println!(
        "Rebuilding layers from '{}' into '{}'",
        args.input.display(),
        out_root.display()
    );
    if !pipeline.reprojection_enabled() {
        println!("Reprojection disabled: coordinates pass through unchanged");
    }

    let write_merged = config.output.merged_files;
    let mut regions = 0usize;
    let mut features = 0usize;

    for county_dir in sorted_entries(&args.input, Path::is_dir)? {
        let county = dir_name(&county_dir);
        for region_dir in sorted_entries(&county_dir, Path::is_dir)? {
            let region = dir_name(&region_dir);
            let documents = load_documents(&region_dir)?;

            let layers = pipeline.process(&documents)?;
            store::write_region(&out_root, &county, &region, &layers, write_merged)?;

            println!(
                "  {}/{}: {} layers, {} features",
                county,
                region,
                layers.len(),
                layers.feature_count()
            );
            regions += 1;
            features += layers.feature_count();
        }
    }

    println!();
    println!("Processed {} regions, {} features total", regions, features);

    if write_merged {
        let merged = corpus::write_merged_corpus(&out_root)?;
        println!("Merged corpus: {} features", merged);
    }

    Ok(())
}

/// Parses every `*.json` file in the region directory, in name order.
/// Undecodable payloads are logged and skipped; the cycle goes on without
/// them.
fn load_documents(region_dir: &Path) -> Result<Vec<RawDocument>, CliError> {
    let mut documents = Vec::new();
    for path in sorted_entries(region_dir, Path::is_file)? {
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let body = fs::read_to_string(&path).map_err(|error| CliError::Input {
            path: path.clone(),
            error,
        })?;
        match RawDocument::parse_payload(&body) {
            Ok(document) => documents.push(document),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping undecodable payload"),
        }
    }
    Ok(documents)
}

fn sorted_entries(
    parent: &Path,
    keep: impl Fn(&Path) -> bool,
) -> Result<Vec<PathBuf>, CliError> {
    let entries = fs::read_dir(parent).map_err(|error| CliError::Input {
        path: parent.to_path_buf(),
        error,
    })?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|error| CliError::Input {
            path: parent.to_path_buf(),
            error,
        })?;
        let path = entry.path();
        if keep(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn confirm_overwrite(out_root: &Path) -> Result<bool, CliError> {
    print!(
        "Output directory '{}' already exists. Overwrite? [y/N] ",
        out_root.display()
    );
    io::stdout().flush().map_err(CliError::Prompt)?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer).map_err(CliError::Prompt)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_documents_skips_non_json_and_broken_payloads() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::write(
            temp.path().join("01.json"),
            r#"cb({"LayerName": "L", "values": []})"#,
        )
        .unwrap();
        fs::write(temp.path().join("02.json"), "cb(not json at all)").unwrap();
        fs::write(temp.path().join("notes.txt"), "ignored").unwrap();

        let documents = load_documents(temp.path()).unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].layer_name(), Some("L"));
    }

    #[test]
    fn test_sorted_entries_orders_by_name() {
        let temp = tempfile::TempDir::new().unwrap();
        for name in ["b", "a", "c"] {
            fs::create_dir(temp.path().join(name)).unwrap();
        }

        let dirs = sorted_entries(temp.path(), Path::is_dir).unwrap();
        let names: Vec<String> = dirs.iter().map(|p| dir_name(p)).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_missing_input_directory_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let missing = temp.path().join("absent");
        assert!(matches!(
            sorted_entries(&missing, Path::is_dir),
            Err(CliError::Input { .. })
        ));
    }
}
