//! Merge command - combine persisted per-region outputs into one corpus.

use std::path::PathBuf;

use geolayer::merge as corpus;
use geolayer::store::MERGED_FILE_NAME;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the merge command.
pub struct MergeArgs {
    pub output: Option<PathBuf>,
}

/// Run the merge command.
pub fn run(args: MergeArgs) -> Result<(), CliError> {
    let mut runner = CliRunner::new()?;
    runner.log_startup("merge");

    if let Some(output) = args.output {
        runner.config_mut().output.directory = output;
    }
    let out_root = &runner.config().output.directory;

    let regions = corpus::collect_region_files(out_root)?;
    if regions.is_empty() {
        println!(
            "No region {} files found under '{}'",
            MERGED_FILE_NAME,
            out_root.display()
        );
        println!("Run 'geolayer build' with output.merged_files enabled first.");
        return Ok(());
    }

    let features = corpus::write_merged_corpus(out_root)?;
    println!(
        "Merged {} regions ({} features) into '{}'",
        regions.len(),
        features,
        out_root.join(MERGED_FILE_NAME).display()
    );

    Ok(())
}
