//! GeoLayer CLI - Command-line interface
//!
//! This binary provides a command-line interface to the GeoLayer library.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod error;
mod runner;

use commands::build::BuildArgs;
use commands::merge::MergeArgs;

#[derive(Parser)]
#[command(name = "geolayer")]
#[command(version = geolayer::VERSION)]
#[command(about = "Rebuild GeoJSON layers from raw tile-server documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct per-region GeoJSON layers from fetched documents
    Build {
        /// Input directory holding <county>/<region>/*.json payloads
        #[arg(long)]
        input: PathBuf,

        /// Output root directory (overrides config output.directory)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Overwrite existing output without asking
        #[arg(long)]
        force: bool,

        /// Keep coordinates in the source CRS instead of reprojecting
        #[arg(long)]
        no_reproject: bool,
    },
    /// Merge persisted per-region outputs into one corpus file
    Merge {
        /// Output root directory (overrides config output.directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build {
            input,
            output,
            force,
            no_reproject,
        } => commands::build::run(BuildArgs {
            input,
            output,
            force,
            no_reproject,
        }),
        Commands::Merge { output } => commands::merge::run(MergeArgs { output }),
    };

    if let Err(e) = result {
        e.exit();
    }
}
