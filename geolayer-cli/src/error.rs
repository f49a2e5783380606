//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use geolayer::geometry::reproject::CrsError;
use geolayer::layer::AggregateError;
use geolayer::store::StoreError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Unsupported coordinate reference system pair
    Crs(CrsError),
    /// Input directory missing or unreadable
    Input { path: PathBuf, error: std::io::Error },
    /// Interactive prompt failed
    Prompt(std::io::Error),
    /// A fetch cycle failed to decode
    Process(AggregateError),
    /// Failed to read or write output files
    Store(StoreError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Crs(_) => {
                eprintln!();
                eprintln!("Supported transforms:");
                eprintln!("  3857 -> 4326 (Web Mercator to WGS84)");
                eprintln!("  4326 -> 3857 (WGS84 to Web Mercator)");
                eprintln!("Identical source and target codes pass coordinates through.");
            }
            CliError::Process(AggregateError::Decode { .. }) => {
                eprintln!();
                eprintln!("A value tuple was wider than the available attribute names.");
                eprintln!("Raise decode.attribute_fallback_count in the config file if the");
                eprintln!("server really serves layers this wide.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Crs(e) => write!(f, "Invalid coordinate configuration: {}", e),
            CliError::Input { path, error } => {
                write!(f, "Failed to read input '{}': {}", path.display(), error)
            }
            CliError::Prompt(e) => write!(f, "Failed to read confirmation: {}", e),
            CliError::Process(e) => write!(f, "Failed to process documents: {}", e),
            CliError::Store(e) => write!(f, "Failed to persist output: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Crs(e) => Some(e),
            CliError::Input { error, .. } => Some(error),
            CliError::Prompt(e) => Some(e),
            CliError::Process(e) => Some(e),
            CliError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CrsError> for CliError {
    fn from(e: CrsError) -> Self {
        CliError::Crs(e)
    }
}

impl From<AggregateError> for CliError {
    fn from(e: AggregateError) -> Self {
        CliError::Process(e)
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        CliError::Store(e)
    }
}
