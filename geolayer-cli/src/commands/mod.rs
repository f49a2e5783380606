//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`build`] - Rebuild per-region GeoJSON layers from raw documents
//! - [`merge`] - Merge persisted regions into one corpus file

pub mod build;
pub mod merge;
