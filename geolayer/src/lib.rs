//! GeoLayer - GeoJSON reconstruction from tile-server responses
//!
//! This library rebuilds named, geometry-bearing GeoJSON features from the
//! semi-structured documents a kosmosnimki-style tile server emits: metadata
//! documents carrying layer attribute schemas, and value documents carrying
//! positional per-feature tuples.
//!
//! # High-Level API
//!
//! For most use cases, the [`pipeline`] module provides a facade over the
//! individual components:
//!
//! ```ignore
//! use geolayer::config::ConfigFile;
//! use geolayer::pipeline::Pipeline;
//!
//! let config = ConfigFile::default();
//! let pipeline = Pipeline::new(&config)?;
//!
//! // One fetch cycle: raw documents in, per-layer features out
//! let layers = pipeline.process(&documents)?;
//! ```

pub mod config;
pub mod decode;
pub mod document;
pub mod feature;
pub mod geometry;
pub mod layer;
pub mod logging;
pub mod merge;
pub mod pipeline;
pub mod schema;
pub mod store;

/// Version of the GeoLayer library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
