//! Facade wiring the reconstruction components for one fetch cycle.
//!
//! Construction validates the coordinate-system configuration once; a bad
//! EPSG pair aborts before any document is touched. Processing is pure and
//! synchronous: documents in, per-layer feature collections out.

use crate::config::ConfigFile;
use crate::decode::FeatureDecoder;
use crate::document::{self, RawDocument};
use crate::geometry::reproject::{CrsError, Reprojector};
use crate::layer::{self, AggregateError, LayerCollection};
use crate::schema::SchemaCatalog;

/// Reconstruction pipeline for raw tile-server documents.
#[derive(Debug)]
pub struct Pipeline {
    reprojector: Option<Reprojector>,
    attribute_fallback_count: usize,
}

impl Pipeline {
    /// Builds a pipeline from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CrsError`] when reprojection is enabled and the configured
    /// EPSG pair has no transform. With reprojection disabled the pair is
    /// never validated, because the reprojector is bypassed entirely.
    pub fn new(config: &ConfigFile) -> Result<Self, CrsError> {
        let reprojector = if config.crs.reproject {
            Some(Reprojector::new(
                config.crs.source_epsg,
                config.crs.target_epsg,
            )?)
        } else {
            None
        };
        Ok(Pipeline {
            reprojector,
            attribute_fallback_count: config.decode.attribute_fallback_count,
        })
    }

    /// Whether geometries will be reprojected.
    pub fn reprojection_enabled(&self) -> bool {
        self.reprojector.is_some()
    }

    /// Runs one fetch cycle: classifies documents, resolves the schema from
    /// the metadata, decodes every value tuple, and groups features by
    /// layer title.
    ///
    /// # Errors
    ///
    /// Propagates [`AggregateError`] for data-shape violations the decoder
    /// cannot recover from; per-feature conditions are logged and dropped.
    pub fn process(&self, documents: &[RawDocument]) -> Result<LayerCollection, AggregateError> {
        let (metadata, values) = document::partition(documents);
        tracing::debug!(
            metadata = metadata.len(),
            values = values.len(),
            "classified fetch-cycle documents"
        );

        let schema = SchemaCatalog::resolve(&metadata);
        tracing::debug!(layers = schema.len(), "resolved layer schemas");

        let decoder = FeatureDecoder::new(self.reprojector.as_ref(), self.attribute_fallback_count);
        layer::aggregate(&values, &schema, &decoder)
    }
}
