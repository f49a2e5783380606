//! Grouping decoded features by layer title.
//!
//! One fetch cycle produces many value documents; several of them may feed
//! the same layer. Accumulation is additive and insertion-ordered, so the
//! output is deterministic for identical input document order.

use std::collections::HashMap;

use crate::decode::{DecodeError, FeatureDecoder};
use crate::document::RawDocument;
use crate::feature::Feature;
use crate::schema::SchemaCatalog;

/// Error type for layer aggregation.
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("decoding tuple in layer '{layer}': {source}")]
    Decode {
        layer: String,
        #[source]
        source: DecodeError,
    },
}

/// Per-layer feature lists for one fetch cycle, keyed by display title.
///
/// Built fresh per cycle, handed to persistence, then discarded.
#[derive(Debug, Default)]
pub struct LayerCollection {
    titles: Vec<String>,
    features: HashMap<String, Vec<Feature>>,
}

impl LayerCollection {
    /// Appends features to a layer, creating the entry on first use.
    pub fn push(&mut self, title: &str, features: Vec<Feature>) {
        match self.features.get_mut(title) {
            Some(existing) => existing.extend(features),
            None => {
                self.titles.push(title.to_string());
                self.features.insert(title.to_string(), features);
            }
        }
    }

    /// Features for one layer title.
    pub fn get(&self, title: &str) -> Option<&[Feature]> {
        self.features.get(title).map(Vec::as_slice)
    }

    /// Iterates layers in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Feature])> {
        self.titles
            .iter()
            .map(|title| (title.as_str(), self.features[title].as_slice()))
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Total number of features across all layers.
    pub fn feature_count(&self) -> usize {
        self.features.values().map(Vec::len).sum()
    }
}

/// Decodes every value document and groups the results by layer title.
///
/// Layers without a discovered attribute schema fall back to synthesized
/// placeholder names; layers without a discovered title fall back to the
/// raw layer identifier. Documents the acquisition side should have
/// filtered (no layer name, no tuple array) are skipped with a warning.
///
/// # Errors
///
/// Propagates [`DecodeError::AttributeOverflow`] wrapped with the layer
/// that triggered it; recoverable per-feature conditions never error.
pub fn aggregate(
    value_documents: &[&RawDocument],
    schema: &SchemaCatalog,
    decoder: &FeatureDecoder<'_>,
) -> Result<LayerCollection, AggregateError> {
    let mut collection = LayerCollection::default();

    for document in value_documents {
        let Some(layer_name) = document.layer_name() else {
            tracing::warn!("value document without a LayerName string, skipping");
            continue;
        };
        let Some(tuples) = document.values() else {
            tracing::warn!(layer = layer_name, "value document without a values array, skipping");
            continue;
        };

        let fallback;
        let attribute_names: &[String] = match schema.attribute_names(layer_name) {
            Some(names) => names,
            None => {
                tracing::warn!(
                    layer = layer_name,
                    "no attribute schema discovered, using placeholder names"
                );
                fallback = decoder.fallback_names();
                &fallback
            }
        };

        let mut features = Vec::with_capacity(tuples.len());
        for tuple in tuples {
            let Some(elements) = tuple.as_array() else {
                tracing::warn!(layer = layer_name, "non-sequence value tuple, skipping");
                continue;
            };
            let decoded = decoder
                .decode(elements, attribute_names)
                .map_err(|source| AggregateError::Decode {
                    layer: layer_name.to_string(),
                    source,
                })?;
            if let Some(feature) = decoded {
                features.push(feature);
            }
        }

        let title = match schema.title(layer_name) {
            Some(title) => title.to_string(),
            None => {
                tracing::warn!(
                    layer = layer_name,
                    "no title discovered, labeling layer by its identifier"
                );
                layer_name.to_string()
            }
        };

        collection.push(&title, features);
    }

    Ok(collection)
}
