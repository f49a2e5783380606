//! Positional tuple decoding into named features.
//!
//! Each raw value tuple starts with an opaque index element, followed by a
//! mix of scalar attribute values and at most one embedded geometry object.
//! Attribute-name slots are assigned by tuple position, so a geometry
//! element consumes its slot without producing a property; this matches the
//! server's schema, where the geometry column is part of the attribute list.

use serde_json::{Map, Value};

use crate::feature::Feature;
use crate::geometry::{self, reproject::Reprojector};

/// Error type for tuple decoding.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A scalar landed on a position past the end of the attribute-name
    /// list. Silently truncating would corrupt properties, so this is loud.
    #[error(
        "tuple attribute at position {position} exceeds the {available} available attribute names"
    )]
    AttributeOverflow { position: usize, available: usize },
}

/// Tagged view of one non-index tuple element.
#[derive(Debug)]
enum TupleElement<'a> {
    Scalar(&'a Value),
    EmbeddedGeometry(&'a Value),
}

fn classify(value: &Value) -> TupleElement<'_> {
    if value.is_object() {
        TupleElement::EmbeddedGeometry(value)
    } else {
        TupleElement::Scalar(value)
    }
}

/// Decodes raw value tuples into features using a resolved attribute schema.
#[derive(Debug, Clone, Copy)]
pub struct FeatureDecoder<'a> {
    reprojector: Option<&'a Reprojector>,
    fallback_count: usize,
}

impl<'a> FeatureDecoder<'a> {
    /// Creates a decoder.
    ///
    /// `reprojector` is applied to every embedded geometry as soon as it is
    /// built; `None` passes coordinates through untouched.
    /// `fallback_count` sizes the synthesized attribute-name list used for
    /// layers with no discovered schema.
    pub fn new(reprojector: Option<&'a Reprojector>, fallback_count: usize) -> Self {
        FeatureDecoder {
            reprojector,
            fallback_count,
        }
    }

    /// Synthesized placeholder names `property_1 .. property_N` for layers
    /// without a discovered schema.
    pub fn fallback_names(&self) -> Vec<String> {
        (1..=self.fallback_count)
            .map(|i| format!("property_{i}"))
            .collect()
    }

    /// Decodes one raw tuple against an ordered attribute-name list.
    ///
    /// Returns `Ok(None)` when the tuple carries a structurally invalid
    /// embedded geometry: the whole feature is dropped (and logged), never
    /// emitted with its geometry silently missing.
    ///
    /// # Errors
    ///
    /// [`DecodeError::AttributeOverflow`] when a scalar position exceeds
    /// the attribute-name list.
    pub fn decode(
        &self,
        tuple: &[Value],
        attribute_names: &[String],
    ) -> Result<Option<Feature>, DecodeError> {
        let mut properties = Map::new();
        let mut geometry = None;

        // Position 0 is the tuple's opaque index
        for (position, element) in tuple.iter().enumerate().skip(1) {
            let slot = position - 1;
            match classify(element) {
                TupleElement::EmbeddedGeometry(raw) => {
                    if geometry.is_some() {
                        tracing::warn!(
                            position,
                            "tuple carries more than one embedded geometry, keeping the first"
                        );
                        continue;
                    }
                    match geometry::from_value(raw) {
                        Ok(built) => {
                            geometry = Some(match self.reprojector {
                                Some(reprojector) => reprojector.reproject(built),
                                None => built,
                            });
                        }
                        Err(e) => {
                            tracing::warn!(
                                error = %e,
                                properties = %format_properties(&properties),
                                "dropping feature with malformed embedded geometry"
                            );
                            return Ok(None);
                        }
                    }
                }
                TupleElement::Scalar(value) => {
                    let name = attribute_names.get(slot).ok_or(
                        DecodeError::AttributeOverflow {
                            position: slot,
                            available: attribute_names.len(),
                        },
                    )?;
                    properties.insert(name.clone(), value.clone());
                }
            }
        }

        Ok(Some(Feature {
            geometry,
            properties,
        }))
    }
}

/// Renders accumulated properties for the malformed-geometry warning.
fn format_properties(properties: &Map<String, Value>) -> String {
    let rendered: Vec<String> = properties
        .iter()
        .map(|(name, value)| format!("{name}:{value}"))
        .collect();
    format!("[{}]", rendered.join(", "))
}
