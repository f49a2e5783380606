//! Layer schema discovery over metadata documents.
//!
//! Layer descriptors are buried at arbitrary depth inside the metadata
//! forest. A descriptor is any mapping node that simultaneously carries the
//! four keys `LayerID`, `attributes`, `name` and `title`. The resolver walks
//! the whole forest depth-first and records every descriptor it finds;
//! children are always visited, even when the node itself is a match, and a
//! layer re-declared later in the forest overwrites the earlier entry.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::document::RawDocument;

/// Attribute-name and title mappings discovered from metadata documents.
///
/// Attribute order is positional: it corresponds one-to-one to tuple order
/// in the matching value document, after the tuple's leading index element
/// is discarded.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    attributes: HashMap<String, Vec<String>>,
    titles: HashMap<String, String>,
}

impl SchemaCatalog {
    /// Walks every metadata document and collects all layer descriptors.
    pub fn resolve(metadata_documents: &[&RawDocument]) -> Self {
        let mut catalog = SchemaCatalog::default();
        for doc in metadata_documents {
            catalog.visit(doc.as_value());
        }
        catalog
    }

    /// Ordered attribute names for a layer identifier, if discovered.
    pub fn attribute_names(&self, layer: &str) -> Option<&[String]> {
        self.attributes.get(layer).map(Vec::as_slice)
    }

    /// Human-readable title for a layer identifier, if discovered.
    pub fn title(&self, layer: &str) -> Option<&str> {
        self.titles.get(layer).map(String::as_str)
    }

    /// Number of layers with a discovered attribute schema.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Depth-first traversal over the JSON tagged union.
    ///
    /// Mapping nodes recurse into mapping values directly and into
    /// sequence values element-wise (mappings and sequences only), then
    /// test themselves against the descriptor predicate. Sequence nodes
    /// recurse the same way. Scalars end the walk.
    fn visit(&mut self, node: &Value) {
        match node {
            Value::Object(map) => {
                for value in map.values() {
                    match value {
                        Value::Object(_) => self.visit(value),
                        Value::Array(items) => {
                            for item in items {
                                if item.is_object() || item.is_array() {
                                    self.visit(item);
                                }
                            }
                        }
                        _ => {}
                    }
                }
                self.record(map);
            }
            Value::Array(items) => {
                for item in items {
                    if item.is_object() || item.is_array() {
                        self.visit(item);
                    }
                }
            }
            _ => {}
        }
    }

    /// Records a node as a layer descriptor if it matches structurally.
    ///
    /// All four keys must be present, `name` and `title` must be strings,
    /// and `attributes` must be a sequence of strings. Partial matches are
    /// skipped; their children were already explored by `visit`.
    fn record(&mut self, map: &Map<String, Value>) {
        if !map.contains_key("LayerID") {
            return;
        }
        let (Some(name), Some(title), Some(attributes)) = (
            map.get("name").and_then(Value::as_str),
            map.get("title").and_then(Value::as_str),
            map.get("attributes").and_then(Value::as_array),
        ) else {
            return;
        };

        let mut names = Vec::with_capacity(attributes.len());
        for attribute in attributes {
            match attribute.as_str() {
                Some(s) => names.push(s.to_string()),
                None => return,
            }
        }

        self.attributes.insert(name.to_string(), names);
        self.titles.insert(name.to_string(), title.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolve(values: Vec<Value>) -> SchemaCatalog {
        let docs: Vec<RawDocument> = values.into_iter().map(RawDocument::new).collect();
        let refs: Vec<&RawDocument> = docs.iter().collect();
        SchemaCatalog::resolve(&refs)
    }

    fn descriptor(name: &str, title: &str, attributes: Vec<&str>) -> Value {
        json!({
            "LayerID": name,
            "name": name,
            "title": title,
            "attributes": attributes,
        })
    }

    #[test]
    fn test_descriptor_found_at_depth_one() {
        let catalog = resolve(vec![descriptor("L1", "Layer One", vec!["a", "b"])]);
        assert_eq!(catalog.attribute_names("L1"), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(catalog.title("L1"), Some("Layer One"));
    }

    #[test]
    fn test_descriptor_found_at_depth_four() {
        // Same descriptor nested four mappings deep must resolve identically
        let nested = json!({
            "level1": { "level2": { "level3": descriptor("L1", "Layer One", vec!["a", "b"]) } }
        });
        let catalog = resolve(vec![nested]);
        assert_eq!(catalog.attribute_names("L1"), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(catalog.title("L1"), Some("Layer One"));
    }

    #[test]
    fn test_descriptor_found_inside_sequences() {
        let nested = json!({
            "children": [
                {"noise": true},
                [ { "inner": descriptor("L2", "Second", vec!["x"]) } ],
            ]
        });
        let catalog = resolve(vec![nested]);
        assert_eq!(catalog.title("L2"), Some("Second"));
    }

    #[test]
    fn test_partial_descriptor_is_skipped_but_children_explored() {
        // Node has only three of the four keys, but a full descriptor
        // hides inside one of its values
        let nested = json!({
            "LayerID": "outer",
            "name": "outer",
            "title": "Outer",
            "child": descriptor("L3", "Inner", vec!["p"]),
        });
        let catalog = resolve(vec![nested]);
        assert!(catalog.attribute_names("outer").is_none(), "partial match must not record");
        assert_eq!(catalog.title("L3"), Some("Inner"));
    }

    #[test]
    fn test_duplicate_layer_last_write_wins() {
        let catalog = resolve(vec![json!({
            "first": descriptor("L1", "Old Title", vec!["a"]),
            "second": descriptor("L1", "New Title", vec!["a", "b"]),
        })]);
        // serde_json preserves insertion order, so "second" is visited last
        assert_eq!(catalog.title("L1"), Some("New Title"));
        assert_eq!(catalog.attribute_names("L1").unwrap().len(), 2);
    }

    #[test]
    fn test_non_string_attributes_not_recorded() {
        let catalog = resolve(vec![json!({
            "LayerID": "L9",
            "name": "L9",
            "title": "Bad",
            "attributes": ["ok", 42],
        })]);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_multiple_documents_accumulate() {
        let catalog = resolve(vec![
            descriptor("L1", "One", vec!["a"]),
            descriptor("L2", "Two", vec!["b"]),
        ]);
        assert_eq!(catalog.len(), 2);
    }
}
