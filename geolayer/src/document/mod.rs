//! Raw tile-server documents.
//!
//! The tile server answers every request with a JSONP-wrapped JSON body.
//! Two structural shapes occur:
//! - value documents: carry a `LayerName` string and a `values` sequence of
//!   per-feature tuples
//! - metadata documents: everything else, a nested structure that somewhere
//!   contains layer descriptors with attribute schemas
//!
//! Classification is purely structural: a document is a value document iff
//! its top-level object has a `values` key.

use serde_json::Value;

/// Error type for raw payload parsing.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("response body contains no JSONP payload")]
    NoPayload,
    #[error("payload is not valid JSON: {0}")]
    Undecodable(#[from] serde_json::Error),
}

/// Structural shape of a raw document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Nested metadata carrying layer descriptors.
    Metadata,
    /// Per-feature value tuples for one layer.
    Values,
}

/// One parsed tile-server document, still untyped.
#[derive(Debug, Clone)]
pub struct RawDocument(Value);

impl RawDocument {
    /// Wraps an already-parsed JSON value.
    pub fn new(value: Value) -> Self {
        RawDocument(value)
    }

    /// Parses a raw JSONP response body into a document.
    ///
    /// The server wraps every response in a callback invocation, sometimes
    /// preceded by junk bytes. Everything before the first `(` is discarded,
    /// the wrapping parentheses are stripped, and the remainder is parsed
    /// as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::NoPayload`] if the body is empty after
    /// unwrapping, or [`DocumentError::Undecodable`] if the payload is not
    /// valid JSON.
    pub fn parse_payload(body: &str) -> Result<RawDocument, DocumentError> {
        let unwrapped = match body.find('(') {
            Some(start) => body[start..].trim_matches(|c| c == '(' || c == ')' || c == ';'),
            None => body,
        };
        let unwrapped = unwrapped.trim();
        if unwrapped.is_empty() {
            return Err(DocumentError::NoPayload);
        }
        let value: Value = serde_json::from_str(unwrapped)?;
        Ok(RawDocument(value))
    }

    /// Returns the structural shape of this document.
    pub fn kind(&self) -> DocumentKind {
        match self.0.as_object() {
            Some(map) if map.contains_key("values") => DocumentKind::Values,
            _ => DocumentKind::Metadata,
        }
    }

    /// Layer identifier of a value document, if present and a string.
    pub fn layer_name(&self) -> Option<&str> {
        self.0.get("LayerName").and_then(Value::as_str)
    }

    /// The `values` tuple sequence of a value document.
    pub fn values(&self) -> Option<&Vec<Value>> {
        self.0.get("values").and_then(Value::as_array)
    }

    /// The underlying untyped JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Splits a document collection into metadata and value documents,
/// preserving encounter order within each group.
pub fn partition(documents: &[RawDocument]) -> (Vec<&RawDocument>, Vec<&RawDocument>) {
    let mut metadata = Vec::new();
    let mut values = Vec::new();
    for doc in documents {
        match doc.kind() {
            DocumentKind::Metadata => metadata.push(doc),
            DocumentKind::Values => values.push(doc),
        }
    }
    (metadata, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_payload_strips_jsonp_wrapper() {
        let doc = RawDocument::parse_payload(r#"callback({"LayerName":"L1","values":[]})"#)
            .expect("wrapped payload should parse");
        assert_eq!(doc.layer_name(), Some("L1"));
    }

    #[test]
    fn test_parse_payload_skips_leading_junk() {
        let doc = RawDocument::parse_payload("\u{feff}// junk\ncb({\"a\":1});")
            .expect("payload with junk prefix should parse");
        assert_eq!(doc.as_value()["a"], json!(1));
    }

    #[test]
    fn test_parse_payload_accepts_bare_json() {
        let doc = RawDocument::parse_payload(r#"{"values":[]}"#).unwrap();
        assert_eq!(doc.kind(), DocumentKind::Values);
    }

    #[test]
    fn test_parse_payload_rejects_non_json() {
        let result = RawDocument::parse_payload("cb(<html>not json</html>)");
        assert!(matches!(result, Err(DocumentError::Undecodable(_))));
    }

    #[test]
    fn test_parse_payload_rejects_empty_body() {
        let result = RawDocument::parse_payload("   ");
        assert!(matches!(result, Err(DocumentError::NoPayload)));
    }

    #[test]
    fn test_classification_by_values_key() {
        let values = RawDocument::new(json!({"LayerName": "L1", "values": [[0, "a"]]}));
        let metadata = RawDocument::new(json!({"properties": {"LayerID": 7}}));
        assert_eq!(values.kind(), DocumentKind::Values);
        assert_eq!(metadata.kind(), DocumentKind::Metadata);
    }

    #[test]
    fn test_non_object_document_is_metadata() {
        let doc = RawDocument::new(json!([1, 2, 3]));
        assert_eq!(doc.kind(), DocumentKind::Metadata);
    }

    #[test]
    fn test_partition_preserves_order() {
        let docs = vec![
            RawDocument::new(json!({"values": [], "LayerName": "A"})),
            RawDocument::new(json!({"meta": 1})),
            RawDocument::new(json!({"values": [], "LayerName": "B"})),
        ];
        let (metadata, values) = partition(&docs);
        assert_eq!(metadata.len(), 1);
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].layer_name(), Some("A"));
        assert_eq!(values[1].layer_name(), Some("B"));
    }
}
