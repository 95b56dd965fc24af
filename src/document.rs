//! Parsed relANNIS document.
use serde::{Deserialize, Serialize};

use crate::metadata::Metadata;
use crate::projection::{Annotation, Projection};
use crate::tables::rows::DocumentId;

/// A metadata entry spanning the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataSpan {
    pub key: String,
    pub value: String,
    pub begin: usize,
    pub end: usize,
}

/// Plain text, annotations and metadata of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    plain_text: String,
    annotations: Vec<Annotation>,
    metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata_spans: Option<Vec<MetadataSpan>>,
}

impl Document {
    pub fn new(id: DocumentId, projection: Projection, metadata: Option<Metadata>) -> Self {
        Self {
            id,
            plain_text: projection.plain_text,
            annotations: projection.annotations,
            metadata,
            metadata_spans: None,
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn plain_text(&self) -> &str {
        &self.plain_text
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// Metadata entries as spans over the whole plain text.
    ///
    /// Empty if the document has no metadata.
    pub fn metadata_spans(&self) -> Vec<MetadataSpan> {
        let end = self.plain_text.chars().count();
        self.metadata
            .iter()
            .flatten()
            .map(|(key, value)| MetadataSpan {
                key: key.clone(),
                value: value.clone(),
                begin: 0,
                end,
            })
            .collect()
    }

    /// Embed [Self::metadata_spans] so that they get serialized along the document.
    pub fn with_metadata_spans(mut self) -> Self {
        if self.metadata.is_some() {
            self.metadata_spans = Some(self.metadata_spans());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offsets::Span;

    fn doc(metadata: Option<Metadata>) -> Document {
        let projection = Projection {
            annotations: vec![Annotation::new("token", "wär", Span::new(0, 3))],
            plain_text: "wär".to_string(),
        };
        Document::new(2, projection, metadata)
    }

    #[test]
    fn spans_cover_document() {
        let mut metadata = Metadata::new();
        metadata.insert("language".to_string(), "goh".to_string());
        let spans = doc(Some(metadata)).metadata_spans();
        assert_eq!(
            spans,
            vec![MetadataSpan {
                key: "language".to_string(),
                value: "goh".to_string(),
                begin: 0,
                end: 3
            }]
        );
    }

    #[test]
    fn no_metadata_no_spans() {
        let d = doc(None).with_metadata_spans();
        assert!(d.metadata_spans().is_empty());
        let json = serde_json::to_value(&d).unwrap();
        assert!(json["metadata"].is_null());
        assert!(json.get("metadata_spans").is_none());
    }

    #[test]
    fn serialize() {
        let d = doc(Some(Metadata::new())).with_metadata_spans();
        let serialized = serde_json::to_string(&d).unwrap();
        let d2: Document = serde_json::from_str(&serialized).unwrap();
        assert_eq!(d, d2);
    }
}
