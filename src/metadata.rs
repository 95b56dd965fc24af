/*! Document metadata inherited from the corpus tree.

`CORPUS` entries are numbered in file order, `DOCUMENT` entries are keyed by their id.
A text row `(corpus_ref, id, name, text)` takes the metadata of the corpus numbered `id`,
plus its document name and its text.

Resolution failures are per document: the document simply has no metadata.
!*/
use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};

use crate::error::Error;
use crate::tables::rows::{CorpusId, DocumentId};
use crate::tables::{CorpusAnnotation, CorpusEntry, CorpusType, TextEntry};

pub type Metadata = BTreeMap<String, String>;

pub const DOC_NAME_KEY: &str = "doc-name";
pub const TEXT_KEY: &str = "text";

#[derive(Debug, Default)]
pub struct MetadataResolver {
    // (name, raw id), keyed by position among CORPUS entries
    corpora: Vec<(String, CorpusId)>,
    documents: HashMap<DocumentId, (String, CorpusId)>,
    by_corpus: HashMap<CorpusId, Metadata>,
}

impl MetadataResolver {
    pub fn new(corpora: &[CorpusEntry], annotations: &[CorpusAnnotation]) -> Self {
        let mut resolver = Self::default();

        for entry in corpora {
            match &entry.kind {
                CorpusType::Corpus => resolver.corpora.push((entry.name.clone(), entry.id)),
                CorpusType::Document => {
                    resolver
                        .documents
                        .insert(entry.id, (entry.name.clone(), entry.id));
                }
                CorpusType::Other(kind) => debug!("ignoring corpus entry of type {}", kind),
            }
        }

        for anno in annotations {
            resolver
                .by_corpus
                .entry(anno.corpus_ref)
                .or_default()
                .insert(anno.name.clone(), anno.value.clone());
        }

        resolver
    }

    /// Metadata of the document of a text row.
    pub fn resolve(&self, text: &TextEntry) -> Result<Metadata, Error> {
        let (_, corpus_id) = usize::try_from(text.id)
            .ok()
            .and_then(|idx| self.corpora.get(idx))
            .ok_or_else(|| Error::MissingMetadata(format!("no corpus numbered {}", text.id)))?;

        let mut metadata = self
            .by_corpus
            .get(corpus_id)
            .cloned()
            .ok_or_else(|| Error::MissingMetadata(format!("corpus {} has no annotations", corpus_id)))?;

        let (doc_name, _) = self.documents.get(&text.corpus_ref).ok_or_else(|| {
            Error::MissingMetadata(format!("no document with id {}", text.corpus_ref))
        })?;

        metadata.insert(DOC_NAME_KEY.to_string(), doc_name.clone());
        let content = if text.text.trim().is_empty() {
            String::new()
        } else {
            text.text.clone()
        };
        metadata.insert(TEXT_KEY.to_string(), content);

        Ok(metadata)
    }

    /// Metadata of every document that can be resolved.
    ///
    /// Documents that fail are logged and left out.
    pub fn resolve_all(&self, texts: &[TextEntry]) -> HashMap<DocumentId, Metadata> {
        texts
            .iter()
            .filter_map(|text| match self.resolve(text) {
                Ok(metadata) => Some((text.corpus_ref, metadata)),
                Err(e) => {
                    warn!("document {}: {}", text.corpus_ref, e);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(id: i64, name: &str, kind: &str) -> CorpusEntry {
        CorpusEntry {
            id,
            name: name.to_string(),
            kind: CorpusType::from(kind),
            version: None,
            pre: 0,
            post: 0,
            top_level: false,
        }
    }

    fn corpus_anno(corpus_ref: i64, name: &str, value: &str) -> CorpusAnnotation {
        CorpusAnnotation {
            corpus_ref,
            namespace: "NULL".to_string(),
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    fn text(corpus_ref: i64, id: i64, content: &str) -> TextEntry {
        TextEntry {
            corpus_ref,
            id,
            name: "sText1".to_string(),
            text: content.to_string(),
        }
    }

    fn resolver() -> MetadataResolver {
        MetadataResolver::new(
            &[
                corpus(10, "root", "CORPUS"),
                corpus(3, "doc_a", "DOCUMENT"),
                corpus(11, "sub", "corpus"),
                corpus(4, "doc_b", "DOCUMENT"),
            ],
            &[
                corpus_anno(10, "language", "goh"),
                corpus_anno(11, "language", "osx"),
                corpus_anno(11, "date", "9th c."),
                corpus_anno(11, "date", "10th c."),
            ],
        )
    }

    #[test]
    fn inherits_corpus_metadata() {
        let metadata = resolver().resolve(&text(4, 1, "hwer ist")).unwrap();
        assert_eq!(metadata["language"], "osx");
        assert_eq!(metadata["date"], "10th c.");
        assert_eq!(metadata[DOC_NAME_KEY], "doc_b");
        assert_eq!(metadata[TEXT_KEY], "hwer ist");
    }

    #[test]
    fn corpora_numbered_in_file_order() {
        let metadata = resolver().resolve(&text(3, 0, "x")).unwrap();
        assert_eq!(metadata["language"], "goh");
    }

    #[test]
    fn whitespace_text_blanked() {
        let metadata = resolver().resolve(&text(3, 0, "   ")).unwrap();
        assert_eq!(metadata[TEXT_KEY], "");
    }

    #[test]
    fn failures_are_per_document() {
        let r = resolver();
        assert!(matches!(r.resolve(&text(3, 7, "x")), Err(Error::MissingMetadata(_))));
        assert!(matches!(r.resolve(&text(99, 0, "x")), Err(Error::MissingMetadata(_))));

        let all = r.resolve_all(&[text(3, 0, "a"), text(4, 7, "b"), text(99, 1, "c")]);
        assert_eq!(all.len(), 1);
        assert!(all.contains_key(&3));
    }

    #[test]
    fn corpus_without_annotations() {
        let r = MetadataResolver::new(&[corpus(0, "c", "CORPUS"), corpus(1, "d", "DOCUMENT")], &[]);
        assert!(r.resolve(&text(1, 0, "x")).is_err());
    }
}
