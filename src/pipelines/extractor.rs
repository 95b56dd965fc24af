//! Whole-corpus extraction
//!
//! Runs the full chain on the tables of one corpus:
//! 1. Schema detection from the node table (fails if neither segmentation pair is found).
//! 1. Token reconciliation for every document, in parallel by default.
//! 1. Offset computation and annotation projection.
//! 1. Metadata resolution. Failures there only leave the document without metadata.
//!
//! Any other failure aborts the whole corpus: there is no partial result.
use std::collections::{BTreeMap, BTreeSet};

use log::info;

use crate::document::Document;
use crate::error::Error;
use crate::metadata::MetadataResolver;
use crate::projection::project;
use crate::reconcile::Reconciler;
use crate::schema::SchemaVersion;
use crate::store::NodeStore;
use crate::tables::rows::DocumentId;
use crate::tables::{NodeAnnotation, TableSources, Tables, TextEntry};

use super::Pipeline;

pub struct Extractor {
    store: NodeStore,
    annotations: Vec<NodeAnnotation>,
    texts: Vec<TextEntry>,
    metadata: MetadataResolver,
    schema: SchemaVersion,
    parallel: bool,
}

impl Extractor {
    /// Index the tables and detect the schema version.
    pub fn new(tables: Tables) -> Result<Self, Error> {
        let Tables {
            nodes,
            node_annotations,
            corpora,
            corpus_annotations,
            texts,
        } = tables;

        let store = NodeStore::new(nodes);
        let schema = SchemaVersion::from_store(&store)?;
        let metadata = MetadataResolver::new(&corpora, &corpus_annotations);

        Ok(Self {
            store,
            annotations: node_annotations,
            texts,
            metadata,
            schema,
            parallel: true,
        })
    }

    /// Import raw table contents, then see [Self::new].
    pub fn from_sources(sources: &TableSources) -> Result<Self, Error> {
        Self::new(Tables::import(sources)?)
    }

    /// Reconcile documents in parallel (default) or one after the other.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn schema(&self) -> SchemaVersion {
        self.schema
    }

    /// Number of documents holding virtual tokens.
    pub fn nb_documents(&self) -> usize {
        self.store.documents().count()
    }

    /// Distinct node annotation names.
    pub fn annotation_names(&self) -> BTreeSet<&str> {
        self.annotations
            .iter()
            .map(|anno| anno.name.as_str())
            .collect()
    }

    /// Reconciled token texts of every document.
    pub fn tokens(&self) -> BTreeMap<DocumentId, Vec<String>> {
        Reconciler::new(&self.store, self.schema).tokens_per_document(self.parallel)
    }
}

impl Pipeline<BTreeMap<DocumentId, Document>> for Extractor {
    fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn run(&self) -> Result<BTreeMap<DocumentId, Document>, Error> {
        info!(
            "relANNIS {}: {} nodes, {} annotations",
            self.schema,
            self.store.len(),
            self.annotations.len()
        );

        let tokens = self.tokens();
        let projections = project(&self.store, &self.annotations, &tokens)?;
        let mut metadata = self.metadata.resolve_all(&self.texts);

        let documents: BTreeMap<DocumentId, Document> = projections
            .into_iter()
            .map(|(id, projection)| (id, Document::new(id, projection, metadata.remove(&id))))
            .collect();

        info!(
            "{} documents ({} with metadata)",
            documents.len(),
            documents.values().filter(|d| d.metadata().is_some()).count()
        );
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources() -> TableSources {
        TableSources {
            node: [
                "0\t0\t1\tdefault_layer\tt0\t0\t3\t0\t0\t0\tNULL\tNULL\tNULL\tFALSE",
                "1\t0\t1\tdefault_layer\tt1\t4\t8\t1\t1\t1\tNULL\tNULL\tNULL\tFALSE",
                "2\t0\t1\tdefault_layer\ts2\t0\t8\tNULL\t0\t1\t0\ttext\tNew York\tFALSE",
                "3\t0\t1\tdefault_layer\ts3\t0\t8\tNULL\t0\t1\t0\tedition\tNY\tFALSE",
            ]
            .join("\n"),
            node_annotation: "0\tdefault_ns\tpos\tNE\n3\tdefault_ns\tedition\tNY\n".to_string(),
            corpus: "0\troot\tCORPUS\tNULL\t0\t3\tTRUE\n1\tdoc\tDOCUMENT\tNULL\t1\t2\tFALSE\n"
                .to_string(),
            corpus_annotation: "0\tNULL\tlanguage\ten\n".to_string(),
            text: "1\t0\tsText1\tNew York\n".to_string(),
        }
    }

    #[test]
    fn run_corpus() {
        let extractor = Extractor::from_sources(&sources()).unwrap();
        assert_eq!(extractor.schema(), SchemaVersion::V1_2);
        assert_eq!(extractor.nb_documents(), 1);

        let docs = extractor.run().unwrap();
        let doc = &docs[&1];
        assert_eq!(doc.plain_text(), "New York");
        let names: Vec<&str> = doc.annotations().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["pos", "edition", "token", "token"]);
        assert_eq!(doc.metadata().unwrap()["doc-name"], "doc");
        assert_eq!(doc.metadata().unwrap()["language"], "en");
    }

    #[test]
    fn sequential_and_parallel_agree() {
        let par = Extractor::from_sources(&sources()).unwrap().run().unwrap();
        let seq = Extractor::from_sources(&sources())
            .unwrap()
            .parallel(false)
            .run()
            .unwrap();
        assert_eq!(par, seq);
    }

    #[test]
    fn unknown_version_aborts() {
        let mut sources = sources();
        sources.node = sources.node.replace("edition", "norm");
        assert!(matches!(
            Extractor::from_sources(&sources),
            Err(Error::UnknownSchemaVersion { .. })
        ));
    }

    #[test]
    fn duplicate_node_rejected() {
        let mut sources = sources();
        let first = sources.node.lines().next().unwrap().to_string();
        sources.node = format!("{}\n{}", first, sources.node);
        assert!(matches!(
            Extractor::from_sources(&sources),
            Err(Error::DuplicateNode { id: 0 })
        ));
    }

    #[test]
    fn metadata_failure_is_recovered() {
        let mut sources = sources();
        sources.corpus_annotation = String::new();
        let docs = Extractor::from_sources(&sources).unwrap().run().unwrap();
        assert!(docs[&1].metadata().is_none());
        assert_eq!(docs[&1].plain_text(), "New York");
    }
}
