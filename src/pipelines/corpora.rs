/*! Batch pipelines over a folder of corpora.

Each folder holding relANNIS tables is a corpus (see [crate::io::discover]).
Corpora are independent: one failing corpus is logged and skipped, the others are still processed.
!*/
use std::collections::BTreeSet;
use std::path::PathBuf;

use log::{error, info, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::error::Error;
use crate::io::{discover, CorpusFiles, WriterDoc, WriterTrait};
use crate::schema::SchemaVersion;

use super::{Extractor, Pipeline};

/// Overview of a processed corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusSummary {
    pub name: String,
    pub version: SchemaVersion,
    pub documents: usize,
    pub annotation_names: BTreeSet<String>,
}

impl CorpusSummary {
    fn new(name: &str, extractor: &Extractor, documents: usize) -> Self {
        Self {
            name: name.to_string(),
            version: extractor.schema(),
            documents,
            annotation_names: extractor
                .annotation_names()
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Run `f` on every corpus, keeping the successful results in corpus order.
fn for_each_corpus<F>(corpora: Vec<CorpusFiles>, parallel: bool, f: F) -> Vec<CorpusSummary>
where
    F: Fn(&CorpusFiles) -> Result<CorpusSummary, Error> + Sync + Send,
{
    let process = |corpus: CorpusFiles| match f(&corpus) {
        Ok(summary) => Some(summary),
        Err(e) => {
            error!("corpus {} ({:?}): {}", corpus.name(), corpus.dir(), e);
            None
        }
    };

    if parallel {
        corpora.into_par_iter().filter_map(process).collect()
    } else {
        corpora.into_iter().filter_map(process).collect()
    }
}

/// Extract every corpus found in `src` into `<dst>/<corpus name>.jsonl`.
pub struct ExtractCorpora {
    src: PathBuf,
    dst: PathBuf,
    parallel: bool,
    metadata_spans: bool,
}

impl ExtractCorpora {
    pub fn new(src: PathBuf, dst: PathBuf) -> Self {
        Self {
            src,
            dst,
            parallel: true,
            metadata_spans: false,
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Also write metadata as document-wide spans.
    pub fn metadata_spans(mut self, metadata_spans: bool) -> Self {
        self.metadata_spans = metadata_spans;
        self
    }

    fn extract(&self, corpus: &CorpusFiles) -> Result<CorpusSummary, Error> {
        info!("working on corpus {}", corpus.name());
        let extractor = Extractor::from_sources(&corpus.read()?)?.parallel(self.parallel);
        let documents = extractor.run()?;
        let nb_documents = documents.len();

        let mut writer = WriterDoc::new(&self.dst, corpus.name())?;
        let documents = documents.into_values().map(|doc| {
            if self.metadata_spans {
                doc.with_metadata_spans()
            } else {
                doc
            }
        });
        writer.write(documents.collect())?;
        writer.flush()?;

        info!(
            "corpus {}: {} documents written to {:?}",
            corpus.name(),
            nb_documents,
            writer.path()
        );
        Ok(CorpusSummary::new(corpus.name(), &extractor, nb_documents))
    }
}

impl Pipeline<Vec<CorpusSummary>> for ExtractCorpora {
    fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn run(&self) -> Result<Vec<CorpusSummary>, Error> {
        info!("relannis {}", Self::version());
        if !self.dst.exists() {
            warn!("Destination does not exist. Creating");
            std::fs::create_dir_all(&self.dst)?;
        }
        if !self.dst.is_dir() {
            return Err(Error::Custom(format!(
                "Destination has to be a directory: {:?}",
                self.dst
            )));
        }

        let corpora = discover(&self.src)?;
        let nb_corpora = corpora.len();
        let summaries = for_each_corpus(corpora, self.parallel, |corpus| self.extract(corpus));

        info!("extracted {}/{} corpora", summaries.len(), nb_corpora);
        Ok(summaries)
    }
}

/// Summarize every corpus found in `src` without reconciling tokens.
pub struct Inspect {
    src: PathBuf,
}

impl Inspect {
    pub fn new(src: PathBuf) -> Self {
        Self { src }
    }
}

impl Pipeline<Vec<CorpusSummary>> for Inspect {
    fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn run(&self) -> Result<Vec<CorpusSummary>, Error> {
        let corpora = discover(&self.src)?;
        Ok(for_each_corpus(corpora, true, |corpus| {
            let extractor = Extractor::from_sources(&corpus.read()?)?;
            let nb_documents = extractor.nb_documents();
            Ok(CorpusSummary::new(corpus.name(), &extractor, nb_documents))
        }))
    }
}
