//! Pipelines.
//!
//! [Extractor] turns the tables of a single corpus into parsed documents,
//! [ExtractCorpora] and [Inspect] run over every corpus found in a folder.
//! All of them implement the light [pipeline::Pipeline] trait.
mod corpora;
mod extractor;
pub mod pipeline;

pub use corpora::{CorpusSummary, ExtractCorpora, Inspect};
pub use extractor::Extractor;
pub use pipeline::Pipeline;
