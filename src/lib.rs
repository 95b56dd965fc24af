/*!
# relannis

Rebuilds the plain text of relANNIS corpus exports, together with
character offsets for every token, projected annotations and document metadata.

The chain goes from the raw tables to parsed [document::Document]s:

1. [tables]: tab-separated table import, with line repair.
1. [schema]: relANNIS version detection.
1. [reconcile]: canonical token text from the two segmentation layers.
1. [offsets] and [projection]: token offsets and annotation spans.
1. [metadata]: document metadata inherited from the corpus tree.

[pipelines::Extractor] runs the whole chain on a single corpus,
[pipelines::ExtractCorpora] on every corpus found in a folder.
!*/
pub mod document;
pub mod error;
pub mod io;
pub mod metadata;
pub mod offsets;
pub mod pipelines;
pub mod projection;
pub mod reconcile;
pub mod schema;
pub mod store;
pub mod tables;
