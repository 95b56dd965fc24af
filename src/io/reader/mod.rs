/*! Corpus reading utilities

A corpus is a directory holding the five relANNIS tables (see [crate::tables::Table]).
[discover] walks a directory tree and groups table files by directory.
!*/
pub mod corpus;

pub use corpus::{discover, CorpusFiles};
