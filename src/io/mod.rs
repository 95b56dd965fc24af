/*!
# IO utilities

Reading relANNIS corpora from directories, and writing parsed documents as JSON lines.
!*/
pub mod reader;
pub mod writer;

pub use reader::{discover, CorpusFiles};
pub use writer::{WriterDoc, WriterTrait};
