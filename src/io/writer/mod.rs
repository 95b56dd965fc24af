/*!
# Document writing

Parsed documents are written as JSON lines, one file per corpus.
!*/
mod writer_doc;
mod writertrait;
pub use writer_doc::WriterDoc;
pub use writertrait::WriterTrait;
