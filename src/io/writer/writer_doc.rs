/*! JSON lines writer for parsed documents.

Each corpus gets a `<name>.jsonl` file at the root of the destination folder.
The file is only created on first write.
!*/
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::document::Document;
use crate::error::Error;

use super::WriterTrait;

pub struct WriterDoc {
    path: PathBuf,
    handle: Option<BufWriter<File>>,
}

impl WriterDoc {
    /// Path of the output file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn handle(&mut self) -> Result<&mut BufWriter<File>, Error> {
        if self.handle.is_none() {
            debug!("creating {:?}", self.path);
            self.handle = Some(BufWriter::new(File::create(&self.path)?));
        }
        self.handle
            .as_mut()
            .ok_or_else(|| Error::Custom(format!("could not open {:?}", self.path)))
    }
}

impl WriterTrait for WriterDoc {
    type Item = Document;

    /// Create a new writer for corpus `name`, writing in `dst`.
    fn new(dst: &Path, name: &str) -> Result<Self, Error> {
        if !dst.is_dir() {
            return Err(Error::Custom(format!(
                "destination has to be a directory: {:?}",
                dst
            )));
        }
        Ok(Self {
            path: dst.join(format!("{}.jsonl", name)),
            handle: None,
        })
    }

    /// writes the provided documents, one per line.
    fn write(&mut self, docs: Vec<Document>) -> Result<(), Error> {
        let mut docs_str = String::new();
        for doc in docs {
            docs_str += &serde_json::to_string(&doc)?;
            docs_str.push('\n');
        }
        self.handle()?.write_all(docs_str.as_bytes())?;

        Ok(())
    }

    fn write_single(&mut self, doc: &Document) -> Result<(), Error> {
        let handle = self.handle()?;
        serde_json::to_writer(&mut *handle, doc)?;
        handle.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        if let Some(handle) = &mut self.handle {
            handle.flush()?;
        }
        Ok(())
    }
}

impl Drop for WriterDoc {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            log::error!("could not flush {:?}: {}", self.path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::{BufRead, BufReader};

    use crate::metadata::Metadata;
    use crate::offsets::Span;
    use crate::projection::{Annotation, Projection};

    use super::*;

    fn gen_doc(id: i64, text: &str) -> Document {
        let projection = Projection {
            annotations: vec![Annotation::new("token", text, Span::new(0, text.chars().count()))],
            plain_text: text.to_string(),
        };
        Document::new(id, projection, Some(Metadata::new()))
    }

    #[test]
    fn write() {
        let dst = tempfile::tempdir().unwrap();
        let mut wr = WriterDoc::new(dst.path(), "ddd-ad").unwrap();
        let docs = vec![gen_doc(0, "thiu"), gen_doc(1, "uuort")];

        wr.write(docs.clone()).unwrap();
        wr.flush().unwrap();

        let f = File::open(dst.path().join("ddd-ad.jsonl")).unwrap();
        let read: Vec<Document> = BufReader::new(f)
            .lines()
            .map(|line| serde_json::from_str(&line.unwrap()).unwrap())
            .collect();
        assert_eq!(read, docs);
    }

    #[test]
    fn write_single() {
        let dst = tempfile::tempdir().unwrap();
        let path = {
            let mut wr = WriterDoc::new(dst.path(), "single").unwrap();
            wr.write_single(&gen_doc(3, "wort")).unwrap();
            wr.path().to_path_buf()
        };

        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 1);
        let doc: Document = serde_json::from_str(content.trim_end()).unwrap();
        assert_eq!(doc.id(), 3);
    }

    #[test]
    fn nothing_written_no_file() {
        let dst = tempfile::tempdir().unwrap();
        let wr = WriterDoc::new(dst.path(), "empty").unwrap();
        let path = wr.path().to_path_buf();
        drop(wr);
        assert!(!path.exists());
    }

    #[test]
    fn dst_must_be_dir() {
        let dst = tempfile::tempdir().unwrap();
        assert!(WriterDoc::new(&dst.path().join("nope"), "x").is_err());
    }
}
