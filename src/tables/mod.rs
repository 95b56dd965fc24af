/*! relANNIS table importer.

Parses the five tab-separated relANNIS files into typed relations.
Rows are kept in file order, which later stages rely on (first-match segment lookup, corpus numbering).
!*/
use std::collections::HashSet;
use std::fmt;

use log::debug;

use crate::error::Error;

mod repair;
pub mod rows;

pub use repair::repair_line;
pub use rows::{
    CorpusAnnotation, CorpusEntry, CorpusType, Node, NodeAnnotation, Row, TextEntry,
};

/// The five tables of a relANNIS export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Node,
    NodeAnnotation,
    Corpus,
    CorpusAnnotation,
    Text,
}

impl Table {
    pub const ALL: [Table; 5] = [
        Table::Node,
        Table::NodeAnnotation,
        Table::Corpus,
        Table::CorpusAnnotation,
        Table::Text,
    ];

    /// expected number of columns
    pub fn columns(&self) -> usize {
        match self {
            Table::Node => 14,
            Table::NodeAnnotation => 4,
            Table::Corpus => 7,
            Table::CorpusAnnotation => 4,
            Table::Text => 4,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Table::Node => "node.annis",
            Table::NodeAnnotation => "node_annotation.annis",
            Table::Corpus => "corpus.annis",
            Table::CorpusAnnotation => "corpus_annotation.annis",
            Table::Text => "text.annis",
        }
    }

    pub fn from_file_name(name: &str) -> Option<Table> {
        Table::ALL.into_iter().find(|t| t.file_name() == name)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Parse the content of a single table.
///
/// Blank lines are dropped, lines with a wrong tab count go through [repair_line].
/// A line that still has the wrong arity is a [Error::MalformedRow].
pub fn parse_table<T: Row>(content: &str) -> Result<Vec<T>, Error> {
    let columns = T::TABLE.columns();
    let mut rows = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_nb = idx + 1;
        let line = match repair_line(line, columns) {
            Some(line) => line,
            None => continue,
        };

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != columns {
            return Err(Error::MalformedRow {
                table: T::TABLE,
                line: line_nb,
                reason: format!("expected {} fields, got {}", columns, fields.len()),
            });
        }

        let row = T::from_fields(&fields).map_err(|reason| Error::MalformedRow {
            table: T::TABLE,
            line: line_nb,
            reason,
        })?;
        rows.push(row);
    }

    debug!("{}: {} rows", T::TABLE, rows.len());
    Ok(rows)
}

/// Raw content of the five tables of one corpus.
#[derive(Debug, Clone, Default)]
pub struct TableSources {
    pub node: String,
    pub node_annotation: String,
    pub corpus: String,
    pub corpus_annotation: String,
    pub text: String,
}

/// Typed relations of one corpus.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub nodes: Vec<Node>,
    pub node_annotations: Vec<NodeAnnotation>,
    pub corpora: Vec<CorpusEntry>,
    pub corpus_annotations: Vec<CorpusAnnotation>,
    pub texts: Vec<TextEntry>,
}

impl Tables {
    /// Import all five tables.
    ///
    /// Fails on the first malformed row, if a node id appears twice,
    /// or if a `(node_ref, name)` annotation key appears twice.
    pub fn import(sources: &TableSources) -> Result<Self, Error> {
        let tables = Self {
            nodes: parse_table(&sources.node)?,
            node_annotations: parse_table(&sources.node_annotation)?,
            corpora: parse_table(&sources.corpus)?,
            corpus_annotations: parse_table(&sources.corpus_annotation)?,
            texts: parse_table(&sources.text)?,
        };
        tables.check_node_ids()?;
        tables.check_annotation_keys()?;
        Ok(tables)
    }

    fn check_node_ids(&self) -> Result<(), Error> {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node.id) {
                return Err(Error::DuplicateNode { id: node.id });
            }
        }
        Ok(())
    }

    fn check_annotation_keys(&self) -> Result<(), Error> {
        let mut seen = HashSet::with_capacity(self.node_annotations.len());
        for anno in &self.node_annotations {
            if !seen.insert((anno.node_ref, anno.name.as_str())) {
                return Err(Error::DuplicateAnnotation {
                    node: anno.node_ref,
                    name: anno.name.clone(),
                });
            }
        }
        Ok(())
    }
}
