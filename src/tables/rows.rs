/*! Typed rows of the five relANNIS tables.

Each row type knows its [Table] and builds itself from already-split fields.
Missing values are exported as the `NULL` literal.
!*/
use super::Table;

pub type NodeId = i64;
pub type DocumentId = i64;
pub type CorpusId = i64;

/// Literal used by relANNIS for missing values.
pub const NULL: &str = "NULL";

/// Layer holding the virtual tokens.
pub const DEFAULT_LAYER: &str = "default_layer";

/// A row that can be read from a relANNIS table.
pub trait Row: Sized {
    const TABLE: Table;

    /// build the row from exactly [Table::columns] fields.
    ///
    /// Errors carry a human readable reason, file and line are added by the caller.
    fn from_fields(fields: &[&str]) -> Result<Self, String>;
}

fn int(fields: &[&str], idx: usize, column: &str) -> Result<i64, String> {
    fields[idx]
        .parse()
        .map_err(|_| format!("column {} is not an integer: {:?}", column, fields[idx]))
}

fn nullable_int(fields: &[&str], idx: usize, column: &str) -> Result<Option<i64>, String> {
    if fields[idx] == NULL {
        Ok(None)
    } else {
        int(fields, idx, column).map(Some)
    }
}

fn boolean(fields: &[&str], idx: usize, column: &str) -> Result<bool, String> {
    match fields[idx].to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Ok(true),
        "false" | "f" | "0" => Ok(false),
        _ => Err(format!(
            "column {} is not a boolean: {:?}",
            column, fields[idx]
        )),
    }
}

/// A graph node (`node.annis`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub text_ref: i64,
    /// document the node belongs to
    pub corpus_ref: DocumentId,
    pub layer: String,
    pub name: String,
    pub left: i64,
    pub right: i64,
    pub token_index: Option<i64>,
    pub left_token: Option<i64>,
    pub right_token: Option<i64>,
    pub seg_index: Option<i64>,
    pub seg_name: String,
    pub span: String,
    pub root: bool,
}

impl Node {
    /// Virtual tokens are the non-root `default_layer` nodes without segmentation.
    pub fn is_virtual_token(&self) -> bool {
        self.layer == DEFAULT_LAYER && self.seg_name == NULL && !self.root
    }

    /// Both token bounds, if the node has them.
    pub fn token_range(&self) -> Option<(i64, i64)> {
        self.left_token.zip(self.right_token)
    }
}

impl Row for Node {
    const TABLE: Table = Table::Node;

    fn from_fields(f: &[&str]) -> Result<Self, String> {
        Ok(Self {
            id: int(f, 0, "id")?,
            text_ref: int(f, 1, "text_ref")?,
            corpus_ref: int(f, 2, "corpus_ref")?,
            layer: f[3].to_string(),
            name: f[4].to_string(),
            left: int(f, 5, "left")?,
            right: int(f, 6, "right")?,
            token_index: nullable_int(f, 7, "token_index")?,
            left_token: nullable_int(f, 8, "left_token")?,
            right_token: nullable_int(f, 9, "right_token")?,
            seg_index: nullable_int(f, 10, "seg_index")?,
            seg_name: f[11].to_string(),
            span: f[12].to_string(),
            root: boolean(f, 13, "root")?,
        })
    }
}

/// Annotation of a node (`node_annotation.annis`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAnnotation {
    pub node_ref: NodeId,
    pub namespace: String,
    pub name: String,
    pub value: String,
}

impl Row for NodeAnnotation {
    const TABLE: Table = Table::NodeAnnotation;

    fn from_fields(f: &[&str]) -> Result<Self, String> {
        Ok(Self {
            node_ref: int(f, 0, "node_ref")?,
            namespace: f[1].to_string(),
            name: f[2].to_string(),
            value: f[3].to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusType {
    Corpus,
    Document,
    Other(String),
}

impl From<&str> for CorpusType {
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "corpus" => CorpusType::Corpus,
            "document" => CorpusType::Document,
            _ => CorpusType::Other(s.to_string()),
        }
    }
}

/// Entry of the corpus tree (`corpus.annis`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    pub id: CorpusId,
    pub name: String,
    pub kind: CorpusType,
    pub version: Option<String>,
    pub pre: i64,
    pub post: i64,
    pub top_level: bool,
}

impl Row for CorpusEntry {
    const TABLE: Table = Table::Corpus;

    fn from_fields(f: &[&str]) -> Result<Self, String> {
        Ok(Self {
            id: int(f, 0, "id")?,
            name: f[1].to_string(),
            kind: CorpusType::from(f[2]),
            version: (f[3] != NULL).then(|| f[3].to_string()),
            pre: int(f, 4, "pre")?,
            post: int(f, 5, "post")?,
            top_level: boolean(f, 6, "top_level")?,
        })
    }
}

/// Key/value metadata of a corpus (`corpus_annotation.annis`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusAnnotation {
    pub corpus_ref: CorpusId,
    pub namespace: String,
    pub name: String,
    pub value: String,
}

impl Row for CorpusAnnotation {
    const TABLE: Table = Table::CorpusAnnotation;

    fn from_fields(f: &[&str]) -> Result<Self, String> {
        Ok(Self {
            corpus_ref: int(f, 0, "corpus_ref")?,
            namespace: f[1].to_string(),
            name: f[2].to_string(),
            value: f[3].to_string(),
        })
    }
}

/// Physical text of a document (`text.annis`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry {
    pub corpus_ref: DocumentId,
    pub id: i64,
    pub name: String,
    pub text: String,
}

impl Row for TextEntry {
    const TABLE: Table = Table::Text;

    fn from_fields(f: &[&str]) -> Result<Self, String> {
        Ok(Self {
            corpus_ref: int(f, 0, "corpus_ref")?,
            id: int(f, 1, "id")?,
            name: f[2].to_string(),
            text: f[3].to_string(),
        })
    }
}
