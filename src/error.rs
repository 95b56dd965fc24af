//! Error enum
use std::fmt;
use std::path::PathBuf;

use crate::tables::Table;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Serde(serde_json::Error),
    Glob(glob::GlobError),
    GlobPattern(glob::PatternError),

    /// A line still has the wrong arity after repair, or a field does not coerce.
    MalformedRow {
        table: Table,
        line: usize,
        reason: String,
    },
    /// Two node rows share the same id.
    DuplicateNode {
        id: i64,
    },
    /// Two node annotations share the same `(node_ref, name)` key.
    DuplicateAnnotation {
        node: i64,
        name: String,
    },
    /// Neither `text`/`edition` nor `tok_dipl`/`tok_anno` are present.
    UnknownSchemaVersion {
        seg_names: Vec<String>,
    },
    /// A node id resolved to zero or several node rows.
    NodeLookup {
        id: i64,
        found: usize,
    },
    /// A token position has no entry in its document's offset table.
    TokenOutOfRange {
        node: i64,
        document: i64,
        token: Option<i64>,
    },
    InvalidTokenRange {
        node: i64,
        left: i64,
        right: i64,
    },
    MissingMetadata(String),
    MissingTable {
        corpus: PathBuf,
        table: Table,
    },
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Serde(e) => write!(f, "serialization error: {}", e),
            Error::Glob(e) => write!(f, "glob error: {}", e),
            Error::GlobPattern(e) => write!(f, "glob pattern error: {}", e),
            Error::MalformedRow {
                table,
                line,
                reason,
            } => write!(
                f,
                "malformed row in {} at line {}: {}",
                table.file_name(),
                line,
                reason
            ),
            Error::DuplicateNode { id } => write!(
                f,
                "node id {} appears more than once in {}",
                id,
                Table::Node.file_name()
            ),
            Error::DuplicateAnnotation { node, name } => write!(
                f,
                "duplicate annotation {:?} on node {} in {}",
                name,
                node,
                Table::NodeAnnotation.file_name()
            ),
            Error::UnknownSchemaVersion { seg_names } => write!(
                f,
                "unknown relANNIS version: expected segmentations text/edition (1.2) or tok_dipl/tok_anno (1.0), found {:?}",
                seg_names
            ),
            Error::NodeLookup { id, found } => {
                write!(f, "node id {} resolved to {} rows (expected 1)", id, found)
            }
            Error::TokenOutOfRange {
                node,
                document,
                token,
            } => write!(
                f,
                "node {} points to token {:?} which is not a token of document {}",
                node, token, document
            ),
            Error::InvalidTokenRange { node, left, right } => write!(
                f,
                "node {} has an inverted token range [{}, {}]",
                node, left, right
            ),
            Error::MissingMetadata(msg) => write!(f, "missing metadata: {}", msg),
            Error::MissingTable { corpus, table } => {
                write!(f, "corpus {:?} has no {}", corpus, table.file_name())
            }
            Error::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Serde(e) => Some(e),
            Error::Glob(e) => Some(e),
            Error::GlobPattern(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Glob(e)
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::GlobPattern(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_row_names_file_and_line() {
        let e = Error::MalformedRow {
            table: Table::Node,
            line: 12,
            reason: "expected 14 fields, got 13".to_string(),
        };
        let msg = e.to_string();
        assert!(msg.contains("node.annis"));
        assert!(msg.contains("line 12"));
    }

    #[test]
    fn unknown_version_names_both_pairs() {
        let e = Error::UnknownSchemaVersion {
            seg_names: vec!["NULL".to_string()],
        };
        let msg = e.to_string();
        assert!(msg.contains("text/edition"));
        assert!(msg.contains("tok_dipl/tok_anno"));
    }
}
