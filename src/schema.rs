//! relANNIS version detection from segmentation names.
use std::fmt;

use log::debug;
use serde::Serialize;

use crate::error::Error;
use crate::store::NodeStore;

/// Supported relANNIS exports, each with its pair of segmentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchemaVersion {
    /// `tok_dipl` (diplomatic) and `tok_anno` (normalized) segmentations
    #[serde(rename = "1.0")]
    V1_0,
    /// `text` and `edition` segmentations
    #[serde(rename = "1.2")]
    V1_2,
}

impl SchemaVersion {
    /// Pick the version from the set of segmentation names found in the node table.
    ///
    /// 1.2 wins when both pairs are present.
    pub fn detect<'a, I>(seg_names: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<&str> = seg_names.into_iter().collect();
        let has = |name: &str| names.iter().any(|n| *n == name);

        let version = if has("text") && has("edition") {
            SchemaVersion::V1_2
        } else if has("tok_dipl") && has("tok_anno") {
            SchemaVersion::V1_0
        } else {
            let mut seg_names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
            seg_names.sort();
            seg_names.dedup();
            return Err(Error::UnknownSchemaVersion { seg_names });
        };

        debug!("detected relANNIS {}", version);
        Ok(version)
    }

    pub fn from_store(store: &NodeStore) -> Result<Self, Error> {
        Self::detect(store.seg_names())
    }

    /// Segmentation carrying the transcribed text.
    pub fn text_layer(&self) -> &'static str {
        match self {
            SchemaVersion::V1_0 => "tok_dipl",
            SchemaVersion::V1_2 => "text",
        }
    }

    /// Segmentation carrying the edited text.
    pub fn edition_layer(&self) -> &'static str {
        match self {
            SchemaVersion::V1_0 => "tok_anno",
            SchemaVersion::V1_2 => "edition",
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVersion::V1_0 => f.write_str("1.0"),
            SchemaVersion::V1_2 => f.write_str("1.2"),
        }
    }
}
