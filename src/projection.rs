/*! Projection of node annotations onto token offsets.

Every node annotation is mapped through its node's token range onto the offsets of the node's document:
`begin` is the begin of the left token, `end` the end of the right token.
Each document then gets one synthetic [TOKEN_ANNOTATION] per virtual token, after the real ones.
!*/
use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::offsets::{calc_offsets, plain_text, Span};
use crate::store::NodeStore;
use crate::tables::rows::DocumentId;
use crate::tables::{Node, NodeAnnotation};

/// Name of the synthetic per-token annotation.
pub const TOKEN_ANNOTATION: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
    pub value: String,
    pub begin: usize,
    pub end: usize,
}

impl Annotation {
    pub fn new(name: impl Into<String>, value: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            begin: span.begin,
            end: span.end,
        }
    }
}

/// Annotations and plain text of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub annotations: Vec<Annotation>,
    pub plain_text: String,
}

/// Character span covered by a node.
fn node_span(node: &Node, offsets: Option<&Vec<Span>>) -> Result<Span, Error> {
    let out_of_range = |token| Error::TokenOutOfRange {
        node: node.id,
        document: node.corpus_ref,
        token,
    };

    let offsets = offsets.ok_or_else(|| out_of_range(node.left_token))?;
    let (left, right) = node.token_range().ok_or_else(|| out_of_range(None))?;
    if left > right {
        return Err(Error::InvalidTokenRange {
            node: node.id,
            left,
            right,
        });
    }

    let lookup = |token: i64| {
        usize::try_from(token)
            .ok()
            .and_then(|idx| offsets.get(idx))
            .ok_or_else(|| out_of_range(Some(token)))
    };

    Ok(Span::new(lookup(left)?.begin, lookup(right)?.end))
}

/// Project annotations onto the reconciled tokens of each document.
///
/// Fails if an annotation's node cannot be resolved to exactly one node,
/// or if the node's token range does not fit its document.
pub fn project(
    store: &NodeStore,
    annotations: &[NodeAnnotation],
    tokens: &BTreeMap<DocumentId, Vec<String>>,
) -> Result<BTreeMap<DocumentId, Projection>, Error> {
    let offsets: BTreeMap<DocumentId, Vec<Span>> = tokens
        .iter()
        .map(|(doc, tokens)| (*doc, calc_offsets(tokens)))
        .collect();

    let mut per_doc: BTreeMap<DocumentId, Vec<Annotation>> = BTreeMap::new();
    for anno in annotations {
        let node = store.node(anno.node_ref)?;
        let span = node_span(node, offsets.get(&node.corpus_ref))?;
        per_doc
            .entry(node.corpus_ref)
            .or_default()
            .push(Annotation::new(&anno.name, &anno.value, span));
    }

    let projections = tokens
        .iter()
        .map(|(doc, tokens)| {
            let mut annotations = per_doc.remove(doc).unwrap_or_default();
            let nb_annotations = annotations.len();
            annotations.extend(
                tokens
                    .iter()
                    .zip(&offsets[doc])
                    .map(|(token, span)| Annotation::new(TOKEN_ANNOTATION, token, *span)),
            );
            debug!(
                "document {}: {} annotations, {} tokens",
                doc,
                nb_annotations,
                tokens.len()
            );

            let projection = Projection {
                annotations,
                plain_text: plain_text(tokens),
            };
            (*doc, projection)
        })
        .collect();

    Ok(projections)
}
