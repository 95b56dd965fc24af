/*! Token text reconciliation.

Each virtual token of a document gets its text from the two segmentation layers (see [SchemaVersion]).
For a token at position `p`, the first segment of each layer (in file order) covering `p` is looked up,
and the token text is resolved from the pair:

| text | edition | token |
|---|---|---|
| - | - | empty |
| - | yes | edition span |
| yes | - | text span |
| single | single | text span |
| single | multi | edition span |
| multi | single | text span |
| multi | multi | fragment of a split span, see [split_token] |

Documents are independent from each other and only read the [NodeStore],
so they can be reconciled in parallel.
!*/
use std::collections::BTreeMap;

use log::{debug, info};
use rayon::prelude::*;

use crate::schema::SchemaVersion;
use crate::store::NodeStore;
use crate::tables::rows::{DocumentId, NodeId};
use crate::tables::Node;

pub mod split;

use split::{find_overlap, split_fragments};

/// Token bounds and text of a segmentation node covering a virtual token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub left: i64,
    pub right: i64,
    pub span: &'a str,
}

impl<'a> Segment<'a> {
    pub fn new(left: i64, right: i64, span: &'a str) -> Self {
        Self { left, right, span }
    }

    fn is_single(&self) -> bool {
        self.left == self.right
    }

    /// number of virtual tokens covered, [None] on unusable bounds
    fn width(&self) -> Option<usize> {
        let width = self.right.checked_sub(self.left)?.checked_add(1)?;
        usize::try_from(width).ok()
    }

    /// position of `position` inside the segment
    fn offset(&self, position: i64) -> Option<i64> {
        position.checked_sub(self.left)
    }

    fn fits(&self, fragments: &[String]) -> bool {
        self.width() == Some(fragments.len())
    }

    fn same_bounds(&self, other: &Segment) -> bool {
        self.left == other.left && self.right == other.right
    }
}

/// A segmentation node whose bounds could not be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BoundsError(NodeId);

/// First segment covering `position`.
///
/// The scan stops at the first node with unusable bounds, which makes the whole lookup fail.
fn find_covering<'n>(
    segments: &[&'n Node],
    position: Option<i64>,
) -> Result<Option<Segment<'n>>, BoundsError> {
    for seg in segments {
        let p = position.ok_or(BoundsError(seg.id))?;
        let left = seg.left_token.ok_or(BoundsError(seg.id))?;
        if left > p {
            continue;
        }
        let right = seg.right_token.ok_or(BoundsError(seg.id))?;
        if right >= p {
            return Ok(Some(Segment::new(left, right, &seg.span)));
        }
    }
    Ok(None)
}

/// Same as [find_covering], a failed lookup counts as "no segment".
fn covering<'n>(segments: &[&'n Node], position: Option<i64>) -> Option<Segment<'n>> {
    find_covering(segments, position).unwrap_or_else(|BoundsError(node)| {
        debug!("unusable token bounds on segment {}, ignoring layer", node);
        None
    })
}

/// Take the fragment at `idx`, or an empty string if there is none.
fn fragment(mut fragments: Vec<String>, idx: Option<i64>) -> String {
    idx.and_then(|idx| usize::try_from(idx).ok())
        .and_then(|idx| fragments.get_mut(idx))
        .map(std::mem::take)
        .unwrap_or_default()
}

/// Resolve the text of the token at `position` from its covering segments.
pub fn resolve_token(position: i64, text: Option<Segment>, edition: Option<Segment>) -> String {
    match (text, edition) {
        (None, None) => String::new(),
        (None, Some(edition)) => edition.span.to_string(),
        (Some(text), None) => text.span.to_string(),
        (Some(text), Some(edition)) => match (text.is_single(), edition.is_single()) {
            (true, true) => text.span.to_string(),
            (true, false) => edition.span.to_string(),
            (false, true) => text.span.to_string(),
            (false, false) => split_token(position, text, edition),
        },
    }
}

/// Both segments span several tokens: split them into fragments and pick one.
///
/// With identical bounds (`gap` tokens):
/// 1. text fragments if there are `gap` of them,
/// 1. else edition fragments if there are `gap` of them,
/// 1. else text fragments padded/truncated to `gap`, indexed from the edition's left bound.
///    The position is always within the bounds, so truncation never changes the pick
///    and a missing fragment reads as empty.
///
/// With different bounds, each side is checked against its own width,
/// and if neither fits the [find_overlap] of both spans is used.
pub fn split_token(position: i64, text: Segment, edition: Segment) -> String {
    let text_fragments = split_fragments(text.span);
    let edition_fragments = split_fragments(edition.span);

    if text.same_bounds(&edition) {
        if text.fits(&text_fragments) {
            fragment(text_fragments, text.offset(position))
        } else if edition.fits(&edition_fragments) {
            fragment(edition_fragments, edition.offset(position))
        } else {
            fragment(text_fragments, edition.offset(position))
        }
    } else if text.fits(&text_fragments) {
        fragment(text_fragments, text.offset(position))
    } else if edition.fits(&edition_fragments) {
        fragment(edition_fragments, edition.offset(position))
    } else {
        find_overlap(text.span, edition.span).to_string()
    }
}

/// Rebuilds the canonical token text of every document.
pub struct Reconciler<'s> {
    store: &'s NodeStore,
    schema: SchemaVersion,
}

impl<'s> Reconciler<'s> {
    pub fn new(store: &'s NodeStore, schema: SchemaVersion) -> Self {
        Self { store, schema }
    }

    /// Token texts of a document, in virtual token order.
    ///
    /// Never fails: tokens without any covering segment are empty.
    pub fn document_tokens(&self, document: DocumentId) -> Vec<String> {
        let texts = self.store.segments(document, self.schema.text_layer());
        let editions = self.store.segments(document, self.schema.edition_layer());

        let tokens: Vec<String> = self
            .store
            .virtual_tokens(document)
            .iter()
            .map(|token| {
                let position = token.token_index;
                let text = covering(&texts, position);
                let edition = covering(&editions, position);
                match position {
                    Some(p) => resolve_token(p, text, edition),
                    None => String::new(),
                }
            })
            .collect();

        debug!(
            "document {}: {} tokens ({} text, {} edition segments)",
            document,
            tokens.len(),
            texts.len(),
            editions.len()
        );
        tokens
    }

    /// Token texts of all documents.
    pub fn tokens_per_document(&self, parallel: bool) -> BTreeMap<DocumentId, Vec<String>> {
        let documents: Vec<DocumentId> = self.store.documents().collect();

        let tokens: BTreeMap<DocumentId, Vec<String>> = if parallel {
            documents
                .into_par_iter()
                .map(|doc| (doc, self.document_tokens(doc)))
                .collect()
        } else {
            documents
                .into_iter()
                .map(|doc| (doc, self.document_tokens(doc)))
                .collect()
        };

        info!(
            "reconciled {} documents ({} tokens)",
            tokens.len(),
            tokens.values().map(Vec::len).sum::<usize>()
        );
        tokens
    }
}
