/*! Indexed node arena.

Nodes are kept in file order in a single [Vec].
Secondary indices map node ids, documents and `(document, seg_name)` pairs to arena positions.
Everything is read-only once built, so a [NodeStore] can be shared across threads.
!*/
use std::collections::{BTreeMap, BTreeSet, HashMap};

use itertools::Itertools;

use crate::error::Error;
use crate::tables::rows::{DocumentId, NodeId};
use crate::tables::Node;

#[derive(Debug, Default)]
pub struct NodeStore {
    nodes: Vec<Node>,
    by_id: HashMap<NodeId, Vec<usize>>,
    // virtual tokens per document, sorted by token index
    tokens: BTreeMap<DocumentId, Vec<usize>>,
    segments: HashMap<(DocumentId, String), Vec<usize>>,
}

impl NodeStore {
    pub fn new(nodes: Vec<Node>) -> Self {
        let by_id = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id, idx))
            .into_group_map();

        // stable sort keeps file order for equal token indices
        let tokens = nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_virtual_token())
            .map(|(idx, node)| (node.corpus_ref, idx))
            .into_group_map()
            .into_iter()
            .map(|(doc, mut idxs)| {
                idxs.sort_by_key(|idx| nodes[*idx].token_index);
                (doc, idxs)
            })
            .collect();

        let segments = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| ((node.corpus_ref, node.seg_name.clone()), idx))
            .into_group_map();

        Self {
            nodes,
            by_id,
            tokens,
            segments,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve a node id to its unique row.
    pub fn node(&self, id: NodeId) -> Result<&Node, Error> {
        match self.by_id.get(&id).map(Vec::as_slice) {
            Some([idx]) => Ok(&self.nodes[*idx]),
            Some(idxs) => Err(Error::NodeLookup {
                id,
                found: idxs.len(),
            }),
            None => Err(Error::NodeLookup { id, found: 0 }),
        }
    }

    /// Documents that have at least one virtual token, in ascending id order.
    pub fn documents(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.tokens.keys().copied()
    }

    /// Virtual tokens of a document, ordered by token index.
    pub fn virtual_tokens(&self, document: DocumentId) -> Vec<&Node> {
        self.resolve(self.tokens.get(&document))
    }

    /// Nodes of a document belonging to a segmentation layer, in file order.
    pub fn segments(&self, document: DocumentId, seg_name: &str) -> Vec<&Node> {
        self.resolve(self.segments.get(&(document, seg_name.to_string())))
    }

    /// Distinct segmentation names over the whole corpus.
    pub fn seg_names(&self) -> BTreeSet<&str> {
        self.nodes.iter().map(|node| node.seg_name.as_str()).collect()
    }

    fn resolve(&self, idxs: Option<&Vec<usize>>) -> Vec<&Node> {
        idxs.map(|idxs| idxs.iter().map(|idx| &self.nodes[*idx]).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::tables::rows::{DEFAULT_LAYER, NULL};

    /// virtual token of `doc` at `index`
    pub fn token(id: NodeId, doc: DocumentId, index: i64) -> Node {
        Node {
            id,
            text_ref: 0,
            corpus_ref: doc,
            layer: DEFAULT_LAYER.to_string(),
            name: format!("tok{}", id),
            left: index,
            right: index,
            token_index: Some(index),
            left_token: Some(index),
            right_token: Some(index),
            seg_index: None,
            seg_name: NULL.to_string(),
            span: NULL.to_string(),
            root: false,
        }
    }

    /// segmentation node of `doc` covering `[left, right]`
    pub fn segment(id: NodeId, doc: DocumentId, seg_name: &str, left: i64, right: i64, span: &str) -> Node {
        Node {
            id,
            text_ref: 0,
            corpus_ref: doc,
            layer: DEFAULT_LAYER.to_string(),
            name: format!("seg{}", id),
            left,
            right,
            token_index: None,
            left_token: Some(left),
            right_token: Some(right),
            seg_index: Some(left),
            seg_name: seg_name.to_string(),
            span: span.to_string(),
            root: false,
        }
    }

    #[test]
    fn tokens_sorted_by_index() {
        let store = NodeStore::new(vec![token(1, 0, 2), token(2, 0, 0), token(3, 0, 1)]);
        let ids: Vec<NodeId> = store.virtual_tokens(0).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn segments_in_file_order() {
        let store = NodeStore::new(vec![
            segment(1, 0, "text", 2, 3, "b"),
            token(2, 0, 0),
            segment(3, 0, "text", 0, 1, "a"),
            segment(4, 1, "text", 0, 1, "other doc"),
        ]);
        let spans: Vec<&str> = store.segments(0, "text").iter().map(|n| n.span.as_str()).collect();
        assert_eq!(spans, vec!["b", "a"]);
        assert!(store.segments(0, "edition").is_empty());
    }

    #[test]
    fn node_lookup() {
        let store = NodeStore::new(vec![token(1, 0, 0), token(2, 0, 1), token(2, 0, 2)]);
        assert_eq!(store.node(1).unwrap().id, 1);
        assert!(matches!(store.node(2), Err(Error::NodeLookup { id: 2, found: 2 })));
        assert!(matches!(store.node(9), Err(Error::NodeLookup { id: 9, found: 0 })));
    }

    #[test]
    fn documents_without_tokens_are_skipped() {
        let store = NodeStore::new(vec![token(1, 4, 0), segment(2, 7, "text", 0, 0, "x")]);
        assert_eq!(store.documents().collect::<Vec<_>>(), vec![4]);
        assert_eq!(store.seg_names().into_iter().collect::<Vec<_>>(), vec!["NULL", "text"]);
    }
}
