//! Shared fixtures for reachability tests

use crate::graph::{EdgeIndex, LabelSet, VertexId};
use crate::reach::ReachabilityStore;

/// Index edge text with the default `3`/`2`/`1` labels
pub fn index(text: &str) -> EdgeIndex {
    EdgeIndex::parse(text, &LabelSet::default()).unwrap()
}

/// Symbolic labels used by the path and cycle generators: `c` terminal, `b` link
pub fn labels_bc() -> LabelSet {
    LabelSet::new("c".into(), "b".into())
}

/// Store contents as input vertex ids, sorted
pub fn id_pairs(index: &EdgeIndex, store: &ReachabilityStore) -> Vec<(VertexId, VertexId)> {
    store
        .pairs()
        .map(|(v, t)| (index.vertex_id(v), index.vertex_id(t)))
        .collect()
}
