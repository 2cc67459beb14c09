//! Shape statistics for an edge index
//!
//! The link relation is materialized as a petgraph `DiGraph` so cycle and
//! SCC questions go through petgraph's algorithms. Cycles do not affect
//! convergence (the bound does) but they explain why many vertices end up
//! with identical sets.

use crate::graph::{EdgeCounts, EdgeIndex, VertexId};
use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

/// Link edges as a graph; node `i` carries the id of dense vertex `i`
pub type LinkGraph = DiGraph<VertexId, ()>;

/// Summary of an indexed edge file
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub vertices: usize,
    pub edges: EdgeCounts,
    /// Distinct link edges after deduplication
    pub distinct_link_edges: usize,
    /// Whether the link relation contains a cycle (self-loops included)
    pub link_cyclic: bool,
    /// Strongly connected components of the link relation
    pub link_components: usize,
    /// Largest component size
    pub largest_component: usize,
    /// Highest number of link predecessors of a single vertex
    pub max_link_in_degree: usize,
}

/// Build the link relation as a petgraph graph
pub fn link_graph(index: &EdgeIndex) -> LinkGraph {
    let mut graph = LinkGraph::with_capacity(index.vertex_count(), 0);
    for idx in 0..index.vertex_count() {
        graph.add_node(index.vertex_id(idx));
    }
    for (source, target) in index.link_edges() {
        graph.add_edge(NodeIndex::new(source), NodeIndex::new(target), ());
    }
    graph
}

/// Compute [`IndexStats`] for an index
pub fn index_stats(index: &EdgeIndex) -> IndexStats {
    let graph = link_graph(index);
    let components = tarjan_scc(&graph);

    IndexStats {
        vertices: index.vertex_count(),
        edges: index.counts(),
        distinct_link_edges: graph.edge_count(),
        link_cyclic: is_cyclic_directed(&graph),
        link_components: components.len(),
        largest_component: components.iter().map(Vec::len).max().unwrap_or(0),
        max_link_in_degree: (0..index.vertex_count())
            .map(|idx| index.reverse_link(idx).len())
            .max()
            .unwrap_or(0),
    }
}
