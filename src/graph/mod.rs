// Labeled edge graph shared by the propagation engine and the query layer

pub mod index;
pub mod label;
pub mod stats;

pub use index::{EdgeCounts, EdgeIndex};
pub use label::{parse_label_arg, EdgeRole, Label, LabelSet};
pub use stats::{index_stats, link_graph, IndexStats, LinkGraph};

/// Vertex identifier as written in the edge file
pub type VertexId = usize;

/// Dense vertex index into the per-vertex arenas
///
/// Indices are assigned in ascending [`VertexId`] order by [`EdgeIndex`].
pub type VertexIdx = usize;
