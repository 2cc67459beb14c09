//! Edge index: parses a labeled edge file into dense link adjacency
//!
//! Vertex ids from the file are interned to dense indices assigned in
//! ascending id order, so iterating a dense range visits vertices lowest id
//! first. Every adjacency list is sorted and deduplicated.

use crate::error::{ReachError, Result};
use crate::graph::{EdgeRole, Label, LabelSet, VertexId, VertexIdx};
use serde::Serialize;
use std::path::Path;

/// Raw edge counts per role, as read from the file (duplicates included)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EdgeCounts {
    pub terminal: usize,
    pub link: usize,
    pub query: usize,
    pub ignored: usize,
}

/// Immutable index over the terminal, link and query edges of a graph
#[derive(Debug, Clone)]
pub struct EdgeIndex {
    /// Dense index -> input vertex id, ascending
    vertices: Vec<VertexId>,
    forward_link: Vec<Vec<VertexIdx>>,
    reverse_link: Vec<Vec<VertexIdx>>,
    /// Terminal successors per vertex, ascending
    terminal_out: Vec<Vec<VertexIdx>>,
    /// Terminal edges in input order
    terminal: Vec<(VertexIdx, VertexIdx)>,
    /// Query edges in input order
    query: Vec<(VertexIdx, VertexIdx)>,
    counts: EdgeCounts,
}

impl EdgeIndex {
    /// Load and index an edge file
    ///
    /// A missing file is reported as [`ReachError::InputNotFound`]; any
    /// malformed line aborts the load with [`ReachError::Parse`].
    pub fn load(path: &Path, labels: &LabelSet) -> Result<Self> {
        if !path.exists() {
            return Err(ReachError::InputNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|e| ReachError::io(path, e))?;
        let index = Self::parse(&text, labels)?;
        tracing::info!(
            path = %path.display(),
            vertices = index.vertex_count(),
            terminal = index.counts.terminal,
            link = index.counts.link,
            query = index.counts.query,
            ignored = index.counts.ignored,
            "loaded edge index"
        );
        Ok(index)
    }

    /// Index edge text (`source label target` per line)
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn parse(text: &str, labels: &LabelSet) -> Result<Self> {
        let mut edges: Vec<(VertexId, EdgeRole, VertexId)> = Vec::new();
        let mut ids: Vec<VertexId> = Vec::new();
        let mut counts = EdgeCounts::default();

        for (line_no, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let (source, label, target) = parse_line(line_no + 1, line)?;
            ids.push(source);
            ids.push(target);

            match labels.role(&label) {
                Some(role) => {
                    match role {
                        EdgeRole::Terminal => counts.terminal += 1,
                        EdgeRole::Link => counts.link += 1,
                        EdgeRole::Query => counts.query += 1,
                    }
                    edges.push((source, role, target));
                }
                None => counts.ignored += 1,
            }
        }

        ids.sort_unstable();
        ids.dedup();

        let n = ids.len();
        let mut forward_link = vec![Vec::new(); n];
        let mut reverse_link = vec![Vec::new(); n];
        let mut terminal_out = vec![Vec::new(); n];
        let mut terminal = Vec::with_capacity(counts.terminal);
        let mut query = Vec::with_capacity(counts.query);

        let dense = |id: VertexId| -> VertexIdx {
            // Every id seen while parsing was pushed into `ids`
            ids.binary_search(&id).unwrap_or_else(|pos| pos)
        };

        for (source, role, target) in edges {
            let (s, t) = (dense(source), dense(target));
            match role {
                EdgeRole::Terminal => {
                    terminal.push((s, t));
                    terminal_out[s].push(t);
                }
                EdgeRole::Query => query.push((s, t)),
                EdgeRole::Link => {
                    forward_link[s].push(t);
                    reverse_link[t].push(s);
                }
            }
        }

        for list in forward_link
            .iter_mut()
            .chain(reverse_link.iter_mut())
            .chain(terminal_out.iter_mut())
        {
            list.sort_unstable();
            list.dedup();
        }

        Ok(EdgeIndex {
            vertices: ids,
            forward_link,
            reverse_link,
            terminal_out,
            terminal,
            query,
            counts,
        })
    }

    /// Number of distinct vertices seen in the file
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Input id of a dense index
    pub fn vertex_id(&self, idx: VertexIdx) -> VertexId {
        self.vertices[idx]
    }

    /// Dense index of an input id, if the vertex occurs in the file
    pub fn index_of(&self, id: VertexId) -> Option<VertexIdx> {
        self.vertices.binary_search(&id).ok()
    }

    /// Link successors of `idx`, ascending
    pub fn forward_link(&self, idx: VertexIdx) -> &[VertexIdx] {
        &self.forward_link[idx]
    }

    /// Link predecessors of `idx`, ascending
    pub fn reverse_link(&self, idx: VertexIdx) -> &[VertexIdx] {
        &self.reverse_link[idx]
    }

    /// Direct terminal targets of `idx`, ascending
    pub fn terminal_targets(&self, idx: VertexIdx) -> &[VertexIdx] {
        &self.terminal_out[idx]
    }

    /// Terminal edges in input order
    pub fn terminal_edges(&self) -> &[(VertexIdx, VertexIdx)] {
        &self.terminal
    }

    /// Query edges in input order
    pub fn query_edges(&self) -> &[(VertexIdx, VertexIdx)] {
        &self.query
    }

    pub fn counts(&self) -> EdgeCounts {
        self.counts
    }

    /// Distinct link edges as dense pairs
    pub fn link_edges(&self) -> impl Iterator<Item = (VertexIdx, VertexIdx)> + '_ {
        self.forward_link
            .iter()
            .enumerate()
            .flat_map(|(s, succs)| succs.iter().map(move |&t| (s, t)))
    }
}

fn parse_line(line_no: usize, line: &str) -> Result<(VertexId, Label, VertexId)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(ReachError::parse(
            line_no,
            line,
            format!("expected 3 tokens, found {}", tokens.len()),
        ));
    }
    let source = parse_vertex(line_no, line, tokens[0])?;
    let target = parse_vertex(line_no, line, tokens[2])?;
    Ok((source, Label::parse(tokens[1]), target))
}

fn parse_vertex(line_no: usize, line: &str, token: &str) -> Result<VertexId> {
    token.parse::<VertexId>().map_err(|_| {
        ReachError::parse(
            line_no,
            line,
            format!("'{}' is not a non-negative integer vertex id", token),
        )
    })
}
