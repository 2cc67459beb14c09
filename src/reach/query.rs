//! Degree classification and query answering over a bounded relation
//!
//! A vertex with a non-empty set is *light* while it has room left and
//! *heavy* once saturated. For every query edge `i -> z`:
//!
//! - light `z`: every target of `z` answers `i` directly;
//! - heavy `z`: the targets of `z` are only a truncated sample, so they seed
//!   an expansion set `T(i)` that is closed under forward link edges, and
//!   every terminal successor of a vertex in `T(i)` answers `i`.

use crate::graph::{EdgeIndex, VertexIdx};
use crate::reach::ReachabilityStore;
use serde::Serialize;
use std::collections::BTreeSet;

/// Degree class of a vertex with a non-empty bounded set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DegreeClass {
    Light,
    Heavy,
}

impl DegreeClass {
    pub fn name(&self) -> &'static str {
        match self {
            DegreeClass::Light => "light",
            DegreeClass::Heavy => "heavy",
        }
    }
}

/// Classify `vertex`; `None` when its set is empty
pub fn classify(store: &ReachabilityStore, vertex: VertexIdx) -> Option<DegreeClass> {
    match store.size(vertex) {
        0 => None,
        _ if store.is_saturated(vertex) => Some(DegreeClass::Heavy),
        _ => Some(DegreeClass::Light),
    }
}

/// Query answers as `(source, class, target)`, sorted in that order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryAnswers {
    answers: BTreeSet<(VertexIdx, DegreeClass, VertexIdx)>,
}

impl QueryAnswers {
    pub fn iter(&self) -> impl Iterator<Item = (VertexIdx, DegreeClass, VertexIdx)> + '_ {
        self.answers.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn count(&self, class: DegreeClass) -> usize {
        self.answers.iter().filter(|(_, c, _)| *c == class).count()
    }
}

/// Answer every query edge of `index` against a converged store
pub fn answer_queries(index: &EdgeIndex, store: &ReachabilityStore) -> QueryAnswers {
    let n = index.vertex_count();
    let mut answers = BTreeSet::new();
    let mut heavy_seeds: Vec<Vec<VertexIdx>> = vec![Vec::new(); n];

    for &(source, via) in index.query_edges() {
        match classify(store, via) {
            Some(DegreeClass::Light) => {
                for &target in store.targets(via) {
                    answers.insert((source, DegreeClass::Light, target));
                }
            }
            Some(DegreeClass::Heavy) => heavy_seeds[source].extend_from_slice(store.targets(via)),
            None => {}
        }
    }

    // One visited buffer for all expansions, reset by stamping
    let mut visited: Vec<u32> = vec![0; n];
    let mut stamp: u32 = 0;
    let mut stack: Vec<VertexIdx> = Vec::new();

    for (source, seeds) in heavy_seeds.iter().enumerate() {
        if seeds.is_empty() {
            continue;
        }
        stamp = stamp.wrapping_add(1);
        if stamp == 0 {
            visited.iter_mut().for_each(|v| *v = 0);
            stamp = 1;
        }
        stack.clear();
        for &seed in seeds {
            if visited[seed] != stamp {
                visited[seed] = stamp;
                stack.push(seed);
            }
        }
        while let Some(vertex) = stack.pop() {
            for &target in index.terminal_targets(vertex) {
                answers.insert((source, DegreeClass::Heavy, target));
            }
            for &next in index.forward_link(vertex) {
                if visited[next] != stamp {
                    visited[next] = stamp;
                    stack.push(next);
                }
            }
        }
    }

    let result = QueryAnswers { answers };
    tracing::info!(
        queries = index.query_edges().len(),
        light = result.count(DegreeClass::Light),
        heavy = result.count(DegreeClass::Heavy),
        "answered queries"
    );
    result
}
