//! Bounded per-vertex reachable sets
//!
//! Arena layout: one slot per dense vertex index, each slot a sorted array
//! of at most `bound` targets, plus a parallel size counter.

use crate::graph::VertexIdx;

/// Reachability store with a fixed per-vertex bound
///
/// Invariants held at all times:
/// - `size(v) == targets(v).len()`
/// - `size(v) <= bound`
/// - sets only grow
#[derive(Debug, Clone)]
pub struct ReachabilityStore {
    bound: usize,
    sets: Vec<Vec<VertexIdx>>,
    sizes: Vec<usize>,
}

impl ReachabilityStore {
    /// Create an empty store for `vertex_count` dense vertices
    pub fn new(vertex_count: usize, bound: usize) -> Self {
        Self {
            bound,
            sets: vec![Vec::new(); vertex_count],
            sizes: vec![0; vertex_count],
        }
    }

    /// Add `target` to `reachable(vertex)`
    ///
    /// Returns `true` iff the target was absent and the vertex had room for
    /// it. A saturated vertex rejects every insertion without looking at
    /// its set.
    pub fn insert(&mut self, vertex: VertexIdx, target: VertexIdx) -> bool {
        if self.sizes[vertex] >= self.bound {
            return false;
        }
        let set = &mut self.sets[vertex];
        match set.binary_search(&target) {
            Ok(_) => false,
            Err(pos) => {
                set.insert(pos, target);
                self.sizes[vertex] += 1;
                if self.sizes[vertex] == self.bound {
                    tracing::debug!(vertex, bound = self.bound, "vertex saturated");
                }
                true
            }
        }
    }

    pub fn contains(&self, vertex: VertexIdx, target: VertexIdx) -> bool {
        self.sets[vertex].binary_search(&target).is_ok()
    }

    pub fn size(&self, vertex: VertexIdx) -> usize {
        self.sizes[vertex]
    }

    pub fn is_saturated(&self, vertex: VertexIdx) -> bool {
        self.sizes[vertex] >= self.bound
    }

    /// Targets of `vertex`, ascending by dense index
    pub fn targets(&self, vertex: VertexIdx) -> &[VertexIdx] {
        &self.sets[vertex]
    }

    pub fn bound(&self) -> usize {
        self.bound
    }

    pub fn vertex_count(&self) -> usize {
        self.sets.len()
    }

    /// Number of stored `(vertex, target)` pairs
    pub fn pair_count(&self) -> usize {
        self.sizes.iter().sum()
    }

    /// Vertices whose set has reached the bound
    pub fn saturated_count(&self) -> usize {
        self.sizes.iter().filter(|&&s| s >= self.bound).count()
    }

    /// All pairs, vertex ascending then target ascending
    pub fn pairs(&self) -> impl Iterator<Item = (VertexIdx, VertexIdx)> + '_ {
        self.sets
            .iter()
            .enumerate()
            .flat_map(|(v, set)| set.iter().map(move |&t| (v, t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_respects_bound() {
        let mut store = ReachabilityStore::new(2, 2);
        assert!(store.insert(0, 5));
        assert!(store.insert(0, 3));
        assert!(store.is_saturated(0));
        assert!(!store.insert(0, 1));
        assert_eq!(store.size(0), 2);
        assert_eq!(store.targets(0), &[3, 5]);
        assert!(!store.contains(0, 1));
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut store = ReachabilityStore::new(1, 4);
        assert!(store.insert(0, 7));
        assert!(!store.insert(0, 7));
        assert_eq!(store.size(0), 1);
        assert_eq!(store.pair_count(), 1);
    }

    #[test]
    fn test_zero_bound_accepts_nothing() {
        let mut store = ReachabilityStore::new(3, 0);
        assert!(!store.insert(1, 2));
        assert_eq!(store.pair_count(), 0);
        assert_eq!(store.saturated_count(), 3);
    }

    #[test]
    fn test_size_tracks_set_length() {
        let mut store = ReachabilityStore::new(4, 3);
        let attempts = [(0, 1), (0, 2), (0, 1), (2, 3), (0, 3), (0, 0), (2, 3)];
        for (v, t) in attempts {
            store.insert(v, t);
            for vertex in 0..store.vertex_count() {
                assert_eq!(store.size(vertex), store.targets(vertex).len());
                assert!(store.size(vertex) <= store.bound());
            }
        }
        assert_eq!(store.saturated_count(), 1);
        let pairs: Vec<_> = store.pairs().collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (2, 3)]);
    }
}
