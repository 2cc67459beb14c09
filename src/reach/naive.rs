//! Round-based recomputation of the bounded relation
//!
//! Every round visits all vertices in ascending id order and merges the
//! current sets of their link successors into their own. The computation
//! stops after the first round without a successful insertion. This repeats
//! work on stable vertices; it is kept as a reference for the worklist engine.

use crate::graph::EdgeIndex;
use crate::reach::{Fixpoint, ReachabilityStore, RunStats, Strategy};

/// Compute the bounded relation by naive iteration
pub fn run_naive(index: &EdgeIndex, bound: usize) -> Fixpoint {
    let mut store = ReachabilityStore::new(index.vertex_count(), bound);
    let mut stats = RunStats::new(Strategy::Naive, bound);

    for &(vertex, target) in index.terminal_edges() {
        stats.attempts += 1;
        if store.insert(vertex, target) {
            stats.seed_facts += 1;
            stats.insertions += 1;
        }
    }

    let mut inherited: Vec<usize> = Vec::new();
    loop {
        stats.rounds += 1;
        let mut changed = false;

        for vertex in 0..index.vertex_count() {
            for &succ in index.forward_link(vertex) {
                if store.is_saturated(vertex) {
                    break;
                }
                if succ == vertex {
                    continue;
                }
                inherited.clear();
                inherited.extend_from_slice(store.targets(succ));
                for &target in &inherited {
                    stats.attempts += 1;
                    if store.insert(vertex, target) {
                        stats.insertions += 1;
                        changed = true;
                    }
                }
            }
        }

        tracing::debug!(round = stats.rounds, insertions = stats.insertions, "naive round");
        if !changed {
            break;
        }
    }

    stats.saturated = store.saturated_count();
    stats.pairs = store.pair_count();
    tracing::info!(
        bound,
        rounds = stats.rounds,
        insertions = stats.insertions,
        saturated = stats.saturated,
        "naive iteration converged"
    );
    Fixpoint { store, stats }
}
