//! Worklist propagation to the bounded fixpoint
//!
//! Seeding inserts every terminal edge (input order) and queues each
//! successful insertion. Each dequeued fact `(x, y)` is offered to every
//! link predecessor `w` of `x` (ascending id); a successful `insert(w, y)`
//! queues `(w, y)`. Every queued fact corresponds to one successful
//! insertion, so at most `bound * |V|` facts are ever processed and the
//! loop terminates on any link graph, cyclic or not.

use crate::graph::EdgeIndex;
use crate::reach::queue::{Fact, QueueOrder, WorkQueue};
use crate::reach::store::ReachabilityStore;
use crate::reach::{Fixpoint, RunStats, Strategy};
use serde::Serialize;

/// Engine state; `Converged` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    Running,
    Converged,
}

/// Incremental fixpoint over one edge index
///
/// Owns the store and the queue for the duration of the run.
pub struct PropagationEngine<'a> {
    index: &'a EdgeIndex,
    store: ReachabilityStore,
    queue: WorkQueue,
    stats: RunStats,
}

impl<'a> PropagationEngine<'a> {
    /// Create an engine and seed it from the index's terminal edges
    pub fn new(index: &'a EdgeIndex, bound: usize, order: QueueOrder) -> Self {
        let mut engine = PropagationEngine {
            index,
            store: ReachabilityStore::new(index.vertex_count(), bound),
            queue: WorkQueue::new(order),
            stats: RunStats::new(Strategy::Worklist, bound),
        };
        engine.seed();
        engine
    }

    fn seed(&mut self) {
        let index = self.index;
        for &(vertex, target) in index.terminal_edges() {
            self.stats.attempts += 1;
            if self.store.insert(vertex, target) {
                self.queue.push(vertex, target);
                self.stats.seed_facts += 1;
                self.stats.insertions += 1;
            }
        }
        tracing::debug!(seeds = self.stats.seed_facts, "seeded reachability store");
    }

    pub fn state(&self) -> EngineState {
        if self.queue.is_empty() {
            EngineState::Converged
        } else {
            EngineState::Running
        }
    }

    /// Facts still waiting for propagation
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn store(&self) -> &ReachabilityStore {
        &self.store
    }

    /// Process one fact; returns `None` once converged
    pub fn step(&mut self) -> Option<Fact> {
        let fact = self.queue.pop()?;
        self.stats.dequeued += 1;

        let index = self.index;
        for &pred in index.reverse_link(fact.vertex) {
            self.stats.attempts += 1;
            if self.store.insert(pred, fact.target) {
                self.stats.insertions += 1;
                self.queue.push(pred, fact.target);
            }
        }
        Some(fact)
    }

    /// Drain the queue and return the final store
    pub fn run(mut self) -> Fixpoint {
        while self.step().is_some() {}
        self.finish()
    }

    fn finish(mut self) -> Fixpoint {
        debug_assert_eq!(self.state(), EngineState::Converged);
        self.stats.rounds = 1;
        self.stats.saturated = self.store.saturated_count();
        self.stats.pairs = self.store.pair_count();
        tracing::info!(
            bound = self.stats.bound,
            seeds = self.stats.seed_facts,
            insertions = self.stats.insertions,
            dequeued = self.stats.dequeued,
            saturated = self.stats.saturated,
            "worklist propagation converged"
        );
        Fixpoint {
            store: self.store,
            stats: self.stats,
        }
    }
}
