//! Bounded two-label reachability
//!
//! For every vertex `v` the relation holds the targets reachable by a
//! terminal edge `v -> t`, or by a link edge `v -> z` followed by any target
//! already known for `z`, capped at `bound` targets per vertex.
//!
//! # Strategies
//!
//! - [`Strategy::Worklist`] (default): incremental propagation driven by a
//!   queue of newly derived facts, see [`PropagationEngine`].
//! - [`Strategy::Naive`]: round-based recomputation until a round inserts
//!   nothing, see [`naive::run_naive`]. Same result when no vertex saturates.
//!
//! # Tie-breaking
//!
//! When more candidates exist than a vertex has room for, the first ones
//! inserted win. Seeds are inserted in input-file order, predecessors and
//! successors are visited in ascending vertex id, and the queue order is
//! configurable ([`QueueOrder`], FIFO by default), so a given input and
//! configuration always produce the same output.

use crate::graph::EdgeIndex;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

mod engine;
pub mod naive;
pub mod query;
mod queue;
mod store;

#[cfg(test)]
pub(crate) mod test_utils;

pub use engine::{EngineState, PropagationEngine};
pub use query::{answer_queries, classify, DegreeClass, QueryAnswers};
pub use queue::{Fact, QueueOrder, WorkQueue};
pub use store::ReachabilityStore;

/// Fixpoint strategy, selected by configuration
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Incremental worklist propagation
    #[default]
    Worklist,
    /// Round-based recomputation of every vertex
    Naive,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Worklist => "worklist",
            Strategy::Naive => "naive",
        }
    }
}

/// Knobs for one fixpoint computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReachOptions {
    pub bound: usize,
    pub order: QueueOrder,
    pub strategy: Strategy,
}

impl ReachOptions {
    pub fn new(bound: usize) -> Self {
        Self {
            bound,
            order: QueueOrder::default(),
            strategy: Strategy::default(),
        }
    }
}

/// Counters collected while computing a fixpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub strategy: Strategy,
    pub bound: usize,
    /// Terminal edges that made it into the store
    pub seed_facts: usize,
    /// Successful insertions, seeds included
    pub insertions: usize,
    /// Insertion attempts, successful or not
    pub attempts: usize,
    /// Facts taken off the work queue (worklist only)
    pub dequeued: usize,
    /// Full passes over the vertices (naive), 1 for the worklist
    pub rounds: usize,
    /// Vertices whose set reached the bound
    pub saturated: usize,
    /// Pairs in the final relation
    pub pairs: usize,
}

impl RunStats {
    pub(crate) fn new(strategy: Strategy, bound: usize) -> Self {
        Self {
            strategy,
            bound,
            seed_facts: 0,
            insertions: 0,
            attempts: 0,
            dequeued: 0,
            rounds: 0,
            saturated: 0,
            pairs: 0,
        }
    }
}

/// Final store of a converged computation
#[derive(Debug, Clone)]
pub struct Fixpoint {
    pub store: ReachabilityStore,
    pub stats: RunStats,
}

/// Compute the bounded relation with the configured strategy
pub fn compute(index: &EdgeIndex, options: &ReachOptions) -> Fixpoint {
    tracing::info!(
        strategy = options.strategy.name(),
        bound = options.bound,
        order = ?options.order,
        vertices = index.vertex_count(),
        "computing bounded reachability"
    );
    match options.strategy {
        Strategy::Worklist => PropagationEngine::new(index, options.bound, options.order).run(),
        Strategy::Naive => naive::run_naive(index, options.bound),
    }
}
