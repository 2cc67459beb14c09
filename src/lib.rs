// bounded-reach: bounded two-label reachability over labeled edge files
//
// Loads a `source label target` edge file, computes for every vertex a
// capped set of targets reachable through terminal and link edges by
// worklist propagation, and writes the relation back out as flat text.

pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod graph;
pub mod output;
pub mod reach;

pub use config::RunConfig;
pub use error::{ReachError, Result};
pub use graph::{EdgeIndex, Label, LabelSet, VertexId};
pub use reach::{compute, Fixpoint, ReachOptions, ReachabilityStore, RunStats, Strategy};
