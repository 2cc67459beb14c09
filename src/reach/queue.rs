//! Work queue of freshly derived reachability facts

use crate::graph::VertexIdx;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// `target` has just been added to `reachable(vertex)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fact {
    pub vertex: VertexIdx,
    pub target: VertexIdx,
}

/// Order in which pending facts are drained
///
/// The order decides which candidates win the last slots of a vertex that
/// saturates; with a fixed order the output is reproducible.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueOrder {
    /// Oldest fact first
    #[default]
    Fifo,
    /// Newest fact first
    Lifo,
}

/// Owned queue of pending facts
#[derive(Debug, Clone)]
pub struct WorkQueue {
    order: QueueOrder,
    facts: VecDeque<Fact>,
}

impl WorkQueue {
    pub fn new(order: QueueOrder) -> Self {
        Self {
            order,
            facts: VecDeque::new(),
        }
    }

    pub fn push(&mut self, vertex: VertexIdx, target: VertexIdx) {
        self.facts.push_back(Fact { vertex, target });
    }

    pub fn pop(&mut self) -> Option<Fact> {
        match self.order {
            QueueOrder::Fifo => self.facts.pop_front(),
            QueueOrder::Lifo => self.facts.pop_back(),
        }
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(mut queue: WorkQueue) -> Vec<VertexIdx> {
        let mut out = Vec::new();
        while let Some(fact) = queue.pop() {
            out.push(fact.vertex);
        }
        out
    }

    #[test]
    fn test_fifo_and_lifo_orders() {
        let mut fifo = WorkQueue::new(QueueOrder::Fifo);
        let mut lifo = WorkQueue::new(QueueOrder::Lifo);
        for v in 0..3 {
            fifo.push(v, 9);
            lifo.push(v, 9);
        }
        assert_eq!(fifo.len(), 3);
        assert_eq!(drain(fifo), vec![0, 1, 2]);
        assert_eq!(drain(lifo), vec![2, 1, 0]);
    }

    #[test]
    fn test_order_serde_names() {
        let order: QueueOrder = serde_json::from_str("\"lifo\"").unwrap();
        assert_eq!(order, QueueOrder::Lifo);
        assert_eq!(serde_json::to_string(&QueueOrder::Fifo).unwrap(), "\"fifo\"");
    }
}
