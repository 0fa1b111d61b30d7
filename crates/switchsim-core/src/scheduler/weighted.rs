//! # Weighted Selection
//!
//! Contended outputs go to the candidate whose destination carries the
//! highest configured weight. Weights are a static per-output-port table for
//! the whole run; there is no credit or deficit accounting. Because every
//! candidate in a contention group shares the same destination, the pick
//! reduces to the lowest input port.

use super::{Discipline, DisciplineKind, Scheduled, arbitrate_per_output, first_max_by_key};
use crate::queue::PortQueues;

#[derive(Debug, Clone)]
pub struct WeightedSelect {
    weights: Vec<u32>,
}

impl WeightedSelect {
    pub fn new(weights: Vec<u32>) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    /// Ports beyond the table weigh zero.
    pub fn weight_of(&self, output_port: usize) -> u32 {
        self.weights.get(output_port).copied().unwrap_or(0)
    }
}

impl Discipline for WeightedSelect {
    fn kind(&self) -> DisciplineKind {
        DisciplineKind::Weighted
    }

    fn select(&mut self, queues: &mut PortQueues) -> Vec<Scheduled> {
        let table = &*self;
        arbitrate_per_output(queues, |contended| {
            first_max_by_key(contended, |c| table.weight_of(c.output_port))
        })
    }
}
