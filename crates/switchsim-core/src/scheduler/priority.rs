//! # Strict Priority
//!
//! Contended outputs go to the front packet with the strictly highest
//! priority class. Equal priorities resolve to the lowest input port.

use super::{Discipline, DisciplineKind, Scheduled, arbitrate_per_output, first_max_by_key};
use crate::queue::PortQueues;

#[derive(Debug, Default)]
pub struct StrictPriority;

impl StrictPriority {
    pub fn new() -> Self {
        Self
    }
}

impl Discipline for StrictPriority {
    fn kind(&self) -> DisciplineKind {
        DisciplineKind::Priority
    }

    fn select(&mut self, queues: &mut PortQueues) -> Vec<Scheduled> {
        arbitrate_per_output(queues, |contended| {
            first_max_by_key(contended, |c| c.priority)
        })
    }
}
