//! # Round Robin
//!
//! A single cursor rotates over input ports. Each tick it advances until it
//! lands on a non-empty queue (at most one full revolution) and admits that
//! queue's front packet. One packet per tick for the whole switch.

use super::{Discipline, DisciplineKind, Scheduled};
use crate::queue::PortQueues;

#[derive(Debug, Clone)]
pub struct RoundRobin {
    num_ports: usize,
    /// Last input port served; the next scan starts just after it.
    cursor: usize,
}

impl RoundRobin {
    pub fn new(num_ports: usize) -> Self {
        Self {
            num_ports: num_ports.max(1),
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Discipline for RoundRobin {
    fn kind(&self) -> DisciplineKind {
        DisciplineKind::RoundRobin
    }

    fn select(&mut self, queues: &mut PortQueues) -> Vec<Scheduled> {
        let count = self.num_ports.min(queues.num_ports());
        if count == 0 {
            return Vec::new();
        }

        for _ in 0..count {
            self.cursor = (self.cursor + 1) % count;
            let input_port = self.cursor;
            let Some(id) = queues.peek_front(input_port).map(|p| p.id) else {
                continue;
            };
            if let Some(packet) = queues.pop_matching(input_port, id) {
                return vec![Scheduled { input_port, packet }];
            }
        }
        Vec::new()
    }
}
