//! # iSLIP (single-grant)
//!
//! Keeps one rotating pointer per scan slot. Slot `i` proposes input port
//! `(pointer[i] + i) % N`; the first slot whose proposal has a queued packet
//! is granted, its pointer advances, and the scan stops. This is one linear
//! pass with at most one grant per tick, not the iterative
//! request/grant/accept matching of full iSLIP.

use super::{Discipline, DisciplineKind, Scheduled};
use crate::queue::PortQueues;

#[derive(Debug, Clone)]
pub struct Islip {
    pointers: Vec<usize>,
}

impl Islip {
    pub fn new(num_ports: usize) -> Self {
        Self {
            pointers: vec![0; num_ports.max(1)],
        }
    }

    pub fn pointers(&self) -> &[usize] {
        &self.pointers
    }
}

impl Discipline for Islip {
    fn kind(&self) -> DisciplineKind {
        DisciplineKind::Islip
    }

    fn select(&mut self, queues: &mut PortQueues) -> Vec<Scheduled> {
        let n = self.pointers.len().min(queues.num_ports());
        if n == 0 {
            return Vec::new();
        }

        for slot in 0..n {
            let input_port = (self.pointers[slot] + slot) % n;
            let Some(id) = queues.peek_front(input_port).map(|p| p.id) else {
                continue;
            };
            if let Some(packet) = queues.pop_matching(input_port, id) {
                self.pointers[slot] = (self.pointers[slot] + 1) % n;
                tracing::trace!(slot, input_port, pointer = self.pointers[slot], "islip grant");
                return vec![Scheduled { input_port, packet }];
            }
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::test_util::bank;

    #[test]
    fn first_slot_grants_and_advances() {
        let mut queues = bank(4, &[(0, 1, 0, 0), (0, 2, 0, 0), (1, 3, 0, 0)]);
        let mut islip = Islip::new(4);

        let selected = islip.select(&mut queues);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].input_port, 0);
        assert_eq!(islip.pointers(), &[1, 0, 0, 0]);

        // Slot 0 now proposes input 1.
        let selected = islip.select(&mut queues);
        assert_eq!(selected[0].input_port, 1);
        assert_eq!(islip.pointers(), &[2, 0, 0, 0]);
    }

    #[test]
    fn later_slot_grants_when_earlier_proposals_are_empty() {
        let mut queues = bank(4, &[(3, 1, 0, 0)]);
        let mut islip = Islip::new(4);
        let selected = islip.select(&mut queues);
        assert_eq!(selected[0].input_port, 3);
        assert_eq!(islip.pointers(), &[0, 0, 0, 1]);
    }

    #[test]
    fn at_most_one_grant_per_tick() {
        let mut queues = bank(4, &[(0, 1, 0, 0), (1, 2, 0, 1), (2, 3, 0, 2), (3, 4, 0, 3)]);
        let mut islip = Islip::new(4);
        for remaining in (0..4).rev() {
            assert_eq!(islip.select(&mut queues).len(), 1);
            assert_eq!(queues.total_len(), remaining);
        }
    }

    #[test]
    fn no_grant_leaves_pointers_untouched() {
        let mut queues = bank(4, &[]);
        let mut islip = Islip::new(4);
        assert!(islip.select(&mut queues).is_empty());
        assert_eq!(islip.pointers(), &[0; 4]);
    }
}
