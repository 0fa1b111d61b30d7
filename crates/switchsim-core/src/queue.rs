//! # Port Queue Bank
//!
//! One bounded FIFO per input port. Only the front of each queue is ever a
//! scheduling candidate, so removal is "pop the front if its id matches"
//! rather than a search.

use std::collections::VecDeque;

use crate::packet::Packet;

#[derive(Debug, Clone)]
pub struct PortQueues {
    queues: Vec<VecDeque<Packet>>,
    capacity: usize,
}

impl PortQueues {
    pub fn new(num_ports: usize, capacity: usize) -> Self {
        Self {
            queues: (0..num_ports)
                .map(|_| VecDeque::with_capacity(capacity))
                .collect(),
            capacity,
        }
    }

    pub fn num_ports(&self) -> usize {
        self.queues.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends `packet` to the queue of input `port`.
    ///
    /// A full queue is left untouched and the packet is handed back as `Err`.
    /// A port outside the bank has no room at all and rejects the same way.
    pub fn try_enqueue(&mut self, port: usize, packet: Packet) -> Result<(), Packet> {
        let capacity = self.capacity;
        match self.queues.get_mut(port) {
            Some(queue) if queue.len() < capacity => {
                queue.push_back(packet);
                Ok(())
            }
            _ => Err(packet),
        }
    }

    /// `None` for an empty queue or a port outside the bank.
    pub fn peek_front(&self, port: usize) -> Option<&Packet> {
        self.queues.get(port)?.front()
    }

    /// Removes the front of `port` only if it carries `packet_id`.
    pub fn pop_matching(&mut self, port: usize, packet_id: u64) -> Option<Packet> {
        let queue = self.queues.get_mut(port)?;
        match queue.front() {
            Some(front) if front.id == packet_id => queue.pop_front(),
            _ => None,
        }
    }

    /// Zero for a port outside the bank.
    pub fn len(&self, port: usize) -> usize {
        self.queues.get(port).map_or(0, VecDeque::len)
    }

    /// A port outside the bank counts as full, matching [`try_enqueue`](Self::try_enqueue).
    pub fn is_full(&self, port: usize) -> bool {
        self.queues
            .get(port)
            .is_none_or(|queue| queue.len() >= self.capacity)
    }

    /// Packets queued across all input ports.
    pub fn total_len(&self) -> usize {
        self.queues.iter().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.iter().all(VecDeque::is_empty)
    }

    /// Empties every queue, returning what was left in port order.
    pub fn drain(&mut self) -> Vec<Packet> {
        self.queues.iter_mut().flat_map(|q| q.drain(..)).collect()
    }
}
