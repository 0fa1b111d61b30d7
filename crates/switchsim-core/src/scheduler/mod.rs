//! Per-tick scheduling engine for the input-queued switch.
//!
//! Every discipline looks only at the front packet of each input queue and
//! removes exactly the packets it selects, matched by id against the queue
//! they were peeked from. Disciplines own their cross-tick state (cursors,
//! pointers, weights) and never draw randomness.
//!
//! - [`priority::StrictPriority`] and [`weighted::WeightedSelect`] admit at
//!   most one packet per output port per tick.
//! - [`round_robin::RoundRobin`] and [`islip::Islip`] admit at most one packet
//!   per tick across the whole switch.

pub mod islip;
pub mod priority;
pub mod round_robin;
pub mod weighted;

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::config::SimConfig;
use crate::error::SelectionError;
use crate::packet::Packet;
use crate::queue::PortQueues;

/// A packet removed from its input queue by a discipline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduled {
    pub input_port: usize,
    pub packet: Packet,
}

pub trait Discipline: Send {
    fn kind(&self) -> DisciplineKind;

    /// Selects this tick's packets and removes them from `queues`.
    ///
    /// An empty bank yields an empty selection.
    fn select(&mut self, queues: &mut PortQueues) -> Vec<Scheduled>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisciplineKind {
    Priority,
    Weighted,
    RoundRobin,
    Islip,
}

impl DisciplineKind {
    pub const ALL: [DisciplineKind; 4] = [
        DisciplineKind::Priority,
        DisciplineKind::Weighted,
        DisciplineKind::RoundRobin,
        DisciplineKind::Islip,
    ];

    /// Maps the startup menu choice (1..=4) to a discipline.
    pub fn from_choice(choice: i64) -> Result<Self, SelectionError> {
        match choice {
            1 => Ok(DisciplineKind::Priority),
            2 => Ok(DisciplineKind::Weighted),
            3 => Ok(DisciplineKind::RoundRobin),
            4 => Ok(DisciplineKind::Islip),
            other => Err(SelectionError::Invalid(other.to_string())),
        }
    }

    pub fn choice(&self) -> u8 {
        match self {
            DisciplineKind::Priority => 1,
            DisciplineKind::Weighted => 2,
            DisciplineKind::RoundRobin => 3,
            DisciplineKind::Islip => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisciplineKind::Priority => "Priority",
            DisciplineKind::Weighted => "Weighted Fair Queuing (WFQ)",
            DisciplineKind::RoundRobin => "Round Robin",
            DisciplineKind::Islip => "iSLIP",
        }
    }

    /// Whether the discipline may admit one packet per output port, as opposed
    /// to a single packet for the whole switch.
    pub fn admits_per_output(&self) -> bool {
        matches!(self, DisciplineKind::Priority | DisciplineKind::Weighted)
    }

    /// Creates the discipline with fresh state sized for `config`.
    pub fn build(&self, config: &SimConfig) -> Box<dyn Discipline> {
        match self {
            DisciplineKind::Priority => Box::new(priority::StrictPriority::new()),
            DisciplineKind::Weighted => {
                Box::new(weighted::WeightedSelect::new(config.weights.clone()))
            }
            DisciplineKind::RoundRobin => Box::new(round_robin::RoundRobin::new(config.num_ports)),
            DisciplineKind::Islip => Box::new(islip::Islip::new(config.num_ports)),
        }
    }
}

impl FromStr for DisciplineKind {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let choice: i64 = trimmed
            .parse()
            .map_err(|_| SelectionError::Invalid(trimmed.to_string()))?;
        Self::from_choice(choice)
    }
}

impl std::fmt::Display for DisciplineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Front-of-queue packet competing for an output port.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    pub input_port: usize,
    pub packet_id: u64,
    pub priority: u8,
    pub output_port: usize,
}

/// Groups the front packet of every non-empty input queue by destination.
///
/// Within a group, candidates appear in ascending input-port order.
pub(crate) fn group_by_output(queues: &PortQueues) -> BTreeMap<usize, Vec<Candidate>> {
    let mut groups: BTreeMap<usize, Vec<Candidate>> = BTreeMap::new();
    for input_port in 0..queues.num_ports() {
        if let Some(pkt) = queues.peek_front(input_port) {
            groups.entry(pkt.output_port).or_default().push(Candidate {
                input_port,
                packet_id: pkt.id,
                priority: pkt.priority,
                output_port: pkt.output_port,
            });
        }
    }
    groups
}

/// Runs one per-output-port arbitration round.
///
/// Uncontended outputs admit their only candidate; contended ones admit the
/// candidate `pick` returns. Winners are removed from their input queue.
pub(crate) fn arbitrate_per_output(
    queues: &mut PortQueues,
    mut pick: impl FnMut(&[Candidate]) -> Option<Candidate>,
) -> Vec<Scheduled> {
    let groups = group_by_output(queues);
    let mut admitted = Vec::with_capacity(groups.len());

    for (output_port, candidates) in groups {
        let winner = match candidates.as_slice() {
            [only] => Some(*only),
            contended => {
                tracing::trace!(output_port, contenders = contended.len(), "output contention");
                pick(contended)
            }
        };
        let Some(winner) = winner else {
            continue;
        };
        if let Some(packet) = queues.pop_matching(winner.input_port, winner.packet_id) {
            admitted.push(Scheduled {
                input_port: winner.input_port,
                packet,
            });
        }
    }
    admitted
}

/// First candidate maximizing `key`; later equal keys never displace it.
pub(crate) fn first_max_by_key<K: Ord>(
    candidates: &[Candidate],
    mut key: impl FnMut(&Candidate) -> K,
) -> Option<Candidate> {
    let mut best: Option<(K, Candidate)> = None;
    for candidate in candidates {
        let k = key(candidate);
        match &best {
            Some((best_key, _)) if k <= *best_key => {}
            _ => best = Some((k, *candidate)),
        }
    }
    best.map(|(_, c)| c)
}
