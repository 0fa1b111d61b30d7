//! # Simulation Driver
//!
//! Owns the clock, the queue bank, the discipline and every counter. A tick
//! runs to completion before the next starts:
//!
//! 1. draw the tick-wide burst flag
//! 2. per input port, pick a traffic policy, generate a packet, enqueue or drop it
//! 3. run the discipline once over the whole bank
//! 4. finalize and account every selected packet against the current tick
//! 5. advance the clock
//!
//! The run completes once `max_packets` packets have been generated. Packets
//! still queued at that point are counted as drops. Selected packets are not
//! forwarded to any output queue.

use rand::RngExt as _;
use rand::SeedableRng;
use rand::rngs::StdRng;

use switchsim_core::traffic::{TrafficPolicy, TrafficSource};
use switchsim_core::{ConfigError, Discipline, DisciplineKind, PortQueues, Scheduled, SimConfig};

use crate::report::SimReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    Running,
    Completed,
}

/// What happened during one tick.
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub tick: u64,
    pub burst: bool,
    pub enqueued: usize,
    pub dropped: usize,
    /// Selected packets, already finalized with this tick's timing.
    pub scheduled: Vec<Scheduled>,
    /// Packets left across all input queues after selection.
    pub occupancy: usize,
}

pub struct Simulation {
    config: SimConfig,
    discipline: Box<dyn Discipline>,
    queues: PortQueues,
    source: TrafficSource,
    rng: StdRng,
    clock: u64,
    next_id: u64,
    state: SimState,
    report: SimReport,
}

impl Simulation {
    /// Fails if `config` does not pass [`SimConfig::validate`].
    pub fn new(config: SimConfig, kind: DisciplineKind) -> Result<Self, ConfigError> {
        let discipline = kind.build(&config);
        Self::with_discipline(config, discipline)
    }

    /// Runs `discipline` instead of one built from a [`DisciplineKind`].
    ///
    /// An invalid config is rejected here; with zero ports no packet would
    /// ever be generated and the run would never complete.
    pub fn with_discipline(
        config: SimConfig,
        discipline: Box<dyn Discipline>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let report = SimReport {
            discipline: discipline.kind().to_string(),
            seed,
            ..Default::default()
        };
        Ok(Self {
            queues: PortQueues::new(config.num_ports, config.buffer_size),
            source: TrafficSource::new(config.num_ports),
            rng: StdRng::seed_from_u64(seed),
            clock: 0,
            next_id: 1,
            state: SimState::Running,
            discipline,
            config,
            report,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == SimState::Completed
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn queues(&self) -> &PortQueues {
        &self.queues
    }

    /// Counters so far. Drain drops are only known after [`Simulation::finish`].
    pub fn report(&self) -> &SimReport {
        &self.report
    }

    /// Runs one tick. Returns `None` once the packet budget is spent.
    pub fn step(&mut self) -> Option<TickOutcome> {
        if self.state == SimState::Completed {
            return None;
        }
        if self.report.generated >= self.config.max_packets {
            self.state = SimState::Completed;
            return None;
        }

        let now = self.clock;
        let burst = self.rng.random_bool(self.config.burst_probability);

        let mut enqueued = 0;
        let mut dropped = 0;
        for input_port in 0..self.config.num_ports {
            let policy = TrafficPolicy::random(&mut self.rng);
            let id = self.next_id;
            self.next_id += 1;
            let packet = self.source.generate(&mut self.rng, id, now, policy, burst);
            let output_port = packet.output_port;
            self.report.generated += 1;

            match self.queues.try_enqueue(input_port, packet) {
                Ok(()) => {
                    enqueued += 1;
                    tracing::info!(
                        id,
                        input_port,
                        output_port,
                        %policy,
                        "packet generated"
                    );
                }
                Err(rejected) => {
                    dropped += 1;
                    self.report.dropped_during_run += 1;
                    tracing::warn!(
                        id = rejected.id,
                        input_port,
                        "buffer overflow, packet dropped"
                    );
                }
            }
        }

        let mut scheduled = self.discipline.select(&mut self.queues);
        let occupancy = self.queues.total_len();

        for entry in &mut scheduled {
            let packet = &mut entry.packet;
            packet.finalize(now);
            self.report.total_waiting_time += packet.waiting_time();
            self.report.total_turnaround_time += packet.turnaround_time();
            self.report.processed += 1;
            tracing::info!(
                id = packet.id,
                input_port = entry.input_port,
                output_port = packet.output_port,
                waiting = packet.waiting_time(),
                turnaround = packet.turnaround_time(),
                occupancy,
                "packet scheduled"
            );
        }

        self.clock += 1;
        self.report.ticks = self.clock;

        Some(TickOutcome {
            tick: now,
            burst,
            enqueued,
            dropped,
            scheduled,
            occupancy,
        })
    }

    /// Ends the run: whatever is still queued counts as dropped.
    pub fn finish(mut self) -> SimReport {
        self.state = SimState::Completed;
        let leftover = self.queues.drain().len() as u64;
        self.report.dropped_at_drain = leftover;
        tracing::info!(
            discipline = %self.report.discipline,
            ticks = self.report.ticks,
            drained = leftover,
            "simulation completed"
        );
        self.report
    }

    /// Steps until completion, then [`finish`](Simulation::finish)es.
    pub fn run(mut self) -> SimReport {
        tracing::info!(
            discipline = %self.report.discipline,
            seed = self.report.seed,
            num_ports = self.config.num_ports,
            buffer_size = self.config.buffer_size,
            max_packets = self.config.max_packets,
            "simulation starting"
        );
        while self.step().is_some() {}
        self.finish()
    }
}
