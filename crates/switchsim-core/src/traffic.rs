//! # Traffic Source
//!
//! Produces one packet per call. The three policies draw priority, service
//! time and destination the same way and differ only in how priority may be
//! promoted afterwards.

use rand::Rng;
use rand::RngExt;

use crate::packet::{MAX_PRIORITY, MAX_PROCESSING_TIME, MIN_PROCESSING_TIME, Packet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrafficPolicy {
    /// All fields drawn independently and uniformly.
    Uniform,
    /// Even packet ids are promoted to the maximum priority.
    NonUniform,
    /// Every packet generated during a burst tick is promoted to the maximum priority.
    Bursty,
}

impl TrafficPolicy {
    pub const ALL: [TrafficPolicy; 3] = [
        TrafficPolicy::Uniform,
        TrafficPolicy::NonUniform,
        TrafficPolicy::Bursty,
    ];

    /// Uniform pick among the three policies.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficPolicy::Uniform => "uniform",
            TrafficPolicy::NonUniform => "non-uniform",
            TrafficPolicy::Bursty => "bursty",
        }
    }
}

impl std::fmt::Display for TrafficPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Packet generator for a switch with `num_ports` output ports.
#[derive(Debug, Clone, Copy)]
pub struct TrafficSource {
    num_ports: usize,
}

impl TrafficSource {
    /// A zero port count is raised to one so output ports can always be drawn.
    pub fn new(num_ports: usize) -> Self {
        Self {
            num_ports: num_ports.max(1),
        }
    }

    pub fn num_ports(&self) -> usize {
        self.num_ports
    }

    /// Generates packet `id` arriving at tick `now`.
    ///
    /// `burst` is the tick-wide burst flag; only [`TrafficPolicy::Bursty`] reads it.
    pub fn generate(
        &self,
        rng: &mut impl Rng,
        id: u64,
        now: u64,
        policy: TrafficPolicy,
        burst: bool,
    ) -> Packet {
        let priority = rng.random_range(0..=MAX_PRIORITY);
        let processing_time = rng.random_range(MIN_PROCESSING_TIME..=MAX_PROCESSING_TIME);
        let output_port = rng.random_range(0..self.num_ports);

        let priority = match policy {
            TrafficPolicy::Uniform => priority,
            TrafficPolicy::NonUniform if id % 2 == 0 => MAX_PRIORITY,
            TrafficPolicy::Bursty if burst => MAX_PRIORITY,
            _ => priority,
        };

        Packet::new(id, priority, now, processing_time, output_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn generated_fields_stay_in_range() {
        let source = TrafficSource::new(8);
        let mut rng = seeded_rng();
        for id in 1..=500 {
            let policy = TrafficPolicy::random(&mut rng);
            let pkt = source.generate(&mut rng, id, 17, policy, id % 3 == 0);
            assert_eq!(pkt.id, id);
            assert_eq!(pkt.arrival_time, 17);
            assert!(pkt.priority <= MAX_PRIORITY);
            assert!((MIN_PROCESSING_TIME..=MAX_PROCESSING_TIME).contains(&pkt.processing_time));
            assert!(pkt.output_port < 8);
            assert!(!pkt.is_finalized());
        }
    }

    #[test]
    fn zero_ports_falls_back_to_a_single_output() {
        let source = TrafficSource::new(0);
        assert_eq!(source.num_ports(), 1);
        let mut rng = seeded_rng();
        for id in 1..=20 {
            let pkt = source.generate(&mut rng, id, 0, TrafficPolicy::Uniform, false);
            assert_eq!(pkt.output_port, 0);
        }
        assert_eq!(TrafficSource::new(8).num_ports(), 8);
    }

    #[test]
    fn non_uniform_promotes_even_ids() {
        let source = TrafficSource::new(4);
        let mut rng = seeded_rng();
        for id in (2..200).step_by(2) {
            let pkt = source.generate(&mut rng, id, 0, TrafficPolicy::NonUniform, false);
            assert_eq!(pkt.priority, MAX_PRIORITY);
        }
    }

    #[test]
    fn bursty_promotes_only_during_burst() {
        let source = TrafficSource::new(4);
        let mut rng = seeded_rng();
        for id in 1..100 {
            let pkt = source.generate(&mut rng, id, 0, TrafficPolicy::Bursty, true);
            assert_eq!(pkt.priority, MAX_PRIORITY);
        }

        let below_max = (1..200)
            .map(|id| source.generate(&mut rng, id, 0, TrafficPolicy::Bursty, false))
            .filter(|p| p.priority < MAX_PRIORITY)
            .count();
        assert!(below_max > 0);
    }

    #[test]
    fn uniform_ignores_burst_flag() {
        let source = TrafficSource::new(4);
        let mut rng = seeded_rng();
        let below_max = (1..200)
            .map(|id| source.generate(&mut rng, id, 0, TrafficPolicy::Uniform, true))
            .filter(|p| p.priority < MAX_PRIORITY)
            .count();
        assert!(below_max > 0);
    }

    #[test]
    fn same_seed_same_packets() {
        let source = TrafficSource::new(8);
        let mut a = seeded_rng();
        let mut b = seeded_rng();
        for id in 1..50 {
            let pa = source.generate(&mut a, id, 1, TrafficPolicy::Uniform, false);
            let pb = source.generate(&mut b, id, 1, TrafficPolicy::Uniform, false);
            assert_eq!(pa, pb);
        }
    }

    #[test]
    fn random_policy_covers_all_variants() {
        let mut rng = seeded_rng();
        let mut seen = [false; 3];
        for _ in 0..100 {
            match TrafficPolicy::random(&mut rng) {
                TrafficPolicy::Uniform => seen[0] = true,
                TrafficPolicy::NonUniform => seen[1] = true,
                TrafficPolicy::Bursty => seen[2] = true,
            }
        }
        assert_eq!(seen, [true; 3]);
    }
}
