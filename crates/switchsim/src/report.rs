//! # Run Report
//!
//! Aggregate counters for one simulation run. Derived ratios return 0.0
//! when their denominator is zero.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimReport {
    /// Discipline name.
    pub discipline: String,
    /// Seed the traffic RNG was initialized with.
    pub seed: u64,
    /// Ticks elapsed.
    pub ticks: u64,
    /// Packets created, enqueued or not.
    pub generated: u64,
    /// Packets selected by the discipline.
    pub processed: u64,
    /// Packets rejected by a full input queue.
    pub dropped_during_run: u64,
    /// Packets still queued when the run ended.
    pub dropped_at_drain: u64,
    pub total_waiting_time: u64,
    pub total_turnaround_time: u64,
}

impl SimReport {
    pub fn dropped(&self) -> u64 {
        self.dropped_during_run + self.dropped_at_drain
    }

    pub fn drop_rate_percent(&self) -> f64 {
        if self.generated == 0 {
            0.0
        } else {
            self.dropped() as f64 / self.generated as f64 * 100.0
        }
    }

    pub fn mean_waiting_time(&self) -> f64 {
        if self.processed == 0 {
            0.0
        } else {
            self.total_waiting_time as f64 / self.processed as f64
        }
    }

    pub fn mean_turnaround_time(&self) -> f64 {
        if self.processed == 0 {
            0.0
        } else {
            self.total_turnaround_time as f64 / self.processed as f64
        }
    }

    /// Processed packets per tick.
    pub fn throughput(&self) -> f64 {
        if self.ticks == 0 {
            0.0
        } else {
            self.processed as f64 / self.ticks as f64
        }
    }

    /// `generated == processed + dropped_during_run + dropped_at_drain`.
    pub fn is_conserved(&self) -> bool {
        self.generated == self.processed + self.dropped()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&ReportJson {
            report: self,
            dropped: self.dropped(),
            drop_rate_percent: self.drop_rate_percent(),
            mean_waiting_time: self.mean_waiting_time(),
            mean_turnaround_time: self.mean_turnaround_time(),
            throughput: self.throughput(),
        })
    }
}

#[derive(Serialize)]
struct ReportJson<'a> {
    #[serde(flatten)]
    report: &'a SimReport,
    dropped: u64,
    drop_rate_percent: f64,
    mean_waiting_time: f64,
    mean_turnaround_time: f64,
    throughput: f64,
}

impl std::fmt::Display for SimReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Simulation completed! ({})", self.discipline)?;
        writeln!(f, "Total Packets Processed: {}", self.processed)?;
        writeln!(f, "Total Packets Dropped: {}", self.dropped())?;
        writeln!(f, "Total Packets Generated: {}", self.generated)?;
        writeln!(f, "Packet Drop Rate: {:.2}%", self.drop_rate_percent())?;
        writeln!(f, "Average Waiting Time: {:.2}", self.mean_waiting_time())?;
        writeln!(f, "Average Turnaround Time: {:.2}", self.mean_turnaround_time())?;
        write!(
            f,
            "Queue Throughput: {:.3} packets per unit time",
            self.throughput()
        )
    }
}
