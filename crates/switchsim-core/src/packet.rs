//! # Packet
//!
//! A packet is fixed at creation except for its timing, which is written
//! exactly once at the tick a discipline selects it.

/// Highest priority class a packet can carry.
pub const MAX_PRIORITY: u8 = 4;

/// Inclusive bounds of the service-time estimate, in ticks.
pub const MIN_PROCESSING_TIME: u64 = 1;
pub const MAX_PROCESSING_TIME: u64 = 10;

/// Timing captured when a packet leaves its input queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketTiming {
    /// Tick at which the packet was selected.
    pub scheduled_at: u64,
    /// Ticks spent queued (`scheduled_at - arrival_time`).
    pub waiting_time: u64,
    /// `waiting_time + processing_time`.
    pub turnaround_time: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Unique, monotonically assigned. Queue removal matches on this.
    pub id: u64,
    /// 0..=4, higher is more urgent.
    pub priority: u8,
    /// Tick of creation.
    pub arrival_time: u64,
    /// Service-time estimate in 1..=10.
    pub processing_time: u64,
    /// Destination output port, the key input queues contend over.
    pub output_port: usize,
    timing: Option<PacketTiming>,
}

impl Packet {
    pub fn new(
        id: u64,
        priority: u8,
        arrival_time: u64,
        processing_time: u64,
        output_port: usize,
    ) -> Self {
        Self {
            id,
            priority: priority.min(MAX_PRIORITY),
            arrival_time,
            processing_time,
            output_port,
            timing: None,
        }
    }

    /// Records waiting and turnaround time using `now` as the selection tick.
    ///
    /// Only the first call has any effect; returns `false` if the packet was
    /// already finalized.
    pub fn finalize(&mut self, now: u64) -> bool {
        if self.timing.is_some() {
            return false;
        }
        let waiting_time = now.saturating_sub(self.arrival_time);
        self.timing = Some(PacketTiming {
            scheduled_at: now,
            waiting_time,
            turnaround_time: waiting_time + self.processing_time,
        });
        true
    }

    pub fn timing(&self) -> Option<PacketTiming> {
        self.timing
    }

    pub fn is_finalized(&self) -> bool {
        self.timing.is_some()
    }

    /// Zero until finalized.
    pub fn waiting_time(&self) -> u64 {
        self.timing.map_or(0, |t| t.waiting_time)
    }

    /// Zero until finalized.
    pub fn turnaround_time(&self) -> u64 {
        self.timing.map_or(0, |t| t.turnaround_time)
    }
}
