//! # switchsim-core
//!
//! Building blocks for a time-stepped, input-queued packet switch model.
//!
//! ## Crate structure
//!
//! - [`packet`] — Packet record and its one-shot timing finalization
//! - [`traffic`] — Uniform, priority-biased and bursty packet generation
//! - [`queue`] — Bounded per-input-port FIFO bank
//! - [`scheduler`] — Per-tick selection disciplines (priority, weighted, round robin, iSLIP)
//! - [`config`] — TOML run configuration
//! - [`error`] — Configuration and selection errors

pub mod config;
pub mod error;
pub mod packet;
pub mod queue;
pub mod scheduler;
pub mod traffic;

pub use config::SimConfig;
pub use error::{ConfigError, SelectionError};
pub use packet::Packet;
pub use queue::PortQueues;
pub use scheduler::{Discipline, DisciplineKind, Scheduled};
