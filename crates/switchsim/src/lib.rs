//! # switchsim
//!
//! Time-stepped driver for the input-queued switch model in
//! [`switchsim_core`]. Each tick generates one packet per input port,
//! enqueues or drops it, runs the chosen discipline once and accounts
//! waiting and turnaround time for every packet it selects.
//!
//! - [`sim`] — Simulation loop and tick outcomes
//! - [`report`] — Aggregate run metrics
//! - [`cli`] — Argument parsing and the discipline prompt

pub mod cli;
pub mod report;
pub mod sim;

pub use report::SimReport;
pub use sim::{SimState, Simulation, TickOutcome};
