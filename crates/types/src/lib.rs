//! Core types for the CPU scheduling simulator.
//!
//! This crate holds the data that flows between the engine and its
//! callers: process records, run configuration, per-process reports and
//! the errors raised before a run starts. It performs no I/O.

mod config;
mod error;
mod identifiers;
mod process;
mod report;

pub use config::{Algorithm, RunConfig};
pub use error::SchedulerError;
pub use identifiers::{or_unset, ProcessId, Quantum, Time, UNSET};
pub use process::{validate_processes, validate_time_bound, Process};
pub use report::ProcessReport;
