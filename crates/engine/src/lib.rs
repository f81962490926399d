//! Discrete-time CPU scheduling engine.
//!
//! Given a list of processes and a [`RunConfig`], the engine produces a
//! second-by-second trace of scheduling decisions and finalized
//! per-process metrics. Runs are single-threaded and fully deterministic:
//! the same inputs always produce the same trace.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                  run_with_policy                      │
//! │                                                       │
//! │   while policy.has_work(state)                        │
//! │     policy.on_tick(state) ──► Dispatch::Idle          │
//! │                          └──► Dispatch::Run { .. }    │
//! │     execute slice, policy.on_slice_end(state)         │
//! │                                                       │
//! │   finalize: horizon, unfinished list, summaries       │
//! └──────────────┬───────────────────────────┬────────────┘
//!                │                           │
//!                ▼                           ▼
//!   RunState { processes, clock }      EventLog (trace)
//! ```
//!
//! # Example
//!
//! ```
//! use cpusim_engine::Simulator;
//! use cpusim_types::{Algorithm, Process, RunConfig};
//!
//! let config = RunConfig::new(Algorithm::RoundRobin, 6).with_quantum(2);
//! let outcome = Simulator::run(&config, vec![Process::new("A", 0, 5)]).unwrap();
//!
//! assert_eq!(outcome.lines()[3], "Time 0 : A selected (burst 5)");
//! ```
//!
//! [`RunConfig`]: cpusim_types::RunConfig

mod event_log;
mod policy;
mod runner;
mod state;

pub use event_log::{EventLog, TraceEvent, PADDED_WIDTH};
pub use policy::{
    policy_for, Dispatch, FirstComeFirstServed, RoundRobin, SchedulingPolicy, ShortestJobFirst,
};
pub use runner::{run_with_policy, SimulationOutcome, Simulator};
pub use state::{RunState, Slice};
