//! Scheduling policies.
//!
//! Every policy is driven by the same loop in [`crate::runner`]. A policy
//! only decides what runs next, when its queue changes and how unfinished
//! work is accounted for at the end; the loop does the clock keeping,
//! dispatch bookkeeping and finalization.

mod fcfs;
mod round_robin;
mod sjf;

pub use fcfs::FirstComeFirstServed;
pub use round_robin::RoundRobin;
pub use sjf::ShortestJobFirst;

use crate::state::RunState;
use cpusim_types::{Algorithm, ProcessId, Quantum, RunConfig, SchedulerError, Time};

/// Decision returned by a policy for the current instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Nothing runs; the clock advances by one unit.
    Idle,

    /// Run `pid` for `slice` units.
    Run {
        pid: ProcessId,
        slice: Time,
        /// Whether the process was newly given the CPU at this instant,
        /// which is what produces a `selected` trace line.
        selected: bool,
    },
}

/// A CPU scheduling policy.
///
/// # Guarantees
///
/// - **Deterministic**: the same processes and parameters always produce
///   the same sequence of dispatches
/// - **No I/O**: policies only read and mutate the [`RunState`]
pub trait SchedulingPolicy {
    /// Tag of the algorithm this policy implements.
    fn algorithm(&self) -> Algorithm;

    /// Whether a running process can lose the CPU before its slice ends.
    fn is_preemptive(&self) -> bool {
        false
    }

    /// Time slice length, for policies that use one.
    fn quantum(&self) -> Option<Quantum> {
        None
    }

    /// Column width used when rendering this policy's trace.
    fn trace_width(&self) -> usize {
        0
    }

    /// Build the policy's arrival order from the run's processes.
    ///
    /// Called once before the first tick.
    fn prepare(&mut self, state: &RunState);

    /// Whether the loop should run another tick.
    fn has_work(&self, state: &RunState) -> bool {
        !state.horizon_reached()
    }

    /// Admit arrivals, handle completions and pick what runs now.
    fn on_tick(&mut self, state: &mut RunState) -> Dispatch;

    /// Called after `pid` has executed the slice returned by `on_tick`.
    fn on_slice_end(&mut self, _state: &mut RunState, _pid: ProcessId) {}

    /// Completion time charged to processes that never finished, if any.
    fn unfinished_completion(&self, _state: &RunState) -> Option<Time> {
        None
    }
}

/// Build the policy selected by `config`.
pub fn policy_for(config: &RunConfig) -> Result<Box<dyn SchedulingPolicy>, SchedulerError> {
    let policy: Box<dyn SchedulingPolicy> = match config.algorithm {
        Algorithm::Fcfs => Box::new(FirstComeFirstServed::new()),
        Algorithm::Sjf => Box::new(ShortestJobFirst::new()),
        Algorithm::RoundRobin => Box::new(RoundRobin::new(config.round_robin_quantum()?)),
    };
    Ok(policy)
}
