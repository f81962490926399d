//! Per-process simulation state.

use crate::{or_unset, ProcessReport, SchedulerError, Time, UNSET};
use std::collections::HashSet;

/// Mutable bookkeeping for one process over one simulation run.
///
/// Created before the run starts, owned by the engine while it runs, and
/// read back by the caller once finalized. `remaining` only ever shrinks,
/// and `response_time` is fixed at the first dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    /// Identifier, unique within a run.
    pub name: String,

    /// Instant at which the process becomes eligible to run.
    pub arrival: Time,

    /// Total CPU time required.
    pub burst: Time,

    remaining: Time,
    start_time: Option<Time>,
    completion_time: Option<Time>,
    response_time: Option<Time>,
    turnaround_time: Option<i64>,
    waiting_time: Option<i64>,
}

impl Process {
    /// Create a process that has not run yet.
    pub fn new(name: impl Into<String>, arrival: Time, burst: Time) -> Self {
        Self {
            name: name.into(),
            arrival,
            burst,
            remaining: burst,
            start_time: None,
            completion_time: None,
            response_time: None,
            turnaround_time: None,
            waiting_time: None,
        }
    }

    /// CPU time still needed.
    pub fn remaining(&self) -> Time {
        self.remaining
    }

    /// Whether the process has consumed its whole burst.
    pub fn is_done(&self) -> bool {
        self.remaining == 0
    }

    pub fn start_time(&self) -> Option<Time> {
        self.start_time
    }

    pub fn completion_time(&self) -> Option<Time> {
        self.completion_time
    }

    pub fn response_time(&self) -> Option<Time> {
        self.response_time
    }

    /// Turnaround time; only available after [`Process::finalize`].
    pub fn turnaround_time(&self) -> Option<i64> {
        self.turnaround_time
    }

    /// Waiting time; only available after [`Process::finalize`].
    pub fn waiting_time(&self) -> Option<i64> {
        self.waiting_time
    }

    /// Record a dispatch at `now`.
    ///
    /// Sets the start and response times the first time the process is
    /// dispatched and leaves them untouched afterwards. Returns `true` on
    /// the first dispatch.
    pub fn dispatch(&mut self, now: Time) -> bool {
        if self.response_time.is_some() {
            return false;
        }
        self.start_time = Some(now);
        self.response_time = Some(now.saturating_sub(self.arrival));
        true
    }

    /// Consume `units` of CPU time.
    pub fn run_for(&mut self, units: Time) {
        debug_assert!(
            units <= self.remaining,
            "{} ran {} units with only {} remaining",
            self.name,
            units,
            self.remaining
        );
        self.remaining = self.remaining.saturating_sub(units);
    }

    /// Record that the process finished at `now`.
    pub fn complete(&mut self, now: Time) {
        self.completion_time = Some(now);
    }

    /// Compute turnaround and waiting time.
    ///
    /// A process that never completed takes `fallback` as its completion
    /// time when one is given. Without a fallback the completion time stays
    /// unset and the metrics are computed against the `-1` sentinel, which
    /// yields negative values.
    pub fn finalize(&mut self, fallback: Option<Time>) {
        if self.completion_time.is_none() {
            self.completion_time = fallback;
        }
        let completion = self.completion_time.map_or(UNSET, i64::from);
        let turnaround = completion - i64::from(self.arrival);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - i64::from(self.burst));
    }

    /// Snapshot of the finalized metrics.
    pub fn report(&self) -> ProcessReport {
        ProcessReport {
            name: self.name.clone(),
            arrival: self.arrival,
            burst: self.burst,
            completion: self.completion_time,
            waiting: self.waiting_time.unwrap_or(UNSET),
            turnaround: self.turnaround_time.unwrap_or(UNSET),
            response: or_unset(self.response_time),
        }
    }
}

/// Check the per-run invariants on a process list: unique names and
/// positive bursts.
pub fn validate_processes(processes: &[Process]) -> Result<(), SchedulerError> {
    let mut seen = HashSet::with_capacity(processes.len());
    for process in processes {
        if process.burst == 0 {
            return Err(SchedulerError::InvalidBurst(process.name.clone()));
        }
        if !seen.insert(process.name.as_str()) {
            return Err(SchedulerError::DuplicateProcess(process.name.clone()));
        }
    }
    Ok(())
}

/// Check that the clock cannot overflow while running `processes`.
///
/// The clock only idles before the last arrival or the horizon, so it
/// never passes that point plus the sum of all bursts.
pub fn validate_time_bound(
    processes: &[Process],
    total_runtime: Time,
) -> Result<(), SchedulerError> {
    let idle_limit = processes
        .iter()
        .map(|p| p.arrival)
        .max()
        .unwrap_or(0)
        .max(total_runtime);
    processes
        .iter()
        .try_fold(idle_limit, |end, p| end.checked_add(p.burst))
        .map(|_| ())
        .ok_or(SchedulerError::HorizonOverflow)
}
