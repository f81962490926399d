//! Mutable state of one simulation run.

use crate::event_log::{EventLog, TraceEvent};
use cpusim_types::{Process, ProcessId, Time};

/// One contiguous stretch of CPU time given to a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub pid: ProcessId,
    pub start: Time,
    pub units: Time,
    /// Remaining time of the process when the slice began.
    pub remaining_before: Time,
}

impl Slice {
    /// Instant at which the slice ends.
    pub fn end(&self) -> Time {
        self.start + self.units
    }
}

/// Everything a policy can see and mutate during a run.
///
/// The process list is owned here for the whole run and indexed by
/// [`ProcessId`] in input order. Policies keep their own queues of ids and
/// never hold references into the list across calls.
#[derive(Debug)]
pub struct RunState {
    now: Time,
    total_runtime: Time,
    processes: Vec<Process>,
    log: EventLog,
    slices: Vec<Slice>,
}

impl RunState {
    /// Create the state for a run starting at time zero.
    pub fn new(processes: Vec<Process>, total_runtime: Time, trace_width: usize) -> Self {
        Self {
            now: 0,
            total_runtime,
            processes,
            log: EventLog::new(trace_width),
            slices: Vec::new(),
        }
    }

    /// Current simulated instant.
    pub fn now(&self) -> Time {
        self.now
    }

    /// Simulation horizon.
    pub fn total_runtime(&self) -> Time {
        self.total_runtime
    }

    /// Whether the clock has reached the horizon.
    pub fn horizon_reached(&self) -> bool {
        self.now >= self.total_runtime
    }

    pub fn process(&self, pid: ProcessId) -> &Process {
        &self.processes[pid.index()]
    }

    pub fn process_mut(&mut self, pid: ProcessId) -> &mut Process {
        &mut self.processes[pid.index()]
    }

    /// All processes in input order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Ids of all processes in input order.
    pub fn ids(&self) -> impl Iterator<Item = ProcessId> {
        (0..self.processes.len()).map(ProcessId)
    }

    /// Ids sorted by `key`, ties kept in input order.
    pub fn ids_sorted_by_key<K: Ord>(&self, mut key: impl FnMut(&Process) -> K) -> Vec<ProcessId> {
        let mut ids: Vec<ProcessId> = self.ids().collect();
        ids.sort_by_key(|pid| key(self.process(*pid)));
        ids
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Dispatch history so far.
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Append an event to the trace.
    pub fn emit(&mut self, event: TraceEvent) {
        self.log.push(event);
    }

    /// Log `pid` as arrived at the current instant.
    pub fn log_arrival(&mut self, pid: ProcessId) {
        let event = TraceEvent::Arrived {
            time: self.now,
            name: self.process(pid).name.clone(),
        };
        self.emit(event);
    }

    /// Log `pid` as selected, with its current remaining time as the burst.
    pub fn log_selected(&mut self, pid: ProcessId) {
        let process = self.process(pid);
        let event = TraceEvent::Selected {
            time: self.now,
            name: process.name.clone(),
            burst: process.remaining(),
        };
        self.emit(event);
    }

    pub fn log_idle(&mut self) {
        self.emit(TraceEvent::Idle { time: self.now });
    }

    /// Mark `pid` complete at the current instant and log it.
    pub fn complete(&mut self, pid: ProcessId) {
        let now = self.now;
        let process = self.process_mut(pid);
        process.complete(now);
        let event = TraceEvent::Finished {
            time: now,
            name: process.name.clone(),
        };
        self.emit(event);
    }

    /// Give `pid` the CPU for `units` and move the clock past the slice.
    pub(crate) fn execute(&mut self, pid: ProcessId, units: Time) {
        let now = self.now;
        let process = self.process_mut(pid);
        let remaining_before = process.remaining();
        process.dispatch(now);
        process.run_for(units);
        self.slices.push(Slice {
            pid,
            start: now,
            units,
            remaining_before,
        });
        self.advance(units);
    }

    pub(crate) fn advance(&mut self, units: Time) {
        self.now += units;
    }

    pub(crate) fn into_parts(self) -> (Vec<Process>, EventLog, Vec<Slice>) {
        (self.processes, self.log, self.slices)
    }
}
