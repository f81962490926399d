//! Preemptive Shortest Job First (shortest remaining time).
//!
//! The policy re-evaluates the ready queue every time unit. A queued
//! process takes the CPU only when its remaining time is strictly smaller
//! than that of the running process; on a tie the running process keeps
//! the CPU.

use super::{Dispatch, SchedulingPolicy};
use crate::state::RunState;
use cpusim_types::{Algorithm, ProcessId, Time};
use tracing::debug;

/// Preemptive shortest-remaining-time-first scheduling.
#[derive(Debug, Default)]
pub struct ShortestJobFirst {
    /// Processes by (arrival, burst), ties in input order.
    arrivals: Vec<ProcessId>,
    /// Index of the next process in `arrivals` that has not arrived yet.
    next_arrival: usize,
    /// Ready queue, kept stable-sorted by remaining time at each tick.
    ready: Vec<ProcessId>,
    /// Process holding the CPU.
    active: Option<ProcessId>,
}

impl ShortestJobFirst {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move every process that has arrived by now into the ready queue.
    fn admit_arrivals(&mut self, state: &mut RunState) {
        while let Some(&pid) = self.arrivals.get(self.next_arrival) {
            if state.process(pid).arrival > state.now() {
                break;
            }
            state.log_arrival(pid);
            self.ready.push(pid);
            self.next_arrival += 1;
        }
    }

    /// Retire the active process if its last unit ran in the previous tick.
    fn retire_finished(&mut self, state: &mut RunState) {
        if let Some(pid) = self.active {
            if state.process(pid).is_done() {
                debug!(process = %state.process(pid).name, time = state.now(), "SJF completion");
                state.complete(pid);
                self.active = None;
            }
        }
    }

    /// Pick the process for this tick. Returns `true` when the CPU changed
    /// hands.
    fn select(&mut self, state: &RunState) -> bool {
        if self.ready.is_empty() {
            return false;
        }
        self.ready.sort_by_key(|pid| state.process(*pid).remaining());
        let shortest: Time = state.process(self.ready[0]).remaining();

        match self.active {
            Some(active) if state.process(active).remaining() > shortest => {
                self.ready.push(active);
                let next = self.ready.remove(0);
                debug!(
                    preempted = %state.process(active).name,
                    by = %state.process(next).name,
                    time = state.now(),
                    "SJF preemption"
                );
                self.active = Some(next);
                true
            }
            Some(_) => false,
            None => {
                self.active = Some(self.ready.remove(0));
                true
            }
        }
    }
}

impl SchedulingPolicy for ShortestJobFirst {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Sjf
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn prepare(&mut self, state: &RunState) {
        self.arrivals = state.ids_sorted_by_key(|p| (p.arrival, p.burst));
        self.next_arrival = 0;
        self.ready.clear();
        self.active = None;
    }

    fn on_tick(&mut self, state: &mut RunState) -> Dispatch {
        self.admit_arrivals(state);
        self.retire_finished(state);
        let selected = self.select(state);

        match self.active {
            Some(pid) => Dispatch::Run {
                pid,
                slice: 1,
                selected,
            },
            None => Dispatch::Idle,
        }
    }

    fn unfinished_completion(&self, state: &RunState) -> Option<Time> {
        Some(state.total_runtime())
    }
}
