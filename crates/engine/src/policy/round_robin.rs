//! Round Robin.
//!
//! A single FIFO ready queue. The head runs for at most one quantum and,
//! if unfinished, goes back to the tail. Arrivals are sampled once per
//! dispatch, so a process arriving in the middle of a slice joins the
//! queue only after the preempted process has been re-queued.

use super::{Dispatch, SchedulingPolicy};
use crate::state::RunState;
use cpusim_types::{Algorithm, ProcessId, Quantum};
use std::collections::VecDeque;
use tracing::debug;

/// Time-sliced FIFO scheduling.
#[derive(Debug)]
pub struct RoundRobin {
    quantum: Quantum,
    /// Processes by arrival, ties in input order.
    arrivals: Vec<ProcessId>,
    next_arrival: usize,
    ready: VecDeque<ProcessId>,
}

impl RoundRobin {
    pub fn new(quantum: Quantum) -> Self {
        Self {
            quantum,
            arrivals: Vec::new(),
            next_arrival: 0,
            ready: VecDeque::new(),
        }
    }

    fn admit_arrivals(&mut self, state: &RunState) {
        while let Some(&pid) = self.arrivals.get(self.next_arrival) {
            if state.process(pid).arrival > state.now() {
                break;
            }
            self.ready.push_back(pid);
            self.next_arrival += 1;
        }
    }
}

impl SchedulingPolicy for RoundRobin {
    fn algorithm(&self) -> Algorithm {
        Algorithm::RoundRobin
    }

    fn quantum(&self) -> Option<Quantum> {
        Some(self.quantum)
    }

    fn prepare(&mut self, state: &RunState) {
        self.arrivals = state.ids_sorted_by_key(|p| p.arrival);
        self.next_arrival = 0;
        self.ready.clear();
    }

    fn on_tick(&mut self, state: &mut RunState) -> Dispatch {
        self.admit_arrivals(state);

        let Some(pid) = self.ready.pop_front() else {
            return Dispatch::Idle;
        };
        let slice = self.quantum.slice_for(state.process(pid).remaining());
        debug!(
            process = %state.process(pid).name,
            time = state.now(),
            slice,
            queued = self.ready.len(),
            "RR dispatch"
        );
        Dispatch::Run {
            pid,
            slice,
            selected: true,
        }
    }

    fn on_slice_end(&mut self, state: &mut RunState, pid: ProcessId) {
        if state.process(pid).is_done() {
            state.complete(pid);
        } else {
            self.ready.push_back(pid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::run_with_policy;
    use cpusim_types::Process;
    use tracing_test::traced_test;

    fn quantum(units: u32) -> Quantum {
        Quantum::new(units).unwrap()
    }

    #[traced_test]
    #[test]
    fn test_dispatch_is_logged() {
        let mut policy = RoundRobin::new(quantum(2));
        run_with_policy(&mut policy, vec![Process::new("A", 0, 3)], 4);
        assert!(logs_contain("RR dispatch"));
    }

    #[test]
    fn test_processes_alternate() {
        let mut policy = RoundRobin::new(quantum(1));
        let processes = vec![Process::new("A", 0, 3), Process::new("B", 0, 2)];
        let outcome = run_with_policy(&mut policy, processes, 10);

        let order: Vec<_> = outcome.slices().iter().map(|s| s.pid.index()).collect();
        assert_eq!(order, vec![0, 1, 0, 1, 0]);
        assert_eq!(outcome.processes()[0].completion_time(), Some(5));
        assert_eq!(outcome.processes()[1].completion_time(), Some(4));
    }

    #[test]
    fn test_simultaneous_arrivals_keep_input_order() {
        let mut policy = RoundRobin::new(quantum(5));
        let processes = vec![
            Process::new("late", 1, 1),
            Process::new("first", 0, 1),
            Process::new("second", 0, 1),
        ];
        let outcome = run_with_policy(&mut policy, processes, 3);

        let order: Vec<_> = outcome.slices().iter().map(|s| s.pid.index()).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }
}
