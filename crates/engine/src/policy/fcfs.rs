//! First-Come First-Served.
//!
//! Processes run to completion in order of arrival. Each dispatch covers
//! the whole burst, so the clock may run past the horizon: the horizon
//! only bounds the idle padding after the last process.

use super::{Dispatch, SchedulingPolicy};
use crate::event_log::PADDED_WIDTH;
use crate::state::RunState;
use cpusim_types::{Algorithm, ProcessId};
use tracing::debug;

/// Non-preemptive FIFO by arrival time.
#[derive(Debug, Default)]
pub struct FirstComeFirstServed {
    /// Processes by arrival, ties in input order.
    order: Vec<ProcessId>,
    /// Index of the next process in `order` to dispatch.
    next: usize,
}

impl FirstComeFirstServed {
    pub fn new() -> Self {
        Self::default()
    }

    fn pending(&self) -> Option<ProcessId> {
        self.order.get(self.next).copied()
    }
}

impl SchedulingPolicy for FirstComeFirstServed {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Fcfs
    }

    fn trace_width(&self) -> usize {
        PADDED_WIDTH
    }

    fn prepare(&mut self, state: &RunState) {
        self.order = state.ids_sorted_by_key(|p| p.arrival);
        self.next = 0;
    }

    fn has_work(&self, state: &RunState) -> bool {
        self.pending().is_some() || !state.horizon_reached()
    }

    fn on_tick(&mut self, state: &mut RunState) -> Dispatch {
        let Some(pid) = self.pending() else {
            return Dispatch::Idle;
        };
        if state.process(pid).arrival > state.now() {
            return Dispatch::Idle;
        }

        // Arrival is reported at the dispatch instant, which trails the
        // real arrival whenever the CPU was busy.
        state.log_arrival(pid);
        self.next += 1;

        let slice = state.process(pid).remaining();
        debug!(
            process = %state.process(pid).name,
            time = state.now(),
            slice,
            "FCFS dispatch"
        );
        Dispatch::Run {
            pid,
            slice,
            selected: true,
        }
    }

    fn on_slice_end(&mut self, state: &mut RunState, pid: ProcessId) {
        state.complete(pid);
    }
}
