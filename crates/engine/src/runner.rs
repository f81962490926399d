//! The driving loop shared by all policies.

use crate::event_log::{EventLog, TraceEvent};
use crate::policy::{policy_for, Dispatch, SchedulingPolicy};
use crate::state::{RunState, Slice};
use cpusim_types::{
    validate_processes, validate_time_bound, Algorithm, Process, ProcessReport, RunConfig,
    SchedulerError, Time,
};
use tracing::{debug, info, trace};

/// Result of one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    algorithm: Algorithm,
    total_runtime: Time,
    processes: Vec<Process>,
    log: EventLog,
    slices: Vec<Slice>,
}

impl SimulationOutcome {
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn total_runtime(&self) -> Time {
        self.total_runtime
    }

    /// Finalized processes in input order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Typed trace events in emission order.
    pub fn events(&self) -> &[TraceEvent] {
        self.log.events()
    }

    /// Rendered trace lines.
    pub fn lines(&self) -> Vec<String> {
        self.log.lines()
    }

    /// Every stretch of CPU time handed out, in order.
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Per-process metrics in input order.
    pub fn reports(&self) -> Vec<ProcessReport> {
        self.processes.iter().map(Process::report).collect()
    }

    /// Names of processes with work left, in input order.
    pub fn unfinished(&self) -> Vec<&str> {
        self.processes
            .iter()
            .filter(|p| !p.is_done())
            .map(|p| p.name.as_str())
            .collect()
    }
}

/// Entry point for running simulations.
pub struct Simulator;

impl Simulator {
    /// Validate the inputs, build the configured policy and run it.
    pub fn run(
        config: &RunConfig,
        processes: Vec<Process>,
    ) -> Result<SimulationOutcome, SchedulerError> {
        config.validate()?;
        validate_processes(&processes)?;
        validate_time_bound(&processes, config.total_runtime)?;
        let mut policy = policy_for(config)?;
        Ok(run_with_policy(
            policy.as_mut(),
            processes,
            config.total_runtime,
        ))
    }
}

/// Run `policy` over `processes` until it reports no more work, then
/// finalize every process.
pub fn run_with_policy(
    policy: &mut dyn SchedulingPolicy,
    processes: Vec<Process>,
    total_runtime: Time,
) -> SimulationOutcome {
    let algorithm = policy.algorithm();
    info!(
        algorithm = %algorithm,
        processes = processes.len(),
        total_runtime,
        "Starting simulation"
    );

    let mut state = RunState::new(processes, total_runtime, policy.trace_width());
    emit_header(policy, &mut state);

    policy.prepare(&state);
    while policy.has_work(&state) {
        match policy.on_tick(&mut state) {
            Dispatch::Idle => {
                trace!(time = state.now(), "idle");
                state.log_idle();
                state.advance(1);
            }
            Dispatch::Run {
                pid,
                slice,
                selected,
            } => {
                if selected {
                    state.log_selected(pid);
                }
                state.execute(pid, slice);
                policy.on_slice_end(&mut state, pid);
            }
        }
    }

    let fallback = policy.unfinished_completion(&state);
    finalize(&mut state, fallback);

    let (processes, log, slices) = state.into_parts();
    let outcome = SimulationOutcome {
        algorithm,
        total_runtime,
        processes,
        log,
        slices,
    };
    info!(
        algorithm = %algorithm,
        events = outcome.events().len(),
        unfinished = outcome.unfinished().len(),
        "Simulation finished"
    );
    outcome
}

fn emit_header(policy: &dyn SchedulingPolicy, state: &mut RunState) {
    state.emit(TraceEvent::ProcessCount(state.processes().len()));
    state.emit(TraceEvent::Using(policy.algorithm()));
    if let Some(quantum) = policy.quantum() {
        state.emit(TraceEvent::Quantum(quantum));
    }
}

/// Close the trace: horizon line, unfinished list and per-process
/// summaries, computing every process's metrics on the way.
fn finalize(state: &mut RunState, fallback: Option<Time>) {
    state.emit(TraceEvent::FinishedAt {
        time: state.total_runtime(),
    });

    let unfinished: Vec<String> = state
        .processes()
        .iter()
        .filter(|p| !p.is_done())
        .map(|p| p.name.clone())
        .collect();
    if !unfinished.is_empty() {
        debug!(count = unfinished.len(), "processes left unfinished");
        state.emit(TraceEvent::Unfinished { names: unfinished });
    }

    let ids: Vec<_> = state.ids().collect();
    for pid in ids {
        let process = state.process_mut(pid);
        process.finalize(fallback);
        let report = process.report();
        state.emit(TraceEvent::Summary {
            name: report.name,
            waiting: report.waiting,
            turnaround: report.turnaround,
            response: report.response,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_empty_run_is_all_idle() {
        let config = RunConfig::new(Algorithm::Sjf, 3);
        let outcome = Simulator::run(&config, Vec::new()).unwrap();

        assert_eq!(
            outcome.lines(),
            vec![
                "0 processes",
                "Using preemptive Shortest Job First",
                "Time 0 : Idle",
                "Time 1 : Idle",
                "Time 2 : Idle",
                "Finished at time 3",
            ]
        );
        assert!(logs_contain("Starting simulation"));
    }

    #[traced_test]
    #[test]
    fn test_zero_horizon_runs_nothing() {
        let config = RunConfig::new(Algorithm::RoundRobin, 0).with_quantum(2);
        let outcome = Simulator::run(&config, vec![Process::new("A", 0, 3)]).unwrap();

        assert_eq!(
            outcome.lines(),
            vec![
                "1 processes",
                "Using Round Robin",
                "Quantum 2",
                "Finished at time 0",
                "Unfinished processes: A",
                "A wait -4 turnaround -1 response -1",
            ]
        );
        assert!(outcome.slices().is_empty());
    }

    #[test]
    fn test_run_rejects_invalid_input() {
        let config = RunConfig::new(Algorithm::RoundRobin, 10);
        assert_eq!(
            Simulator::run(&config, vec![Process::new("A", 0, 1)]).err(),
            Some(SchedulerError::MissingQuantum)
        );

        let config = RunConfig::new(Algorithm::Fcfs, 10);
        let duplicate = vec![Process::new("A", 0, 1), Process::new("A", 1, 1)];
        assert_eq!(
            Simulator::run(&config, duplicate).err(),
            Some(SchedulerError::DuplicateProcess("A".into()))
        );
    }

    #[test]
    fn test_run_rejects_workload_past_clock_limit() {
        let config = RunConfig::new(Algorithm::Fcfs, 1);
        let processes = vec![Process::new("A", 0, Time::MAX), Process::new("B", 0, 1)];
        assert_eq!(
            Simulator::run(&config, processes).err(),
            Some(SchedulerError::HorizonOverflow)
        );

        let config = RunConfig::new(Algorithm::RoundRobin, 5).with_quantum(2);
        let processes = vec![Process::new("A", Time::MAX - 2, 1), Process::new("B", 0, 2)];
        assert_eq!(
            Simulator::run(&config, processes).err(),
            Some(SchedulerError::HorizonOverflow)
        );
    }

    #[test]
    fn test_metrics_are_finalized_for_every_process() {
        let config = RunConfig::new(Algorithm::Sjf, 4);
        let processes = vec![Process::new("A", 0, 2), Process::new("B", 0, 9)];
        let outcome = Simulator::run(&config, processes).unwrap();

        for process in outcome.processes() {
            let completion = i64::from(process.completion_time().unwrap());
            let turnaround = process.turnaround_time().unwrap();
            assert_eq!(turnaround, completion - i64::from(process.arrival));
            assert_eq!(
                process.waiting_time().unwrap(),
                turnaround - i64::from(process.burst)
            );
        }
        assert_eq!(outcome.unfinished(), vec!["B"]);
    }
}
