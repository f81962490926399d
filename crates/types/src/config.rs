//! Run parameters.

use crate::{Quantum, SchedulerError, Time};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scheduling policy tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Non-preemptive, in order of arrival.
    #[serde(rename = "fcfs")]
    Fcfs,

    /// Preemptive shortest remaining time first.
    #[serde(rename = "sjf")]
    Sjf,

    /// FIFO ready queue with a fixed time slice.
    #[serde(rename = "rr")]
    RoundRobin,
}

impl Algorithm {
    /// Input-file tag for this algorithm.
    pub fn tag(self) -> &'static str {
        match self {
            Algorithm::Fcfs => "fcfs",
            Algorithm::Sjf => "sjf",
            Algorithm::RoundRobin => "rr",
        }
    }

    /// Name printed on the trace's `Using` line.
    pub fn display_name(self) -> &'static str {
        match self {
            Algorithm::Fcfs => "First-Come First-Served",
            Algorithm::Sjf => "preemptive Shortest Job First",
            Algorithm::RoundRobin => "Round Robin",
        }
    }

    /// Whether this algorithm cannot run without a quantum.
    pub fn needs_quantum(self) -> bool {
        matches!(self, Algorithm::RoundRobin)
    }
}

impl FromStr for Algorithm {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fcfs" => Ok(Algorithm::Fcfs),
            "sjf" => Ok(Algorithm::Sjf),
            "rr" => Ok(Algorithm::RoundRobin),
            other => Err(SchedulerError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Configuration for one simulation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Simulation horizon in time units.
    pub total_runtime: Time,

    /// Policy to simulate.
    pub algorithm: Algorithm,

    /// Round Robin slice length. Ignored by the other policies.
    pub quantum: Option<Time>,
}

impl RunConfig {
    /// Create a run configuration without a quantum.
    pub fn new(algorithm: Algorithm, total_runtime: Time) -> Self {
        Self {
            total_runtime,
            algorithm,
            quantum: None,
        }
    }

    /// Set the Round Robin quantum.
    pub fn with_quantum(mut self, quantum: Time) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Resolve the quantum for a Round Robin run.
    pub fn round_robin_quantum(&self) -> Result<Quantum, SchedulerError> {
        let units = self.quantum.ok_or(SchedulerError::MissingQuantum)?;
        Quantum::new(units).ok_or(SchedulerError::InvalidQuantum)
    }

    /// Check the configuration before a run starts.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.algorithm.needs_quantum() {
            self.round_robin_quantum()?;
        }
        Ok(())
    }
}
