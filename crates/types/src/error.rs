//! Error types for scheduling runs.

use thiserror::Error;

/// Errors detected before a simulation starts.
///
/// Once a run has begun there are no error states: every input has
/// already been checked against these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// Round Robin was selected without a quantum.
    #[error("Missing quantum parameter when use is 'rr'")]
    MissingQuantum,

    /// Round Robin quantum must be at least one time unit.
    #[error("Quantum must be a positive integer")]
    InvalidQuantum,

    /// Algorithm tag is not one of `fcfs`, `sjf`, `rr`.
    #[error("Unsupported algorithm {0}.")]
    UnsupportedAlgorithm(String),

    /// Two processes share a name.
    #[error("Duplicate process name: {0}")]
    DuplicateProcess(String),

    /// A process needs no CPU time.
    #[error("Process {0} must have a positive burst")]
    InvalidBurst(String),

    /// Arrivals, horizon and bursts together run past the largest
    /// representable time.
    #[error("Workload does not fit in the simulation clock")]
    HorizonOverflow,
}
