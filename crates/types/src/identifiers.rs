//! Domain-specific identifier and time types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the simulated clock, in whole time units.
pub type Time = u32;

/// Sentinel printed in traces for a timer that was never set.
pub const UNSET: i64 = -1;

/// Index of a process within one run's process list.
///
/// Ids are assigned in input order and stay valid for exactly one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(pub usize);

impl ProcessId {
    /// Get the raw index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Process({})", self.0)
    }
}

/// Round-Robin time slice length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantum(Time);

impl Quantum {
    /// Create a quantum, rejecting zero.
    pub fn new(units: Time) -> Option<Self> {
        (units > 0).then_some(Quantum(units))
    }

    /// Get the raw number of time units.
    pub fn get(self) -> Time {
        self.0
    }

    /// Length of the slice granted to a process with `remaining` units left.
    pub fn slice_for(self, remaining: Time) -> Time {
        remaining.min(self.0)
    }
}

impl fmt::Display for Quantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Render an optional timer the way traces print it (`-1` when unset).
pub fn or_unset(value: Option<Time>) -> i64 {
    value.map_or(UNSET, i64::from)
}
