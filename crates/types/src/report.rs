//! Finalized per-process results.

use crate::Time;
use serde::{Deserialize, Serialize};

/// Metrics for one process at the end of a run.
///
/// Timer values use the trace convention: `-1` for a response time that
/// was never set. `completion` is `None` when the process did not finish
/// and its policy does not substitute the horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessReport {
    pub name: String,
    pub arrival: Time,
    pub burst: Time,
    pub completion: Option<Time>,
    pub waiting: i64,
    pub turnaround: i64,
    pub response: i64,
}
