//! Error types for input parsing and file handling.

use cpusim_types::SchedulerError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading a simulation input description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A required directive was absent (or zero).
    #[error("Missing parameter {0}")]
    MissingParameter(&'static str),

    /// A directive had no value after it.
    #[error("Line {line}: directive '{directive}' has no value")]
    MissingValue { line: usize, directive: String },

    /// A value that should be a non-negative integer was not.
    #[error("Line {line}: invalid number '{value}'")]
    InvalidNumber { line: usize, value: String },

    /// A `process` line did not have all of its fields.
    #[error("Line {line}: expected 'process name <name> arrival <time> burst <time>'")]
    MalformedProcess { line: usize },

    /// The parameters parsed but cannot be simulated.
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

/// Errors from running a simulation against files on disk.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// Input files must use the `.in` extension.
    #[error("Input file must have '.in' extension: {}", .0.display())]
    InvalidExtension(PathBuf),

    /// Failed to read an input file or directory.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an output file.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input description was invalid.
    #[error("{}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// The run parameters cannot be simulated.
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    /// Failed to encode the JSON report.
    #[error("Failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}
