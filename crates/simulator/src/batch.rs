//! Batch runs over a directory of input files.

use crate::config::{BatchConfig, OutputConfig};
use crate::error::SimulatorError;
use crate::output::is_input_file;
use crate::runner::run_file;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Result of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Trace files written, in input order.
    pub succeeded: Vec<PathBuf>,

    /// Inputs that failed, with the error message.
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchSummary {
    /// True if every input ran.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of inputs attempted.
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// `*.in` files directly inside `dir`, sorted by file name.
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>, SimulatorError> {
    let read_err = |source| SimulatorError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && is_input_file(&path) {
            inputs.push(path);
        }
    }
    inputs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(inputs)
}

/// Run every input in the configured directory.
///
/// A failing input is recorded and the batch carries on. Only problems with
/// the directories themselves abort the run.
pub fn run_batch(config: &BatchConfig) -> Result<BatchSummary, SimulatorError> {
    let inputs = discover_inputs(&config.input_dir)?;
    let output_dir = config.resolved_output_dir();
    fs::create_dir_all(&output_dir).map_err(|source| SimulatorError::Write {
        path: output_dir.clone(),
        source,
    })?;

    info!(
        input_dir = %config.input_dir.display(),
        output_dir = %output_dir.display(),
        inputs = inputs.len(),
        "Starting batch"
    );

    let mut summary = BatchSummary::default();
    for input in inputs {
        let output = OutputConfig::default()
            .with_trace_path(config.trace_path_for(&input))
            .with_json(config.write_json);

        match run_file(&input, &output) {
            Ok(artifacts) => summary.succeeded.push(artifacts.trace_path),
            Err(err) => {
                warn!(input = %input.display(), error = %err, "Input failed");
                summary.failed.push((input, err.to_string()));
            }
        }
    }

    info!(
        succeeded = summary.succeeded.len(),
        failed = summary.failed.len(),
        "Batch complete"
    );
    Ok(summary)
}
