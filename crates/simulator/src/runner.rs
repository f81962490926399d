//! Running the engine against input files.

use crate::config::OutputConfig;
use crate::error::SimulatorError;
use crate::output::{is_input_file, output_path_for, write_json_report, write_trace, RunReport};
use crate::parser::{parse_input, SimulationInput};
use cpusim_engine::SimulationOutcome;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Files produced by one run, plus the outcome they were rendered from.
#[derive(Debug)]
pub struct RunArtifacts {
    pub trace_path: PathBuf,
    pub json_path: Option<PathBuf>,
    pub outcome: SimulationOutcome,
}

/// Read and parse an input file.
pub fn load_input(path: &Path) -> Result<SimulationInput, SimulatorError> {
    let text = fs::read_to_string(path).map_err(|source| SimulatorError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_input(&text).map_err(|source| SimulatorError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse and simulate an input file without writing anything.
pub fn simulate_file(path: &Path) -> Result<(SimulationInput, SimulationOutcome), SimulatorError> {
    if !is_input_file(path) {
        return Err(SimulatorError::InvalidExtension(path.to_path_buf()));
    }
    let input = load_input(path)?;
    let outcome = input.clone().simulate()?;
    Ok((input, outcome))
}

/// Simulate `input` and write its trace (and optionally a JSON report).
pub fn run_file(input: &Path, output: &OutputConfig) -> Result<RunArtifacts, SimulatorError> {
    let trace_path = match &output.trace_path {
        Some(path) => path.clone(),
        None => output_path_for(input)?,
    };
    let (parsed, outcome) = simulate_file(input)?;

    info!(
        input = %input.display(),
        algorithm = %parsed.config.algorithm,
        processes = parsed.processes.len(),
        "Simulated input file"
    );

    write_trace(&trace_path, &outcome.lines())?;

    let json_path = if output.write_json {
        let path = trace_path.with_extension("json");
        write_json_report(&path, &RunReport::from_outcome(&outcome, parsed.config.quantum))?;
        Some(path)
    } else {
        None
    };

    Ok(RunArtifacts {
        trace_path,
        json_path,
        outcome,
    })
}
