//! Writing traces and reports to disk.

use crate::error::SimulatorError;
use cpusim_engine::SimulationOutcome;
use cpusim_types::{Algorithm, ProcessReport, Time};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension required on input files.
pub const INPUT_EXTENSION: &str = "in";

/// Extension given to trace files.
pub const OUTPUT_EXTENSION: &str = "out";

/// Whether `path` names an input file.
pub fn is_input_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == INPUT_EXTENSION)
}

/// Trace path for an input file: `foo.in` becomes `foo.out`.
pub fn output_path_for(input: &Path) -> Result<PathBuf, SimulatorError> {
    if !is_input_file(input) {
        return Err(SimulatorError::InvalidExtension(input.to_path_buf()));
    }
    Ok(input.with_extension(OUTPUT_EXTENSION))
}

/// Join trace lines into file contents, one line per `\n`.
pub fn render_trace(lines: &[String]) -> String {
    let mut contents = lines.join("\n");
    contents.push('\n');
    contents
}

/// Write a rendered trace to `path`.
pub fn write_trace(path: &Path, lines: &[String]) -> Result<(), SimulatorError> {
    fs::write(path, render_trace(lines)).map_err(|source| SimulatorError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Machine-readable summary of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub algorithm: Algorithm,
    pub total_runtime: Time,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantum: Option<Time>,
    pub unfinished: Vec<String>,
    pub processes: Vec<ProcessReport>,
}

impl RunReport {
    pub fn from_outcome(outcome: &SimulationOutcome, quantum: Option<Time>) -> Self {
        Self {
            algorithm: outcome.algorithm(),
            total_runtime: outcome.total_runtime(),
            quantum: quantum.filter(|_| outcome.algorithm().needs_quantum()),
            unfinished: outcome.unfinished().into_iter().map(String::from).collect(),
            processes: outcome.reports(),
        }
    }
}

/// Write `report` as pretty-printed JSON to `path`.
pub fn write_json_report(path: &Path, report: &RunReport) -> Result<(), SimulatorError> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).map_err(|source| SimulatorError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpusim_engine::Simulator;
    use cpusim_types::{Process, RunConfig};

    #[test]
    fn test_output_path_for() {
        assert_eq!(
            output_path_for(Path::new("tests/c2-fcfs.in")).unwrap(),
            PathBuf::from("tests/c2-fcfs.out")
        );
        assert!(matches!(
            output_path_for(Path::new("tests/c2-fcfs.txt")),
            Err(SimulatorError::InvalidExtension(_))
        ));
        assert!(output_path_for(Path::new("noextension")).is_err());
    }

    #[test]
    fn test_render_trace_ends_with_newline() {
        let lines = vec!["1 processes".to_string(), "Using Round Robin".to_string()];
        assert_eq!(render_trace(&lines), "1 processes\nUsing Round Robin\n");
    }

    #[test]
    fn test_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig::new(cpusim_types::Algorithm::RoundRobin, 6).with_quantum(2);
        let outcome = Simulator::run(&config, vec![Process::new("A", 0, 5)]).unwrap();

        let trace_path = dir.path().join("one.out");
        write_trace(&trace_path, &outcome.lines()).unwrap();
        let written = fs::read_to_string(&trace_path).unwrap();
        assert!(written.starts_with("1 processes\nUsing Round Robin\nQuantum 2\n"));
        assert!(written.ends_with("A wait 0 turnaround 5 response 0\n"));

        let json_path = dir.path().join("one.json");
        let report = RunReport::from_outcome(&outcome, config.quantum);
        write_json_report(&json_path, &report).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(value["algorithm"], "rr");
        assert_eq!(value["quantum"], 2);
        assert_eq!(value["processes"][0]["turnaround"], 5);
    }

    #[test]
    fn test_report_omits_quantum_for_other_algorithms() {
        let config = RunConfig::new(cpusim_types::Algorithm::Fcfs, 3).with_quantum(4);
        let outcome = Simulator::run(&config, vec![Process::new("A", 0, 1)]).unwrap();
        let report = RunReport::from_outcome(&outcome, config.quantum);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("quantum").is_none());
        assert_eq!(json["unfinished"], serde_json::json!([]));
    }
}
