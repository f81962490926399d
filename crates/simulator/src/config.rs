//! Configuration for file-based runs.

use std::path::{Path, PathBuf};

/// Name of the directory batch runs write into by default.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Where and how a single input file's results are written.
#[derive(Clone, Debug, Default)]
pub struct OutputConfig {
    /// Trace destination. Defaults to the input path with `.out`.
    pub trace_path: Option<PathBuf>,

    /// Also write a `.json` report next to the trace.
    pub write_json: bool,
}

impl OutputConfig {
    /// Set the trace destination.
    pub fn with_trace_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.trace_path = Some(path.into());
        self
    }

    /// Enable or disable the JSON report.
    pub fn with_json(mut self, enabled: bool) -> Self {
        self.write_json = enabled;
        self
    }
}

/// Configuration for a batch run over a directory of inputs.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Directory searched for `*.in` files (not recursive).
    pub input_dir: PathBuf,

    /// Directory the traces are written to.
    pub output_dir: Option<PathBuf>,

    /// Also write `.json` reports.
    pub write_json: bool,
}

impl BatchConfig {
    /// Create a batch configuration for `input_dir`.
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: None,
            write_json: false,
        }
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Enable or disable JSON reports.
    pub fn with_json(mut self, enabled: bool) -> Self {
        self.write_json = enabled;
        self
    }

    /// Output directory, defaulting to `output/` inside the input directory.
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.input_dir.join(DEFAULT_OUTPUT_DIR))
    }

    /// Trace destination for one input file.
    pub fn trace_path_for(&self, input: &Path) -> PathBuf {
        let name = input.file_name().map(PathBuf::from).unwrap_or_default();
        self.resolved_output_dir()
            .join(name)
            .with_extension(crate::output::OUTPUT_EXTENSION)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
