//! CPU Scheduling Simulator
//!
//! File-level driver for the scheduling engine: parses input descriptions,
//! runs them, and writes the resulting traces.
//!
//! # Architecture
//!
//! - **Parser**: the line-oriented `.in` format into a [`SimulationInput`]
//! - **Runner**: one input file to one `.out` trace (plus optional JSON)
//! - **Batch**: every `.in` file in a directory, continuing past failures
//! - **Configuration**: where results go
//!
//! # Example
//!
//! ```
//! use cpusim_simulator::parse_input;
//!
//! let input = parse_input(
//!     "processcount 1\nruns 1\nrunfor 4\nuse fcfs\nprocess name A arrival 1 burst 2\nend\n",
//! )
//! .unwrap();
//! let outcome = input.simulate().unwrap();
//! assert_eq!(outcome.lines()[2], "Time   0 : Idle");
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod runner;

pub use batch::{discover_inputs, run_batch, BatchSummary};
pub use config::{BatchConfig, OutputConfig, DEFAULT_OUTPUT_DIR};
pub use error::{ParseError, SimulatorError};
pub use output::{output_path_for, render_trace, write_json_report, write_trace, RunReport};
pub use parser::{parse_input, SimulationInput};
pub use runner::{load_input, run_file, simulate_file, RunArtifacts};
