//! CPU Scheduling Simulator CLI
//!
//! # Example
//!
//! ```bash
//! # Simulate one file, writing c5-rr.out next to it
//! cpusim run tests/c5-rr.in
//!
//! # Print the trace instead of writing it
//! cpusim run tests/c5-rr.in --stdout
//!
//! # Simulate every .in file in a directory, with JSON reports
//! cpusim batch tests --output-dir traces --json
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use cpusim_simulator::{
    render_trace, run_batch, run_file, simulate_file, BatchConfig, OutputConfig,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// CPU Scheduling Simulator
///
/// Discrete-time simulation of FCFS, preemptive SJF and Round Robin
/// scheduling. Runs are deterministic.
#[derive(Parser, Debug)]
#[command(name = "cpusim")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate a single input file
    Run {
        /// Input description (must end in `.in`)
        input: PathBuf,

        /// Trace destination. Defaults to the input path with `.out`.
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Also write a JSON report next to the trace
        #[arg(long)]
        json: bool,

        /// Print the trace to stdout instead of writing a file
        #[arg(long, conflicts_with_all = ["output", "json"])]
        stdout: bool,
    },

    /// Simulate every `.in` file in a directory
    Batch {
        /// Directory to scan
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Where to write traces. Defaults to `<DIR>/output`.
        #[arg(short = 'o', long)]
        output_dir: Option<PathBuf>,

        /// Also write JSON reports
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so `--stdout` output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("warn,cpusim=info,cpusim_simulator=info")
        }))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Run {
            input,
            output,
            json,
            stdout,
        } => {
            if stdout {
                let (_, outcome) = simulate_file(&input)?;
                std::io::stdout()
                    .lock()
                    .write_all(render_trace(&outcome.lines()).as_bytes())
                    .context("Failed to write trace to stdout")?;
                return Ok(());
            }

            let mut config = OutputConfig::default().with_json(json);
            if let Some(path) = output {
                config = config.with_trace_path(path);
            }
            let artifacts = run_file(&input, &config)?;
            info!(trace = %artifacts.trace_path.display(), "Trace written");
            if let Some(path) = artifacts.json_path {
                info!(report = %path.display(), "Report written");
            }
        }

        Command::Batch {
            dir,
            output_dir,
            json,
        } => {
            let mut config = BatchConfig::new(dir).with_json(json);
            if let Some(path) = output_dir {
                config = config.with_output_dir(path);
            }
            let summary = run_batch(&config)?;

            for (input, error) in &summary.failed {
                eprintln!("{}: {error}", input.display());
            }
            if !summary.is_success() {
                bail!(
                    "{} of {} inputs failed",
                    summary.failed.len(),
                    summary.total()
                );
            }
        }
    }

    Ok(())
}
