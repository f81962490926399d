//! Parser for the line-oriented input format.
//!
//! ```text
//! processcount 2
//! runfor 10
//! use rr
//! quantum 2
//! process name A arrival 0 burst 5
//! process name B arrival 1 burst 3
//! end
//! ```
//!
//! Tokens are whitespace-separated and a token starting with `#` begins a
//! comment, so names may still contain `#`. Unknown directives are skipped
//! and everything after `end` is ignored.

use crate::error::ParseError;
use cpusim_engine::{SimulationOutcome, Simulator};
use cpusim_types::{
    validate_processes, validate_time_bound, Algorithm, Process, RunConfig, SchedulerError, Time,
};
use tracing::{trace, warn};

/// A parsed input description, ready to simulate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationInput {
    /// Value of the `processcount` directive.
    pub declared_count: usize,

    /// Run parameters.
    pub config: RunConfig,

    /// Processes in input order.
    pub processes: Vec<Process>,
}

impl SimulationInput {
    /// Run the engine on this input.
    pub fn simulate(self) -> Result<SimulationOutcome, SchedulerError> {
        Simulator::run(&self.config, self.processes)
    }
}

/// Parse an input description.
pub fn parse_input(text: &str) -> Result<SimulationInput, ParseError> {
    let mut declared_count: Option<usize> = None;
    let mut total_runtime: Option<Time> = None;
    let mut algorithm: Option<&str> = None;
    let mut quantum: Option<Time> = None;
    let mut processes = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let tokens: Vec<&str> = raw
            .split_whitespace()
            .take_while(|token| !token.starts_with('#'))
            .collect();
        let Some(&directive) = tokens.first() else {
            continue;
        };

        match directive {
            "processcount" => declared_count = Some(number(&tokens, line)?),
            "runfor" => total_runtime = Some(number(&tokens, line)?),
            "use" => algorithm = Some(value(&tokens, line)?),
            "quantum" => quantum = Some(number(&tokens, line)?),
            "process" => processes.push(parse_process(&tokens, line)?),
            "end" => break,
            other => trace!(line, directive = other, "ignoring unknown directive"),
        }
    }

    // A zero count or horizon is treated the same as a missing one.
    let declared_count = declared_count
        .filter(|&n| n != 0)
        .ok_or(ParseError::MissingParameter("processcount"))?;
    let total_runtime = total_runtime
        .filter(|&t| t != 0)
        .ok_or(ParseError::MissingParameter("runfor"))?;
    let algorithm: Algorithm = algorithm
        .ok_or(ParseError::MissingParameter("use"))?
        .parse()?;

    let config = RunConfig {
        total_runtime,
        algorithm,
        quantum,
    };
    config.validate()?;
    validate_processes(&processes)?;
    validate_time_bound(&processes, total_runtime)?;

    if declared_count != processes.len() {
        warn!(
            declared = declared_count,
            found = processes.len(),
            "processcount does not match the number of process lines"
        );
    }

    Ok(SimulationInput {
        declared_count,
        config,
        processes,
    })
}

fn value<'a>(tokens: &[&'a str], line: usize) -> Result<&'a str, ParseError> {
    tokens
        .get(1)
        .copied()
        .ok_or_else(|| ParseError::MissingValue {
            line,
            directive: tokens[0].to_string(),
        })
}

fn number<T: std::str::FromStr>(tokens: &[&str], line: usize) -> Result<T, ParseError> {
    parse_number(value(tokens, line)?, line)
}

fn parse_number<T: std::str::FromStr>(raw: &str, line: usize) -> Result<T, ParseError> {
    raw.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        value: raw.to_string(),
    })
}

/// `process name <name> arrival <a> burst <b>`, read positionally.
fn parse_process(tokens: &[&str], line: usize) -> Result<Process, ParseError> {
    if tokens.len() < 7 {
        return Err(ParseError::MalformedProcess { line });
    }
    let name = tokens[2];
    let arrival = parse_number(tokens[4], line)?;
    let burst = parse_number(tokens[6], line)?;
    Ok(Process::new(name, arrival, burst))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    const RR_INPUT: &str = "\
processcount 2   # two of them
runfor 10
use rr
quantum 2

process name A arrival 0 burst 5
process name B arrival 1 burst 3
end
process name ignored arrival 0 burst 1
";

    #[test]
    fn test_parse_round_robin_input() {
        let input = parse_input(RR_INPUT).unwrap();

        assert_eq!(input.declared_count, 2);
        assert_eq!(
            input.config,
            RunConfig::new(Algorithm::RoundRobin, 10).with_quantum(2)
        );
        assert_eq!(
            input.processes,
            vec![Process::new("A", 0, 5), Process::new("B", 1, 3)]
        );
    }

    #[test]
    fn test_parse_and_simulate() {
        let outcome = parse_input(RR_INPUT).unwrap().simulate().unwrap();
        let lines = outcome.lines();
        assert_eq!(lines[0], "2 processes");
        assert_eq!(lines[2], "Quantum 2");
    }

    #[test]
    fn test_missing_parameters() {
        assert_eq!(
            parse_input("runfor 5\nuse fcfs\n"),
            Err(ParseError::MissingParameter("processcount"))
        );
        assert_eq!(
            parse_input("processcount 1\nuse fcfs\n"),
            Err(ParseError::MissingParameter("runfor"))
        );
        assert_eq!(
            parse_input("processcount 1\nrunfor 5\n"),
            Err(ParseError::MissingParameter("use"))
        );
        assert_eq!(
            parse_input("processcount 1\nrunfor 0\nuse sjf\n"),
            Err(ParseError::MissingParameter("runfor"))
        );
    }

    #[test]
    fn test_round_robin_without_quantum() {
        assert_eq!(
            parse_input("processcount 1\nrunfor 5\nuse rr\n"),
            Err(ParseError::Scheduler(SchedulerError::MissingQuantum))
        );
    }

    #[test]
    fn test_unsupported_algorithm() {
        assert_eq!(
            parse_input("processcount 1\nrunfor 5\nuse lottery\n"),
            Err(ParseError::Scheduler(SchedulerError::UnsupportedAlgorithm(
                "lottery".into()
            )))
        );
    }

    #[test]
    fn test_malformed_lines_report_line_numbers() {
        assert_eq!(
            parse_input("processcount 1\nrunfor ten\n"),
            Err(ParseError::InvalidNumber {
                line: 2,
                value: "ten".into()
            })
        );
        assert_eq!(
            parse_input("processcount 1\nrunfor 5\nuse fcfs\nprocess name A arrival 0\n"),
            Err(ParseError::MalformedProcess { line: 4 })
        );
        assert_eq!(
            parse_input("processcount\n"),
            Err(ParseError::MissingValue {
                line: 1,
                directive: "processcount".into()
            })
        );
        assert_eq!(
            parse_input("processcount 1\nrunfor 5\nuse fcfs\nprocess name A arrival -1 burst 2\n"),
            Err(ParseError::InvalidNumber {
                line: 4,
                value: "-1".into()
            })
        );
    }

    #[traced_test]
    #[test]
    fn test_count_mismatch_is_only_a_warning() {
        let input = parse_input(
            "processcount 3\nrunfor 5\nuse sjf\nprocess name A arrival 0 burst 2\n",
        )
        .unwrap();

        assert_eq!(input.declared_count, 3);
        assert_eq!(input.processes.len(), 1);
        assert!(logs_contain("processcount does not match"));

        // The trace header counts the process lines.
        let outcome = input.simulate().unwrap();
        assert_eq!(outcome.lines()[0], "1 processes");
    }

    #[test]
    fn test_hash_inside_a_name_is_not_a_comment() {
        let text = "# header comment\nprocesscount 1\nrunfor 3\nuse fcfs\n\
                    process name P#1 arrival 0 burst 2 #trailing note\n";
        let input = parse_input(text).unwrap();
        assert_eq!(input.processes, vec![Process::new("P#1", 0, 2)]);
    }

    #[test]
    fn test_clock_overflow_is_rejected() {
        let text = "processcount 2\nrunfor 5\nuse fcfs\n\
                    process name A arrival 0 burst 4294967295\n\
                    process name B arrival 0 burst 1\n";
        assert_eq!(
            parse_input(text),
            Err(ParseError::Scheduler(SchedulerError::HorizonOverflow))
        );
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let text = "processcount 2\nrunfor 5\nuse fcfs\n\
                    process name A arrival 0 burst 2\n\
                    process name A arrival 1 burst 2\n";
        assert_eq!(
            parse_input(text),
            Err(ParseError::Scheduler(SchedulerError::DuplicateProcess(
                "A".into()
            )))
        );
    }
}
