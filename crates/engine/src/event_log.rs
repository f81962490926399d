//! Append-only trace of a simulation run.
//!
//! Events are stored typed and rendered to text on demand. The rendered
//! line shapes and field widths are the externally visible contract of the
//! engine, so every formatting rule lives in [`TraceEvent::render`].

use cpusim_types::{Algorithm, Quantum, Time};

/// Field width used by traces that right-align their numbers.
pub const PADDED_WIDTH: usize = 3;

/// One line of the trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// `<N> processes`
    ProcessCount(usize),

    /// `Using <algorithm>`
    Using(Algorithm),

    /// `Quantum <Q>`
    Quantum(Quantum),

    /// No process ran during this time unit.
    Idle { time: Time },

    /// A process joined the ready queue.
    Arrived { time: Time, name: String },

    /// A process was given the CPU with `burst` units left.
    Selected {
        time: Time,
        name: String,
        burst: Time,
    },

    /// A process consumed its whole burst.
    Finished { time: Time, name: String },

    /// End of the simulation horizon.
    FinishedAt { time: Time },

    /// Processes still holding remaining time at the end of the run.
    Unfinished { names: Vec<String> },

    /// Per-process metrics.
    Summary {
        name: String,
        waiting: i64,
        turnaround: i64,
        response: i64,
    },
}

impl TraceEvent {
    /// Render the event as a trace line, right-aligning numbers in `width`
    /// columns. A width of zero prints numbers as-is.
    pub fn render(&self, width: usize) -> String {
        match self {
            TraceEvent::ProcessCount(count) => format!("{count} processes"),
            TraceEvent::Using(algorithm) => format!("Using {}", algorithm.display_name()),
            TraceEvent::Quantum(quantum) => format!("Quantum {quantum}"),
            TraceEvent::Idle { time } => format!("Time {time:>width$} : Idle"),
            TraceEvent::Arrived { time, name } => {
                format!("Time {time:>width$} : {name} arrived")
            }
            TraceEvent::Selected { time, name, burst } => {
                format!("Time {time:>width$} : {name} selected (burst {burst:>width$})")
            }
            TraceEvent::Finished { time, name } => {
                format!("Time {time:>width$} : {name} finished")
            }
            TraceEvent::FinishedAt { time } => format!("Finished at time {time:>width$}"),
            TraceEvent::Unfinished { names } => {
                format!("Unfinished processes: {}", names.join(" "))
            }
            TraceEvent::Summary {
                name,
                waiting,
                turnaround,
                response,
            } => format!(
                "{name} wait {waiting:>width$} turnaround {turnaround:>width$} response {response:>width$}"
            ),
        }
    }
}

/// Ordered, append-only sequence of trace events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<TraceEvent>,
    width: usize,
}

impl EventLog {
    /// Create an empty log that renders numbers in `width` columns.
    pub fn new(width: usize) -> Self {
        Self {
            events: Vec::new(),
            width,
        }
    }

    /// Append an event.
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// All events in emission order.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Render every event to its trace line.
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(|e| e.render(self.width)).collect()
    }

    /// Number of events recorded.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_rendering() {
        let selected = TraceEvent::Selected {
            time: 0,
            name: "A".into(),
            burst: 5,
        };
        assert_eq!(
            selected.render(PADDED_WIDTH),
            "Time   0 : A selected (burst   5)"
        );
        assert_eq!(
            TraceEvent::FinishedAt { time: 10 }.render(PADDED_WIDTH),
            "Finished at time  10"
        );
        assert_eq!(
            TraceEvent::Idle { time: 123 }.render(PADDED_WIDTH),
            "Time 123 : Idle"
        );
    }

    #[test]
    fn test_compact_rendering() {
        let arrived = TraceEvent::Arrived {
            time: 7,
            name: "P1".into(),
        };
        assert_eq!(arrived.render(0), "Time 7 : P1 arrived");
        assert_eq!(
            TraceEvent::FinishedAt { time: 20 }.render(0),
            "Finished at time 20"
        );
    }

    #[test]
    fn test_summary_negative_values_keep_width() {
        let summary = TraceEvent::Summary {
            name: "B".into(),
            waiting: -9,
            turnaround: -2,
            response: -1,
        };
        assert_eq!(
            summary.render(PADDED_WIDTH),
            "B wait  -9 turnaround  -2 response  -1"
        );
        assert_eq!(summary.render(0), "B wait -9 turnaround -2 response -1");
    }

    #[test]
    fn test_header_lines_are_never_padded() {
        assert_eq!(
            TraceEvent::ProcessCount(2).render(PADDED_WIDTH),
            "2 processes"
        );
        assert_eq!(
            TraceEvent::Using(Algorithm::RoundRobin).render(PADDED_WIDTH),
            "Using Round Robin"
        );
        let quantum = Quantum::new(2).unwrap();
        assert_eq!(
            TraceEvent::Quantum(quantum).render(PADDED_WIDTH),
            "Quantum 2"
        );
    }

    #[test]
    fn test_unfinished_line() {
        let event = TraceEvent::Unfinished {
            names: vec!["A".into(), "C".into()],
        };
        assert_eq!(event.render(0), "Unfinished processes: A C");
    }

    #[test]
    fn test_log_preserves_order() {
        let mut log = EventLog::new(0);
        assert!(log.is_empty());

        log.push(TraceEvent::Idle { time: 0 });
        log.push(TraceEvent::Idle { time: 1 });
        log.push(TraceEvent::FinishedAt { time: 2 });

        assert_eq!(log.len(), 3);
        assert_eq!(
            log.lines(),
            vec!["Time 0 : Idle", "Time 1 : Idle", "Finished at time 2"]
        );
    }
}
