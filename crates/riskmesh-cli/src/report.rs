//! The JSON report written at the end of a run.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use riskmesh_core::SimulationResult;
use riskmesh_engine::{BadEvent, SimulationOutcome, SimulationSummary};

/// `{seed, iterations, results, bad_events, summary?}`
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub seed: u64,
    pub iterations: u64,
    pub results: &'a [SimulationResult],
    pub bad_events: &'a [BadEvent],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SimulationSummary>,
}

impl<'a> Report<'a> {
    pub fn new(outcome: &'a SimulationOutcome, summary: Option<SimulationSummary>) -> Self {
        Self {
            seed: outcome.seed,
            iterations: outcome.iterations,
            results: &outcome.results,
            bad_events: &outcome.bad_events,
            summary,
        }
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// Write `json` to `path`, or to stdout when no path is given.
pub fn write_report(path: Option<&Path>, json: &str) -> io::Result<()> {
    match path {
        Some(path) => fs::write(path, format!("{json}\n")),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
            stdout.flush()
        }
    }
}
