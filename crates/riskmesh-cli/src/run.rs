//! Command execution and exit-code mapping.

use std::fs;

use tracing::{error, info};

use riskmesh_core::config::RiskmeshConfig;
use riskmesh_core::errors::{CatalogError, ConfigError};
use riskmesh_core::{Catalog, RiskmeshErrorCode, SimulationError};
use riskmesh_engine::{Aggregator, Simulator};

use crate::cli::Cli;
use crate::report::{write_report, Report};

const OUTPUT_ERROR: &str = "OUTPUT_ERROR";

/// Process exit status of a `riskmesh` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    OutputFailed,
    InvalidInput,
    Aborted,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::OutputFailed => 1,
            Self::InvalidInput => 2,
            Self::Aborted => 3,
        }
    }
}

/// Everything that can stop a run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error("Cannot write report to {path}: {message}")]
    Output { path: String, message: String },
}

impl CliError {
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            Self::Config(_) | Self::Catalog(_) => ExitStatus::InvalidInput,
            Self::Simulation(e) if e.is_input_error() => ExitStatus::InvalidInput,
            Self::Simulation(_) => ExitStatus::Aborted,
            Self::Output { .. } => ExitStatus::OutputFailed,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Catalog(e) => e.error_code(),
            Self::Simulation(e) => e.error_code(),
            Self::Output { .. } => OUTPUT_ERROR,
        }
    }
}

/// Run the command and report failures on stderr.
pub fn run(cli: &Cli) -> ExitStatus {
    match execute(cli) {
        Ok(()) => ExitStatus::Success,
        Err(e) => {
            let status = e.exit_status();
            error!(error_code = e.error_code(), exit_code = status.code(), "{e}");
            eprintln!("riskmesh: [{}] {e}", e.error_code());
            status
        }
    }
}

/// Load configuration and catalog, simulate, and write the report.
pub fn execute(cli: &Cli) -> Result<(), CliError> {
    let config = RiskmeshConfig::load(&cli.config_root(), Some(&cli.overrides()))?;
    let catalog = Catalog::from_path(&cli.input)?;
    info!(
        input = %cli.input.display(),
        events = catalog.events.len(),
        risks = catalog.risks.len(),
        mitigations = catalog.mitigations.len(),
        "catalog loaded"
    );

    let outcome = Simulator::from_config(&config.simulation).simulate(&catalog)?;

    let summary = config.report.effective_summary().then(|| {
        Aggregator::from_config(&config.report).summarize(outcome.iterations, &outcome.results)
    });
    let report = Report::new(&outcome, summary);
    let destination = cli
        .output
        .as_ref()
        .map_or_else(|| "stdout".to_string(), |p| p.display().to_string());
    let output_error = |message: String| CliError::Output {
        path: destination.clone(),
        message,
    };
    let json = report
        .to_json(config.report.effective_pretty())
        .map_err(|e| output_error(e.to_string()))?;

    if let Some(parent) = cli.output.as_ref().and_then(|p| p.parent()) {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| output_error(e.to_string()))?;
        }
    }
    write_report(cli.output.as_deref(), &json).map_err(|e| output_error(e.to_string()))?;

    info!(
        seed = outcome.seed,
        results = outcome.results.len(),
        bad_events = outcome.bad_events.len(),
        output = %destination,
        "report written"
    );
    Ok(())
}
