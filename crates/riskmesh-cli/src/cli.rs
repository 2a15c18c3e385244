//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use riskmesh_core::config::CliOverrides;

/// Monte Carlo simulator for networks of interdependent risk events.
#[derive(Debug, Parser)]
#[command(name = "riskmesh")]
#[command(about = "Monte Carlo simulator for networks of interdependent risk events")]
#[command(version)]
pub struct Cli {
    /// Event catalog (JSON)
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Number of trials (default: 1000, or the configured value)
    #[arg(long, short = 'n')]
    pub iterations: Option<u64>,

    /// Seed for a reproducible run; drawn from OS entropy when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the JSON report here instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Worker threads (default: one per core)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Directory holding riskmesh.toml (default: current directory)
    #[arg(long, env = "RISKMESH_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Include per-event summaries in the report
    #[arg(long, default_value_t = false)]
    pub summary: bool,

    /// Pretty-print the JSON report
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

impl Cli {
    /// Flags that override every configuration layer. Boolean flags only
    /// override when set, so a config file can turn them on.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            iterations: self.iterations,
            seed: self.seed,
            workers: self.workers,
            summary: self.summary.then_some(true),
            pretty: self.pretty.then_some(true),
        }
    }

    pub fn config_root(&self) -> PathBuf {
        self.config_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
