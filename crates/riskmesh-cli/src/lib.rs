//! # riskmesh-cli
//!
//! The `riskmesh` command: load a catalog, run the simulation, write a JSON
//! report. Exit codes: 0 success, 1 report could not be written, 2 invalid
//! input or configuration, 3 simulation aborted.

pub mod cli;
pub mod report;
pub mod run;

pub use cli::Cli;
pub use report::Report;
pub use run::{execute, run, CliError, ExitStatus};
