//! Trial driver.

pub mod simulator;
pub mod trial;

pub use simulator::{simulate, SimulationOutcome, Simulator};
pub use trial::{run_trial, sample_event};
