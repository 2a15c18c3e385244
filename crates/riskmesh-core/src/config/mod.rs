//! Configuration system for riskmesh.
//! TOML-based, 4-layer resolution: CLI > env > project > user > defaults.

pub mod report_config;
pub mod riskmesh_config;
pub mod simulation_config;

pub use report_config::ReportConfig;
pub use riskmesh_config::{CliOverrides, RiskmeshConfig};
pub use simulation_config::SimulationConfig;
