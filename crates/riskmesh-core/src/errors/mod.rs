//! Error handling for riskmesh.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod catalog_error;
pub mod config_error;
pub mod dependency_error;
pub mod error_code;
pub mod estimate_error;
pub mod rng_error;
pub mod simulation_error;

pub use catalog_error::CatalogError;
pub use config_error::ConfigError;
pub use dependency_error::DependencyError;
pub use error_code::RiskmeshErrorCode;
pub use estimate_error::EstimateError;
pub use rng_error::RngError;
pub use simulation_error::SimulationError;
