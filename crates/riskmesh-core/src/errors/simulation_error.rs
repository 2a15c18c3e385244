//! Top-level simulation errors.

use super::error_code::{self, RiskmeshErrorCode};
use super::{CatalogError, ConfigError, DependencyError, EstimateError, RngError};

/// Errors that abort `simulate`.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Estimate error: {0}")]
    Estimate(#[from] EstimateError),

    #[error("Dependency error: {0}")]
    Dependency(#[from] DependencyError),

    #[error("Random source error: {0}")]
    Rng(#[from] RngError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Iteration count must be positive, got {iterations}")]
    InvalidIterations { iterations: u64 },

    #[error("Worker pool could not be built: {message}")]
    WorkerPool { message: String },

    #[error("Simulation cancelled")]
    Cancelled,
}

impl SimulationError {
    /// Returns true when the failure is attributable to the input catalog
    /// or configuration rather than to the run itself.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Catalog(_) | Self::Config(_) | Self::InvalidIterations { .. }
        )
    }
}

impl RiskmeshErrorCode for SimulationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Estimate(e) => e.error_code(),
            Self::Dependency(e) => e.error_code(),
            Self::Rng(e) => e.error_code(),
            Self::Catalog(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::InvalidIterations { .. } => error_code::INVALID_ITERATIONS,
            Self::WorkerPool { .. } => error_code::WORKER_POOL,
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}
