//! Shared constants for the riskmesh simulator.

/// riskmesh version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of Monte Carlo trials.
pub const DEFAULT_ITERATIONS: u64 = 1000;

/// Default worker count (0 = rayon's default pool size).
pub const DEFAULT_WORKERS: usize = 0;

/// Default cap on nested dependency evaluation.
pub const DEFAULT_MAX_DEPENDENCY_DEPTH: usize = 64;

/// Default number of equal-width histogram bins per summarized quantity.
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// Upper bound accepted for histogram bins.
pub const MAX_HISTOGRAM_BINS: usize = 1000;

/// Default percentiles reported by the aggregator.
pub const DEFAULT_PERCENTILES: [f64; 3] = [10.0, 50.0, 90.0];

/// Trials per worker batch before progress is reported.
pub const DEFAULT_TRIAL_BATCH: u64 = 256;

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "riskmesh.toml";

/// Environment variable read by `init_tracing`.
pub const LOG_ENV_VAR: &str = "RISKMESH_LOG";

/// Filter used when `RISKMESH_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str =
    "riskmesh_core=info,riskmesh_engine=info,riskmesh_cli=info";
