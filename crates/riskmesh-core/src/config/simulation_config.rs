//! Simulation configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ITERATIONS, DEFAULT_MAX_DEPENDENCY_DEPTH, DEFAULT_TRIAL_BATCH, DEFAULT_WORKERS,
};

/// Configuration for the trial driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of Monte Carlo trials. Default: 1000.
    pub iterations: Option<u64>,
    /// Seed for bit-exact replay. Default: drawn from the OS entropy source.
    pub seed: Option<u64>,
    /// Worker threads. Default: 0 (rayon's global pool).
    pub workers: Option<usize>,
    /// Maximum nesting of chained dependency evaluation. Default: 64.
    pub max_dependency_depth: Option<usize>,
    /// Trials per progress batch. Default: 256.
    pub trial_batch: Option<u64>,
}

impl SimulationConfig {
    /// Returns the effective iteration count, defaulting to 1000.
    pub fn effective_iterations(&self) -> u64 {
        self.iterations.unwrap_or(DEFAULT_ITERATIONS)
    }

    /// Returns the effective worker count, defaulting to 0.
    pub fn effective_workers(&self) -> usize {
        self.workers.unwrap_or(DEFAULT_WORKERS)
    }

    /// Returns the effective dependency depth cap, defaulting to 64.
    pub fn effective_max_dependency_depth(&self) -> usize {
        self.max_dependency_depth
            .unwrap_or(DEFAULT_MAX_DEPENDENCY_DEPTH)
    }

    pub fn effective_trial_batch(&self) -> u64 {
        self.trial_batch.unwrap_or(DEFAULT_TRIAL_BATCH)
    }
}
