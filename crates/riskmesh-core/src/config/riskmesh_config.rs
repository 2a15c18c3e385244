//! Top-level riskmesh configuration with 4-layer resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ReportConfig, SimulationConfig};
use crate::constants::{MAX_HISTOGRAM_BINS, PROJECT_CONFIG_FILE};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`RISKMESH_*`)
/// 3. Project config (`riskmesh.toml` in project root)
/// 4. User config (`~/.riskmesh/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RiskmeshConfig {
    pub simulation: SimulationConfig,
    pub report: ReportConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub iterations: Option<u64>,
    pub seed: Option<u64>,
    pub workers: Option<usize>,
    pub summary: Option<bool>,
    pub pretty: Option<bool>,
}

impl RiskmeshConfig {
    /// Load configuration with 4-layer resolution, reading the user layer
    /// from `~/.riskmesh/config.toml`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        Self::load_with_user_config(root, Self::user_config_path().as_deref(), cli_overrides)
    }

    /// Same as `load`, with an explicit user config path (`None` skips the layer).
    pub fn load_with_user_config(
        root: &Path,
        user_config: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = user_config {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &RiskmeshConfig) -> Result<(), ConfigError> {
        if config.simulation.iterations == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "simulation.iterations".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.simulation.workers == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "simulation.workers".to_string(),
                message: "must be greater than 0 when set".to_string(),
            });
        }
        if config.simulation.max_dependency_depth == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "simulation.max_dependency_depth".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.simulation.trial_batch == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "simulation.trial_batch".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(bins) = config.report.histogram_bins {
            if !(1..=MAX_HISTOGRAM_BINS).contains(&bins) {
                return Err(ConfigError::ValidationFailed {
                    field: "report.histogram_bins".to_string(),
                    message: format!("must be between 1 and {MAX_HISTOGRAM_BINS}"),
                });
            }
        }
        for p in &config.report.percentiles {
            if !(0.0..=100.0).contains(p) {
                return Err(ConfigError::ValidationFailed {
                    field: "report.percentiles".to_string(),
                    message: format!("{p} is not between 0 and 100"),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.riskmesh/config.toml`.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut RiskmeshConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: RiskmeshConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    pub fn merge(base: &mut RiskmeshConfig, other: &RiskmeshConfig) {
        // Simulation
        if other.simulation.iterations.is_some() {
            base.simulation.iterations = other.simulation.iterations;
        }
        if other.simulation.seed.is_some() {
            base.simulation.seed = other.simulation.seed;
        }
        if other.simulation.workers.is_some() {
            base.simulation.workers = other.simulation.workers;
        }
        if other.simulation.max_dependency_depth.is_some() {
            base.simulation.max_dependency_depth = other.simulation.max_dependency_depth;
        }
        if other.simulation.trial_batch.is_some() {
            base.simulation.trial_batch = other.simulation.trial_batch;
        }

        // Report
        if other.report.histogram_bins.is_some() {
            base.report.histogram_bins = other.report.histogram_bins;
        }
        if !other.report.percentiles.is_empty() {
            base.report.percentiles = other.report.percentiles.clone();
        }
        if other.report.summary.is_some() {
            base.report.summary = other.report.summary;
        }
        if other.report.pretty.is_some() {
            base.report.pretty = other.report.pretty;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `RISKMESH_ITERATIONS`, `RISKMESH_SEED`, etc.
    /// A set but unparseable variable is an error rather than silently ignored.
    fn apply_env_overrides(config: &mut RiskmeshConfig) -> Result<(), ConfigError> {
        if let Some(v) = env_number::<u64>("RISKMESH_ITERATIONS")? {
            config.simulation.iterations = Some(v);
        }
        if let Some(v) = env_number::<u64>("RISKMESH_SEED")? {
            config.simulation.seed = Some(v);
        }
        if let Some(v) = env_number::<usize>("RISKMESH_WORKERS")? {
            config.simulation.workers = Some(v);
        }
        if let Some(v) = env_number::<usize>("RISKMESH_MAX_DEPENDENCY_DEPTH")? {
            config.simulation.max_dependency_depth = Some(v);
        }
        if let Some(v) = env_number::<usize>("RISKMESH_HISTOGRAM_BINS")? {
            config.report.histogram_bins = Some(v);
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    pub fn apply_cli_overrides(config: &mut RiskmeshConfig, cli: &CliOverrides) {
        if let Some(v) = cli.iterations {
            config.simulation.iterations = Some(v);
        }
        if let Some(v) = cli.seed {
            config.simulation.seed = Some(v);
        }
        if let Some(v) = cli.workers {
            config.simulation.workers = Some(v);
        }
        if let Some(v) = cli.summary {
            config.report.summary = Some(v);
        }
        if let Some(v) = cli.pretty {
            config.report.pretty = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_number<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                field: key.to_string(),
                message: format!("'{val}' is not a valid number"),
            }),
        Err(_) => Ok(None),
    }
}

/// Returns the user-level riskmesh config directory: `~/.riskmesh/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".riskmesh"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
