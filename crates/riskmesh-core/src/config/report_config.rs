//! Report configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HISTOGRAM_BINS, DEFAULT_PERCENTILES};

/// Configuration for the result aggregator and report writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Equal-width histogram bins per summarized quantity. Default: 20.
    pub histogram_bins: Option<usize>,
    /// Percentiles to report, each in [0, 100]. Default: [10, 50, 90].
    #[serde(default)]
    pub percentiles: Vec<f64>,
    /// Include the aggregated summary in the report. Default: false.
    pub summary: Option<bool>,
    /// Pretty-print the JSON report. Default: false.
    pub pretty: Option<bool>,
}

impl ReportConfig {
    /// Returns the effective histogram bin count, defaulting to 20.
    pub fn effective_histogram_bins(&self) -> usize {
        self.histogram_bins.unwrap_or(DEFAULT_HISTOGRAM_BINS)
    }

    /// Returns the configured percentiles, or [10, 50, 90] when none are set.
    pub fn effective_percentiles(&self) -> Vec<f64> {
        if self.percentiles.is_empty() {
            DEFAULT_PERCENTILES.to_vec()
        } else {
            self.percentiles.clone()
        }
    }

    pub fn effective_summary(&self) -> bool {
        self.summary.unwrap_or(false)
    }

    pub fn effective_pretty(&self) -> bool {
        self.pretty.unwrap_or(false)
    }
}
