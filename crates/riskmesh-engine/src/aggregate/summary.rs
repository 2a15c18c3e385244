//! Per-event summaries of a run, computed with `statrs`.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use serde::Serialize;
use statrs::statistics::{Data, OrderStatistics, Statistics};

use riskmesh_core::config::ReportConfig;
use riskmesh_core::constants::{DEFAULT_HISTOGRAM_BINS, DEFAULT_PERCENTILES};
use riskmesh_core::{EventId, Sample, SimulationResult};

/// One requested percentile and its value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileValue {
    pub percentile: f64,
    pub value: f64,
}

/// Equal-width histogram between `lower` and `upper`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub lower: f64,
    pub upper: f64,
    pub counts: Vec<u64>,
}

/// Distribution of one sampled quantity across records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub percentiles: Vec<PercentileValue>,
    pub histogram: Histogram,
}

/// Everything the aggregator reports for one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSummary {
    pub event_id: EventId,
    /// Result records, one per satisfied ResolvedEvent per trial.
    pub records: usize,
    /// Distinct trials with at least one record.
    pub trials: usize,
    /// Sum of sampled yearly probabilities.
    pub expected_occurrences: f64,
    /// Mean over all iterations of probability × impact; savings count negative.
    pub expected_annual_impact: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<SampleSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<SampleSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<SampleSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_probability: Option<SampleSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_impact: Option<SampleSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mitigation_probability: Option<SampleSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mitigation_impact: Option<SampleSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mitigation_cost: Option<SampleSummary>,
}

/// Summary of a whole run, events in id order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub iterations: u64,
    pub events: Vec<EventSummary>,
}

impl SimulationSummary {
    pub fn event(&self, id: EventId) -> Option<&EventSummary> {
        self.events.iter().find(|e| e.event_id == id)
    }
}

/// Builds `SimulationSummary` values.
#[derive(Debug, Clone)]
pub struct Aggregator {
    percentiles: Vec<f64>,
    histogram_bins: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            percentiles: DEFAULT_PERCENTILES.to_vec(),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new()
            .with_percentiles(config.effective_percentiles())
            .with_histogram_bins(config.effective_histogram_bins())
    }

    pub fn with_percentiles(mut self, percentiles: Vec<f64>) -> Self {
        self.percentiles = percentiles;
        self
    }

    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins.max(1);
        self
    }

    /// Summarize `results` of a run of `iterations` trials.
    pub fn summarize(&self, iterations: u64, results: &[SimulationResult]) -> SimulationSummary {
        let mut by_event: BTreeMap<EventId, Vec<&SimulationResult>> = BTreeMap::new();
        for record in results {
            by_event.entry(record.event_id).or_default().push(record);
        }

        let events = by_event
            .into_iter()
            .map(|(event_id, records)| self.summarize_event(iterations, event_id, &records))
            .collect();

        SimulationSummary { iterations, events }
    }

    fn summarize_event(
        &self,
        iterations: u64,
        event_id: EventId,
        records: &[&SimulationResult],
    ) -> EventSummary {
        let trials: FxHashSet<u64> = records.iter().map(|r| r.trial).collect();
        let expected_occurrences = records
            .iter()
            .filter_map(|r| r.probability)
            .map(|s| s.value)
            .sum();
        let total_impact: f64 = records
            .iter()
            .map(|r| {
                let p = r.probability.map_or(0.0, |s| s.value);
                let i = r.impact.map_or(0.0, |s| s.value);
                if r.is_cost_saving {
                    -p * i
                } else {
                    p * i
                }
            })
            .sum();

        let quantity = |pick: fn(&SimulationResult) -> Option<Sample>| {
            let values: Vec<f64> = records
                .iter()
                .filter_map(|r| pick(r))
                .map(|s| s.value)
                .collect();
            self.summarize_values(values)
        };

        EventSummary {
            event_id,
            records: records.len(),
            trials: trials.len(),
            expected_occurrences,
            expected_annual_impact: total_impact / iterations.max(1) as f64,
            probability: quantity(|r| r.probability),
            impact: quantity(|r| r.impact),
            cost: quantity(|r| r.cost),
            risk_probability: quantity(|r| r.risk_probability),
            risk_impact: quantity(|r| r.risk_impact),
            mitigation_probability: quantity(|r| r.mitigation_probability),
            mitigation_impact: quantity(|r| r.mitigation_impact),
            mitigation_cost: quantity(|r| r.mitigation_cost),
        }
    }

    /// Summary of raw values, `None` when there are none.
    pub fn summarize_values(&self, values: Vec<f64>) -> Option<SampleSummary> {
        if values.is_empty() {
            return None;
        }
        let count = values.len();
        let mean = Statistics::mean(values.iter());
        let std_dev = if count > 1 {
            Statistics::std_dev(values.iter())
        } else {
            0.0
        };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let histogram = self.histogram(&values, min, max);

        let mut data = Data::new(values);
        let percentiles = self
            .percentiles
            .iter()
            .map(|&percentile| PercentileValue {
                percentile,
                value: data.quantile((percentile / 100.0).clamp(0.0, 1.0)),
            })
            .collect();

        Some(SampleSummary {
            count,
            mean,
            std_dev,
            min,
            max,
            percentiles,
            histogram,
        })
    }

    fn histogram(&self, values: &[f64], lower: f64, upper: f64) -> Histogram {
        let bins = self.histogram_bins;
        let mut counts = vec![0u64; bins];
        let width = (upper - lower) / bins as f64;
        for &value in values {
            let bin = if width > 0.0 {
                (((value - lower) / width) as usize).min(bins - 1)
            } else {
                0
            };
            counts[bin] += 1;
        }
        Histogram {
            lower,
            upper,
            counts,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
