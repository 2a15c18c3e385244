//! Per-trial result records.

use serde::{Deserialize, Serialize};

use super::timeframe::Timeframe;
use crate::types::EventId;

/// One sampled quantity and its sampled dispersion.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sample {
    pub value: f64,
    #[serde(rename = "stddev")]
    pub std_dev: f64,
}

impl Sample {
    pub const ZERO: Sample = Sample {
        value: 0.0,
        std_dev: 0.0,
    };

    pub fn new(value: f64, std_dev: f64) -> Self {
        Self { value, std_dev }
    }

    /// Lower edge `value - stddev` used by dependency operators.
    pub fn lower(&self) -> f64 {
        self.value - self.std_dev
    }

    /// Upper edge `value + stddev` used by dependency operators.
    pub fn upper(&self) -> f64 {
        self.value + self.std_dev
    }
}

/// One trial's record for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub trial: u64,
    pub event_id: EventId,
    pub timeframe: Timeframe,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<Sample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<Sample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Sample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_probability: Option<Sample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_impact: Option<Sample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation_probability: Option<Sample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation_impact: Option<Sample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation_cost: Option<Sample>,
    pub is_cost_saving: bool,
}

impl SimulationResult {
    /// Empty record for `event_id` in `trial`.
    pub fn new(trial: u64, event_id: EventId, timeframe: Timeframe) -> Self {
        Self {
            trial,
            event_id,
            timeframe,
            probability: None,
            impact: None,
            cost: None,
            risk_probability: None,
            risk_impact: None,
            mitigation_probability: None,
            mitigation_impact: None,
            mitigation_cost: None,
            is_cost_saving: false,
        }
    }
}
