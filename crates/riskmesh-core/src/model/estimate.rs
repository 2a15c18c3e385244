//! Estimate shapes: point, range, and recursive decomposition.
//!
//! On the wire an estimate is an object with exactly one of
//! `single_number`, `range` or `decomposed`. `EstimateRecord` is that wire
//! shape; `Estimate` is the closed variant the engine samples.

use serde::{Deserialize, Serialize};

use super::attribute::Attribute;
use super::timeframe::Timeframe;
use crate::errors::EstimateError;

/// Point estimate with optional dispersion and confidence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SingleNumber {
    pub value: f64,
    #[serde(
        default,
        rename = "stddev",
        alias = "std_dev",
        skip_serializing_if = "Option::is_none"
    )]
    pub std_dev: Option<f64>,
    /// Fraction in [0, 1]. Absent means no confidence (full jitter).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl SingleNumber {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            std_dev: None,
            confidence: None,
        }
    }

    pub fn with_std_dev(mut self, std_dev: f64) -> Self {
        self.std_dev = Some(std_dev);
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Confidence with the absent case mapped to 0.
    pub fn effective_confidence(&self) -> f64 {
        self.confidence.unwrap_or(0.0)
    }
}

/// Bounded estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub minimum: SingleNumber,
    pub maximum: SingleNumber,
}

impl Range {
    pub fn new(minimum: SingleNumber, maximum: SingleNumber) -> Self {
        Self { minimum, maximum }
    }
}

/// One summand of a decomposed estimate. Each component carries its own
/// cadence, independent of the enclosing event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub component_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<Estimate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<Estimate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Estimate>,
    #[serde(default)]
    pub timeframe: Timeframe,
}

impl Component {
    pub fn new(component_id: impl Into<String>, timeframe: Timeframe) -> Self {
        Self {
            component_id: component_id.into(),
            probability: None,
            impact: None,
            cost: None,
            timeframe,
        }
    }

    pub fn with(mut self, attribute: Attribute, estimate: Estimate) -> Self {
        match attribute {
            Attribute::Probability => self.probability = Some(estimate),
            Attribute::Impact => self.impact = Some(estimate),
            Attribute::Cost => self.cost = Some(estimate),
        }
        self
    }

    /// The sub-estimate for `attribute`, if this component has one.
    pub fn get(&self, attribute: Attribute) -> Option<&Estimate> {
        match attribute {
            Attribute::Probability => self.probability.as_ref(),
            Attribute::Impact => self.impact.as_ref(),
            Attribute::Cost => self.cost.as_ref(),
        }
    }

    /// A component with no estimate at all is a nil component.
    pub fn is_empty(&self) -> bool {
        self.probability.is_none() && self.impact.is_none() && self.cost.is_none()
    }
}

/// Weighted combination of child estimates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Decomposed {
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Decomposed {
    pub fn new(components: Vec<Component>) -> Self {
        Self { components }
    }

    /// Whether any component is named `component_id`.
    pub fn contains(&self, component_id: &str) -> bool {
        self.components
            .iter()
            .any(|c| c.component_id == component_id)
    }
}

/// A quantity expressed as a point, a range, or a decomposition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EstimateRecord", into = "EstimateRecord")]
pub enum Estimate {
    SingleNumber(SingleNumber),
    Range(Range),
    Decomposed(Decomposed),
}

impl Estimate {
    pub fn single(value: f64, std_dev: f64, confidence: f64) -> Self {
        Self::SingleNumber(
            SingleNumber::new(value)
                .with_std_dev(std_dev)
                .with_confidence(confidence),
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::SingleNumber(_) => "single_number",
            Self::Range(_) => "range",
            Self::Decomposed(_) => "decomposed",
        }
    }
}

/// Wire shape of an estimate: exactly one field must be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EstimateRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_number: Option<SingleNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decomposed: Option<Decomposed>,
}

impl TryFrom<EstimateRecord> for Estimate {
    type Error = EstimateError;

    fn try_from(record: EstimateRecord) -> Result<Self, Self::Error> {
        match (record.single_number, record.range, record.decomposed) {
            (Some(single), None, None) => Ok(Self::SingleNumber(single)),
            (None, Some(range), None) => Ok(Self::Range(range)),
            (None, None, Some(decomposed)) => Ok(Self::Decomposed(decomposed)),
            (None, None, None) => Err(EstimateError::MalformedEstimate {
                reason: "none of single_number, range, decomposed present".to_string(),
            }),
            _ => Err(EstimateError::MalformedEstimate {
                reason: "more than one of single_number, range, decomposed present"
                    .to_string(),
            }),
        }
    }
}

impl From<Estimate> for EstimateRecord {
    fn from(estimate: Estimate) -> Self {
        let mut record = EstimateRecord::default();
        match estimate {
            Estimate::SingleNumber(s) => record.single_number = Some(s),
            Estimate::Range(r) => record.range = Some(r),
            Estimate::Decomposed(d) => record.decomposed = Some(d),
        }
        record
    }
}
