//! Events, risks and mitigations.

use serde::{Deserialize, Serialize};

use super::attribute::{Attribute, Attributes};
use super::dependency::Dependencies;
use super::estimate::Estimate;
use super::timeframe::Timeframe;
use crate::types::{EventId, MitigationId, RiskId};

/// The simulation unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub timeframe: Timeframe,
    #[serde(flatten)]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_risk: Option<RiskId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_mitigation: Option<MitigationId>,
    #[serde(flatten)]
    pub dependencies: Dependencies,
}

impl Event {
    pub fn new(id: EventId, timeframe: Timeframe) -> Self {
        Self {
            id,
            name: String::new(),
            timeframe,
            attributes: Attributes::default(),
            associated_risk: None,
            associated_mitigation: None,
            dependencies: Dependencies::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with(mut self, attribute: Attribute, estimate: Estimate) -> Self {
        self.attributes.set(attribute, estimate);
        self
    }

    /// True when the event declares no dependency clause of any kind.
    pub fn is_independent(&self) -> bool {
        self.dependencies.is_empty()
    }
}

/// Reusable risk bundle, referenced from events by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    pub id: RiskId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub timeframe: Timeframe,
    pub probability: Estimate,
    pub impact: Estimate,
}

impl Risk {
    pub fn get(&self, attribute: Attribute) -> Option<&Estimate> {
        match attribute {
            Attribute::Probability => Some(&self.probability),
            Attribute::Impact => Some(&self.impact),
            Attribute::Cost => None,
        }
    }
}

/// Reusable mitigation bundle, referenced from events by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mitigation {
    pub id: MitigationId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub timeframe: Timeframe,
    pub probability: Estimate,
    pub impact: Estimate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Estimate>,
}

impl Mitigation {
    pub fn get(&self, attribute: Attribute) -> Option<&Estimate> {
        match attribute {
            Attribute::Probability => Some(&self.probability),
            Attribute::Impact => Some(&self.impact),
            Attribute::Cost => self.cost.as_ref(),
        }
    }
}
