//! The three measurable facets of an event.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::estimate::Estimate;

/// Which facet of a record is sampled or compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Probability,
    Impact,
    Cost,
}

impl Attribute {
    pub const ALL: [Attribute; 3] = [Self::Probability, Self::Impact, Self::Cost];

    pub fn name(self) -> &'static str {
        match self {
            Self::Probability => "probability",
            Self::Impact => "impact",
            Self::Cost => "cost",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Probability, impact and cost estimates of an event.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<Estimate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<Estimate>,
    /// Impact represents a saving rather than a loss.
    #[serde(default)]
    pub is_cost_saving: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Estimate>,
}

impl Attributes {
    pub fn get(&self, attribute: Attribute) -> Option<&Estimate> {
        match attribute {
            Attribute::Probability => self.probability.as_ref(),
            Attribute::Impact => self.impact.as_ref(),
            Attribute::Cost => self.cost.as_ref(),
        }
    }

    pub fn set(&mut self, attribute: Attribute, estimate: Estimate) {
        match attribute {
            Attribute::Probability => self.probability = Some(estimate),
            Attribute::Impact => self.impact = Some(estimate),
            Attribute::Cost => self.cost = Some(estimate),
        }
    }

    /// Present estimates in attribute order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &Estimate)> {
        Attribute::ALL
            .into_iter()
            .filter_map(move |attr| self.get(attr).map(|e| (attr, e)))
    }
}
