//! The input catalog: events, risks and mitigations.

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::estimate::{Estimate, SingleNumber};
use super::event::{Event, Mitigation, Risk};
use crate::errors::{CatalogError, EstimateError};

/// Everything a simulation run reads. Borrowed read-only by the engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub risks: Vec<Risk>,
    #[serde(default)]
    pub mitigations: Vec<Mitigation>,
}

impl Catalog {
    /// Parse a catalog from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(json).map_err(|e| CatalogError::Parse {
            message: e.to_string(),
        })
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String, CatalogError> {
        serde_json::to_string_pretty(self).map_err(|e| CatalogError::Parse {
            message: e.to_string(),
        })
    }

    /// Boundary validation: unique ids, finite non-negative values,
    /// stddev >= 0, confidence within [0, 1], ordered ranges, no nil
    /// components. Cross-references are checked later by the planner.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = FxHashSet::default();
        for (i, event) in self.events.iter().enumerate() {
            if !seen.insert(event.id) {
                return Err(CatalogError::DuplicateId {
                    reference: event.id.to_string(),
                });
            }
            for (attr, estimate) in event.attributes.iter() {
                validate_estimate(estimate, &format!("events[{i}].{attr}"))?;
            }
            for (kind, clause) in event.dependencies.iter() {
                let path = format!("events[{i}].{kind}");
                if let Some(value) = &clause.single_value {
                    validate_number(value, &format!("{path}.single_value"))?;
                }
                if let Some(range) = &clause.range {
                    validate_number(&range.minimum, &format!("{path}.range.minimum"))?;
                    validate_number(&range.maximum, &format!("{path}.range.maximum"))?;
                }
            }
        }

        let mut seen = FxHashSet::default();
        for (i, risk) in self.risks.iter().enumerate() {
            if !seen.insert(risk.id) {
                return Err(CatalogError::DuplicateId {
                    reference: risk.id.to_string(),
                });
            }
            validate_estimate(&risk.probability, &format!("risks[{i}].probability"))?;
            validate_estimate(&risk.impact, &format!("risks[{i}].impact"))?;
        }

        let mut seen = FxHashSet::default();
        for (i, mitigation) in self.mitigations.iter().enumerate() {
            if !seen.insert(mitigation.id) {
                return Err(CatalogError::DuplicateId {
                    reference: mitigation.id.to_string(),
                });
            }
            validate_estimate(
                &mitigation.probability,
                &format!("mitigations[{i}].probability"),
            )?;
            validate_estimate(&mitigation.impact, &format!("mitigations[{i}].impact"))?;
            if let Some(cost) = &mitigation.cost {
                validate_estimate(cost, &format!("mitigations[{i}].cost"))?;
            }
        }
        Ok(())
    }
}

fn validate_estimate(estimate: &Estimate, path: &str) -> Result<(), CatalogError> {
    match estimate {
        Estimate::SingleNumber(single) => validate_number(single, &format!("{path}.single_number")),
        Estimate::Range(range) => {
            validate_number(&range.minimum, &format!("{path}.range.minimum"))?;
            validate_number(&range.maximum, &format!("{path}.range.maximum"))?;
            if range.minimum.value > range.maximum.value {
                return Err(CatalogError::InvalidValue {
                    path: format!("{path}.range"),
                    message: format!(
                        "minimum {} exceeds maximum {}",
                        range.minimum.value, range.maximum.value
                    ),
                });
            }
            Ok(())
        }
        Estimate::Decomposed(decomposed) => {
            for (i, component) in decomposed.components.iter().enumerate() {
                let component_path = format!("{path}.decomposed.components[{i}]");
                if component.is_empty() {
                    return Err(CatalogError::Estimate {
                        path: component_path,
                        source: EstimateError::NilComponent {
                            component_id: component.component_id.clone(),
                        },
                    });
                }
                for attr in super::Attribute::ALL {
                    if let Some(sub) = component.get(attr) {
                        validate_estimate(sub, &format!("{component_path}.{attr}"))?;
                    }
                }
            }
            Ok(())
        }
    }
}

fn validate_number(number: &SingleNumber, path: &str) -> Result<(), CatalogError> {
    if !number.value.is_finite() || number.value < 0.0 {
        return Err(CatalogError::InvalidValue {
            path: format!("{path}.value"),
            message: format!("must be a finite non-negative number, got {}", number.value),
        });
    }
    if let Some(std_dev) = number.std_dev {
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(CatalogError::InvalidValue {
                path: format!("{path}.stddev"),
                message: format!("must be a finite non-negative number, got {std_dev}"),
            });
        }
    }
    if let Some(confidence) = number.confidence {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(CatalogError::InvalidValue {
                path: format!("{path}.confidence"),
                message: format!("must be between 0.0 and 1.0, got {confidence}"),
            });
        }
    }
    Ok(())
}
