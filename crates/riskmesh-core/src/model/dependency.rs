//! Dependency clauses as they appear in the catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::attribute::Attribute;
use super::estimate::{Decomposed, Range, SingleNumber};
use crate::errors::DependencyError;
use crate::types::{EventId, MitigationId, RiskId};

/// Closed set of dependency operators. Serialized as its numeric tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum Operator {
    Happens,
    DoesNotHappen,
    Exists,
    DoesNotExist,
    In,
    Out,
    Has,
    HasNot,
    Eq,
    Neq,
    Lt,
    Gt,
    Lte,
    Gte,
}

impl Operator {
    /// All operators in tag order.
    pub const ALL: [Operator; 14] = [
        Self::Happens,
        Self::DoesNotHappen,
        Self::Exists,
        Self::DoesNotExist,
        Self::In,
        Self::Out,
        Self::Has,
        Self::HasNot,
        Self::Eq,
        Self::Neq,
        Self::Lt,
        Self::Gt,
        Self::Lte,
        Self::Gte,
    ];

    pub fn tag(self) -> u64 {
        match self {
            Self::Happens => 0,
            Self::DoesNotHappen => 1,
            Self::Exists => 2,
            Self::DoesNotExist => 3,
            Self::In => 4,
            Self::Out => 5,
            Self::Has => 6,
            Self::HasNot => 7,
            Self::Eq => 8,
            Self::Neq => 9,
            Self::Lt => 10,
            Self::Gt => 11,
            Self::Lte => 12,
            Self::Gte => 13,
        }
    }

    pub fn from_tag(tag: u64) -> Result<Self, DependencyError> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.tag() == tag)
            .ok_or(DependencyError::InvalidOperator { tag })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Happens => "Happens",
            Self::DoesNotHappen => "DoesNotHappen",
            Self::Exists => "Exists",
            Self::DoesNotExist => "DoesNotExist",
            Self::In => "In",
            Self::Out => "Out",
            Self::Has => "Has",
            Self::HasNot => "HasNot",
            Self::Eq => "EQ",
            Self::Neq => "NEQ",
            Self::Lt => "LT",
            Self::Gt => "GT",
            Self::Lte => "LTE",
            Self::Gte => "GTE",
        }
    }

    /// Payload shape this operator consumes, `None` for payload-free operators.
    pub fn expected_payload(self) -> Option<PayloadKind> {
        match self {
            Self::Happens | Self::DoesNotHappen | Self::Exists | Self::DoesNotExist => None,
            Self::In | Self::Out => Some(PayloadKind::Range),
            Self::Has | Self::HasNot => Some(PayloadKind::Decomposed),
            Self::Eq | Self::Neq | Self::Lt | Self::Gt | Self::Lte | Self::Gte => {
                Some(PayloadKind::SingleValue)
            }
        }
    }
}

impl TryFrom<u64> for Operator {
    type Error = DependencyError;

    fn try_from(tag: u64) -> Result<Self, Self::Error> {
        Self::from_tag(tag)
    }
}

impl From<Operator> for u64 {
    fn from(op: Operator) -> Self {
        op.tag()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape of a clause payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    SingleValue,
    Range,
    Decomposed,
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SingleValue => "single_value",
            Self::Range => "range",
            Self::Decomposed => "decomposed",
        })
    }
}

/// Which `depends_on_*` list a clause came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseKind {
    Event,
    Probability,
    Impact,
    Cost,
    Risk,
    Mitigation,
}

impl ClauseKind {
    pub const ALL: [ClauseKind; 6] = [
        Self::Event,
        Self::Probability,
        Self::Impact,
        Self::Cost,
        Self::Risk,
        Self::Mitigation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Event => "depends_on_event",
            Self::Probability => "depends_on_probability",
            Self::Impact => "depends_on_impact",
            Self::Cost => "depends_on_cost",
            Self::Risk => "depends_on_risk",
            Self::Mitigation => "depends_on_mitigation",
        }
    }

    /// Attribute fixed by the clause list, `None` where the clause selects it.
    pub fn fixed_attribute(self) -> Option<Attribute> {
        match self {
            Self::Event | Self::Probability => Some(Attribute::Probability),
            Self::Impact => Some(Attribute::Impact),
            Self::Cost => Some(Attribute::Cost),
            Self::Risk | Self::Mitigation => None,
        }
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One typed predicate over another record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyClause {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_id: Option<RiskId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation_id: Option<MitigationId>,
    /// Attribute compared by risk and mitigation clauses. Default: probability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<Attribute>,
    pub operator: Operator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_value: Option<SingleNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decomposed: Option<Decomposed>,
}

impl DependencyClause {
    /// Payload-free clause on an event.
    pub fn on_event(event_id: EventId, operator: Operator) -> Self {
        Self {
            event_id: Some(event_id),
            risk_id: None,
            mitigation_id: None,
            attribute: None,
            operator,
            single_value: None,
            range: None,
            decomposed: None,
        }
    }

    pub fn with_single_value(mut self, value: SingleNumber) -> Self {
        self.single_value = Some(value);
        self
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_decomposed(mut self, decomposed: Decomposed) -> Self {
        self.decomposed = Some(decomposed);
        self
    }

    /// Payload shapes present on the clause, in declaration order.
    pub fn payload_kinds(&self) -> Vec<PayloadKind> {
        let mut kinds = Vec::new();
        if self.single_value.is_some() {
            kinds.push(PayloadKind::SingleValue);
        }
        if self.range.is_some() {
            kinds.push(PayloadKind::Range);
        }
        if self.decomposed.is_some() {
            kinds.push(PayloadKind::Decomposed);
        }
        kinds
    }
}

/// All dependency clauses of an event, grouped by the list they came from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dependencies {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on_event: Vec<DependencyClause>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on_probability: Vec<DependencyClause>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on_impact: Vec<DependencyClause>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on_cost: Vec<DependencyClause>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on_risk: Vec<DependencyClause>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on_mitigation: Vec<DependencyClause>,
}

impl Dependencies {
    pub fn list(&self, kind: ClauseKind) -> &[DependencyClause] {
        match kind {
            ClauseKind::Event => &self.depends_on_event,
            ClauseKind::Probability => &self.depends_on_probability,
            ClauseKind::Impact => &self.depends_on_impact,
            ClauseKind::Cost => &self.depends_on_cost,
            ClauseKind::Risk => &self.depends_on_risk,
            ClauseKind::Mitigation => &self.depends_on_mitigation,
        }
    }

    pub fn list_mut(&mut self, kind: ClauseKind) -> &mut Vec<DependencyClause> {
        match kind {
            ClauseKind::Event => &mut self.depends_on_event,
            ClauseKind::Probability => &mut self.depends_on_probability,
            ClauseKind::Impact => &mut self.depends_on_impact,
            ClauseKind::Cost => &mut self.depends_on_cost,
            ClauseKind::Risk => &mut self.depends_on_risk,
            ClauseKind::Mitigation => &mut self.depends_on_mitigation,
        }
    }

    /// Every clause tagged with its list, in list order.
    pub fn iter(&self) -> impl Iterator<Item = (ClauseKind, &DependencyClause)> {
        ClauseKind::ALL
            .into_iter()
            .flat_map(move |kind| self.list(kind).iter().map(move |c| (kind, c)))
    }

    pub fn len(&self) -> usize {
        ClauseKind::ALL.iter().map(|k| self.list(*k).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
