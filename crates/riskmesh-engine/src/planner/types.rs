//! Planner output types.

use rustc_hash::FxHashMap;
use serde::Serialize;

use riskmesh_core::errors::DependencyError;
use riskmesh_core::model::{
    Attribute, ClauseKind, Decomposed, Estimate, Event, Mitigation, Operator, Range, Risk,
    SingleNumber, Timeframe,
};
use riskmesh_core::{EventId, MitigationId, RiskId, RiskmeshErrorCode};

/// Record a clause points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseTarget {
    Event(EventId),
    /// A risk, optionally gated by an event whose chain must hold first.
    Risk { risk: RiskId, gate: Option<EventId> },
    /// A mitigation, optionally gated by an event whose chain must hold first.
    Mitigation {
        mitigation: MitigationId,
        gate: Option<EventId>,
    },
}

impl ClauseTarget {
    /// Events this target makes the clause depend on.
    pub fn event_dependencies(&self) -> impl Iterator<Item = EventId> {
        let id = match *self {
            Self::Event(id) => Some(id),
            Self::Risk { gate, .. } | Self::Mitigation { gate, .. } => gate,
        };
        id.into_iter()
    }
}

/// Clause payload, already checked against the operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload<'a> {
    None,
    SingleValue(&'a SingleNumber),
    Range(&'a Range),
    Decomposed(&'a Decomposed),
}

/// A clause that survived planning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clause<'a> {
    pub kind: ClauseKind,
    pub target: ClauseTarget,
    pub attribute: Attribute,
    pub operator: Operator,
    pub payload: Payload<'a>,
}

/// One entry of the trial loop: an event with either no clause
/// (independent) or exactly one lifted clause.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedEvent<'a> {
    pub event: &'a Event,
    pub clause: Option<Clause<'a>>,
}

impl ResolvedEvent<'_> {
    pub fn is_independent(&self) -> bool {
        self.clause.is_none()
    }
}

/// A rejected clause (or a whole event when `clause` is `None`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadEvent {
    pub event_id: EventId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clause: Option<ClauseKind>,
    #[serde(serialize_with = "serialize_reason")]
    pub reason: DependencyError,
}

impl BadEvent {
    pub fn new(event_id: EventId, clause: Option<ClauseKind>, reason: DependencyError) -> Self {
        Self {
            event_id,
            clause,
            reason,
        }
    }

    pub fn error_code(&self) -> &'static str {
        self.reason.error_code()
    }
}

fn serialize_reason<S: serde::Serializer>(
    reason: &DependencyError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&reason.coded_string())
}

/// Catalog records by id.
#[derive(Debug, Default)]
pub struct CatalogIndex<'a> {
    events: FxHashMap<EventId, &'a Event>,
    risks: FxHashMap<RiskId, &'a Risk>,
    mitigations: FxHashMap<MitigationId, &'a Mitigation>,
}

impl<'a> CatalogIndex<'a> {
    pub fn new(events: &'a [Event], risks: &'a [Risk], mitigations: &'a [Mitigation]) -> Self {
        Self {
            events: events.iter().map(|e| (e.id, e)).collect(),
            risks: risks.iter().map(|r| (r.id, r)).collect(),
            mitigations: mitigations.iter().map(|m| (m.id, m)).collect(),
        }
    }

    pub fn event(&self, id: EventId) -> Option<&'a Event> {
        self.events.get(&id).copied()
    }

    pub fn risk(&self, id: RiskId) -> Option<&'a Risk> {
        self.risks.get(&id).copied()
    }

    pub fn mitigation(&self, id: MitigationId) -> Option<&'a Mitigation> {
        self.mitigations.get(&id).copied()
    }

    /// Estimate and cadence of `attribute` on a clause target.
    /// The outer `None` means the target record does not exist.
    pub fn target_estimate(
        &self,
        target: ClauseTarget,
        attribute: Attribute,
    ) -> Option<(Option<&'a Estimate>, Timeframe)> {
        match target {
            ClauseTarget::Event(id) => self
                .event(id)
                .map(|e| (e.attributes.get(attribute), e.timeframe)),
            ClauseTarget::Risk { risk, .. } => {
                self.risk(risk).map(|r| (r.get(attribute), r.timeframe))
            }
            ClauseTarget::Mitigation { mitigation, .. } => self
                .mitigation(mitigation)
                .map(|m| (m.get(attribute), m.timeframe)),
        }
    }
}

/// Planner output: the trial list, the rejections, and every surviving
/// clause grouped by owning event for chain evaluation.
#[derive(Debug)]
pub struct Plan<'a> {
    pub index: CatalogIndex<'a>,
    pub resolved: Vec<ResolvedEvent<'a>>,
    pub bad_events: Vec<BadEvent>,
    pub(crate) chains: FxHashMap<EventId, Vec<Clause<'a>>>,
}

impl<'a> Plan<'a> {
    /// Surviving clauses of `event`, all of which must hold for it to occur.
    pub fn clauses_of(&self, event: EventId) -> &[Clause<'a>] {
        self.chains.get(&event).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Events that made it into the trial list, in catalog order, deduplicated.
    pub fn resolved_event_ids(&self) -> Vec<EventId> {
        let mut ids: Vec<EventId> = Vec::new();
        for resolved in &self.resolved {
            if ids.last() != Some(&resolved.event.id) {
                ids.push(resolved.event.id);
            }
        }
        ids
    }

    pub fn is_rejected(&self, event: EventId) -> bool {
        !self.resolved.iter().any(|r| r.event.id == event)
    }
}
