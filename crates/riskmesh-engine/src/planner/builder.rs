//! Plan construction: reference checks, payload checks, cycle rejection and
//! the cascade of rejections onto dependants.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info};

use riskmesh_core::errors::DependencyError;
use riskmesh_core::model::{Attribute, ClauseKind, DependencyClause, PayloadKind};
use riskmesh_core::{Catalog, EventId};

use super::cycles::find_cycles;
use super::types::{BadEvent, CatalogIndex, Clause, ClauseTarget, Payload, Plan, ResolvedEvent};

/// Build the plan for `catalog`.
///
/// Every event id ends up in `resolved`, in `bad_events`, or both (when
/// only some of its clauses were dropped). Never fails: problems with
/// individual clauses or events are reported as BadEvents.
pub fn build_plan(catalog: &Catalog) -> Plan<'_> {
    let index = CatalogIndex::new(&catalog.events, &catalog.risks, &catalog.mitigations);
    let mut bad_events = Vec::new();
    let mut unusable: FxHashSet<EventId> = FxHashSet::default();
    let mut chains: FxHashMap<EventId, Vec<Clause<'_>>> = FxHashMap::default();

    // Pass 1: associations, references and payload shapes.
    for event in &catalog.events {
        if let Some(risk) = event.associated_risk {
            if index.risk(risk).is_none() {
                bad_events.push(BadEvent::new(
                    event.id,
                    None,
                    DependencyError::MissingAssociation {
                        reference: risk.to_string(),
                    },
                ));
                unusable.insert(event.id);
            }
        }
        if let Some(mitigation) = event.associated_mitigation {
            if index.mitigation(mitigation).is_none() {
                bad_events.push(BadEvent::new(
                    event.id,
                    None,
                    DependencyError::MissingAssociation {
                        reference: mitigation.to_string(),
                    },
                ));
                unusable.insert(event.id);
            }
        }

        let mut surviving = Vec::with_capacity(event.dependencies.len());
        for (kind, raw) in event.dependencies.iter() {
            match lift_clause(&index, kind, raw) {
                Ok(clause) => surviving.push(clause),
                Err(reason) => {
                    debug!(event = %event.id, clause = %kind, %reason, "clause rejected");
                    bad_events.push(BadEvent::new(event.id, Some(kind), reason));
                }
            }
        }
        chains.insert(event.id, surviving);
    }

    // Pass 2: cycles.
    let edges: Vec<(EventId, EventId)> = chains
        .iter()
        .flat_map(|(&from, clauses)| {
            clauses
                .iter()
                .flat_map(move |c| c.target.event_dependencies().map(move |to| (from, to)))
        })
        .collect();
    for cycle in find_cycles(catalog.events.iter().map(|e| e.id), edges) {
        for &member in &cycle {
            debug!(event = %member, "event rejected: dependency cycle");
            bad_events.push(BadEvent::new(
                member,
                None,
                DependencyError::CycleDetected {
                    cycle: cycle.clone(),
                },
            ));
            unusable.insert(member);
            if let Some(clauses) = chains.get_mut(&member) {
                clauses.clear();
            }
        }
    }

    // Pass 3: cascade to a fixpoint. An event that declared clauses but has
    // none left is unusable, and so is every clause that depends on one.
    loop {
        let mut changed = false;
        for event in &catalog.events {
            if unusable.contains(&event.id) {
                continue;
            }
            let Some(clauses) = chains.get_mut(&event.id) else {
                continue;
            };
            let before = clauses.len();
            clauses.retain(|clause| {
                let rejected = clause
                    .target
                    .event_dependencies()
                    .find(|dep| unusable.contains(dep));
                match rejected {
                    Some(target) => {
                        debug!(event = %event.id, %target, "clause rejected: target unusable");
                        bad_events.push(BadEvent::new(
                            event.id,
                            Some(clause.kind),
                            DependencyError::RejectedTarget { target },
                        ));
                        false
                    }
                    None => true,
                }
            });
            if clauses.len() != before {
                changed = true;
            }
            if !event.is_independent() && clauses.is_empty() {
                unusable.insert(event.id);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    let mut resolved = Vec::with_capacity(catalog.events.len());
    for event in &catalog.events {
        if unusable.contains(&event.id) {
            continue;
        }
        if event.is_independent() {
            resolved.push(ResolvedEvent {
                event,
                clause: None,
            });
            continue;
        }
        for clause in chains.get(&event.id).into_iter().flatten() {
            resolved.push(ResolvedEvent {
                event,
                clause: Some(*clause),
            });
        }
    }
    for id in &unusable {
        chains.remove(id);
    }

    info!(
        events = catalog.events.len(),
        resolved = resolved.len(),
        bad = bad_events.len(),
        "dependency plan built"
    );

    Plan {
        index,
        resolved,
        bad_events,
        chains,
    }
}

/// Check one raw clause against the catalog and lift it.
fn lift_clause<'a>(
    index: &CatalogIndex<'a>,
    kind: ClauseKind,
    raw: &'a DependencyClause,
) -> Result<Clause<'a>, DependencyError> {
    let gate = match raw.event_id {
        Some(id) if index.event(id).is_none() => {
            return Err(DependencyError::MissingReference {
                reference: id.to_string(),
            })
        }
        other => other,
    };

    let target = match kind {
        ClauseKind::Event | ClauseKind::Probability | ClauseKind::Impact | ClauseKind::Cost => {
            let id = gate.ok_or(DependencyError::MissingTarget {
                clause: kind.name(),
                expected: "event",
            })?;
            ClauseTarget::Event(id)
        }
        ClauseKind::Risk => {
            let risk = raw.risk_id.ok_or(DependencyError::MissingTarget {
                clause: kind.name(),
                expected: "risk",
            })?;
            if index.risk(risk).is_none() {
                return Err(DependencyError::MissingReference {
                    reference: risk.to_string(),
                });
            }
            ClauseTarget::Risk { risk, gate }
        }
        ClauseKind::Mitigation => {
            let mitigation = raw.mitigation_id.ok_or(DependencyError::MissingTarget {
                clause: kind.name(),
                expected: "mitigation",
            })?;
            if index.mitigation(mitigation).is_none() {
                return Err(DependencyError::MissingReference {
                    reference: mitigation.to_string(),
                });
            }
            ClauseTarget::Mitigation { mitigation, gate }
        }
    };

    let attribute = kind
        .fixed_attribute()
        .unwrap_or(raw.attribute.unwrap_or(Attribute::Probability));

    let payload = match raw.operator.expected_payload() {
        None => Payload::None,
        Some(expected) => {
            let payload = match expected {
                PayloadKind::SingleValue => raw.single_value.as_ref().map(Payload::SingleValue),
                PayloadKind::Range => raw.range.as_ref().map(Payload::Range),
                PayloadKind::Decomposed => raw.decomposed.as_ref().map(Payload::Decomposed),
            };
            payload.ok_or(DependencyError::PayloadMismatch {
                operator: raw.operator,
                expected,
            })?
        }
    };

    Ok(Clause {
        kind,
        target,
        attribute,
        operator: raw.operator,
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskmesh_core::model::{Event, Operator, Timeframe};

    #[test]
    fn independent_event_resolves_once() {
        let catalog = Catalog {
            events: vec![Event::new(EventId::new(1), Timeframe::Year)],
            ..Default::default()
        };
        let plan = build_plan(&catalog);
        assert_eq!(plan.resolved.len(), 1);
        assert!(plan.resolved[0].is_independent());
        assert!(plan.bad_events.is_empty());
    }

    #[test]
    fn each_surviving_clause_is_its_own_entry() {
        let mut dependant = Event::new(EventId::new(2), Timeframe::Year);
        dependant
            .dependencies
            .depends_on_event
            .push(DependencyClause::on_event(EventId::new(1), Operator::Happens));
        dependant
            .dependencies
            .depends_on_probability
            .push(DependencyClause::on_event(EventId::new(1), Operator::Exists));
        let catalog = Catalog {
            events: vec![Event::new(EventId::new(1), Timeframe::Year), dependant],
            ..Default::default()
        };
        let plan = build_plan(&catalog);
        assert_eq!(plan.resolved.len(), 3);
        assert_eq!(plan.clauses_of(EventId::new(2)).len(), 2);
        assert_eq!(
            plan.resolved_event_ids(),
            vec![EventId::new(1), EventId::new(2)]
        );
    }
}
