//! Tests for dependency planning: rejections, cycles and the cascade.

use std::path::PathBuf;

use riskmesh_core::errors::DependencyError;
use riskmesh_core::model::{
    Attribute, ClauseKind, DependencyClause, Event, Operator, PayloadKind, Range, SingleNumber,
};
use riskmesh_core::{Catalog, Estimate, EventId, MitigationId, RiskId, Timeframe};
use riskmesh_engine::planner::{build_plan, ClauseTarget, Payload};

fn fixture(name: &str) -> Catalog {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/catalogs")
        .join(name);
    Catalog::from_path(&path).unwrap()
}

fn event(id: u64) -> Event {
    Event::new(EventId::new(id), Timeframe::Year)
        .with(Attribute::Probability, Estimate::single(0.5, 0.0, 1.0))
}

fn depends_on(id: u64, target: u64, operator: Operator) -> Event {
    let mut e = event(id);
    e.dependencies
        .depends_on_event
        .push(DependencyClause::on_event(EventId::new(target), operator));
    e
}

/// Every catalog id appears among resolved events, bad events, or both.
fn assert_complete(catalog: &Catalog) {
    let plan = build_plan(catalog);
    for e in &catalog.events {
        let resolved = plan.resolved.iter().any(|r| r.event.id == e.id);
        let bad = plan.bad_events.iter().any(|b| b.event_id == e.id);
        assert!(resolved || bad, "{} missing from plan", e.id);
    }
}

/// T2-PLN-01: A missing reference rejects the clause and names the id.
#[test]
fn test_missing_reference() {
    let catalog = fixture("missing_reference.json");
    let plan = build_plan(&catalog);

    assert_eq!(plan.resolved.len(), 1);
    assert_eq!(plan.resolved[0].event.id, EventId::new(1));
    assert_eq!(plan.bad_events.len(), 1);
    let bad = &plan.bad_events[0];
    assert_eq!(bad.event_id, EventId::new(2));
    assert_eq!(bad.clause, Some(ClauseKind::Event));
    assert_eq!(
        bad.reason,
        DependencyError::MissingReference {
            reference: "event 999".to_string()
        }
    );
    assert!(bad.reason.to_string().contains("999"));
    assert!(plan.is_rejected(EventId::new(2)));
}

/// T2-PLN-02: Cycle members are rejected and dependants cascade.
#[test]
fn test_cycle_rejection_cascades() {
    let catalog = fixture("dependency_cycle.json");
    let plan = build_plan(&catalog);

    let resolved = plan.resolved_event_ids();
    assert_eq!(resolved, vec![EventId::new(4)]);

    let cycle = vec![EventId::new(1), EventId::new(2)];
    for member in [1, 2] {
        assert!(plan.bad_events.iter().any(|b| b.event_id == EventId::new(member)
            && b.reason
                == DependencyError::CycleDetected {
                    cycle: cycle.clone()
                }));
    }
    assert!(plan.bad_events.iter().any(|b| b.event_id == EventId::new(3)
        && b.reason
            == DependencyError::RejectedTarget {
                target: EventId::new(2)
            }));
    assert_complete(&catalog);
}

/// T2-PLN-03: Self-dependency is a cycle.
#[test]
fn test_self_loop() {
    let catalog = Catalog {
        events: vec![depends_on(1, 1, Operator::Happens)],
        ..Default::default()
    };
    let plan = build_plan(&catalog);
    assert!(plan.resolved.is_empty());
    assert_eq!(
        plan.bad_events[0].reason,
        DependencyError::CycleDetected {
            cycle: vec![EventId::new(1)]
        }
    );
}

/// T2-PLN-04: Rejection cascades through a whole chain.
#[test]
fn test_cascade_through_chain() {
    let catalog = Catalog {
        events: vec![
            depends_on(1, 999, Operator::Happens),
            depends_on(2, 1, Operator::Happens),
            depends_on(3, 2, Operator::Happens),
            event(4),
        ],
        ..Default::default()
    };
    let plan = build_plan(&catalog);
    assert_eq!(plan.resolved_event_ids(), vec![EventId::new(4)]);
    assert_eq!(plan.bad_events.len(), 3);
    assert_complete(&catalog);
}

/// T2-PLN-05: One bad clause does not sink the event's other clauses.
#[test]
fn test_partial_rejection() {
    let mut e = depends_on(2, 1, Operator::Happens);
    e.dependencies
        .depends_on_event
        .push(DependencyClause::on_event(EventId::new(77), Operator::Happens));
    let catalog = Catalog {
        events: vec![event(1), e],
        ..Default::default()
    };
    let plan = build_plan(&catalog);
    assert_eq!(plan.resolved.len(), 2);
    assert_eq!(plan.clauses_of(EventId::new(2)).len(), 1);
    assert_eq!(plan.bad_events.len(), 1);
    assert!(!plan.is_rejected(EventId::new(2)));
}

/// T2-PLN-06: Operators without their payload are rejected.
#[test]
fn test_payload_mismatch() {
    let catalog = Catalog {
        events: vec![event(1), depends_on(2, 1, Operator::In)],
        ..Default::default()
    };
    let plan = build_plan(&catalog);
    assert_eq!(
        plan.bad_events[0].reason,
        DependencyError::PayloadMismatch {
            operator: Operator::In,
            expected: PayloadKind::Range
        }
    );
    assert_eq!(plan.bad_events[0].error_code(), "PAYLOAD_MISMATCH");
}

/// T2-PLN-07: Risk and mitigation clauses resolve their targets and attribute.
#[test]
fn test_risk_and_mitigation_targets() {
    let catalog = fixture("full_catalog.json");
    let plan = build_plan(&catalog);
    assert!(plan.bad_events.is_empty(), "{:?}", plan.bad_events);

    let fine = plan.clauses_of(EventId::new(11));
    assert_eq!(fine.len(), 2);
    assert_eq!(fine[0].target, ClauseTarget::Event(EventId::new(10)));
    assert_eq!(fine[0].attribute, Attribute::Impact);
    assert!(matches!(fine[0].payload, Payload::SingleValue(_)));
    assert_eq!(
        fine[1].target,
        ClauseTarget::Risk {
            risk: RiskId::new(1),
            gate: None
        }
    );
    assert_eq!(fine[1].attribute, Attribute::Probability);

    let payout = plan.clauses_of(EventId::new(12));
    assert_eq!(
        payout[1].target,
        ClauseTarget::Mitigation {
            mitigation: MitigationId::new(1),
            gate: None
        }
    );
    assert_eq!(payout[1].attribute, Attribute::Cost);
    assert_complete(&catalog);
}

/// T2-PLN-08: Unknown risk ids and missing target ids are rejected.
#[test]
fn test_risk_clause_errors() {
    let mut missing_risk = event(1);
    missing_risk.dependencies.depends_on_risk.push(DependencyClause {
        risk_id: Some(RiskId::new(5)),
        ..DependencyClause::on_event(EventId::new(1), Operator::Exists)
    });
    let mut no_target = event(2);
    no_target.dependencies.depends_on_cost.push(DependencyClause {
        event_id: None,
        ..DependencyClause::on_event(EventId::new(1), Operator::Gt)
            .with_single_value(SingleNumber::new(1.0))
    });
    let catalog = Catalog {
        events: vec![missing_risk, no_target],
        ..Default::default()
    };
    let plan = build_plan(&catalog);
    let reasons: Vec<_> = plan.bad_events.iter().map(|b| b.reason.clone()).collect();
    assert!(reasons.contains(&DependencyError::MissingReference {
        reference: "risk 5".to_string()
    }));
    assert!(reasons.contains(&DependencyError::MissingTarget {
        clause: "depends_on_cost",
        expected: "event"
    }));
    assert!(plan.resolved.is_empty());
}

/// T2-PLN-09: A dangling associated risk makes the event unusable.
#[test]
fn test_missing_association() {
    let mut e = event(1);
    e.associated_risk = Some(RiskId::new(3));
    let catalog = Catalog {
        events: vec![e, depends_on(2, 1, Operator::Happens)],
        ..Default::default()
    };
    let plan = build_plan(&catalog);
    assert!(plan.resolved.is_empty());
    assert!(matches!(
        plan.bad_events[0].reason,
        DependencyError::MissingAssociation { .. }
    ));
    assert!(plan.bad_events.iter().any(|b| b.event_id == EventId::new(2)
        && b.reason
            == DependencyError::RejectedTarget {
                target: EventId::new(1)
            }));
}

/// T2-PLN-10: Range payloads are carried through unchanged.
#[test]
fn test_range_payload_lifted() {
    let mut e = event(2);
    e.dependencies.depends_on_impact.push(
        DependencyClause::on_event(EventId::new(1), Operator::Out).with_range(Range::new(
            SingleNumber::new(1.0),
            SingleNumber::new(2.0),
        )),
    );
    let catalog = Catalog {
        events: vec![event(1), e],
        ..Default::default()
    };
    let plan = build_plan(&catalog);
    let clause = plan.resolved[1].clause.unwrap();
    match clause.payload {
        Payload::Range(range) => assert_eq!(range.maximum.value, 2.0),
        other => panic!("expected range payload, got {other:?}"),
    }
}
