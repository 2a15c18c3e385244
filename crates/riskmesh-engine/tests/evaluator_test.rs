//! Tests for clause evaluation against certain (zero-jitter) estimates.

use riskmesh_core::errors::DependencyError;
use riskmesh_core::model::{
    Attribute, Component, Decomposed, DependencyClause, Estimate, Event, Mitigation, Operator,
    Range, Risk, SingleNumber, Timeframe,
};
use riskmesh_core::{Catalog, EventId, MitigationId, RiskId, SimulationError};
use riskmesh_engine::planner::build_plan;
use riskmesh_engine::rng::trial_rng;
use riskmesh_engine::{ChainMemo, DependencyEvaluator};

fn certain(value: f64) -> Estimate {
    Estimate::single(value, 0.0, 1.0)
}

fn threshold(value: f64) -> SingleNumber {
    SingleNumber::new(value).with_confidence(1.0)
}

fn event(id: u64, probability: f64) -> Event {
    Event::new(EventId::new(id), Timeframe::Year)
        .with(Attribute::Probability, certain(probability))
}

fn with_clause(
    mut event: Event,
    list: fn(&mut Event) -> &mut Vec<DependencyClause>,
    clause: DependencyClause,
) -> Event {
    list(&mut event).push(clause);
    event
}

/// Event `id` occurring only when `target` satisfies `operator`.
fn after(id: u64, target: u64, operator: Operator) -> Event {
    with_clause(
        event(id, 0.5),
        on_event,
        DependencyClause::on_event(EventId::new(target), operator),
    )
}

fn on_event(e: &mut Event) -> &mut Vec<DependencyClause> {
    &mut e.dependencies.depends_on_event
}

fn on_impact(e: &mut Event) -> &mut Vec<DependencyClause> {
    &mut e.dependencies.depends_on_impact
}

fn on_cost(e: &mut Event) -> &mut Vec<DependencyClause> {
    &mut e.dependencies.depends_on_cost
}

fn on_probability(e: &mut Event) -> &mut Vec<DependencyClause> {
    &mut e.dependencies.depends_on_probability
}

fn on_risk(e: &mut Event) -> &mut Vec<DependencyClause> {
    &mut e.dependencies.depends_on_risk
}

fn on_mitigation(e: &mut Event) -> &mut Vec<DependencyClause> {
    &mut e.dependencies.depends_on_mitigation
}

/// Evaluate the only clause of `dependant` within `catalog`.
fn decide(catalog: &Catalog, dependant: u64) -> Result<bool, SimulationError> {
    let plan = build_plan(catalog);
    assert!(plan.bad_events.is_empty(), "{:?}", plan.bad_events);
    let clause = plan.clauses_of(EventId::new(dependant))[0];
    let evaluator = DependencyEvaluator::new(&plan, 16);
    let mut rng = trial_rng(42, 0);
    evaluator.evaluate(&mut rng, &clause)
}

fn catalog(events: Vec<Event>) -> Catalog {
    Catalog {
        events,
        ..Default::default()
    }
}

/// T2-EVL-01: Happens and DoesNotHappen follow the sampled lower edge.
#[test]
fn test_occurrence_operators() {
    let happens = catalog(vec![
        event(1, 0.5),
        after(2, 1, Operator::Happens),
    ]);
    assert!(decide(&happens, 2).unwrap());

    let never = catalog(vec![
        event(1, 0.0),
        after(2, 1, Operator::Happens),
    ]);
    assert!(!decide(&never, 2).unwrap());

    let absent = catalog(vec![
        event(1, 0.0),
        after(2, 1, Operator::DoesNotHappen),
    ]);
    assert!(decide(&absent, 2).unwrap());
}

/// T2-EVL-02: Threshold comparisons against a certain single value.
#[test]
fn test_threshold_comparisons() {
    let target = event(1, 0.5).with(Attribute::Impact, certain(20_000.0));
    let cases = [
        (Operator::Gt, 10_000.0, true),
        (Operator::Gte, 20_000.0, true),
        (Operator::Lt, 10_000.0, false),
        (Operator::Lte, 20_000.0, true),
        (Operator::Lt, 30_000.0, true),
        (Operator::Gt, 30_000.0, false),
    ];
    for (operator, value, expected) in cases {
        let dependant = with_clause(
            event(2, 0.5),
            on_impact,
            DependencyClause::on_event(EventId::new(1), operator)
                .with_single_value(threshold(value)),
        );
        let c = catalog(vec![target.clone(), dependant]);
        assert_eq!(decide(&c, 2).unwrap(), expected, "{operator} {value}");
    }
}

/// T2-EVL-03: In holds when the sample straddles the payload range.
#[test]
fn test_in_out_on_ranges() {
    let target = event(1, 0.5).with(Attribute::Impact, certain(150.0));
    let range = Range::new(threshold(100.0), threshold(200.0));
    let inside = with_clause(
        event(2, 0.5),
        on_impact,
        DependencyClause::on_event(EventId::new(1), Operator::Out).with_range(range.clone()),
    );
    assert!(decide(&catalog(vec![target.clone(), inside]), 2).unwrap());

    let straddle = with_clause(
        event(2, 0.5),
        on_impact,
        DependencyClause::on_event(EventId::new(1), Operator::In).with_range(range),
    );
    assert!(!decide(&catalog(vec![target, straddle]), 2).unwrap());
}

/// T2-EVL-04: A missing attribute compares as a zero sample.
#[test]
fn test_missing_attribute_is_zero() {
    let gt = with_clause(
        event(2, 0.5),
        on_cost,
        DependencyClause::on_event(EventId::new(1), Operator::Gt)
            .with_single_value(threshold(0.0)),
    );
    assert!(!decide(&catalog(vec![event(1, 0.5), gt]), 2).unwrap());

    let lte = with_clause(
        event(2, 0.5),
        on_cost,
        DependencyClause::on_event(EventId::new(1), Operator::Lte)
            .with_single_value(threshold(5.0)),
    );
    assert!(decide(&catalog(vec![event(1, 0.5), lte]), 2).unwrap());
}

/// T2-EVL-05: Exists and DoesNotExist test estimate presence.
#[test]
fn test_presence_operators() {
    let mitigation = Mitigation {
        id: MitigationId::new(1),
        name: String::new(),
        timeframe: Timeframe::Year,
        probability: certain(0.5),
        impact: certain(0.5),
        cost: Some(certain(1_000.0)),
    };
    let exists = with_clause(
        event(2, 0.5),
        on_mitigation,
        DependencyClause {
            event_id: None,
            mitigation_id: Some(MitigationId::new(1)),
            attribute: Some(Attribute::Cost),
            ..DependencyClause::on_event(EventId::new(0), Operator::Exists)
        },
    );
    let c = Catalog {
        events: vec![exists],
        mitigations: vec![mitigation],
        ..Default::default()
    };
    assert!(decide(&c, 2).unwrap());

    let no_cost = with_clause(
        event(2, 0.5),
        on_cost,
        DependencyClause::on_event(EventId::new(1), Operator::DoesNotExist),
    );
    assert!(decide(&catalog(vec![event(1, 0.5), no_cost]), 2).unwrap());

    let cost_exists = with_clause(
        event(2, 0.5),
        on_cost,
        DependencyClause::on_event(EventId::new(1), Operator::Exists),
    );
    assert!(!decide(&catalog(vec![event(1, 0.5), cost_exists]), 2).unwrap());
}

/// T2-EVL-06: Has and HasNot look at the named components only.
#[test]
fn test_component_operators() {
    let decomposed = Estimate::Decomposed(Decomposed::new(vec![
        Component::new("phishing", Timeframe::Year).with(Attribute::Probability, certain(0.1)),
        Component::new("insider", Timeframe::Year).with(Attribute::Probability, certain(0.0)),
    ]));
    let target =
        Event::new(EventId::new(1), Timeframe::Year).with(Attribute::Probability, decomposed);
    let names = |ids: &[&str]| {
        Decomposed::new(
            ids.iter()
                .map(|id| Component::new(*id, Timeframe::Year))
                .collect(),
        )
    };
    let cases = [
        (Operator::Has, vec!["phishing"], true),
        (Operator::Has, vec!["insider"], false),
        (Operator::Has, vec!["ghost"], false),
        (Operator::HasNot, vec!["insider"], true),
        (Operator::HasNot, vec!["phishing"], false),
    ];
    for (operator, ids, expected) in cases {
        let dependant = with_clause(
            event(2, 0.5),
            on_probability,
            DependencyClause::on_event(EventId::new(1), operator)
                .with_decomposed(names(&ids)),
        );
        let c = catalog(vec![target.clone(), dependant]);
        assert_eq!(decide(&c, 2).unwrap(), expected, "{operator} {ids:?}");
    }

    // A non-decomposed target never satisfies Has.
    let flat = with_clause(
        event(2, 0.5),
        on_probability,
        DependencyClause::on_event(EventId::new(1), Operator::Has)
            .with_decomposed(names(&["phishing"])),
    );
    assert!(!decide(&catalog(vec![event(1, 0.5), flat]), 2).unwrap());
}

/// T2-EVL-07: A gated risk clause fails when its gate's chain fails.
#[test]
fn test_gated_risk_clause() {
    let risk = Risk {
        id: RiskId::new(1),
        name: String::new(),
        timeframe: Timeframe::Year,
        probability: certain(0.3),
        impact: certain(1_000.0),
    };
    let risk_clause = |gate: Option<u64>| DependencyClause {
        event_id: gate.map(EventId::new),
        risk_id: Some(RiskId::new(1)),
        ..DependencyClause::on_event(EventId::new(0), Operator::Lt)
            .with_single_value(threshold(1.0))
    };

    let ungated = Catalog {
        events: vec![with_clause(event(2, 0.5), on_risk, risk_clause(None))],
        risks: vec![risk.clone()],
        ..Default::default()
    };
    assert!(decide(&ungated, 2).unwrap());

    // Gate 3 only occurs when 4 happens, and 4 never happens.
    let gate = after(3, 4, Operator::Happens);
    let gated = Catalog {
        events: vec![
            event(4, 0.0),
            gate,
            with_clause(event(2, 0.5), on_risk, risk_clause(Some(3))),
        ],
        risks: vec![risk],
        ..Default::default()
    };
    assert!(!decide(&gated, 2).unwrap());
}

/// T2-EVL-08: Chains hold only when every clause of the target holds.
#[test]
fn test_chain_is_conjunction() {
    let mut middle = event(2, 0.5);
    middle
        .dependencies
        .depends_on_event
        .push(DependencyClause::on_event(EventId::new(1), Operator::Happens));
    middle
        .dependencies
        .depends_on_event
        .push(DependencyClause::on_event(EventId::new(4), Operator::Happens));
    let c = catalog(vec![
        event(1, 0.5),
        middle,
        after(3, 2, Operator::Happens),
        event(4, 0.0),
    ]);
    let plan = build_plan(&c);
    let evaluator = DependencyEvaluator::new(&plan, 16);
    let mut rng = trial_rng(7, 3);
    assert!(!evaluator.chain_holds(&mut rng, EventId::new(2)).unwrap());
    assert!(evaluator.chain_holds(&mut rng, EventId::new(1)).unwrap());
    let clause = plan.clauses_of(EventId::new(3))[0];
    assert!(!evaluator.evaluate(&mut rng, &clause).unwrap());
}

/// T2-EVL-09: Chains deeper than the configured depth abort.
#[test]
fn test_depth_guard() {
    let chain = catalog(vec![
        event(1, 0.5),
        after(2, 1, Operator::Happens),
        after(3, 2, Operator::Happens),
        after(4, 3, Operator::Happens),
    ]);
    let plan = build_plan(&chain);
    let clause = plan.clauses_of(EventId::new(4))[0];
    let mut rng = trial_rng(1, 0);

    let shallow = DependencyEvaluator::new(&plan, 1);
    let err = shallow.evaluate(&mut rng, &clause).unwrap_err();
    assert!(matches!(
        err,
        SimulationError::Dependency(DependencyError::DepthExceeded { max_depth: 1, .. })
    ));

    let deep = DependencyEvaluator::new(&plan, 8);
    assert!(deep.evaluate(&mut rng, &clause).unwrap());
}

/// T2-EVL-10: A trial memo decides each chain once and keeps the depth limit.
#[test]
fn test_chain_memo_reuse() {
    let chain = catalog(vec![
        event(1, 0.5),
        after(2, 1, Operator::Happens),
        after(3, 2, Operator::Happens),
        after(4, 3, Operator::Happens),
    ]);
    let plan = build_plan(&chain);
    let evaluator = DependencyEvaluator::new(&plan, 2);
    let mut rng = trial_rng(3, 0);
    let mut memo = ChainMemo::new();

    assert!(evaluator
        .chain_holds_in(&mut rng, EventId::new(3), &mut memo)
        .unwrap());
    assert_eq!(memo.holds(EventId::new(3)), Some(true));
    assert_eq!(memo.holds(EventId::new(2)), Some(true));
    assert_eq!(memo.holds(EventId::new(1)), None);
    assert_eq!(memo.len(), 2);

    let clause = plan.clauses_of(EventId::new(4))[0];
    assert!(evaluator.evaluate_in(&mut rng, &clause, &mut memo).unwrap());

    // chain 3 was decided at the top; reaching it one level down overruns
    let err = evaluator
        .chain_holds_in(&mut rng, EventId::new(4), &mut memo)
        .unwrap_err();
    assert!(matches!(
        err,
        SimulationError::Dependency(DependencyError::DepthExceeded { max_depth: 2, .. })
    ));

    memo.clear();
    assert!(memo.is_empty());
}
