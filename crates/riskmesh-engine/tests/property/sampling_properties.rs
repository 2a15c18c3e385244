use proptest::prelude::*;

use riskmesh_core::model::{
    Attribute, Component, Decomposed, DependencyClause, Estimate, Event, Operator, Range,
    SingleNumber, Timeframe,
};
use riskmesh_core::{Catalog, EventId};
use riskmesh_engine::planner::build_plan;
use riskmesh_engine::rng::trial_rng;
use riskmesh_engine::sampling::{composite_lognormal, sample_estimate, Jitter};
use riskmesh_engine::simulate;

fn arb_timeframe() -> impl Strategy<Value = Timeframe> {
    prop::sample::select(Timeframe::ALL.to_vec())
}

fn arb_single() -> impl Strategy<Value = SingleNumber> {
    (0.0f64..1e6, prop::option::of(0.0f64..1e5), prop::option::of(0.0f64..=1.0)).prop_map(
        |(value, std_dev, confidence)| SingleNumber {
            value,
            std_dev,
            confidence,
        },
    )
}

fn arb_estimate() -> impl Strategy<Value = Estimate> {
    let leaf = prop_oneof![
        arb_single().prop_map(Estimate::SingleNumber),
        (arb_single(), arb_single()).prop_map(|(a, b)| Estimate::Range(Range::new(a, b))),
    ];
    leaf.prop_recursive(2, 8, 3, |inner| {
        prop::collection::vec((inner, arb_timeframe()), 1..4).prop_map(|parts| {
            let components = parts
                .into_iter()
                .enumerate()
                .map(|(i, (estimate, timeframe))| {
                    Component::new(format!("c{i}"), timeframe)
                        .with(Attribute::Probability, estimate)
                })
                .collect();
            Estimate::Decomposed(Decomposed::new(components))
        })
    })
}

// ── Sampler non-negativity ──────────────────────────────────────────────

proptest! {
    #[test]
    fn samples_are_never_negative(
        estimate in arb_estimate(),
        timeframe in arb_timeframe(),
        seed in any::<u64>(),
    ) {
        let mut rng = trial_rng(seed, 0);
        let sample =
            sample_estimate(&mut rng, &estimate, Attribute::Probability, timeframe).unwrap();
        prop_assert!(sample.value >= 0.0, "value {}", sample.value);
        prop_assert!(sample.std_dev >= 0.0, "stddev {}", sample.std_dev);
    }
}

// ── Timeframe multiplicativity ──────────────────────────────────────────

proptest! {
    #[test]
    fn certain_monthly_rate_scales_by_twelve(p in 0.001f64..1.0, seed in any::<u64>()) {
        let estimate = Estimate::single(p, 0.0, 1.0);
        let mut rng = trial_rng(seed, 1);
        let sample =
            sample_estimate(&mut rng, &estimate, Attribute::Probability, Timeframe::Month)
                .unwrap();
        prop_assert!((sample.value - 12.0 * p).abs() < 1e-9);
    }
}

// ── Confidence monotonicity ─────────────────────────────────────────────

proptest! {
    #[test]
    fn lower_confidence_never_narrows_jitter(
        low in 0.0f64..=1.0,
        delta in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let high = (low + delta).min(1.0);
        let loose = Jitter::draw(&mut trial_rng(seed, 2), low);
        let tight = Jitter::draw(&mut trial_rng(seed, 2), high);
        prop_assert!(loose.magnitude() >= tight.magnitude());
    }
}

/// Sample variance of `n` draws of `estimate`, one trial stream per draw.
fn sample_variance(estimate: &Estimate, seed: u64, n: u64) -> f64 {
    let values: Vec<f64> = (0..n)
        .map(|i| {
            let mut rng = trial_rng(seed, i);
            sample_estimate(&mut rng, estimate, Attribute::Impact, Timeframe::Year)
                .unwrap()
                .value
        })
        .collect();
    let mean = values.iter().sum::<f64>() / n as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64
}

fn single_at(confidence: f64) -> Estimate {
    Estimate::single(5.0, 1.0, confidence)
}

fn range_at(confidence: f64) -> Estimate {
    Estimate::Range(Range::new(
        SingleNumber::new(20.0).with_std_dev(2.0).with_confidence(confidence),
        SingleNumber::new(40.0).with_std_dev(2.0).with_confidence(confidence),
    ))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn lower_confidence_never_shrinks_sample_variance(
        high in 0.5f64..=1.0,
        gap in 0.25f64..=0.5,
        seed in any::<u64>(),
    ) {
        let low = high - gap;
        for estimate_at in [single_at as fn(f64) -> Estimate, range_at] {
            let tight = sample_variance(&estimate_at(high), seed, 4_000);
            let loose = sample_variance(&estimate_at(low), seed, 4_000);
            prop_assert!(
                loose >= 0.99 * tight,
                "variance {loose} at confidence {low} below {tight} at {high}"
            );
        }
    }
}

// ── Composite consistency ───────────────────────────────────────────────

proptest! {
    #[test]
    fn single_component_composite_is_exact(value in 0.0f64..1e9, std_dev in 0.0f64..1e6) {
        prop_assert_eq!(composite_lognormal(&[value], &[std_dev]), (value, std_dev));
    }
}

// ── Planner completeness ────────────────────────────────────────────────

fn arb_catalog() -> impl Strategy<Value = Catalog> {
    prop::collection::vec(prop::collection::vec(0u64..12, 0..3), 1..10).prop_map(|deps| {
        let events = deps
            .into_iter()
            .enumerate()
            .map(|(i, targets)| {
                let mut event = Event::new(EventId::new(i as u64), Timeframe::Year)
                    .with(Attribute::Probability, Estimate::single(0.5, 0.0, 1.0));
                for target in targets {
                    event
                        .dependencies
                        .depends_on_event
                        .push(DependencyClause::on_event(
                            EventId::new(target),
                            Operator::Happens,
                        ));
                }
                event
            })
            .collect();
        Catalog {
            events,
            ..Default::default()
        }
    })
}

proptest! {
    #[test]
    fn every_event_is_resolved_or_reported(catalog in arb_catalog()) {
        let plan = build_plan(&catalog);
        for event in &catalog.events {
            let resolved = plan.resolved.iter().any(|r| r.event.id == event.id);
            let reported = plan.bad_events.iter().any(|b| b.event_id == event.id);
            prop_assert!(resolved || reported, "{} dropped silently", event.id);
            if resolved {
                // each clause either survived or was reported, never both
                let reported_clauses = plan
                    .bad_events
                    .iter()
                    .filter(|b| b.event_id == event.id && b.clause.is_some())
                    .count();
                prop_assert_eq!(
                    plan.clauses_of(event.id).len() + reported_clauses,
                    event.dependencies.len()
                );
            }
        }
    }
}

// ── Independence round-trip ─────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]
    #[test]
    fn independent_event_emits_one_record_per_trial(iterations in 1u64..200, seed in any::<u64>()) {
        let catalog = Catalog {
            events: vec![Event::new(EventId::new(1), Timeframe::Quarter)
                .with(Attribute::Probability, Estimate::single(0.2, 0.05, 0.5))],
            ..Default::default()
        };
        let outcome = simulate(&catalog, iterations, Some(seed)).unwrap();
        prop_assert_eq!(outcome.results.len() as u64, iterations);
    }
}
