//! One trial: evaluate every ResolvedEvent and sample the ones that hold.

use riskmesh_core::errors::EstimateError;
use riskmesh_core::model::{Attribute, Event};
use riskmesh_core::{SimulationError, SimulationResult};

use crate::evaluator::{ChainMemo, DependencyEvaluator};
use crate::planner::{CatalogIndex, Plan};
use crate::rng::RandomSource;
use crate::sampling::sample_estimate;

/// Sample every quantity present on `event` and its associated risk and
/// mitigation. Risk and mitigation quantities are drawn at their own
/// cadence, independently of the event's attributes.
pub fn sample_event<R: RandomSource + ?Sized>(
    rng: &mut R,
    index: &CatalogIndex<'_>,
    event: &Event,
    trial: u64,
) -> Result<SimulationResult, EstimateError> {
    let mut record = SimulationResult::new(trial, event.id, event.timeframe);
    record.is_cost_saving = event.attributes.is_cost_saving;

    for (attribute, estimate) in event.attributes.iter() {
        let sample = Some(sample_estimate(rng, estimate, attribute, event.timeframe)?);
        match attribute {
            Attribute::Probability => record.probability = sample,
            Attribute::Impact => record.impact = sample,
            Attribute::Cost => record.cost = sample,
        }
    }

    if let Some(risk) = event.associated_risk.and_then(|id| index.risk(id)) {
        record.risk_probability = Some(sample_estimate(
            rng,
            &risk.probability,
            Attribute::Probability,
            risk.timeframe,
        )?);
        record.risk_impact = Some(sample_estimate(
            rng,
            &risk.impact,
            Attribute::Impact,
            risk.timeframe,
        )?);
    }

    if let Some(mitigation) = event
        .associated_mitigation
        .and_then(|id| index.mitigation(id))
    {
        record.mitigation_probability = Some(sample_estimate(
            rng,
            &mitigation.probability,
            Attribute::Probability,
            mitigation.timeframe,
        )?);
        record.mitigation_impact = Some(sample_estimate(
            rng,
            &mitigation.impact,
            Attribute::Impact,
            mitigation.timeframe,
        )?);
        if let Some(cost) = &mitigation.cost {
            record.mitigation_cost = Some(sample_estimate(
                rng,
                cost,
                Attribute::Cost,
                mitigation.timeframe,
            )?);
        }
    }

    Ok(record)
}

/// Run trial `trial` over the whole plan. Dependency misses only suppress
/// the (event, trial) pair; estimate and depth errors abort. Each event's
/// chain is decided once per trial and shared by all of its dependants.
pub fn run_trial<'a, R: RandomSource + ?Sized>(
    rng: &mut R,
    plan: &Plan<'a>,
    evaluator: &DependencyEvaluator<'_, 'a>,
    trial: u64,
) -> Result<Vec<SimulationResult>, SimulationError> {
    let mut results = Vec::with_capacity(plan.resolved.len());
    let mut memo = ChainMemo::new();
    for resolved in &plan.resolved {
        let holds = match &resolved.clause {
            None => true,
            Some(clause) => evaluator.evaluate_in(rng, clause, &mut memo)?,
        };
        if holds {
            results.push(sample_event(rng, &plan.index, resolved.event, trial)?);
        }
    }
    Ok(results)
}
