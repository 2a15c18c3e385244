//! Per-trial dependency evaluation.

use riskmesh_core::errors::DependencyError;
use riskmesh_core::model::{Estimate, Operator};
use riskmesh_core::{EventId, Sample, SimulationError};
use rustc_hash::FxHashMap;

use super::interval::{payload_interval, Interval};
use super::operators::compare;
use crate::planner::{Clause, ClauseTarget, Payload, Plan};
use crate::rng::RandomSource;
use crate::sampling::sample_estimate;

/// Chain outcomes already decided in the current trial.
///
/// Each event's chain is walked at most once per trial; later references
/// reuse the outcome, so every dependant sees the same decision.
#[derive(Debug, Default)]
pub struct ChainMemo {
    decided: FxHashMap<EventId, Decided>,
}

impl ChainMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.decided.clear();
    }

    pub fn len(&self) -> usize {
        self.decided.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decided.is_empty()
    }

    /// Cached outcome of `event`'s chain, if it was decided this trial.
    pub fn holds(&self, event: EventId) -> Option<bool> {
        self.decided.get(&event).map(|d| d.holds)
    }
}

/// A decided chain and how many clause levels its walk went below it.
#[derive(Debug, Clone, Copy)]
struct Decided {
    holds: bool,
    height: usize,
}

impl Decided {
    const FREE: Decided = Decided {
        holds: true,
        height: 0,
    };
}

/// Evaluates lifted clauses against fresh samples of their targets.
///
/// Before a clause is decided, the chain of the event it references (and
/// of its gate event) must hold: every surviving clause of that event is
/// evaluated recursively. Recursion deeper than `max_depth` is fatal, also
/// when a memoized chain is reached from deeper than it was first decided.
#[derive(Debug, Clone, Copy)]
pub struct DependencyEvaluator<'p, 'a> {
    plan: &'p Plan<'a>,
    max_depth: usize,
}

impl<'p, 'a> DependencyEvaluator<'p, 'a> {
    pub fn new(plan: &'p Plan<'a>, max_depth: usize) -> Self {
        Self { plan, max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Decide `clause` on its own, with a fresh memo.
    pub fn evaluate<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        clause: &Clause<'a>,
    ) -> Result<bool, SimulationError> {
        self.evaluate_in(rng, clause, &mut ChainMemo::new())
    }

    /// Decide `clause` for the trial whose chain outcomes live in `memo`.
    pub fn evaluate_in<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        clause: &Clause<'a>,
        memo: &mut ChainMemo,
    ) -> Result<bool, SimulationError> {
        self.evaluate_at(rng, clause, 0, memo).map(|(holds, _)| holds)
    }

    /// Whether every surviving clause of `event` holds.
    pub fn chain_holds<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        event: EventId,
    ) -> Result<bool, SimulationError> {
        self.chain_holds_in(rng, event, &mut ChainMemo::new())
    }

    pub fn chain_holds_in<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        event: EventId,
        memo: &mut ChainMemo,
    ) -> Result<bool, SimulationError> {
        self.chain_holds_at(rng, event, 0, memo).map(|d| d.holds)
    }

    fn chain_holds_at<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        event: EventId,
        depth: usize,
        memo: &mut ChainMemo,
    ) -> Result<Decided, SimulationError> {
        let clauses = self.plan.clauses_of(event);
        if clauses.is_empty() {
            return Ok(Decided::FREE);
        }
        if let Some(decided) = memo.decided.get(&event).copied() {
            if depth + decided.height > self.max_depth {
                return Err(self.depth_exceeded(event));
            }
            return Ok(decided);
        }
        if depth >= self.max_depth {
            return Err(self.depth_exceeded(event));
        }

        let mut decided = Decided {
            holds: true,
            height: 1,
        };
        for clause in clauses {
            let (holds, below) = self.evaluate_at(rng, clause, depth + 1, memo)?;
            decided.height = decided.height.max(below + 1);
            if !holds {
                decided.holds = false;
                break;
            }
        }
        memo.decided.insert(event, decided);
        Ok(decided)
    }

    /// Returns the clause outcome and the height of the chains it walked.
    fn evaluate_at<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        clause: &Clause<'a>,
        depth: usize,
        memo: &mut ChainMemo,
    ) -> Result<(bool, usize), SimulationError> {
        let mut height = 0;
        for dependency in clause.target.event_dependencies() {
            let decided = self.chain_holds_at(rng, dependency, depth, memo)?;
            height = height.max(decided.height);
            if !decided.holds {
                return Ok((false, height));
            }
        }
        Ok((self.decide(rng, clause)?, height))
    }

    /// Sample the clause target and apply the operator.
    fn decide<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        clause: &Clause<'a>,
    ) -> Result<bool, SimulationError> {
        let Some((estimate, timeframe)) =
            self.plan.index.target_estimate(clause.target, clause.attribute)
        else {
            return Err(DependencyError::MissingReference {
                reference: describe(clause.target),
            }
            .into());
        };

        match clause.operator {
            Operator::Exists => Ok(estimate.is_some()),
            Operator::DoesNotExist => Ok(estimate.is_none()),
            Operator::Has | Operator::HasNot => {
                self.evaluate_components(rng, clause, estimate)
            }
            operator => {
                let sample = match estimate {
                    Some(estimate) => sample_estimate(rng, estimate, clause.attribute, timeframe)?,
                    None => Sample::ZERO,
                };
                let dep = payload_interval(rng, &clause.payload);
                Ok(compare(operator, Interval::from_sample(sample), dep))
            }
        }
    }

    fn depth_exceeded(&self, event: EventId) -> SimulationError {
        DependencyError::DepthExceeded {
            event,
            max_depth: self.max_depth,
        }
        .into()
    }

    /// Has / HasNot: sample each component of the target's decomposition
    /// whose id is listed in the payload and accept on the first match that
    /// satisfies the operator.
    fn evaluate_components<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        clause: &Clause<'a>,
        estimate: Option<&Estimate>,
    ) -> Result<bool, SimulationError> {
        let (Some(Estimate::Decomposed(decomposed)), Payload::Decomposed(wanted)) =
            (estimate, clause.payload)
        else {
            return Ok(false);
        };
        for component in &decomposed.components {
            if !wanted.contains(&component.component_id) {
                continue;
            }
            let sample = match component.get(clause.attribute) {
                Some(sub) => sample_estimate(rng, sub, clause.attribute, component.timeframe)?,
                None => Sample::ZERO,
            };
            if compare(clause.operator, Interval::from_sample(sample), Interval::ZERO) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

fn describe(target: ClauseTarget) -> String {
    match target {
        ClauseTarget::Event(id) => id.to_string(),
        ClauseTarget::Risk { risk, .. } => risk.to_string(),
        ClauseTarget::Mitigation { mitigation, .. } => mitigation.to_string(),
    }
}
