//! The Monte Carlo driver.
//!
//! Trials run in batches on a rayon pool. Each trial draws from its own
//! `trial_rng(seed, trial)` stream and batches are collected in trial
//! order, so a seeded run is bit-identical at any worker count.

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use riskmesh_core::config::SimulationConfig;
use riskmesh_core::constants::{
    DEFAULT_ITERATIONS, DEFAULT_MAX_DEPENDENCY_DEPTH, DEFAULT_TRIAL_BATCH, DEFAULT_WORKERS,
};
use riskmesh_core::events::types::{
    BadEventReportedEvent, ErrorEvent, PlanBuiltEvent, SimulationCancelledEvent,
    SimulationCompleteEvent, SimulationStartedEvent, TrialsProgressEvent,
};
use riskmesh_core::events::{EventDispatcher, SimulationEventHandler};
use riskmesh_core::traits::{Cancellable, CancellationToken};
use riskmesh_core::{Catalog, RiskmeshErrorCode, SimulationError, SimulationResult};

use super::trial::run_trial;
use crate::evaluator::DependencyEvaluator;
use crate::planner::{build_plan, BadEvent, Plan};
use crate::rng::{resolve_seed, trial_rng};

/// Everything a finished run produced.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutcome {
    /// Seed actually used, so an unseeded run can be replayed.
    pub seed: u64,
    pub iterations: u64,
    pub results: Vec<SimulationResult>,
    pub bad_events: Vec<BadEvent>,
}

/// Monte Carlo simulator over an event catalog.
#[derive(Debug, Clone)]
pub struct Simulator {
    iterations: u64,
    seed: Option<u64>,
    /// 0 runs on rayon's global pool.
    workers: usize,
    max_dependency_depth: usize,
    trial_batch: u64,
    cancellation: CancellationToken,
    dispatcher: EventDispatcher,
}

impl Simulator {
    /// Create a simulator running `iterations` trials.
    pub fn new(iterations: u64) -> Self {
        Self {
            iterations,
            seed: None,
            workers: DEFAULT_WORKERS,
            max_dependency_depth: DEFAULT_MAX_DEPENDENCY_DEPTH,
            trial_batch: DEFAULT_TRIAL_BATCH,
            cancellation: CancellationToken::new(),
            dispatcher: EventDispatcher::new(),
        }
    }

    /// Simulator configured from the `[simulation]` config section.
    pub fn from_config(config: &SimulationConfig) -> Self {
        let mut simulator = Self::new(config.effective_iterations())
            .with_workers(config.effective_workers())
            .with_max_dependency_depth(config.effective_max_dependency_depth())
            .with_trial_batch(config.effective_trial_batch());
        simulator.seed = config.seed;
        simulator
    }

    /// Set a deterministic seed for bit-exact replay.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run on a dedicated pool of `workers` threads (0 = global pool).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_max_dependency_depth(mut self, max_depth: usize) -> Self {
        self.max_dependency_depth = max_depth;
        self
    }

    /// Trials per batch; cancellation and progress are checked between batches.
    pub fn with_trial_batch(mut self, trial_batch: u64) -> Self {
        self.trial_batch = trial_batch.max(1);
        self
    }

    /// Share an externally owned cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Register a lifecycle observer.
    pub fn with_handler(mut self, handler: Arc<dyn SimulationEventHandler>) -> Self {
        self.dispatcher.register(handler);
        self
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Token that cancels this simulator's runs.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Validate, plan and run the catalog.
    ///
    /// Fatal errors and cancellation discard all partial results.
    pub fn simulate(&self, catalog: &Catalog) -> Result<SimulationOutcome, SimulationError> {
        let outcome = self.run(catalog);
        if let Err(error) = &outcome {
            if !matches!(error, SimulationError::Cancelled) {
                self.dispatcher.emit_error(&ErrorEvent {
                    message: error.to_string(),
                    error_code: error.error_code().to_string(),
                });
            }
        }
        outcome
    }

    fn run(&self, catalog: &Catalog) -> Result<SimulationOutcome, SimulationError> {
        if self.iterations == 0 {
            return Err(SimulationError::InvalidIterations {
                iterations: self.iterations,
            });
        }
        catalog.validate()?;

        let plan = build_plan(catalog);
        self.report_plan(catalog, &plan);

        let seed = resolve_seed(self.seed)?;
        let started = Instant::now();
        info!(
            seed,
            iterations = self.iterations,
            workers = self.workers,
            resolved = plan.resolved.len(),
            "simulation started"
        );
        self.dispatcher
            .emit_simulation_started(&SimulationStartedEvent {
                iterations: self.iterations,
                seed,
                workers: self.workers,
                resolved_events: plan.resolved.len(),
            });

        let results = if self.workers > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.workers)
                .build()
                .map_err(|e| {
                    warn!(workers = self.workers, error = %e, "worker pool construction failed");
                    SimulationError::WorkerPool {
                        message: e.to_string(),
                    }
                })?;
            pool.install(|| self.run_trials(&plan, seed))?
        } else {
            self.run_trials(&plan, seed)?
        };

        let duration_ms = started.elapsed().as_millis() as u64;
        info!(
            seed,
            iterations = self.iterations,
            results = results.len(),
            bad_events = plan.bad_events.len(),
            duration_ms,
            "simulation complete"
        );
        self.dispatcher
            .emit_simulation_complete(&SimulationCompleteEvent {
                iterations: self.iterations,
                results: results.len(),
                bad_events: plan.bad_events.len(),
                duration_ms,
            });

        Ok(SimulationOutcome {
            seed,
            iterations: self.iterations,
            results,
            bad_events: plan.bad_events.clone(),
        })
    }

    fn run_trials(
        &self,
        plan: &Plan<'_>,
        seed: u64,
    ) -> Result<Vec<SimulationResult>, SimulationError> {
        let evaluator = DependencyEvaluator::new(plan, self.max_dependency_depth);
        let mut results = Vec::new();
        let mut completed = 0u64;

        while completed < self.iterations {
            if self.cancellation.is_cancelled() {
                return Err(self.cancelled(completed));
            }
            let end = (completed + self.trial_batch).min(self.iterations);
            let start = completed;
            let batch: Result<Vec<Vec<SimulationResult>>, SimulationError> = (start..end)
                .into_par_iter()
                .map(|trial| {
                    if self.cancellation.is_cancelled() {
                        return Err(SimulationError::Cancelled);
                    }
                    let mut rng = trial_rng(seed, trial);
                    run_trial(&mut rng, plan, &evaluator, trial)
                })
                .collect();

            match batch {
                Ok(batch) => results.extend(batch.into_iter().flatten()),
                Err(SimulationError::Cancelled) => return Err(self.cancelled(completed)),
                Err(error) => return Err(error),
            }

            completed = end;
            self.dispatcher.emit_trials_progress(&TrialsProgressEvent {
                completed,
                total: self.iterations,
            });
        }
        Ok(results)
    }

    fn cancelled(&self, completed: u64) -> SimulationError {
        warn!(
            completed,
            total = self.iterations,
            "simulation cancelled, discarding partial results"
        );
        self.dispatcher
            .emit_simulation_cancelled(&SimulationCancelledEvent {
                completed,
                total: self.iterations,
            });
        SimulationError::Cancelled
    }

    fn report_plan(&self, catalog: &Catalog, plan: &Plan<'_>) {
        self.dispatcher.emit_plan_built(&PlanBuiltEvent {
            events: catalog.events.len(),
            resolved_events: plan.resolved.len(),
            bad_events: plan.bad_events.len(),
        });
        if self.dispatcher.is_empty() {
            return;
        }
        for bad in &plan.bad_events {
            self.dispatcher.emit_bad_event(&BadEventReportedEvent {
                event_id: bad.event_id,
                clause: bad.clause.map(|kind| kind.name().to_string()),
                error_code: bad.error_code().to_string(),
                message: bad.reason.to_string(),
            });
        }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}

/// Run `iterations` trials over `catalog`, seeded when `seed` is given.
pub fn simulate(
    catalog: &Catalog,
    iterations: u64,
    seed: Option<u64>,
) -> Result<SimulationOutcome, SimulationError> {
    let mut simulator = Simulator::new(iterations);
    simulator.seed = seed;
    simulator.simulate(catalog)
}
