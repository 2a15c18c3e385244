//! # riskmesh-engine
//!
//! Monte Carlo engine for networks of interdependent risk events.
//!
//! - `rng`: per-trial counter-based random streams
//! - `sampling`: log-normal draws, confidence jitter, recursive estimate sampling
//! - `planner`: reference checks, cycle rejection, ResolvedEvent list
//! - `evaluator`: dependency clause satisfaction
//! - `driver`: parallel trial loop producing `SimulationResult` records
//! - `aggregate`: per-event summaries over a finished run

pub mod aggregate;
pub mod driver;
pub mod evaluator;
pub mod planner;
pub mod rng;
pub mod sampling;

pub use aggregate::{Aggregator, EventSummary, SampleSummary, SimulationSummary};
pub use driver::{simulate, SimulationOutcome, Simulator};
pub use evaluator::{ChainMemo, DependencyEvaluator};
pub use planner::{build_plan, BadEvent, Clause, ClauseTarget, Payload, Plan, ResolvedEvent};
pub use rng::RandomSource;
pub use sampling::sample_estimate;
