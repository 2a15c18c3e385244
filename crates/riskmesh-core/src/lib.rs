//! Core types, errors, configuration, events and tracing for riskmesh.
//!
//! Everything the sampling engine and the CLI share lives here: the event
//! catalog model, typed identifiers, the timeframe normalizer, one error
//! enum per subsystem, layered TOML configuration, and observer hooks.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod model;
pub mod tracing;
pub mod traits;
pub mod types;

pub use errors::{RiskmeshErrorCode, SimulationError};
pub use model::{
    Attribute, Attributes, Catalog, Component, Decomposed, DependencyClause, Estimate, Event,
    Mitigation, Operator, Range, Risk, Sample, SimulationResult, SingleNumber, Timeframe,
};
pub use types::{EventId, MitigationId, RiskId};
