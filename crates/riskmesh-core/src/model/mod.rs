//! Event catalog model and per-trial result records.
//!
//! Everything here is plain data: the engine borrows a `Catalog` read-only
//! for the duration of a run and produces `SimulationResult` records.

pub mod attribute;
pub mod catalog;
pub mod dependency;
pub mod estimate;
pub mod event;
pub mod result;
pub mod timeframe;

pub use attribute::{Attribute, Attributes};
pub use catalog::Catalog;
pub use dependency::{ClauseKind, DependencyClause, Dependencies, Operator, PayloadKind};
pub use estimate::{Component, Decomposed, Estimate, EstimateRecord, Range, SingleNumber};
pub use event::{Event, Mitigation, Risk};
pub use result::{Sample, SimulationResult};
pub use timeframe::{normalize, Timeframe};
