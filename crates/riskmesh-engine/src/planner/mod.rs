//! Dependency planner.
//!
//! Turns a catalog into the flat list of ResolvedEvents the trial driver
//! iterates, and the BadEvents describing every clause or event it had to
//! drop.

pub mod builder;
pub mod cycles;
pub mod types;

pub use builder::build_plan;
pub use cycles::find_cycles;
pub use types::{BadEvent, CatalogIndex, Clause, ClauseTarget, Payload, Plan, ResolvedEvent};
