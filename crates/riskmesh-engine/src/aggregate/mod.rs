//! Reference aggregator over finished runs.

pub mod summary;

pub use summary::{
    Aggregator, EventSummary, Histogram, PercentileValue, SampleSummary, SimulationSummary,
};
