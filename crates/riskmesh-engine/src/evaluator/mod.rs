//! Dependency clause evaluation.

pub mod evaluator;
pub mod interval;
pub mod operators;

pub use evaluator::{ChainMemo, DependencyEvaluator};
pub use interval::{payload_interval, Interval};
pub use operators::compare;
