//! Estimate sampling.
//!
//! Leaves are normalized to yearly rates, jittered by their confidence and
//! drawn from a log-normal; decompositions are combined geometrically.

pub mod estimate;
pub mod jitter;
pub mod lognormal;

pub use estimate::{sample_estimate, sample_range, sample_single};
pub use jitter::Jitter;
pub use lognormal::{composite_lognormal, log_params, sample_lognormal, sample_lognormal_in_range};
