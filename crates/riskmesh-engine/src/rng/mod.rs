//! Random sources.
//!
//! Every trial owns its own ChaCha8 stream derived from the run seed and the
//! trial index; there is no process-global generator.

pub mod seed;
pub mod source;

pub use seed::{entropy_seed, resolve_seed, trial_rng};
pub use source::RandomSource;
