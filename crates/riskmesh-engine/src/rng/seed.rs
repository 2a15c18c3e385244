//! Seed resolution and per-trial streams.

use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use riskmesh_core::errors::RngError;

/// Stream for `trial` under `seed`. Independent of which worker runs it, so
/// a seeded run replays bit-exactly at any worker count.
pub fn trial_rng(seed: u64, trial: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(trial);
    rng
}

/// Fresh seed from the operating system's entropy source.
pub fn entropy_seed() -> Result<u64, RngError> {
    let mut bytes = [0u8; 8];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| RngError::EntropyUnavailable {
            message: e.to_string(),
        })?;
    Ok(u64::from_le_bytes(bytes))
}

/// The supplied seed, or one drawn from the OS when absent.
pub fn resolve_seed(seed: Option<u64>) -> Result<u64, RngError> {
    match seed {
        Some(seed) => Ok(seed),
        None => entropy_seed(),
    }
}
