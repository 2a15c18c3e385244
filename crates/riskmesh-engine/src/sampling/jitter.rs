//! Confidence jitter.

use crate::rng::RandomSource;

/// Perturbation magnitude `u · (1 − confidence)` shared by the value and
/// stddev of one leaf. Each application flips its own coin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jitter {
    magnitude: f64,
}

impl Jitter {
    /// Draw `u ~ U[0, 1)` and scale by the missing confidence.
    pub fn draw<R: RandomSource + ?Sized>(rng: &mut R, confidence: f64) -> Self {
        let u = rng.uniform();
        Self {
            magnitude: u * (1.0 - confidence.clamp(0.0, 1.0)),
        }
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Heads adds the magnitude, tails subtracts it clamped at zero.
    pub fn apply<R: RandomSource + ?Sized>(&self, rng: &mut R, value: f64) -> f64 {
        if rng.coin() {
            value + self.magnitude
        } else {
            (value - self.magnitude).max(0.0)
        }
    }

    /// Signed shift of `value · magnitude`, direction from one coin.
    pub fn signed_scale<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        if rng.coin() {
            self.magnitude
        } else {
            -self.magnitude
        }
    }
}
