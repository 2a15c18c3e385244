//! The draws the sampler needs from a random source.

use rand::{Rng, RngCore};
use rand_distr::{Distribution, StandardNormal};

/// Uniform, boolean and standard-normal draws.
///
/// Implemented for every `rand::RngCore`; tests can implement it directly to
/// script exact draw sequences.
pub trait RandomSource {
    /// Uniform draw in [0, 1).
    fn uniform(&mut self) -> f64;

    /// Fair coin.
    fn coin(&mut self) -> bool;

    /// Draw from N(0, 1).
    fn standard_normal(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn coin(&mut self) -> bool {
        self.gen::<bool>()
    }

    fn standard_normal(&mut self) -> f64 {
        StandardNormal.sample(self)
    }
}
