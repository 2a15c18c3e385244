//! Sampled and payload intervals.

use riskmesh_core::model::SingleNumber;
use riskmesh_core::Sample;

use crate::planner::Payload;
use crate::rng::RandomSource;
use crate::sampling::Jitter;

/// `[min, max]` pair compared by the operators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub const ZERO: Interval = Interval { min: 0.0, max: 0.0 };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `[value − stddev, value + stddev]` of a sampled quantity.
    pub fn from_sample(sample: Sample) -> Self {
        Self::new(sample.lower(), sample.upper())
    }
}

/// Materialize the threshold interval of a clause payload.
///
/// A single value spans `value ± stddev`; a range spans from its minimum
/// less that bound's stddev to its maximum plus its stddev. One uniform and one coin are drawn per payload, and each bound
/// shifts by `bound · u · (1 − confidence)` in the coin's direction.
/// Payload-free and decomposed payloads have no interval.
pub fn payload_interval<R: RandomSource + ?Sized>(rng: &mut R, payload: &Payload<'_>) -> Interval {
    match payload {
        Payload::SingleValue(single) => {
            let jitter = Jitter::draw(rng, single.effective_confidence());
            let shift = single.value * jitter.signed_scale(rng);
            let sd = single.std_dev.unwrap_or(0.0);
            Interval::new(single.value - sd + shift, single.value + sd + shift)
        }
        Payload::Range(range) => {
            let u = rng.uniform();
            let sign = if rng.coin() { 1.0 } else { -1.0 };
            let shift = |bound: &SingleNumber| {
                sign * bound.value * u * (1.0 - bound.effective_confidence().clamp(0.0, 1.0))
            };
            let min_sd = range.minimum.std_dev.unwrap_or(0.0);
            let max_sd = range.maximum.std_dev.unwrap_or(0.0);
            Interval::new(
                range.minimum.value - min_sd + shift(&range.minimum),
                range.maximum.value + max_sd + shift(&range.maximum),
            )
        }
        Payload::None | Payload::Decomposed(_) => Interval::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::trial_rng;
    use riskmesh_core::model::Range;

    #[test]
    fn certain_single_value_spans_its_stddev() {
        let mut rng = trial_rng(1, 0);
        let value = SingleNumber::new(10.0).with_std_dev(2.0).with_confidence(1.0);
        let interval = payload_interval(&mut rng, &Payload::SingleValue(&value));
        assert_eq!(interval, Interval::new(8.0, 12.0));
    }

    #[test]
    fn certain_range_keeps_its_bounds() {
        let mut rng = trial_rng(1, 1);
        let range = Range::new(
            SingleNumber::new(100.0).with_confidence(1.0),
            SingleNumber::new(200.0).with_confidence(1.0),
        );
        let interval = payload_interval(&mut rng, &Payload::Range(&range));
        assert_eq!(interval, Interval::new(100.0, 200.0));
    }

    #[test]
    fn certain_range_widens_by_bound_stddevs() {
        let mut rng = trial_rng(1, 3);
        let range = Range::new(
            SingleNumber::new(100.0).with_std_dev(10.0).with_confidence(1.0),
            SingleNumber::new(200.0).with_std_dev(5.0).with_confidence(1.0),
        );
        let interval = payload_interval(&mut rng, &Payload::Range(&range));
        assert_eq!(interval, Interval::new(90.0, 205.0));
    }

    #[test]
    fn uncertain_value_shifts_within_its_magnitude() {
        let mut rng = trial_rng(1, 2);
        let value = SingleNumber::new(10.0).with_confidence(0.5);
        for _ in 0..1_000 {
            let interval = payload_interval(&mut rng, &Payload::SingleValue(&value));
            assert_eq!(interval.min, interval.max);
            assert!((interval.min - 10.0).abs() <= 5.0);
        }
    }
}
