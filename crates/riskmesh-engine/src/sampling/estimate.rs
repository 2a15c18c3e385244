//! Recursive estimate sampler.

use riskmesh_core::errors::EstimateError;
use riskmesh_core::model::{Attribute, Decomposed, Estimate, Range, SingleNumber, Timeframe};
use riskmesh_core::Sample;

use super::jitter::Jitter;
use super::lognormal::{composite_lognormal, sample_lognormal, sample_lognormal_in_range};
use crate::rng::RandomSource;

/// Sample `estimate` for `attribute` at cadence `timeframe`.
///
/// `attribute` only matters for decompositions, where it picks the
/// sub-estimate of each component. Inputs are never mutated.
pub fn sample_estimate<R: RandomSource + ?Sized>(
    rng: &mut R,
    estimate: &Estimate,
    attribute: Attribute,
    timeframe: Timeframe,
) -> Result<Sample, EstimateError> {
    match estimate {
        Estimate::SingleNumber(single) => sample_single(rng, single, timeframe),
        Estimate::Range(range) => sample_range(rng, range, timeframe),
        Estimate::Decomposed(decomposed) => sample_decomposed(rng, decomposed, attribute),
    }
}

pub fn sample_single<R: RandomSource + ?Sized>(
    rng: &mut R,
    single: &SingleNumber,
    timeframe: Timeframe,
) -> Result<Sample, EstimateError> {
    let value = finite(timeframe.normalize(single.value), "value")?;
    let jitter = Jitter::draw(rng, single.effective_confidence());
    let value = jitter.apply(rng, value);
    let std_dev = match single.std_dev {
        Some(sd) => jitter.apply(rng, finite(sd, "stddev")?),
        None => 0.0,
    };
    Ok(Sample::new(sample_lognormal(rng, value, std_dev), std_dev))
}

pub fn sample_range<R: RandomSource + ?Sized>(
    rng: &mut R,
    range: &Range,
    timeframe: Timeframe,
) -> Result<Sample, EstimateError> {
    let min = finite(timeframe.normalize(range.minimum.value), "minimum")?;
    let max = finite(timeframe.normalize(range.maximum.value), "maximum")?;
    let min_jitter = Jitter::draw(rng, range.minimum.effective_confidence());
    let max_jitter = Jitter::draw(rng, range.maximum.effective_confidence());

    let min = min_jitter.apply(rng, min);
    let max = max_jitter.apply(rng, max);
    let sd_min = min_jitter.apply(rng, finite(range.minimum.std_dev.unwrap_or(0.0), "stddev")?);
    let sd_max = max_jitter.apply(rng, finite(range.maximum.std_dev.unwrap_or(0.0), "stddev")?);

    let mean = (min + max) / 2.0;
    let value = sample_lognormal_in_range(rng, mean, sd_min, sd_max, min, max);
    Ok(Sample::new(value, (sd_min + sd_max) / 2.0))
}

fn sample_decomposed<R: RandomSource + ?Sized>(
    rng: &mut R,
    decomposed: &Decomposed,
    attribute: Attribute,
) -> Result<Sample, EstimateError> {
    let mut values = Vec::with_capacity(decomposed.components.len());
    let mut std_devs = Vec::with_capacity(decomposed.components.len());
    for component in &decomposed.components {
        if component.is_empty() {
            return Err(EstimateError::NilComponent {
                component_id: component.component_id.clone(),
            });
        }
        let Some(sub) = component.get(attribute) else {
            continue;
        };
        let sample = sample_estimate(rng, sub, attribute, component.timeframe)?;
        values.push(sample.value);
        std_devs.push(sample.std_dev);
    }
    let (value, std_dev) = composite_lognormal(&values, &std_devs);
    Ok(Sample::new(value, std_dev))
}

fn finite(value: f64, field: &'static str) -> Result<f64, EstimateError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EstimateError::NonFiniteValue { field })
    }
}
