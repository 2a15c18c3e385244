//! Log-normal draws parameterised by linear-space moments.

use statrs::statistics::Statistics;

use crate::rng::RandomSource;

/// Log-space `(μ, σ)` whose log-normal has the given linear mean and
/// standard deviation. `None` when the mean is not positive.
pub fn log_params(mean: f64, std_dev: f64) -> Option<(f64, f64)> {
    if !mean.is_finite() || mean <= 0.0 {
        return None;
    }
    let cv = std_dev.max(0.0) / mean;
    let sigma_sq = (1.0 + cv * cv).ln();
    Some((mean.ln() - sigma_sq / 2.0, sigma_sq.sqrt()))
}

/// One log-normal draw with expectation `mean`.
///
/// Returns `mean` unchanged when `std_dev <= 0`, and 0 for a non-positive mean.
pub fn sample_lognormal<R: RandomSource + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    if mean.is_nan() || mean <= 0.0 {
        return 0.0;
    }
    if std_dev.is_nan() || std_dev <= 0.0 {
        return mean;
    }
    match log_params(mean, std_dev) {
        Some((mu, sigma)) => (mu + sigma * rng.standard_normal()).exp(),
        None => 0.0,
    }
}

/// Log-normal draw mapped onto `[lo, hi]`.
///
/// σ is drawn uniformly from `[std_dev_min, std_dev_max]`, then
/// `x = sample_lognormal(mean, σ)` is rescaled with anchors `0 ↦ lo` and
/// `2·mean ↦ hi`. Collapses to the midpoint when σ, the anchor span or the
/// mean is zero. Reversed bounds are reordered.
pub fn sample_lognormal_in_range<R: RandomSource + ?Sized>(
    rng: &mut R,
    mean: f64,
    std_dev_min: f64,
    std_dev_max: f64,
    lo: f64,
    hi: f64,
) -> f64 {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let (sd_lo, sd_hi) = if std_dev_min <= std_dev_max {
        (std_dev_min, std_dev_max)
    } else {
        (std_dev_max, std_dev_min)
    };
    let midpoint = (lo + hi) / 2.0;

    let sigma = sd_lo + rng.uniform() * (sd_hi - sd_lo);
    let span = hi - lo;
    if sigma.is_nan() || sigma <= 0.0 || span <= 0.0 || mean <= 0.0 {
        return midpoint;
    }

    let x = sample_lognormal(rng, mean, sigma);
    lo + x * span / (2.0 * mean)
}

/// Combine component samples: geometric mean of the values and quadratic
/// mean of the standard deviations. `(0, 0)` for no components; a single
/// component is returned as is.
pub fn composite_lognormal(values: &[f64], std_devs: &[f64]) -> (f64, f64) {
    match (values, std_devs) {
        ([], _) => (0.0, 0.0),
        ([value], [std_dev]) => (*value, *std_dev),
        _ => {
            let value = if values.iter().any(|v| v.is_nan() || *v <= 0.0) {
                0.0
            } else {
                Statistics::geometric_mean(values.iter())
            };
            let std_dev = if std_devs.is_empty() {
                0.0
            } else {
                Statistics::quadratic_mean(std_devs.iter())
            };
            (value, std_dev)
        }
    }
}
