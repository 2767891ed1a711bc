//! Validated distributions and bounded sampling.

use rand::Rng;
use rand_distr::{Beta, Distribution as _, Exp, Poisson};

use cs_core::SimRng;

use crate::{DistError, DistResult, DurationSpec, Moments, TypedSpec};

/// A distribution that has passed validation and can be sampled.
///
/// Construct with [`Distribution::compile`].  Every variant yields finite,
/// non-negative durations; the bounded variants never leave `[min, max]`.
#[derive(Clone, Debug)]
pub enum Distribution {
    /// Always `value`.
    Fixed(f64),

    /// `min + (max - min) * Beta(a, b)`, clamped to `[min, max]`.
    Beta { min: f64, max: f64, mean: f64, beta: Beta<f64> },

    /// `offset + Poisson(lambda)`.
    Poisson { offset: f64, poisson: Poisson<f64> },

    /// Uniform on `[min, max]`.
    Uniform { min: f64, max: f64 },

    /// `min + Exp(1 / (mean - min))`, clamped to `max`.
    Exponential { min: f64, max: f64, exp: Exp<f64> },
}

impl Distribution {
    /// Validate `spec` and build the sampler for it.  `name` is only used in
    /// error messages.
    pub fn compile(name: &str, spec: &DurationSpec) -> DistResult<Self> {
        match spec {
            DurationSpec::Moments(m) | DurationSpec::Typed(TypedSpec::Beta(m)) => {
                Self::fit_beta(name, m)
            }
            DurationSpec::Typed(TypedSpec::Poisson { offset, lambda }) => {
                if !offset.is_finite() || *offset < 0.0 {
                    return Err(invalid(name, format!("offset must be >= 0, got {offset}")));
                }
                let poisson = Poisson::new(*lambda)
                    .map_err(|e| invalid(name, format!("lambda {lambda}: {e}")))?;
                Ok(Distribution::Poisson { offset: *offset, poisson })
            }
            DurationSpec::Typed(TypedSpec::Uniform { min, max }) => {
                check_bounds(name, *min, *max)?;
                if min == max {
                    return Ok(Distribution::Fixed(*min));
                }
                Ok(Distribution::Uniform { min: *min, max: *max })
            }
            DurationSpec::Typed(TypedSpec::Exponential { min, max, mean }) => {
                check_bounds(name, *min, *max)?;
                if mean.is_nan() || mean <= min {
                    return Err(invalid(name, format!("mean {mean} must exceed min {min}")));
                }
                let exp = Exp::new(1.0 / (mean - min))
                    .map_err(|e| invalid(name, format!("rate: {e}")))?;
                Ok(Distribution::Exponential { min: *min, max: *max, exp })
            }
            DurationSpec::Typed(TypedSpec::Fixed { value }) => {
                if !value.is_finite() || *value < 0.0 {
                    return Err(invalid(name, format!("fixed value must be >= 0, got {value}")));
                }
                Ok(Distribution::Fixed(*value))
            }
        }
    }

    /// Method-of-moments Beta fit on the rescaled unit interval.
    fn fit_beta(name: &str, m: &Moments) -> DistResult<Self> {
        let Moments { min, max, mean, variance } = *m;
        check_bounds(name, min, max)?;
        if !mean.is_finite() || !variance.is_finite() || variance < 0.0 {
            return Err(degenerate(name, m));
        }
        if variance == 0.0 || min == max {
            if mean < min || mean > max {
                return Err(degenerate(name, m));
            }
            return Ok(Distribution::Fixed(mean));
        }

        let range = max - min;
        let mu = (mean - min) / range;
        let sigma2 = variance / (range * range);
        let a = (mu * mu - mu * mu * mu - mu * sigma2) / sigma2;
        let b = (mu - 1.0) * (mu * mu - mu + sigma2) / sigma2;
        if !(a.is_finite() && b.is_finite()) || a <= 0.0 || b <= 0.0 {
            return Err(degenerate(name, m));
        }
        let beta = Beta::new(a, b).map_err(|_| degenerate(name, m))?;
        Ok(Distribution::Beta { min, max, mean, beta })
    }

    /// Draw one duration.
    pub fn sample(&self, rng: &mut SimRng) -> f64 {
        match self {
            Distribution::Fixed(v) => *v,
            Distribution::Beta { min, max, mean, beta } => {
                let x = beta.sample(rng.inner());
                // Very small shape parameters can underflow inside the sampler.
                if x.is_nan() {
                    return *mean;
                }
                (min + (max - min) * x).clamp(*min, *max)
            }
            Distribution::Poisson { offset, poisson } => offset + poisson.sample(rng.inner()),
            Distribution::Uniform { min, max } => rng.inner().gen_range(*min..=*max),
            Distribution::Exponential { min, max, exp } => {
                (min + exp.sample(rng.inner())).clamp(*min, *max)
            }
        }
    }
}

fn check_bounds(name: &str, min: f64, max: f64) -> DistResult<()> {
    if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
        return Err(DistError::InvalidBounds { name: name.to_owned(), min, max });
    }
    Ok(())
}

fn degenerate(name: &str, m: &Moments) -> DistError {
    DistError::Degenerate {
        name:     name.to_owned(),
        min:      m.min,
        max:      m.max,
        mean:     m.mean,
        variance: m.variance,
    }
}

fn invalid(name: &str, reason: String) -> DistError {
    DistError::InvalidParameter { name: name.to_owned(), reason }
}
