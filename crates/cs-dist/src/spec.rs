//! Serde-facing distribution specifications.
//!
//! # Accepted forms
//!
//! ```json
//! {"min": 2, "max": 10, "mean": 5, "variance": 3}
//! {"type": "pois", "min": 2, "max": 10, "mean": 5, "variance": 3}
//! {"type": "poisson", "offset": 2, "lambda": 4}
//! {"type": "uniform", "min": 2, "max": 10}
//! {"type": "exponential", "min": 2, "max": 30, "mean": 6}
//! {"type": "fixed", "value": 15}
//! ```
//!
//! The untyped four-field object and `"pois"` (alias `"beta"`) are the
//! bounded-moments form fitted with a Beta distribution.

use serde::{Deserialize, Serialize};

/// Bounded-moments description of a duration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    pub min:      f64,
    pub max:      f64,
    pub mean:     f64,
    pub variance: f64,
}

/// Any accepted distribution specification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationSpec {
    Typed(TypedSpec),
    Moments(Moments),
}

/// Specifications carrying an explicit `type` tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypedSpec {
    #[serde(rename = "pois", alias = "beta")]
    Beta(Moments),
    Poisson { offset: f64, lambda: f64 },
    Uniform { min: f64, max: f64 },
    Exponential { min: f64, max: f64, mean: f64 },
    Fixed { value: f64 },
}

impl DurationSpec {
    pub fn moments(min: f64, max: f64, mean: f64, variance: f64) -> Self {
        DurationSpec::Moments(Moments { min, max, mean, variance })
    }

    pub fn fixed(value: f64) -> Self {
        DurationSpec::Typed(TypedSpec::Fixed { value })
    }

    pub fn poisson(offset: f64, lambda: f64) -> Self {
        DurationSpec::Typed(TypedSpec::Poisson { offset, lambda })
    }
}

impl From<Moments> for DurationSpec {
    fn from(m: Moments) -> Self {
        DurationSpec::Moments(m)
    }
}
