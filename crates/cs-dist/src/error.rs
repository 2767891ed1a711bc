use thiserror::Error;

/// Distribution configuration errors.  All are detected at setup.
#[derive(Debug, Error, PartialEq)]
pub enum DistError {
    #[error(
        "degenerate distribution `{name}`: mean {mean} / variance {variance} \
         do not fit a Beta on [{min}, {max}]"
    )]
    Degenerate {
        name:     String,
        min:      f64,
        max:      f64,
        mean:     f64,
        variance: f64,
    },

    #[error("distribution `{name}` has invalid bounds [{min}, {max}]")]
    InvalidBounds { name: String, min: f64, max: f64 },

    #[error("distribution `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("required distribution `{0}` is missing")]
    MissingDistribution(String),
}

pub type DistResult<T> = Result<T, DistError>;
