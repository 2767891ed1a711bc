//! `cs-dist`: duration distributions for the clinic workflow simulator.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                  |
//! |------------------|-----------------------------------------------------------|
//! | [`spec`]         | `DurationSpec`, `Moments`: serde-facing parameter forms   |
//! | [`distribution`] | `Distribution`: a validated, ready-to-sample spec         |
//! | [`sampler`]      | `DurationKey`, `DurationSampler`: named distributions     |
//! | [`error`]        | `DistError`, `DistResult<T>`                              |
//!
//! # Validation before sampling
//!
//! A `DurationSpec` is only ever sampled after it has been compiled into a
//! [`Distribution`].  Compilation is where degenerate moment combinations
//! are rejected, so a running simulation can never draw a NaN.  Every
//! bounded form clamps its draw to `[min, max]`.

pub mod distribution;
pub mod error;
pub mod sampler;
pub mod spec;

#[cfg(test)]
mod tests;

pub use distribution::Distribution;
pub use error::{DistError, DistResult};
pub use sampler::{DurationKey, DurationSampler};
pub use spec::{DurationSpec, Moments, TypedSpec};
