//! Shared error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `CoreError` or wrap it as one variant, whichever keeps error sites clean.

use thiserror::Error;

use crate::ActorId;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("actor {0} not found")]
    ActorNotFound(ActorId),

    /// An internal consistency check failed.  Always a programming defect.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

/// Shorthand result type for `cs-core` and `cs-actor`.
pub type CoreResult<T> = Result<T, CoreError>;
