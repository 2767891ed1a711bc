use std::time::Duration;

use cs_core::{CoreError, SimTime};
use cs_dist::DistError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Dist(#[from] DistError),

    #[error("parameter parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The tick loop ran longer than the wall-clock guard allows.
    #[error("livelock: tick loop exceeded {limit:?} of wall-clock time at {at}")]
    WallClockExceeded { at: SimTime, limit: Duration },

    /// Zero-duration transitions kept cascading within one tick.
    #[error("livelock: tick at {at} did not settle after {rounds} rounds")]
    SettleDidNotConverge { at: SimTime, rounds: usize },

    #[error(transparent)]
    Invariant(#[from] CoreError),
}

impl SimError {
    /// The run made no progress; a batch counts it as a failed trial.
    pub fn is_livelock(&self) -> bool {
        matches!(self, SimError::WallClockExceeded { .. } | SimError::SettleDidNotConverge { .. })
    }

    /// Detected before any tick ran.
    pub fn is_config(&self) -> bool {
        matches!(self, SimError::Config(_) | SimError::Dist(_) | SimError::Parse(_) | SimError::Io(_))
    }
}

pub type SimResult<T> = Result<T, SimError>;
