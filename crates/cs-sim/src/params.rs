//! Simulation parameters.
//!
//! `Params` is the only input the engine takes.  Front-ends (forms, CLI
//! flags, JSON files) translate into it; every field has a default matching
//! a typical half-day clinic.
//!
//! ```json
//! {
//!   "n_patients": 12, "n_teams": 4, "n_attendings": 2,
//!   "arrivals": {"groups": {"group_size": 3, "interval": 15}},
//!   "distributions": {
//!     "checkin": {"min": 2, "max": 10, "mean": 5, "variance": 3},
//!     "arrival_delay": {"type": "poisson", "offset": 0, "lambda": 5}
//!   },
//!   "seed": 42
//! }
//! ```
//!
//! Names missing from `distributions` fall back to the defaults.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use cs_actor::OrderPolicy;
use cs_dist::DurationSpec;

use crate::{SimError, SimResult};

/// Nominal arrival slots for the patients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalSchedule {
    /// Patients arrive in groups: patient `i` is due at
    /// `floor(i / group_size) * interval`.
    Groups { group_size: usize, interval: f64 },
    /// One slot per patient, in patient order.
    Explicit(Vec<f64>),
}

impl ArrivalSchedule {
    /// Scheduled slot for each of `n` patients.
    pub fn slots(&self, n: usize) -> SimResult<Vec<f64>> {
        match self {
            ArrivalSchedule::Groups { group_size, interval } => {
                if *group_size == 0 {
                    return Err(SimError::Config("arrival group_size must be at least 1".into()));
                }
                if !interval.is_finite() || *interval < 0.0 {
                    return Err(SimError::Config(format!("arrival interval must be >= 0, got {interval}")));
                }
                Ok((0..n).map(|i| (i / group_size) as f64 * interval).collect())
            }
            ArrivalSchedule::Explicit(times) => {
                if times.len() != n {
                    return Err(SimError::Config(format!(
                        "explicit arrival schedule has {} slots for {n} patients",
                        times.len()
                    )));
                }
                if let Some(bad) = times.iter().find(|t| !t.is_finite() || **t < 0.0) {
                    return Err(SimError::Config(format!("arrival slot {bad} must be >= 0")));
                }
                Ok(times.clone())
            }
        }
    }
}

/// Everything needed to initialise one run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub n_patients:   usize,
    pub n_teams:      usize,
    pub n_attendings: usize,
    pub arrivals:     ArrivalSchedule,

    /// Round-robin patients onto teams.
    pub assign_patients: bool,
    /// Round-robin teams onto attendings.
    pub assign_teams:    bool,
    /// Explicit team index per patient; overrides `assign_patients`.
    pub patient_teams:   Option<Vec<usize>>,
    /// Explicit attending index per team; overrides `assign_teams`.
    pub team_attendings: Option<Vec<usize>>,

    /// Distribution name → spec.
    pub distributions: BTreeMap<String, DurationSpec>,

    /// Report the team wait split around the scheduled slot.
    pub split_team_wait:     bool,
    pub order:               OrderPolicy,
    pub wall_clock_limit_ms: u64,
    pub max_settle_rounds:   usize,
    /// `None` seeds from entropy.
    pub seed:                Option<u64>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            n_patients:          12,
            n_teams:             4,
            n_attendings:        2,
            arrivals:            ArrivalSchedule::Groups { group_size: 3, interval: 15.0 },
            assign_patients:     true,
            assign_teams:        true,
            patient_teams:       None,
            team_attendings:     None,
            distributions:       default_distributions(),
            split_team_wait:     false,
            order:               OrderPolicy::OldestFirst,
            wall_clock_limit_ms: 2_000,
            max_settle_rounds:   256,
            seed:                None,
        }
    }
}

impl Params {
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        let mut params: Params = serde_json::from_str(json)?;
        params.fill_default_distributions();
        Ok(params)
    }

    pub fn from_path(path: &Path) -> SimResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set one distribution, replacing any previous spec under `name`.
    pub fn with_distribution(mut self, name: &str, spec: DurationSpec) -> Self {
        self.distributions.insert(name.to_owned(), spec);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// A partial `distributions` map in a file only overrides what it names.
    fn fill_default_distributions(&mut self) {
        for (name, spec) in default_distributions() {
            self.distributions.entry(name).or_insert(spec);
        }
    }
}

/// The stock clinic durations, in minutes.
pub fn default_distributions() -> BTreeMap<String, DurationSpec> {
    [
        ("arrival_delay",          DurationSpec::moments(0.0, 60.0, 5.0, 30.0)),
        ("checkin",                DurationSpec::moments(2.0, 10.0, 5.0, 3.0)),
        ("team_round",             DurationSpec::moments(10.0, 60.0, 25.0, 30.0)),
        ("team_attending_meeting", DurationSpec::moments(2.0, 8.0, 4.0, 2.0)),
        ("attending_round",        DurationSpec::moments(12.0, 18.0, 15.0, 3.0)),
        ("checkout",               DurationSpec::moments(2.0, 10.0, 5.0, 3.0)),
        ("huddle",                 DurationSpec::fixed(15.0)),
    ]
    .into_iter()
    .map(|(name, spec)| (name.to_owned(), spec))
    .collect()
}
