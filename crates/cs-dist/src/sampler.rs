//! Named distributions used by the clinic workflow.

use std::collections::BTreeMap;
use std::fmt;

use tracing::warn;

use cs_core::SimRng;

use crate::{DistError, DistResult, Distribution, DurationSpec};

/// Every duration the workflow draws.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum DurationKey {
    /// Delay between a patient's nominal slot and actual arrival.
    ArrivalDelay,
    Checkin,
    /// Patient ↔ clinical team meeting.
    TeamRound,
    /// Clinical team ↔ attending meeting.
    TeamAttendingMeeting,
    /// Patient ↔ attending meeting.
    AttendingRound,
    Checkout,
    /// Clinical team start-of-day huddle.  Optional; zero when absent.
    Huddle,
}

impl DurationKey {
    pub const ALL: [DurationKey; 7] = [
        DurationKey::ArrivalDelay,
        DurationKey::Checkin,
        DurationKey::TeamRound,
        DurationKey::TeamAttendingMeeting,
        DurationKey::AttendingRound,
        DurationKey::Checkout,
        DurationKey::Huddle,
    ];

    /// Name used in parameter files.
    pub fn name(self) -> &'static str {
        match self {
            DurationKey::ArrivalDelay         => "arrival_delay",
            DurationKey::Checkin              => "checkin",
            DurationKey::TeamRound            => "team_round",
            DurationKey::TeamAttendingMeeting => "team_attending_meeting",
            DurationKey::AttendingRound       => "attending_round",
            DurationKey::Checkout             => "checkout",
            DurationKey::Huddle               => "huddle",
        }
    }

    pub fn is_required(self) -> bool {
        self != DurationKey::Huddle
    }

    pub fn from_name(name: &str) -> Option<DurationKey> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DurationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One compiled [`Distribution`] per [`DurationKey`].
///
/// Building the sampler validates every spec up front, so sampling itself is
/// infallible.
#[derive(Clone, Debug)]
pub struct DurationSampler {
    slots: Vec<Distribution>,
}

impl DurationSampler {
    /// Compile a name → spec map.
    ///
    /// Fails on the first invalid spec or missing required name.  Unknown
    /// names are validated too, then ignored with a warning.
    pub fn from_specs(specs: &BTreeMap<String, DurationSpec>) -> DistResult<Self> {
        for (name, spec) in specs {
            if DurationKey::from_name(name).is_none() {
                Distribution::compile(name, spec)?;
                warn!(distribution = %name, "ignoring unknown distribution name");
            }
        }

        let slots = DurationKey::ALL
            .into_iter()
            .map(|key| match specs.get(key.name()) {
                Some(spec) => Distribution::compile(key.name(), spec),
                None if key.is_required() => {
                    Err(DistError::MissingDistribution(key.name().to_owned()))
                }
                None => Ok(Distribution::Fixed(0.0)),
            })
            .collect::<DistResult<Vec<_>>>()?;

        Ok(Self { slots })
    }

    /// Every key sampled from the same fixed value.  Handy for scenario tests.
    pub fn constant(value: f64) -> Self {
        Self { slots: vec![Distribution::Fixed(value); DurationKey::ALL.len()] }
    }

    /// Replace one key's distribution.
    pub fn with(mut self, key: DurationKey, dist: Distribution) -> Self {
        self.slots[key.slot()] = dist;
        self
    }

    #[inline]
    pub fn get(&self, key: DurationKey) -> &Distribution {
        &self.slots[key.slot()]
    }

    /// Draw one duration for `key`.
    #[inline]
    pub fn sample(&self, key: DurationKey, rng: &mut SimRng) -> f64 {
        self.slots[key.slot()].sample(rng)
    }
}
