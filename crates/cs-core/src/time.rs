//! Logical simulation time.
//!
//! Time is a non-negative `f64` count of logical units (minutes in the
//! default clinic parameters).  Durations are drawn from continuous
//! distributions, so the clock advances by variable, fractional jumps rather
//! than a fixed tick.  Nothing here maps to wall-clock time.

use std::fmt;

/// Countdowns at or below this are treated as expired.  Absorbs the rounding
/// left over from subtracting the minimum countdown from every busy actor.
pub const EPSILON: f64 = 1e-9;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute point on the logical clock.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Units elapsed from `earlier` to `self`.  Never negative.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.2}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The simulation clock: current time plus the number of ticks taken.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    pub now:   SimTime,
    pub ticks: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `step` logical units (one tick).
    ///
    /// # Panics
    /// Panics in debug mode if `step` is not strictly positive.
    #[inline]
    pub fn advance(&mut self, step: f64) {
        debug_assert!(step > 0.0, "clock step must be positive, got {step}");
        self.now = self.now + step;
        self.ticks += 1;
    }

    /// Render the current time as `HH:MM` after a day start of `start_hour`.
    /// Used by report front-ends that label the timeline with clock times.
    pub fn wall_label(&self, start_hour: u32) -> String {
        let minutes = self.now.0.max(0.0) as u64;
        let hours = start_hour as u64 + minutes / 60;
        format!("{hours}:{:02}", minutes % 60)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (tick {})", self.now, self.ticks)
    }
}
