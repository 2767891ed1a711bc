//! Simulation observer trait for progress reporting and data collection.

use cs_actor::ActorRegistry;
use cs_core::SimTime;

use crate::Meeting;

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: meeting counter
///
/// ```rust,ignore
/// struct Counter(usize);
///
/// impl SimObserver for Counter {
///     fn on_meeting(&mut self, _meeting: &Meeting) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called each time the scheduler pairs two actors.
    fn on_meeting(&mut self, _meeting: &Meeting) {}

    /// Called once the current time has settled, before the clock advances.
    ///
    /// Provides read-only access to the whole population so a collector can
    /// record state without the engine knowing about output formats.
    fn on_snapshot(&mut self, _now: SimTime, _registry: &ActorRegistry) {}

    /// Called after each clock advance with the step taken.
    fn on_tick(&mut self, _now: SimTime, _step: f64) {}

    /// Called once after the last patient has checked out.
    fn on_sim_end(&mut self, _end: SimTime) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Records every meeting in creation order.
#[derive(Default, Debug)]
pub struct MeetingLog {
    pub meetings: Vec<Meeting>,
}

impl MeetingLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SimObserver for MeetingLog {
    fn on_meeting(&mut self, meeting: &Meeting) {
        self.meetings.push(meeting.clone());
    }
}
