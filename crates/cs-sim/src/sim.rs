//! The `Simulation` struct and its tick loop.

use std::time::{Duration, Instant};

use tracing::{info, trace, warn};

use cs_actor::{ActorKind, ActorRegistry, ActorState, UpdateContext};
use cs_core::{SimClock, SimRng, SimTime};
use cs_dist::DurationSampler;

use crate::scheduler::MatchContext;
use crate::{MatchingScheduler, Params, SimError, SimObserver, SimResult};

/// Lifecycle of one run.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    Initializing,
    Running,
    Done,
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// One clinic day.
///
/// Each tick:
///
/// 1. **Settle** at the current time: one `next` pass over idle actors, then
///    one scheduler run, repeated until a round neither transitions nor
///    matches.  Zero-length stages therefore cascade within the tick.
/// 2. **Stop** if every patient is checked out.
/// 3. **Advance** by the smallest outstanding countdown (1 if nobody is
///    busy), decrementing every running countdown by the same step.
///
/// Create via [`SimulationBuilder`][crate::SimulationBuilder].
pub struct Simulation {
    pub params:    Params,
    pub clock:     SimClock,
    /// The population.  Public so tests and tools can inspect it between runs.
    pub registry:  ActorRegistry,
    pub durations: DurationSampler,
    pub scheduler: MatchingScheduler,

    rng:   SimRng,
    phase: Phase,
}

impl Simulation {
    pub(crate) fn new(
        params:    Params,
        clock:     SimClock,
        registry:  ActorRegistry,
        durations: DurationSampler,
        rng:       SimRng,
        scheduler: MatchingScheduler,
    ) -> Self {
        Self { params, clock, registry, durations, scheduler, rng, phase: Phase::Initializing }
    }

    // ── Public API ────────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn now(&self) -> SimTime {
        self.clock.now
    }

    /// `true` once every patient is in `checked_out`.
    pub fn is_done(&self) -> bool {
        self.registry.count_in(ActorKind::Patient, ActorState::CheckedOut)
            == self.registry.count(ActorKind::Patient)
    }

    /// Run until every patient has checked out; returns the completion time.
    ///
    /// Fails with [`SimError::WallClockExceeded`] if the loop runs longer
    /// than `params.wall_clock_limit_ms`, or [`SimError::SettleDidNotConverge`]
    /// if one time point never settles.  A finished simulation returns its
    /// end time again without ticking.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimTime> {
        if self.phase == Phase::Done {
            return Ok(self.clock.now);
        }
        self.phase = Phase::Running;

        let limit = Duration::from_millis(self.params.wall_clock_limit_ms);
        let started = Instant::now();
        info!(
            patients = self.registry.count(ActorKind::Patient),
            teams = self.registry.count(ActorKind::Team),
            attendings = self.registry.count(ActorKind::Attending),
            "simulation start"
        );

        loop {
            let now = self.clock.now;
            self.settle(observer)?;

            #[cfg(debug_assertions)]
            self.registry.check_invariants()?;

            observer.on_snapshot(now, &self.registry);

            if self.is_done() {
                break;
            }
            if started.elapsed() > limit {
                warn!(at = now.0, ticks = self.clock.ticks, ?limit, "wall-clock guard tripped");
                return Err(SimError::WallClockExceeded { at: now, limit });
            }

            let step = self.registry.min_countdown().unwrap_or(1.0);
            self.registry.tick_down(step);
            self.clock.advance(step);
            trace!(now = self.clock.now.0, step, "tick");
            observer.on_tick(self.clock.now, step);
        }

        self.registry.finalize();
        self.phase = Phase::Done;
        let end = self.clock.now;
        info!(end = end.0, ticks = self.clock.ticks, "simulation done");
        observer.on_sim_end(end);
        Ok(end)
    }

    // ── Tick processing ───────────────────────────────────────────────────

    /// Alternate self-transitions and matching until nothing changes.
    ///
    /// At most `max_settle_rounds` rounds may change something; the closing
    /// no-change round is not counted.
    fn settle<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.now;
        let rounds = self.params.max_settle_rounds;

        for _ in 0..=rounds {
            let mut ctx = UpdateContext {
                now,
                durations:       &self.durations,
                rng:             &mut self.rng,
                split_team_wait: self.params.split_team_wait,
            };
            let changed = self.registry.update_idle(&mut ctx)?;

            let mut ctx = MatchContext { now, durations: &self.durations, rng: &mut self.rng };
            let meetings = self.scheduler.run(&mut self.registry, &mut ctx)?;
            for meeting in &meetings {
                observer.on_meeting(meeting);
            }

            if changed == 0 && meetings.is_empty() {
                return Ok(());
            }
        }

        warn!(at = now.0, rounds, "time point did not settle");
        Err(SimError::SettleDidNotConverge { at: now, rounds })
    }
}
