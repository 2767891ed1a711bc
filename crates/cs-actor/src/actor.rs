//! The `Actor` struct: identity, current state, countdown, and timeline.

use std::collections::BTreeMap;

use cs_core::{ActorId, CoreError, CoreResult, SimTime};
use cs_core::time::EPSILON;

use crate::{ActorKind, ActorState, Role, Timeline};

/// How long a new state lasts.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Countdown {
    /// Busy for this many units; `0.0` means idle immediately.
    For(f64),
    /// Final state.  The actor never transitions again.
    Terminal,
}

/// A requested state change.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Transition {
    pub state:        ActorState,
    pub countdown:    Countdown,
    pub meeting_with: Option<ActorId>,
}

impl Transition {
    /// Move to an untimed (waiting) state.
    pub fn to(state: ActorState) -> Self {
        Self { state, countdown: Countdown::For(0.0), meeting_with: None }
    }

    pub fn timed(state: ActorState, duration: f64) -> Self {
        Self { state, countdown: Countdown::For(duration), meeting_with: None }
    }

    pub fn terminal(state: ActorState) -> Self {
        Self { state, countdown: Countdown::Terminal, meeting_with: None }
    }

    pub fn with_partner(mut self, partner: ActorId) -> Self {
        self.meeting_with = Some(partner);
        self
    }
}

/// One participant in the simulation.
#[derive(Clone, Debug)]
pub struct Actor {
    pub id:    ActorId,
    /// Human-readable label, e.g. `PT 03`.
    pub label: String,
    pub role:  Role,

    state:          ActorState,
    time_remaining: f64,
    terminal:       bool,
    timeline:       Timeline,
    time_in_state:  BTreeMap<ActorState, f64>,
}

impl Actor {
    /// Create an actor already in `state` at `now`.
    pub fn new(
        id:        ActorId,
        label:     String,
        role:      Role,
        state:     ActorState,
        now:       SimTime,
        countdown: f64,
    ) -> CoreResult<Self> {
        let time_in_state = role.tracked_states().iter().map(|&s| (s, 0.0)).collect();
        let mut actor = Self {
            id,
            label,
            role,
            state,
            time_remaining: 0.0,
            terminal: false,
            timeline: Timeline::new(),
            time_in_state,
        };
        actor.enter(Transition::timed(state, countdown), now)?;
        Ok(actor)
    }

    #[inline]
    pub fn kind(&self) -> ActorKind {
        self.role.kind()
    }

    #[inline]
    pub fn state(&self) -> ActorState {
        self.state
    }

    #[inline]
    pub fn time_remaining(&self) -> f64 {
        self.time_remaining
    }

    /// Ready to transition (countdown expired).
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.time_remaining <= EPSILON
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Cumulative time spent in each tracked waiting state.
    pub fn time_in_state(&self) -> &BTreeMap<ActorState, f64> {
        &self.time_in_state
    }

    /// Cumulative time spent in `state` (zero if never entered or untracked).
    pub fn time_in(&self, state: ActorState) -> f64 {
        self.time_in_state.get(&state).copied().unwrap_or(0.0)
    }

    /// Start of the current state; the wait-ordering key.
    pub fn state_since(&self) -> SimTime {
        self.timeline.current().map_or(SimTime::ZERO, |e| e.start)
    }

    // ── Mutation (registry only) ──────────────────────────────────────────

    /// Close the current entry and open `tr.state` at `now`.
    ///
    /// Entering `checked_out` again once terminal is a no-op.
    pub(crate) fn set_state(&mut self, tr: Transition, now: SimTime) -> CoreResult<()> {
        if self.terminal {
            if tr.state == self.state {
                return Ok(());
            }
            return Err(CoreError::Invariant(format!(
                "{} is terminal in {} but was asked to enter {}",
                self.label, self.state, tr.state
            )));
        }

        let closed = self.timeline.close(now)?;
        if closed.state.is_tracked_wait() {
            let spent = closed.duration.unwrap_or(0.0);
            *self.time_in_state.entry(closed.state).or_insert(0.0) += spent;
        }
        self.enter(tr, now)
    }

    fn enter(&mut self, tr: Transition, now: SimTime) -> CoreResult<()> {
        match tr.countdown {
            Countdown::For(d) if d.is_finite() && d >= 0.0 => {
                self.time_remaining = d;
            }
            Countdown::For(d) => {
                return Err(CoreError::Invariant(format!(
                    "{} entering {} with invalid countdown {d}",
                    self.label, tr.state
                )));
            }
            Countdown::Terminal => {
                self.time_remaining = 0.0;
                self.terminal = true;
            }
        }
        self.state = tr.state;
        self.timeline.open(tr.state, now, tr.meeting_with)
    }

    /// Subtract `step` from a running countdown.  Expired countdowns snap to 0.
    pub(crate) fn tick_down(&mut self, step: f64) {
        if self.time_remaining > 0.0 {
            self.time_remaining -= step;
            if self.time_remaining <= EPSILON {
                self.time_remaining = 0.0;
            }
        }
    }

    /// Drop the trailing open entry of a non-terminal actor.  The state it
    /// records was cut short by the end of the run.
    pub(crate) fn finalize(&mut self) {
        if !self.terminal {
            self.timeline.discard_open();
        }
    }
}
