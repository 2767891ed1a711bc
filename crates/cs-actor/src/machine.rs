//! Per-role transition tables.
//!
//! `next` is consulted only for idle actors and returns at most one
//! transition: the one that is unconditionally due.  States that wait for a
//! partner return `None`; the scheduler moves actors out of them.
//!
//! ```text
//! patient:   waiting_to_arrive → checking_in → waiting_for_team
//!            ⇢ meeting_with_team → waiting_for_attending
//!            ⇢ meeting_with_attending → checking_out → checked_out
//! team:      group_huddle → waiting_for_patient ⇢ meeting_with_patient
//!            → waiting_for_attending ⇢ meeting_with_attending → waiting_for_patient
//! attending: waiting_for_first_team ⇢ meeting_with_team → waiting_for_patient
//!            ⇢ meeting_with_patient → waiting_for_team ⇢ …
//! ```
//!
//! `⇢` marks a move made by the scheduler.

use cs_core::{SimRng, SimTime};
use cs_dist::{DurationKey, DurationSampler};

use crate::{ActorState, AttendingInfo, PatientInfo, Role, TeamInfo, Transition};

/// Shared, per-pass context for `next`.
pub struct UpdateContext<'a> {
    pub now:             SimTime,
    pub durations:       &'a DurationSampler,
    pub rng:             &'a mut SimRng,
    /// Split the patient's team wait around the scheduled slot.
    pub split_team_wait: bool,
}

impl UpdateContext<'_> {
    #[inline]
    fn sample(&mut self, key: DurationKey) -> f64 {
        self.durations.sample(key, self.rng)
    }
}

/// A role's transition table.
pub trait StateMachine {
    fn next(&self, state: ActorState, ctx: &mut UpdateContext<'_>) -> Option<Transition>;
}

impl StateMachine for PatientInfo {
    fn next(&self, state: ActorState, ctx: &mut UpdateContext<'_>) -> Option<Transition> {
        use ActorState::*;

        match state {
            WaitingToArrive => Some(Transition::timed(CheckingIn, ctx.sample(DurationKey::Checkin))),
            CheckingIn if ctx.split_team_wait => {
                if ctx.now < self.scheduled_time {
                    Some(Transition::to(WaitingBeforeScheduledTime))
                } else {
                    Some(Transition::to(WaitingAfterScheduledTime))
                }
            }
            CheckingIn => Some(Transition::to(WaitingForTeam)),
            WaitingBeforeScheduledTime if ctx.now >= self.scheduled_time => {
                Some(Transition::to(WaitingAfterScheduledTime))
            }
            MeetingWithTeam => Some(Transition::to(WaitingForAttending)),
            MeetingWithAttending => {
                Some(Transition::timed(CheckingOut, ctx.sample(DurationKey::Checkout)))
            }
            CheckingOut => Some(Transition::terminal(CheckedOut)),
            _ => None,
        }
    }
}

impl StateMachine for TeamInfo {
    fn next(&self, state: ActorState, _ctx: &mut UpdateContext<'_>) -> Option<Transition> {
        use ActorState::*;

        match state {
            GroupHuddle | MeetingWithAttending => Some(Transition::to(WaitingForPatient)),
            MeetingWithPatient => Some(Transition::to(WaitingForAttending)),
            _ => None,
        }
    }
}

impl StateMachine for AttendingInfo {
    fn next(&self, state: ActorState, _ctx: &mut UpdateContext<'_>) -> Option<Transition> {
        use ActorState::*;

        match state {
            MeetingWithTeam => Some(Transition::to(WaitingForPatient)),
            MeetingWithPatient => Some(Transition::to(WaitingForTeam)),
            _ => None,
        }
    }
}

impl StateMachine for Role {
    fn next(&self, state: ActorState, ctx: &mut UpdateContext<'_>) -> Option<Transition> {
        match self {
            Role::Patient(p)   => p.next(state, ctx),
            Role::Team(t)      => t.next(state, ctx),
            Role::Attending(a) => a.next(state, ctx),
        }
    }
}
