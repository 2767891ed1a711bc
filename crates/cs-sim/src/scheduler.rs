//! `MatchingScheduler`: greedy pairing of waiting actors into meetings.
//!
//! # Passes
//!
//! Each run performs three independent passes, each over idle actors in a
//! matchable waiting state, ordered by the configured [`OrderPolicy`]:
//!
//! 1. **Patient ↔ team**: first team that is unassigned or assigned this
//!    patient.
//! 2. **Patient ↔ attending**: only attendings that have already met the
//!    team that handled this patient (eligibility set), then unassigned or
//!    assigned.
//! 3. **Team ↔ attending**: first attending with no assigned patients, or
//!    assigned the patient the team is reporting on.  The attending's
//!    eligibility set gains that patient; this is the only place it grows.
//!
//! A candidate that fails eligibility stays waiting until the next run.
//! Matched actors leave the pool immediately, so nobody joins two meetings
//! in one run.  Scans are O(n·m) per pass; populations are tens of actors.

use tracing::debug;

use cs_actor::{ActorKind, ActorRegistry, ActorState, OrderPolicy, Transition};
use cs_core::{ActorId, CoreError, SimRng, SimTime};
use cs_dist::{DurationKey, DurationSampler};

use crate::SimResult;

/// Which pass produced a meeting.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MeetingKind {
    PatientTeam,
    PatientAttending,
    TeamAttending,
}

/// One meeting created by the scheduler.
#[derive(Clone, Debug, PartialEq)]
pub struct Meeting {
    pub kind:     MeetingKind,
    /// Patient (patient meetings) or team (team ↔ attending).
    pub first:    ActorId,
    /// Team or attending.
    pub second:   ActorId,
    /// Patient the meeting is about.
    pub patient:  Option<ActorId>,
    pub start:    SimTime,
    pub duration: f64,
}

impl Meeting {
    pub fn end(&self) -> SimTime {
        self.start + self.duration
    }
}

/// Borrowed inputs for one scheduler run.
pub struct MatchContext<'a> {
    pub now:       SimTime,
    pub durations: &'a DurationSampler,
    pub rng:       &'a mut SimRng,
}

#[derive(Clone, Debug, Default)]
pub struct MatchingScheduler {
    pub policy: OrderPolicy,
}

impl MatchingScheduler {
    pub fn new(policy: OrderPolicy) -> Self {
        Self { policy }
    }

    /// Run all three passes once.  Returns the meetings created, in order.
    pub fn run(&self, reg: &mut ActorRegistry, ctx: &mut MatchContext<'_>) -> SimResult<Vec<Meeting>> {
        let mut meetings = Vec::new();
        self.match_patients_with_teams(reg, ctx, &mut meetings)?;
        self.match_patients_with_attendings(reg, ctx, &mut meetings)?;
        self.match_teams_with_attendings(reg, ctx, &mut meetings)?;
        Ok(meetings)
    }

    fn match_patients_with_teams(
        &self,
        reg:      &mut ActorRegistry,
        ctx:      &mut MatchContext<'_>,
        meetings: &mut Vec<Meeting>,
    ) -> SimResult<()> {
        let patients = reg.waiting(ActorKind::Patient, &ActorState::PATIENT_AWAITING_TEAM, self.policy, ctx.rng);
        let mut teams = reg.waiting(ActorKind::Team, &[ActorState::WaitingForPatient], self.policy, ctx.rng);

        for pt in patients {
            if teams.is_empty() {
                break;
            }
            let mut pick = None;
            for (i, &ct) in teams.iter().enumerate() {
                if team_info(reg, ct)?.accepts_patient(pt) {
                    pick = Some(i);
                    break;
                }
            }
            let Some(i) = pick else { continue };
            let ct = teams.remove(i);

            let duration = ctx.durations.sample(DurationKey::TeamRound, ctx.rng);
            reg.set_state(pt, Transition::timed(ActorState::MeetingWithTeam, duration).with_partner(ct), ctx.now)?;
            reg.set_state(ct, Transition::timed(ActorState::MeetingWithPatient, duration).with_partner(pt), ctx.now)?;
            if let Some(team) = reg.role_mut(ct)?.as_team_mut() {
                team.pt_id = Some(pt);
            }
            meetings.push(log_meeting(reg, MeetingKind::PatientTeam, pt, ct, Some(pt), ctx.now, duration));
        }
        Ok(())
    }

    fn match_patients_with_attendings(
        &self,
        reg:      &mut ActorRegistry,
        ctx:      &mut MatchContext<'_>,
        meetings: &mut Vec<Meeting>,
    ) -> SimResult<()> {
        let patients = reg.waiting(ActorKind::Patient, &[ActorState::WaitingForAttending], self.policy, ctx.rng);
        let mut attendings = reg.waiting(ActorKind::Attending, &[ActorState::WaitingForPatient], self.policy, ctx.rng);

        for pt in patients {
            if attendings.is_empty() {
                break;
            }
            let mut pick = None;
            for (i, &atp) in attendings.iter().enumerate() {
                if attending_info(reg, atp)?.accepts_patient(pt) {
                    pick = Some(i);
                    break;
                }
            }
            let Some(i) = pick else { continue };
            let atp = attendings.remove(i);

            let duration = ctx.durations.sample(DurationKey::AttendingRound, ctx.rng);
            reg.set_state(pt, Transition::timed(ActorState::MeetingWithAttending, duration).with_partner(atp), ctx.now)?;
            reg.set_state(atp, Transition::timed(ActorState::MeetingWithPatient, duration).with_partner(pt), ctx.now)?;
            meetings.push(log_meeting(reg, MeetingKind::PatientAttending, pt, atp, Some(pt), ctx.now, duration));
        }
        Ok(())
    }

    fn match_teams_with_attendings(
        &self,
        reg:      &mut ActorRegistry,
        ctx:      &mut MatchContext<'_>,
        meetings: &mut Vec<Meeting>,
    ) -> SimResult<()> {
        let teams = reg.waiting(ActorKind::Team, &[ActorState::WaitingForAttending], self.policy, ctx.rng);
        let mut attendings = reg.waiting(ActorKind::Attending, &ActorState::ATTENDING_AWAITING_TEAM, self.policy, ctx.rng);

        for ct in teams {
            if attendings.is_empty() {
                break;
            }
            let patient = team_info(reg, ct)?.pt_id;
            let mut pick = None;
            for (i, &atp) in attendings.iter().enumerate() {
                if attending_info(reg, atp)?.accepts_report(patient) {
                    pick = Some(i);
                    break;
                }
            }
            let Some(i) = pick else { continue };
            let atp = attendings.remove(i);

            let duration = ctx.durations.sample(DurationKey::TeamAttendingMeeting, ctx.rng);
            reg.set_state(ct, Transition::timed(ActorState::MeetingWithAttending, duration).with_partner(atp), ctx.now)?;
            reg.set_state(atp, Transition::timed(ActorState::MeetingWithTeam, duration).with_partner(ct), ctx.now)?;
            if let (Some(pt), Some(info)) = (patient, reg.role_mut(atp)?.as_attending_mut()) {
                info.clear(pt);
            }
            meetings.push(log_meeting(reg, MeetingKind::TeamAttending, ct, atp, patient, ctx.now, duration));
        }
        Ok(())
    }
}

fn team_info(reg: &ActorRegistry, id: ActorId) -> SimResult<&cs_actor::TeamInfo> {
    let actor = reg.get(id)?;
    actor
        .role
        .as_team()
        .ok_or_else(|| CoreError::Invariant(format!("{} offered as a team", actor.label)).into())
}

fn attending_info(reg: &ActorRegistry, id: ActorId) -> SimResult<&cs_actor::AttendingInfo> {
    let actor = reg.get(id)?;
    actor
        .role
        .as_attending()
        .ok_or_else(|| CoreError::Invariant(format!("{} offered as an attending", actor.label)).into())
}

fn log_meeting(
    reg:      &ActorRegistry,
    kind:     MeetingKind,
    first:    ActorId,
    second:   ActorId,
    patient:  Option<ActorId>,
    start:    SimTime,
    duration: f64,
) -> Meeting {
    let label = |id: ActorId| reg.get(id).map(|a| a.label.as_str()).unwrap_or("?");
    debug!(?kind, first = label(first), second = label(second), start = start.0, duration, "meeting");
    Meeting { kind, first, second, patient, start, duration }
}
