//! Per-kind actor data.

use cs_core::{ActorId, SimTime};

use crate::{ActorKind, ActorState};

/// Kind-specific data carried by every actor.
#[derive(Clone, Debug)]
pub enum Role {
    Patient(PatientInfo),
    Team(TeamInfo),
    Attending(AttendingInfo),
}

#[derive(Clone, Debug, Default)]
pub struct PatientInfo {
    /// Nominal appointment slot.  Arrival is this plus a sampled delay.
    pub scheduled_time:     SimTime,
    /// Pre-assigned clinical team, if any.
    pub assigned_team:      Option<ActorId>,
    /// Derived from the assigned team's attending.
    pub assigned_attending: Option<ActorId>,
}

#[derive(Clone, Debug, Default)]
pub struct TeamInfo {
    /// Empty means the team accepts any patient.
    pub assigned_patients:  Vec<ActorId>,
    pub assigned_attending: Option<ActorId>,
    /// Patient met most recently, reported on at the next attending meeting.
    pub pt_id:              Option<ActorId>,
}

#[derive(Clone, Debug, Default)]
pub struct AttendingInfo {
    /// Teams routed to this attending.  Informational; reports are gated on
    /// `assigned_patients`.
    pub assigned_teams:    Vec<ActorId>,
    /// Inherited from the assigned teams.  Empty means any patient.
    pub assigned_patients: Vec<ActorId>,
    /// Patients this attending has been cleared to see, in clearance order.
    /// Only ever grows.
    can_see:               Vec<ActorId>,
}

impl AttendingInfo {
    pub fn can_see(&self, patient: ActorId) -> bool {
        self.can_see.contains(&patient)
    }

    pub fn cleared(&self) -> &[ActorId] {
        &self.can_see
    }

    /// Clear `patient` for a later meeting.  Idempotent.
    pub fn clear(&mut self, patient: ActorId) {
        if !self.can_see.contains(&patient) {
            self.can_see.push(patient);
        }
    }

    /// `true` if this attending may hear a team report on `patient`.
    ///
    /// Gated on the patient rather than the team, so any patient cleared
    /// here is also one [`accepts_patient`](Self::accepts_patient) takes.
    pub fn accepts_report(&self, patient: Option<ActorId>) -> bool {
        self.assigned_patients.is_empty()
            || patient.is_some_and(|pt| self.assigned_patients.contains(&pt))
    }

    /// `true` if this attending may see `patient` right now.
    pub fn accepts_patient(&self, patient: ActorId) -> bool {
        self.can_see(patient)
            && (self.assigned_patients.is_empty() || self.assigned_patients.contains(&patient))
    }
}

impl TeamInfo {
    /// `true` if this team may take `patient` (no assignment, or assigned).
    pub fn accepts_patient(&self, patient: ActorId) -> bool {
        self.assigned_patients.is_empty() || self.assigned_patients.contains(&patient)
    }
}

impl Role {
    pub fn kind(&self) -> ActorKind {
        match self {
            Role::Patient(_)   => ActorKind::Patient,
            Role::Team(_)      => ActorKind::Team,
            Role::Attending(_) => ActorKind::Attending,
        }
    }

    /// Waiting states reported in this kind's `time_in_state` summary.
    pub fn tracked_states(&self) -> &'static [ActorState] {
        match self {
            Role::Patient(_) => &[ActorState::WaitingForTeam, ActorState::WaitingForAttending],
            Role::Team(_) => &[ActorState::WaitingForPatient, ActorState::WaitingForAttending],
            Role::Attending(_) => &[
                ActorState::WaitingForFirstTeam,
                ActorState::WaitingForTeam,
                ActorState::WaitingForPatient,
            ],
        }
    }

    pub fn as_patient(&self) -> Option<&PatientInfo> {
        match self {
            Role::Patient(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_team(&self) -> Option<&TeamInfo> {
        match self {
            Role::Team(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_team_mut(&mut self) -> Option<&mut TeamInfo> {
        match self {
            Role::Team(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_attending(&self) -> Option<&AttendingInfo> {
        match self {
            Role::Attending(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_attending_mut(&mut self) -> Option<&mut AttendingInfo> {
        match self {
            Role::Attending(a) => Some(a),
            _ => None,
        }
    }
}
