//! Actor kinds and the named states they move through.

use std::fmt;

/// The three actor categories.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActorKind {
    Patient,
    Team,
    Attending,
}

impl ActorKind {
    /// Label prefix: `PT 00`, `CT 00`, `ATP 00`.
    pub fn prefix(self) -> &'static str {
        match self {
            ActorKind::Patient   => "PT",
            ActorKind::Team      => "CT",
            ActorKind::Attending => "ATP",
        }
    }

    pub fn label(self, ordinal: usize) -> String {
        format!("{} {:02}", self.prefix(), ordinal)
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Every state any actor can occupy.
///
/// Some names are shared between kinds (`meeting_with_attending` is used by
/// both patients and teams); the registry always indexes by the
/// `(ActorKind, ActorState)` pair.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActorState {
    // ── Patient ───────────────────────────────────────────────────────────
    WaitingToArrive,
    CheckingIn,
    WaitingForTeam,
    WaitingBeforeScheduledTime,
    WaitingAfterScheduledTime,
    MeetingWithTeam,
    WaitingForAttending,
    MeetingWithAttending,
    CheckingOut,
    CheckedOut,

    // ── Clinical team ─────────────────────────────────────────────────────
    GroupHuddle,
    WaitingForPatient,
    MeetingWithPatient,

    // ── Attending ─────────────────────────────────────────────────────────
    WaitingForFirstTeam,
}

impl ActorState {
    pub fn name(self) -> &'static str {
        match self {
            ActorState::WaitingToArrive            => "waiting_to_arrive",
            ActorState::CheckingIn                 => "checking_in",
            ActorState::WaitingForTeam             => "waiting_for_team",
            ActorState::WaitingBeforeScheduledTime => "waiting_before_scheduled_time",
            ActorState::WaitingAfterScheduledTime  => "waiting_after_scheduled_time",
            ActorState::MeetingWithTeam            => "meeting_with_team",
            ActorState::WaitingForAttending        => "waiting_for_attending",
            ActorState::MeetingWithAttending       => "meeting_with_attending",
            ActorState::CheckingOut                => "checking_out",
            ActorState::CheckedOut                 => "checked_out",
            ActorState::GroupHuddle                => "group_huddle",
            ActorState::WaitingForPatient          => "waiting_for_patient",
            ActorState::MeetingWithPatient         => "meeting_with_patient",
            ActorState::WaitingForFirstTeam        => "waiting_for_first_team",
        }
    }

    /// Waiting states whose cumulative duration is accumulated in
    /// `time_in_state`.  Arrival is not a wait.
    pub fn is_tracked_wait(self) -> bool {
        matches!(
            self,
            ActorState::WaitingForTeam
                | ActorState::WaitingBeforeScheduledTime
                | ActorState::WaitingAfterScheduledTime
                | ActorState::WaitingForAttending
                | ActorState::WaitingForPatient
                | ActorState::WaitingForFirstTeam
        )
    }

    /// Patient states in which the patient can be matched with a team.
    pub const PATIENT_AWAITING_TEAM: [ActorState; 3] = [
        ActorState::WaitingForTeam,
        ActorState::WaitingBeforeScheduledTime,
        ActorState::WaitingAfterScheduledTime,
    ];

    /// Attending states in which the attending can be matched with a team.
    pub const ATTENDING_AWAITING_TEAM: [ActorState; 2] =
        [ActorState::WaitingForFirstTeam, ActorState::WaitingForTeam];
}

impl fmt::Display for ActorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
