//! Read-only exports of a finished run.
//!
//! All exports list actors in ascending `ActorId` order, so two runs with the
//! same seed serialise to identical bytes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use cs_actor::{Actor, ActorKind, ActorState, Role, TimelineEntry};
use cs_core::{ActorId, SimTime};

use crate::{SimResult, Simulation};

/// One actor's timeline plus its static assignment data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorRecord {
    pub id:    ActorId,
    pub label: String,
    pub kind:  ActorKind,
    pub entries: Vec<TimelineEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_team:      Option<ActorId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_attending: Option<ActorId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assigned_patients:  Vec<ActorId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assigned_teams:     Vec<ActorId>,
    /// Attending only: patients cleared, in clearance order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub can_see:            Vec<ActorId>,
}

impl ActorRecord {
    fn from_actor(actor: &Actor) -> Self {
        let mut record = ActorRecord {
            id:                 actor.id,
            label:              actor.label.clone(),
            kind:               actor.kind(),
            entries:            actor.timeline().entries().to_vec(),
            assigned_team:      None,
            assigned_attending: None,
            assigned_patients:  Vec::new(),
            assigned_teams:     Vec::new(),
            can_see:            Vec::new(),
        };
        match &actor.role {
            Role::Patient(p) => {
                record.assigned_team = p.assigned_team;
                record.assigned_attending = p.assigned_attending;
            }
            Role::Team(t) => {
                record.assigned_attending = t.assigned_attending;
                record.assigned_patients = t.assigned_patients.clone();
            }
            Role::Attending(a) => {
                record.assigned_teams = a.assigned_teams.clone();
                record.assigned_patients = a.assigned_patients.clone();
                record.can_see = a.cleared().to_vec();
            }
        }
        record
    }
}

/// Every actor's timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineExport {
    pub end_time: SimTime,
    pub actors:   Vec<ActorRecord>,
}

impl TimelineExport {
    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Per-category wait lists for aggregation across runs.
///
/// `pt_wait_team` sums every team-wait state the patient passed through
/// (including the before/after-slot split).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub pt_wait_team:        Vec<f64>,
    pub pt_wait_attending:   Vec<f64>,
    pub team_wait_attending: Vec<f64>,
    pub end_time:            f64,
}

impl Simulation {
    /// Timeline of every actor, sorted by id.
    pub fn timeline_export(&self) -> TimelineExport {
        TimelineExport {
            end_time: self.clock.now,
            actors:   self.registry.iter().map(ActorRecord::from_actor).collect(),
        }
    }

    pub fn summary(&self) -> Summary {
        let pt_wait_team = self
            .registry
            .of_kind(ActorKind::Patient)
            .map(|a| ActorState::PATIENT_AWAITING_TEAM.iter().map(|&s| a.time_in(s)).sum())
            .collect();
        let pt_wait_attending = self
            .registry
            .of_kind(ActorKind::Patient)
            .map(|a| a.time_in(ActorState::WaitingForAttending))
            .collect();
        let team_wait_attending = self
            .registry
            .of_kind(ActorKind::Team)
            .map(|a| a.time_in(ActorState::WaitingForAttending))
            .collect();
        Summary { pt_wait_team, pt_wait_attending, team_wait_attending, end_time: self.clock.now.0 }
    }

    /// Actor label → cumulative time per tracked waiting state.
    pub fn time_in_state(&self) -> BTreeMap<String, BTreeMap<ActorState, f64>> {
        self.registry
            .iter()
            .map(|a| (a.label.clone(), a.time_in_state().clone()))
            .collect()
    }
}
