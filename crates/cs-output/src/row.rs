//! Plain data row types written by output backends.

use cs_sim::{ActorRecord, Meeting, MeetingKind, Summary};

/// One timeline entry of one actor.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRow {
    pub actor_id:     u32,
    pub label:        String,
    pub kind:         &'static str,
    pub state:        &'static str,
    pub start:        f64,
    /// `None` only for the terminal `checked_out` entry.
    pub end:          Option<f64>,
    pub duration:     Option<f64>,
    pub meeting_with: Option<u32>,
}

impl TimelineRow {
    /// Flatten one actor's timeline into rows, in timeline order.
    pub fn from_record(record: &ActorRecord) -> Vec<TimelineRow> {
        record
            .entries
            .iter()
            .map(|e| TimelineRow {
                actor_id:     record.id.0,
                label:        record.label.clone(),
                kind:         record.kind.prefix(),
                state:        e.state.name(),
                start:        e.start.0,
                end:          e.end.map(|t| t.0),
                duration:     e.duration,
                meeting_with: e.meeting_with.map(|id| id.0),
            })
            .collect()
    }
}

/// One scheduler meeting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeetingRow {
    pub kind:     &'static str,
    pub first:    u32,
    pub second:   u32,
    /// `u32::MAX` if the meeting carried no patient.
    pub patient:  u32,
    pub start:    f64,
    pub duration: f64,
}

impl From<&Meeting> for MeetingRow {
    fn from(m: &Meeting) -> Self {
        MeetingRow {
            kind: match m.kind {
                MeetingKind::PatientTeam      => "patient_team",
                MeetingKind::PatientAttending => "patient_attending",
                MeetingKind::TeamAttending    => "team_attending",
            },
            first:    m.first.0,
            second:   m.second.0,
            patient:  m.patient.map_or(u32::MAX, |p| p.0),
            start:    m.start.0,
            duration: m.duration,
        }
    }
}

/// One per-actor wait from a [`Summary`] list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryRow {
    pub category: &'static str,
    /// Position within the category (creation order within the kind).
    pub ordinal:  usize,
    pub wait:     f64,
}

impl SummaryRow {
    pub fn from_summary(summary: &Summary) -> Vec<SummaryRow> {
        let lists: [(&'static str, &[f64]); 3] = [
            ("pt_wait_team", &summary.pt_wait_team),
            ("pt_wait_attending", &summary.pt_wait_attending),
            ("team_wait_attending", &summary.team_wait_attending),
        ];
        lists
            .into_iter()
            .flat_map(|(category, waits)| {
                waits.iter().enumerate().map(move |(ordinal, &wait)| SummaryRow { category, ordinal, wait })
            })
            .collect()
    }
}
