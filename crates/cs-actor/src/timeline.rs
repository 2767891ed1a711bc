//! Append-only per-actor state log.

use cs_core::{ActorId, CoreError, CoreResult, SimTime};

use crate::ActorState;

/// One interval an actor spent in a single state.
///
/// `end` and `duration` are `None` while the entry is open.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimelineEntry {
    pub state:        ActorState,
    pub start:        SimTime,
    pub end:          Option<SimTime>,
    pub duration:     Option<f64>,
    /// Partner actor when the state is a meeting.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub meeting_with: Option<ActorId>,
}

impl TimelineEntry {
    #[inline]
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }
}

/// Ordered state log.  At most one entry is open, and it is always the last.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new open entry.
    ///
    /// Fails if an entry is already open.
    pub fn open(
        &mut self,
        state:        ActorState,
        start:        SimTime,
        meeting_with: Option<ActorId>,
    ) -> CoreResult<()> {
        if self.current().is_some() {
            return Err(CoreError::Invariant(format!(
                "opening {state} at {start} while another entry is open"
            )));
        }
        self.entries.push(TimelineEntry { state, start, end: None, duration: None, meeting_with });
        Ok(())
    }

    /// Close the open entry at `end` and return it.
    pub fn close(&mut self, end: SimTime) -> CoreResult<&TimelineEntry> {
        let entry = match self.entries.last_mut() {
            Some(e) if e.is_open() => e,
            _ => return Err(CoreError::Invariant(format!("no open entry to close at {end}"))),
        };
        if end < entry.start {
            return Err(CoreError::Invariant(format!(
                "closing {} at {end}, before its start {}",
                entry.state, entry.start
            )));
        }
        entry.end = Some(end);
        entry.duration = Some(end - entry.start);
        Ok(entry)
    }

    /// The open entry, if any.
    pub fn current(&self) -> Option<&TimelineEntry> {
        self.entries.last().filter(|e| e.is_open())
    }

    /// Drop a trailing open entry.  Returns `true` if one was removed.
    pub fn discard_open(&mut self) -> bool {
        if self.current().is_some() {
            self.entries.pop();
            true
        } else {
            false
        }
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
