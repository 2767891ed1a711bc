//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use cs_sim::{Meeting, SimObserver};

use crate::row::MeetingRow;
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that streams every meeting to an [`OutputWriter`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].  The writer is not finished at the end
/// of the run; hand it to [`write_run`][crate::write_run] for the rest.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    meetings:   usize,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, meetings: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Number of meetings written so far.
    pub fn meetings_written(&self) -> usize {
        self.meetings
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_meeting(&mut self, meeting: &Meeting) {
        let result = self.writer.write_meeting(&MeetingRow::from(meeting));
        if result.is_ok() {
            self.meetings += 1;
        }
        self.store_err(result);
    }
}
