//! The `OutputWriter` trait implemented by all backend writers.

use cs_sim::Simulation;

use crate::{MeetingRow, OutputResult, SummaryRow, TimelineRow};

/// Trait implemented by output backends.
///
/// [`SimOutputObserver`][crate::SimOutputObserver] stores errors internally
/// and hands them back through `take_error`.
pub trait OutputWriter {
    /// Write one meeting as it is created.
    fn write_meeting(&mut self, row: &MeetingRow) -> OutputResult<()>;

    /// Write a batch of timeline rows.
    fn write_timeline(&mut self, rows: &[TimelineRow]) -> OutputResult<()>;

    /// Write a batch of summary rows.
    fn write_summary(&mut self, rows: &[SummaryRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write the timeline and summary of a finished run, then finish the writer.
pub fn write_run<W: OutputWriter>(writer: &mut W, sim: &Simulation) -> OutputResult<()> {
    let export = sim.timeline_export();
    let rows: Vec<TimelineRow> = export.actors.iter().flat_map(TimelineRow::from_record).collect();
    writer.write_timeline(&rows)?;
    writer.write_summary(&SummaryRow::from_summary(&sim.summary()))?;
    writer.finish()
}
