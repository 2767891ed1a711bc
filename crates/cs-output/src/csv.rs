//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `timeline.csv`
//! - `meetings.csv`
//! - `summary.csv`
//!
//! Missing values (open `end`, no partner) are written as empty fields.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{MeetingRow, OutputResult, SummaryRow, TimelineRow};
use crate::writer::OutputWriter;

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    timeline: Writer<File>,
    meetings: Writer<File>,
    summary:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut timeline = Writer::from_path(dir.join("timeline.csv"))?;
        timeline.write_record(["actor_id", "label", "kind", "state", "start", "end", "duration", "meeting_with"])?;

        let mut meetings = Writer::from_path(dir.join("meetings.csv"))?;
        meetings.write_record(["kind", "first", "second", "patient", "start", "duration"])?;

        let mut summary = Writer::from_path(dir.join("summary.csv"))?;
        summary.write_record(["category", "ordinal", "wait"])?;

        Ok(Self { timeline, meetings, summary, finished: false })
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_meeting(&mut self, row: &MeetingRow) -> OutputResult<()> {
        let patient = if row.patient == u32::MAX { String::new() } else { row.patient.to_string() };
        self.meetings.write_record(&[
            row.kind.to_owned(),
            row.first.to_string(),
            row.second.to_string(),
            patient,
            row.start.to_string(),
            row.duration.to_string(),
        ])?;
        Ok(())
    }

    fn write_timeline(&mut self, rows: &[TimelineRow]) -> OutputResult<()> {
        for row in rows {
            self.timeline.write_record(&[
                row.actor_id.to_string(),
                row.label.clone(),
                row.kind.to_owned(),
                row.state.to_owned(),
                row.start.to_string(),
                opt(row.end),
                opt(row.duration),
                opt(row.meeting_with),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, rows: &[SummaryRow]) -> OutputResult<()> {
        for row in rows {
            self.summary.write_record(&[
                row.category.to_owned(),
                row.ordinal.to_string(),
                row.wait.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.timeline.flush()?;
        self.meetings.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}
