//! `cs-output`: output writers for clinic simulation runs.
//!
//! | Writer       | Files created                                       |
//! |--------------|-----------------------------------------------------|
//! | [`CsvWriter`] | `timeline.csv`, `meetings.csv`, `summary.csv`      |
//! | [`json`]     | `timeline.json`, `summary.json` (whole exports)      |
//!
//! [`CsvWriter`] implements [`OutputWriter`].  Meetings stream through
//! [`SimOutputObserver`] while the run executes; timelines and summaries are
//! only final once the run ends, so they are written afterwards with
//! [`write_run`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use cs_output::{CsvWriter, SimOutputObserver, write_run};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! let mut writer = obs.into_writer();
//! write_run(&mut writer, &sim)?;
//! ```

pub mod csv;
pub mod error;
pub mod json;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{MeetingRow, SummaryRow, TimelineRow};
pub use writer::{write_run, OutputWriter};
