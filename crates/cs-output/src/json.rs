//! JSON export of whole-run structures.
//!
//! Output is pretty-printed and keyed in declaration order, so a seeded run
//! always produces the same bytes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use cs_sim::Simulation;

use crate::OutputResult;

/// Serialize `value` to `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> OutputResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, value)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

/// Write `timeline.json` and `summary.json` for a finished run into `dir`.
pub fn write_run_json(dir: &Path, sim: &Simulation) -> OutputResult<()> {
    write_json(&dir.join("timeline.json"), &sim.timeline_export())?;
    write_json(&dir.join("summary.json"), &sim.summary())
}
