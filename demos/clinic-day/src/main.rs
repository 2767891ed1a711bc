//! clinic-day: one simulated half-day clinic plus a Monte-Carlo batch.
//!
//! Usage: `clinic-day [params.json]`.  Without an argument the stock clinic
//! (12 patients, 4 teams, 2 attendings) is used.  Set `RUST_LOG=debug` to see
//! every meeting.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cs_core::SimClock;
use cs_output::json::write_run_json;
use cs_output::{CsvWriter, SimOutputObserver, write_run};
use cs_sim::batch::mean;
use cs_sim::{Params, SimulationBuilder, run_batch};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:       u64   = 42;
const TRIALS:     usize = 200;
const DAY_START:  u32   = 8; // first slot at 08:00
const OUTPUT_DIR: &str  = "output/clinic-day";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let params = match std::env::args().nth(1) {
        Some(path) => Params::from_path(Path::new(&path))?,
        None => Params::default(),
    }
    .with_seed(SEED);

    println!("=== clinic-day ===");
    println!(
        "Patients: {}  |  Teams: {}  |  Attendings: {}  |  Seed: {SEED}",
        params.n_patients, params.n_teams, params.n_attendings
    );
    println!();

    // 1. One seeded run with full output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut sim = SimulationBuilder::new(params.clone()).build()?;
    let mut obs = SimOutputObserver::new(CsvWriter::new(Path::new(OUTPUT_DIR))?);

    let t0 = Instant::now();
    let end = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }
    let meetings = obs.meetings_written();
    let mut writer = obs.into_writer();
    write_run(&mut writer, &sim)?;
    write_run_json(Path::new(OUTPUT_DIR), &sim)?;

    let clock = SimClock { now: end, ticks: sim.clock.ticks };
    println!("Run complete in {:.3} ms", elapsed.as_secs_f64() * 1e3);
    println!("  last patient out : {end} ({})", clock.wall_label(DAY_START));
    println!("  ticks            : {}", sim.clock.ticks);
    println!("  meetings         : {meetings}");
    println!();

    // 2. Per-actor waiting times.
    println!("{:<8} {:>18} {:>18} {:>18}", "Actor", "waiting_for_team", "waiting_for_att.", "waiting_for_pt");
    println!("{}", "-".repeat(66));
    for actor in sim.registry.iter() {
        // Team waits include the before/after-slot split when enabled.
        let get = |names: &[&str]| {
            actor
                .time_in_state()
                .iter()
                .filter(|(s, _)| names.contains(&s.name()))
                .map(|(_, v)| *v)
                .sum::<f64>()
        };
        println!(
            "{:<8} {:>18.1} {:>18.1} {:>18.1}",
            actor.label,
            get(&["waiting_for_team", "waiting_before_scheduled_time", "waiting_after_scheduled_time"]),
            get(&["waiting_for_attending"]),
            get(&["waiting_for_patient"]),
        );
    }
    println!();

    // 3. Monte-Carlo batch.
    let t0 = Instant::now();
    let batch = run_batch(&params, TRIALS, SEED)?;
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "batch finished");

    println!("Batch of {TRIALS} trials ({} failed)", batch.failed);
    let fmt = |v: Option<f64>| v.map_or_else(|| "-".to_owned(), |m| format!("{m:.1}"));
    println!("  mean completion          : {}", fmt(batch.mean_end_time()));
    println!("  mean patient→team wait   : {}", fmt(mean(&batch.pt_wait_team)));
    println!("  mean patient→att. wait   : {}", fmt(mean(&batch.pt_wait_attending)));
    println!("  mean team→att. wait      : {}", fmt(mean(&batch.team_wait_attending)));

    std::fs::write(Path::new(OUTPUT_DIR).join("batch.json"), serde_json::to_string_pretty(&batch)?)?;
    println!();
    println!("Output written to {OUTPUT_DIR}/");

    Ok(())
}
