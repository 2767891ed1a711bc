//! Monte-Carlo batches of independent runs.
//!
//! Trial `i` is seeded with `SimRng::trial_seed(seed, i)` and owns its whole
//! population, so trials share nothing.  With the `parallel` feature they
//! run on Rayon's thread pool; results are folded in trial order either way,
//! so the summary does not depend on scheduling.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use cs_core::SimRng;

use crate::{NoopObserver, Params, SimResult, SimulationBuilder, Summary};

/// Concatenated summaries of every successful trial.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub trials:              usize,
    /// Trials aborted by the livelock guard.
    pub failed:              usize,
    pub pt_wait_team:        Vec<f64>,
    pub pt_wait_attending:   Vec<f64>,
    pub team_wait_attending: Vec<f64>,
    pub end_times:           Vec<f64>,
}

impl BatchSummary {
    fn absorb(&mut self, summary: Summary) {
        self.pt_wait_team.extend(summary.pt_wait_team);
        self.pt_wait_attending.extend(summary.pt_wait_attending);
        self.team_wait_attending.extend(summary.team_wait_attending);
        self.end_times.push(summary.end_time);
    }

    pub fn succeeded(&self) -> usize {
        self.trials - self.failed
    }

    pub fn mean_end_time(&self) -> Option<f64> {
        mean(&self.end_times)
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Run `trials` independent simulations of `params`.
///
/// A trial that trips the livelock guard is counted in
/// [`BatchSummary::failed`].  Any other error (bad parameters, a broken
/// invariant) aborts the batch.
pub fn run_batch(params: &Params, trials: usize, seed: u64) -> SimResult<BatchSummary> {
    info!(trials, seed, "batch start");

    #[cfg(not(feature = "parallel"))]
    let results: Vec<SimResult<Summary>> = (0..trials).map(|i| run_trial(params, seed, i)).collect();

    #[cfg(feature = "parallel")]
    let results: Vec<SimResult<Summary>> = {
        use rayon::prelude::*;
        (0..trials).into_par_iter().map(|i| run_trial(params, seed, i)).collect()
    };

    let mut batch = BatchSummary { trials, ..BatchSummary::default() };
    for (i, result) in results.into_iter().enumerate() {
        match result {
            Ok(summary) => batch.absorb(summary),
            Err(e) if e.is_livelock() => {
                warn!(trial = i, error = %e, "trial failed");
                batch.failed += 1;
            }
            Err(e) => return Err(e),
        }
    }
    info!(succeeded = batch.succeeded(), failed = batch.failed, "batch done");
    Ok(batch)
}

fn run_trial(params: &Params, seed: u64, trial: usize) -> SimResult<Summary> {
    let rng = SimRng::new(SimRng::trial_seed(seed, trial as u64));
    let mut sim = SimulationBuilder::new(params.clone()).rng(rng).build()?;
    sim.run(&mut NoopObserver)?;
    Ok(sim.summary())
}
