//! Fluent builder for constructing a [`Simulation`].

use tracing::debug;

use cs_actor::{ActorRegistry, ActorState, AttendingInfo, PatientInfo, Role, TeamInfo};
use cs_core::{ActorId, SimClock, SimRng, SimTime};
use cs_dist::{DurationKey, DurationSampler};

use crate::{MatchingScheduler, Params, SimError, SimResult, Simulation};

/// Fluent builder for [`Simulation`].
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                                          |
/// |-----------------|--------------------------------------------------|
/// | `.rng(r)`       | Seeded from `params.seed`, else from entropy     |
/// | `.durations(d)` | Compiled from `params.distributions`             |
///
/// # Population
///
/// Actors are created patients first, then teams, then attendings, so patient
/// `i` is `ActorId(i)`, team `j` is `ActorId(n_patients + j)` and attending
/// `k` is `ActorId(n_patients + n_teams + k)`.
///
/// ```rust,ignore
/// let mut sim = SimulationBuilder::new(Params::default().with_seed(7)).build()?;
/// let end = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimulationBuilder {
    params:    Params,
    rng:       Option<SimRng>,
    durations: Option<DurationSampler>,
}

impl SimulationBuilder {
    pub fn new(params: Params) -> Self {
        Self { params, rng: None, durations: None }
    }

    /// Inject the random source.  Overrides `params.seed`.
    pub fn rng(mut self, rng: SimRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Use an already-compiled sampler instead of `params.distributions`.
    pub fn durations(mut self, durations: DurationSampler) -> Self {
        self.durations = Some(durations);
        self
    }

    /// Validate the parameters, create the population, and return a
    /// ready-to-run [`Simulation`].  Nothing is sampled if validation fails.
    pub fn build(self) -> SimResult<Simulation> {
        let params = self.params;
        let (n_pt, n_ct, n_atp) = (params.n_patients, params.n_teams, params.n_attendings);

        // ── Validate ──────────────────────────────────────────────────────
        if n_pt > 0 && (n_ct == 0 || n_atp == 0) {
            return Err(SimError::Config(format!(
                "{n_pt} patients need at least one team and one attending (got {n_ct} teams, {n_atp} attendings)"
            )));
        }
        if params.max_settle_rounds == 0 {
            return Err(SimError::Config("max_settle_rounds must be at least 1".into()));
        }
        let slots = params.arrivals.slots(n_pt)?;
        let patient_teams = assignment(
            params.patient_teams.as_deref(),
            params.assign_patients,
            n_pt,
            n_ct,
            "patient_teams",
        )?;
        let team_attendings = assignment(
            params.team_attendings.as_deref(),
            params.assign_teams,
            n_ct,
            n_atp,
            "team_attendings",
        )?;
        let durations = match self.durations {
            Some(d) => d,
            None => DurationSampler::from_specs(&params.distributions)?,
        };
        let mut rng = match (self.rng, params.seed) {
            (Some(rng), _)     => rng,
            (None, Some(seed)) => SimRng::new(seed),
            (None, None)       => SimRng::from_entropy(),
        };

        // ── Resolve assignments to ids ────────────────────────────────────
        let team_id = |j: usize| actor_id(n_pt + j);
        let attending_id = |k: usize| actor_id(n_pt + n_ct + k);

        let mut patients: Vec<PatientInfo> = Vec::with_capacity(n_pt);
        for (i, &slot) in slots.iter().enumerate() {
            let team = patient_teams.as_ref().map(|v| v[i]);
            let attending = team.and_then(|j| team_attendings.as_ref().map(|v| v[j]));
            patients.push(PatientInfo {
                scheduled_time:     SimTime(slot),
                assigned_team:      team.map(&team_id).transpose()?,
                assigned_attending: attending.map(&attending_id).transpose()?,
            });
        }

        let mut teams: Vec<TeamInfo> = vec![TeamInfo::default(); n_ct];
        if let Some(v) = &patient_teams {
            for (i, &j) in v.iter().enumerate() {
                teams[j].assigned_patients.push(actor_id(i)?);
            }
        }

        let mut attendings: Vec<AttendingInfo> = vec![AttendingInfo::default(); n_atp];
        if let Some(v) = &team_attendings {
            for (j, &k) in v.iter().enumerate() {
                teams[j].assigned_attending = Some(attending_id(k)?);
                attendings[k].assigned_teams.push(team_id(j)?);
                let inherited = teams[j].assigned_patients.clone();
                attendings[k].assigned_patients.extend(inherited);
            }
        }
        for info in &mut attendings {
            info.assigned_patients.sort_unstable();
        }

        // ── Create the population at t = 0 ────────────────────────────────
        let mut registry = ActorRegistry::new();
        for info in patients {
            let delay = durations.sample(DurationKey::ArrivalDelay, &mut rng);
            let countdown = info.scheduled_time.0 + delay;
            registry.add(Role::Patient(info), ActorState::WaitingToArrive, SimTime::ZERO, countdown)?;
        }
        for info in teams {
            let huddle = durations.sample(DurationKey::Huddle, &mut rng);
            registry.add(Role::Team(info), ActorState::GroupHuddle, SimTime::ZERO, huddle)?;
        }
        for info in attendings {
            registry.add(Role::Attending(info), ActorState::WaitingForFirstTeam, SimTime::ZERO, 0.0)?;
        }
        debug!(patients = n_pt, teams = n_ct, attendings = n_atp, "population created");

        let scheduler = MatchingScheduler::new(params.order);
        Ok(Simulation::new(params, SimClock::new(), registry, durations, rng, scheduler))
    }
}

/// Per-item target index: explicit list, round-robin, or none.
fn assignment(
    explicit:    Option<&[usize]>,
    round_robin: bool,
    n_items:     usize,
    n_targets:   usize,
    what:        &str,
) -> SimResult<Option<Vec<usize>>> {
    match explicit {
        Some(v) => {
            if v.len() != n_items {
                return Err(SimError::Config(format!("{what} has {} entries, expected {n_items}", v.len())));
            }
            if let Some(&bad) = v.iter().find(|&&t| t >= n_targets) {
                return Err(SimError::Config(format!("{what} refers to index {bad}, only {n_targets} exist")));
            }
            Ok(Some(v.to_vec()))
        }
        None if round_robin && n_targets > 0 => Ok(Some((0..n_items).map(|i| i % n_targets).collect())),
        None => Ok(None),
    }
}

fn actor_id(index: usize) -> SimResult<ActorId> {
    ActorId::try_from(index).map_err(|_| SimError::Config(format!("population too large for actor id {index}")))
}
