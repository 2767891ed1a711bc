//! `ActorRegistry`: owns the population and indexes it by `(kind, state)`.
//!
//! Matchable-set queries (`patients waiting for a team`, …) read one index
//! bucket instead of scanning the whole population.  Buckets are
//! `BTreeSet<ActorId>` so iteration is in stable creation order, which is the
//! tie-break for the oldest-waiting-first ordering.

use std::collections::BTreeSet;

use cs_core::{ActorId, CoreError, CoreResult, SimRng, SimTime};

use crate::{
    Actor, ActorKind, ActorState, Role, StateMachine, Transition, UpdateContext,
};

#[cfg(feature = "fx-hash")]
type IndexMap<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type IndexMap<K, V> = std::collections::HashMap<K, V>;

/// Order in which candidates are offered to a matching pass.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OrderPolicy {
    /// Longest wait in the current state first; ties by `ActorId`.
    #[default]
    OldestFirst,
    /// Uniform random order, drawn from the simulation RNG.
    Shuffle,
}

/// The full actor population.
#[derive(Default)]
pub struct ActorRegistry {
    actors: Vec<Actor>,
    index:  IndexMap<(ActorKind, ActorState), BTreeSet<ActorId>>,
    counts: [usize; 3],
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an actor in `state` at `now` with the given countdown.
    ///
    /// The label is derived from the kind and the per-kind ordinal.
    pub fn add(
        &mut self,
        role:      Role,
        state:     ActorState,
        now:       SimTime,
        countdown: f64,
    ) -> CoreResult<ActorId> {
        let id = ActorId::try_from(self.actors.len())
            .map_err(|_| CoreError::Invariant("actor id space exhausted".into()))?;
        let kind = role.kind();
        let label = kind.label(self.counts[kind_slot(kind)]);
        let actor = Actor::new(id, label, role, state, now, countdown)?;
        self.counts[kind_slot(kind)] += 1;
        self.index.entry((kind, state)).or_default().insert(id);
        self.actors.push(actor);
        Ok(id)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Number of actors of `kind`.
    pub fn count(&self, kind: ActorKind) -> usize {
        self.counts[kind_slot(kind)]
    }

    pub fn get(&self, id: ActorId) -> CoreResult<&Actor> {
        self.actors.get(id.index()).ok_or(CoreError::ActorNotFound(id))
    }

    /// All actors in ascending `ActorId` order.
    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    /// Actors of `kind`, in creation order.
    pub fn of_kind(&self, kind: ActorKind) -> impl Iterator<Item = &Actor> {
        self.actors.iter().filter(move |a| a.kind() == kind)
    }

    /// Number of actors of `kind` currently in `state`.
    pub fn count_in(&self, kind: ActorKind, state: ActorState) -> usize {
        self.index.get(&(kind, state)).map_or(0, BTreeSet::len)
    }

    /// Ids of `kind` in `state`, ascending.
    pub fn in_state(&self, kind: ActorKind, state: ActorState) -> impl Iterator<Item = ActorId> + '_ {
        self.index.get(&(kind, state)).into_iter().flatten().copied()
    }

    /// Idle actors of `kind` in any of `states`, ordered by `policy`.
    pub fn waiting(
        &self,
        kind:   ActorKind,
        states: &[ActorState],
        policy: OrderPolicy,
        rng:    &mut SimRng,
    ) -> Vec<ActorId> {
        let mut ids: Vec<ActorId> = states
            .iter()
            .flat_map(|&s| self.in_state(kind, s))
            .filter(|id| self.actors[id.index()].is_idle())
            .collect();

        match policy {
            OrderPolicy::OldestFirst => {
                ids.sort_by(|a, b| {
                    let (sa, sb) = (self.actors[a.index()].state_since(), self.actors[b.index()].state_since());
                    sa.0.total_cmp(&sb.0).then(a.cmp(b))
                });
            }
            OrderPolicy::Shuffle => {
                ids.sort_unstable();
                rng.shuffle(&mut ids);
            }
        }
        ids
    }

    /// Smallest positive countdown across the population.
    pub fn min_countdown(&self) -> Option<f64> {
        self.actors
            .iter()
            .filter(|a| !a.is_idle())
            .map(Actor::time_remaining)
            .min_by(f64::total_cmp)
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Apply `tr` to actor `id` at `now`, keeping the index in step.
    pub fn set_state(&mut self, id: ActorId, tr: Transition, now: SimTime) -> CoreResult<()> {
        let actor = self.actors.get_mut(id.index()).ok_or(CoreError::ActorNotFound(id))?;
        let (kind, from) = (actor.kind(), actor.state());
        actor.set_state(tr, now)?;
        if from != tr.state {
            if let Some(bucket) = self.index.get_mut(&(kind, from)) {
                bucket.remove(&id);
            }
            self.index.entry((kind, tr.state)).or_default().insert(id);
        }
        Ok(())
    }

    /// Mutable role data.  Role data never changes the index.
    pub fn role_mut(&mut self, id: ActorId) -> CoreResult<&mut Role> {
        self.actors
            .get_mut(id.index())
            .map(|a| &mut a.role)
            .ok_or(CoreError::ActorNotFound(id))
    }

    /// Decrement every running countdown by `step`.
    pub fn tick_down(&mut self, step: f64) {
        for actor in &mut self.actors {
            actor.tick_down(step);
        }
    }

    /// Run one `next` pass over every idle, non-terminal actor in id order.
    ///
    /// Returns the number of actors that changed state.
    pub fn update_idle(&mut self, ctx: &mut UpdateContext<'_>) -> CoreResult<usize> {
        let mut changed = 0;
        for i in 0..self.actors.len() {
            let actor = &self.actors[i];
            if !actor.is_idle() || actor.is_terminal() {
                continue;
            }
            if let Some(tr) = actor.role.next(actor.state(), ctx) {
                let id = actor.id;
                self.set_state(id, tr, ctx.now)?;
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Discard trailing open entries truncated by the end of the run.
    pub fn finalize(&mut self) {
        for actor in &mut self.actors {
            actor.finalize();
        }
    }

    /// Check the structural invariants of every actor and of the index.
    ///
    /// Only meaningful before [`finalize`](Self::finalize).
    pub fn check_invariants(&self) -> CoreResult<()> {
        for actor in &self.actors {
            if actor.time_remaining() < 0.0 {
                return Err(CoreError::Invariant(format!(
                    "{} has negative countdown {}",
                    actor.label,
                    actor.time_remaining()
                )));
            }
            let entries = actor.timeline().entries();
            let open = entries.iter().filter(|e| e.is_open()).count();
            match actor.timeline().current() {
                Some(cur) if open == 1 && cur.state == actor.state() => {}
                _ => {
                    return Err(CoreError::Invariant(format!(
                        "{} has {open} open entries, current state {}",
                        actor.label,
                        actor.state()
                    )));
                }
            }
            if entries.iter().any(|e| e.end.is_some_and(|end| end < e.start)) {
                return Err(CoreError::Invariant(format!("{} has an entry ending before it starts", actor.label)));
            }
            let indexed = self
                .index
                .get(&(actor.kind(), actor.state()))
                .is_some_and(|b| b.contains(&actor.id));
            if !indexed {
                return Err(CoreError::Invariant(format!("{} missing from index", actor.label)));
            }
        }
        let indexed_total: usize = self.index.values().map(BTreeSet::len).sum();
        if indexed_total != self.actors.len() {
            return Err(CoreError::Invariant(format!(
                "index holds {indexed_total} entries for {} actors",
                self.actors.len()
            )));
        }
        Ok(())
    }
}

#[inline]
fn kind_slot(kind: ActorKind) -> usize {
    match kind {
        ActorKind::Patient   => 0,
        ActorKind::Team      => 1,
        ActorKind::Attending => 2,
    }
}
