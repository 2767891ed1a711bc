//! `cs-sim`: the clinic simulation engine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`params`]    | `Params`, `ArrivalSchedule`, default distributions        |
//! | [`builder`]   | `SimulationBuilder` (validation and population)           |
//! | [`scheduler`] | `MatchingScheduler`, `Meeting`, `MeetingKind`             |
//! | [`sim`]       | `Simulation` and its tick loop                            |
//! | [`observer`]  | `SimObserver`, `NoopObserver`, `MeetingLog`               |
//! | [`export`]    | `TimelineExport`, `ActorRecord`, `Summary`                |
//! | [`batch`]     | `run_batch`, `BatchSummary`                               |
//! | [`error`]     | `SimError`, `SimResult`                                   |
//!
//! # Tick loop
//!
//! ```text
//! t = 0
//! loop:
//!   ① Settle:  repeat { next() on idle actors; scheduler.run() }
//!               until a round changes nothing (at most
//!               max_settle_rounds changing rounds).
//!   ② Done?:   every patient checked out → stop.
//!   ③ Advance: step = min busy countdown (1 if none); tick_down; t += step.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs batch trials on Rayon's thread pool.              |
//! | `fx-hash`  | FxHash for the registry index.                         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cs_sim::{NoopObserver, Params, SimulationBuilder};
//!
//! let mut sim = SimulationBuilder::new(Params::default().with_seed(42)).build()?;
//! let end = sim.run(&mut NoopObserver)?;
//! let summary = sim.summary();
//! ```

pub mod batch;
pub mod builder;
pub mod error;
pub mod export;
pub mod observer;
pub mod params;
pub mod scheduler;
pub mod sim;


pub use batch::{run_batch, BatchSummary};
pub use builder::SimulationBuilder;
pub use error::{SimError, SimResult};
pub use export::{ActorRecord, Summary, TimelineExport};
pub use observer::{MeetingLog, NoopObserver, SimObserver};
pub use params::{default_distributions, ArrivalSchedule, Params};
pub use scheduler::{MatchContext, MatchingScheduler, Meeting, MeetingKind};
pub use sim::{Phase, Simulation};
