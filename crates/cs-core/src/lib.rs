//! `cs-core`: foundational types for the clinic workflow simulator.
//!
//! This crate is a dependency of every other `cs-*` crate.  It has no `cs-*`
//! dependencies and only `rand` and `thiserror` externally (plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                         |
//! |------------|--------------------------------------------------|
//! | [`ids`]    | `ActorId`                                        |
//! | [`time`]   | `SimTime`, `SimClock`                            |
//! | [`rng`]    | `SimRng` (one per simulation instance)           |
//! | [`error`]  | `CoreError`, `CoreResult`                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::ActorId;
pub use rng::SimRng;
pub use time::{SimClock, SimTime};
