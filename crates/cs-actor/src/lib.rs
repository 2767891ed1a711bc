//! `cs-actor`: actors, their state machines, and the actor registry.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`state`]    | `ActorKind`, `ActorState`                                     |
//! | [`timeline`] | `TimelineEntry`, `Timeline` (append-only state log)           |
//! | [`role`]     | `Role`, `PatientInfo`, `TeamInfo`, `AttendingInfo`            |
//! | [`actor`]    | `Actor`, `Transition`, `Countdown`                            |
//! | [`machine`]  | `StateMachine` trait, per-role transition tables, `UpdateContext` |
//! | [`registry`] | `ActorRegistry` (indexed by kind and state), `OrderPolicy`    |
//!
//! # Mutation model
//!
//! Actors are created once and then only changed through
//! [`ActorRegistry::set_state`], which closes the open timeline entry, opens
//! the next one, resets the countdown, and keeps the `(kind, state)` index
//! in step.  Role data that does not affect the index (eligibility sets,
//! the team's carried patient id) is reachable via
//! [`ActorRegistry::role_mut`].
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                 |
//! |-----------|--------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the registry index.      |
//! | `serde`   | Derives `Serialize`/`Deserialize` on public types.     |

pub mod actor;
pub mod machine;
pub mod registry;
pub mod role;
pub mod state;
pub mod timeline;


pub use actor::{Actor, Countdown, Transition};
pub use machine::{StateMachine, UpdateContext};
pub use registry::{ActorRegistry, OrderPolicy};
pub use role::{AttendingInfo, PatientInfo, Role, TeamInfo};
pub use state::{ActorKind, ActorState};
pub use timeline::{Timeline, TimelineEntry};
