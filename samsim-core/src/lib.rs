//! Deterministic rule-evaluation core for a turn-based conquest game.
//!
//! The crate answers two questions for the turn driver: *may* a general
//! execute a command here (constraint chains over an immutable context),
//! and *what happens* when they do (a deterministic `run` that emits
//! log lines plus a structured effect payload, never mutating state
//! itself). Passive influences (items, personal specialties, nation
//! archetypes) plug into both answers through modifier registries.
//!
//! All effect arithmetic is fixed-point ([`Fixed`], scale 10000); every
//! random draw flows through a [`rng::RollSource`] handed to `run`, so a
//! replay with the same seed reproduces a turn exactly.

pub mod command;
pub mod constraint;
pub mod context;
pub mod fixed;
pub mod income;
pub mod modifier;
pub mod power;
pub mod registry;
pub mod rng;
pub mod state;
pub mod testing;

pub use command::{Command, CommandCost, CommandResult, Effect, EffectLog};
pub use constraint::{Constraint, ConstraintChain, ConstraintResult};
pub use context::ConstraintContext;
pub use fixed::Fixed;
pub use registry::Registries;
