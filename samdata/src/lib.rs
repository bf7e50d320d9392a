//! Static game data for the conquest simulation.
//!
//! This crate holds everything that is fixed at process start: named gameplay
//! constants ([`defines`]) and the item / nation-archetype / special-ability
//! definition tables, embedded as JSON and validated once during loading.
//!
//! Malformed table data is a configuration error and the only condition that
//! is allowed to abort startup hard; it surfaces as [`DataError`], never as a
//! per-request failure.

pub mod categories;
pub mod defines;
pub mod error;
pub mod items;
pub mod nation_types;
pub mod specials;

pub use error::DataError;
pub use items::{load_items, ItemDef, ItemSlot, TriggerKind};
pub use nation_types::{load_nation_types, NationTypeDef};
pub use specials::{load_specials, SpecialDef};
