//! Evaluation context assembled per command invocation.
//!
//! A [`ConstraintContext`] is a read-only snapshot: the acting general,
//! the entities resolved around them, and an [`EnvSnapshot`] of the world
//! facts constraints may consult (map adjacency, ownership, diplomacy,
//! calendar). Optional slots that a predicate needs but finds empty make
//! the predicate fail; they never panic.

use crate::state::{City, CityId, General, Nation, NationId, Relation, RelationState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("city {0} has no recorded owner")]
    UnknownOwner(CityId),
    #[error("environment counter '{0}' is missing")]
    MissingCounter(String),
}

/// World facts visible to constraints and commands.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvSnapshot {
    /// City adjacency, as stable ordered neighbor lists.
    pub adjacency: HashMap<CityId, Vec<CityId>>,
    /// City -> owning nation (NO_NATION for wilderness).
    pub owners: HashMap<CityId, NationId>,
    /// Pairwise diplomatic standing, keyed by normalized `(lo, hi)` ids.
    pub diplomacy: HashMap<(NationId, NationId), Relation>,
    pub current_turn: u32,
    pub elapsed_years: u32,
    /// Named scenario counters (e.g. levy pools, event clocks).
    pub counters: HashMap<String, i64>,
    /// Named scenario flags.
    pub flags: HashMap<String, bool>,
}

impl EnvSnapshot {
    fn pair(a: NationId, b: NationId) -> (NationId, NationId) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    pub fn neighbors(&self, city: CityId) -> &[CityId] {
        self.adjacency.get(&city).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn owner(&self, city: CityId) -> Result<NationId, EnvError> {
        self.owners
            .get(&city)
            .copied()
            .ok_or(EnvError::UnknownOwner(city))
    }

    /// Diplomatic standing between two nations; unrecorded pairs are
    /// neutral.
    pub fn relation(&self, a: NationId, b: NationId) -> RelationState {
        if a == b {
            return RelationState::Alliance;
        }
        self.diplomacy
            .get(&Self::pair(a, b))
            .map(|r| r.state)
            .unwrap_or(RelationState::Neutral)
    }

    /// Turn the current standing between two nations was entered, if one
    /// is recorded.
    pub fn relation_since(&self, a: NationId, b: NationId) -> Option<u32> {
        self.diplomacy.get(&Self::pair(a, b)).map(|r| r.since_turn)
    }

    /// Turns the current standing has held.
    pub fn relation_age(&self, a: NationId, b: NationId) -> Option<u32> {
        self.relation_since(a, b)
            .map(|since| self.current_turn.saturating_sub(since))
    }

    pub fn counter(&self, key: &str) -> Result<i64, EnvError> {
        self.counters
            .get(key)
            .copied()
            .ok_or_else(|| EnvError::MissingCounter(key.to_string()))
    }

    pub fn flag(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }
}

/// Everything a constraint may look at for one command invocation.
///
/// Built fresh by the turn driver before validation and discarded after
/// execution; nothing here outlives the invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintContext {
    pub actor: General,
    /// City the actor stands in, when it resolves.
    pub location: Option<City>,
    /// The actor's nation, when they have one.
    pub affiliation: Option<Nation>,
    pub target_actor: Option<General>,
    pub target_location: Option<City>,
    pub target_affiliation: Option<Nation>,
    pub env: EnvSnapshot,
}

impl ConstraintContext {
    /// Nation id on the target side, from the most specific slot that is
    /// populated.
    pub fn target_nation_id(&self) -> Option<NationId> {
        if let Some(n) = &self.target_affiliation {
            return Some(n.id);
        }
        if let Some(c) = &self.target_location {
            return Some(c.nation);
        }
        self.target_actor.as_ref().map(|g| g.nation)
    }

    /// City the actor acts from: the resolved location, falling back to
    /// the actor's recorded posting.
    pub fn origin_city(&self) -> CityId {
        self.location
            .as_ref()
            .map(|c| c.id)
            .unwrap_or(self.actor.city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_defaults_to_neutral() {
        let env = EnvSnapshot::default();
        assert_eq!(env.relation(1, 2), RelationState::Neutral);
    }

    #[test]
    fn test_relation_key_order_is_normalized() {
        let mut env = EnvSnapshot::default();
        env.diplomacy.insert(
            (1, 2),
            Relation {
                state: RelationState::War,
                since_turn: 4,
            },
        );
        assert_eq!(env.relation(2, 1), RelationState::War);
        assert_eq!(env.relation_since(2, 1), Some(4));
    }

    #[test]
    fn test_relation_age() {
        let mut env = EnvSnapshot {
            current_turn: 10,
            ..Default::default()
        };
        env.diplomacy.insert(
            (1, 2),
            Relation {
                state: RelationState::Ceasefire,
                since_turn: 4,
            },
        );
        assert_eq!(env.relation_age(1, 2), Some(6));
    }

    #[test]
    fn test_missing_owner_is_an_error() {
        let env = EnvSnapshot::default();
        assert!(env.owner(99).is_err());
    }

    #[test]
    fn test_target_nation_prefers_affiliation_slot() {
        let mut ctx = crate::testing::context();
        assert_eq!(ctx.target_nation_id(), None);
        ctx.target_location = Some(crate::testing::city_with(|c| c.nation = 7));
        assert_eq!(ctx.target_nation_id(), Some(7));
        ctx.target_affiliation = Some(crate::testing::nation_with(|n| n.id = 3));
        assert_eq!(ctx.target_nation_id(), Some(3));
    }
}
