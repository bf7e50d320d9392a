//! Command-eligibility predicates.
//!
//! A [`Constraint`] is plain data: a variant naming the condition plus the
//! parameters it was built with. Evaluation happens in one place,
//! [`Constraint::test`], which returns [`ConstraintResult::Pass`] or a
//! `Fail` carrying a player-facing reason. A missing optional context slot
//! is an ordinary `Fail`, never a panic.

mod chain;
mod route;

pub use chain::ConstraintChain;
pub use route::route_distance;

use crate::context::ConstraintContext;
use crate::state::{City, CityStatKind, General, Nation, NationId, RelationState, NO_NATION};
use samdata::defines::domestic;
use serde::{Deserialize, Serialize};

/// Outcome of testing one constraint (or a whole chain).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintResult {
    Pass,
    Fail(String),
}

impl ConstraintResult {
    pub fn passed(&self) -> bool {
        matches!(self, ConstraintResult::Pass)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ConstraintResult::Pass => None,
            ConstraintResult::Fail(reason) => Some(reason),
        }
    }
}

/// Comparison operator for value constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cmp {
    Eq,
    Ne,
    Ge,
    Gt,
    Le,
    Lt,
}

impl Cmp {
    pub fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Cmp::Eq => lhs == rhs,
            Cmp::Ne => lhs != rhs,
            Cmp::Ge => lhs >= rhs,
            Cmp::Gt => lhs > rhs,
            Cmp::Le => lhs <= rhs,
            Cmp::Lt => lhs < rhs,
        }
    }
}

impl std::fmt::Display for Cmp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Cmp::Eq => "==",
            Cmp::Ne => "!=",
            Cmp::Ge => ">=",
            Cmp::Gt => ">",
            Cmp::Le => "<=",
            Cmp::Lt => "<",
        })
    }
}

/// Numeric field of the acting general.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorField {
    Gold,
    Rice,
    Experience,
    Dedication,
    Crew,
    Train,
    Morale,
    Injury,
}

impl ActorField {
    fn get(self, g: &General) -> i64 {
        match self {
            ActorField::Gold => g.gold,
            ActorField::Rice => g.rice,
            ActorField::Experience => g.experience,
            ActorField::Dedication => g.dedication,
            ActorField::Crew => g.crew,
            ActorField::Train => g.train,
            ActorField::Morale => g.morale,
            ActorField::Injury => g.injury,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ActorField::Gold => "gold",
            ActorField::Rice => "rice",
            ActorField::Experience => "experience",
            ActorField::Dedication => "dedication",
            ActorField::Crew => "crew",
            ActorField::Train => "training",
            ActorField::Morale => "morale",
            ActorField::Injury => "injury",
        }
    }
}

/// Numeric field of the actor's nation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NationField {
    Gold,
    Rice,
}

impl NationField {
    fn get(self, n: &Nation) -> i64 {
        match self {
            NationField::Gold => n.gold,
            NationField::Rice => n.rice,
        }
    }

    fn label(self) -> &'static str {
        match self {
            NationField::Gold => "treasury gold",
            NationField::Rice => "granary rice",
        }
    }
}

/// One eligibility predicate with its captured parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    // ---- actor ----
    HasNation,
    NoNation,
    IsLeader,
    IsNotLeader,
    RankAtLeast { rank: u8 },
    ActorValue { field: ActorField, op: Cmp, value: i64 },

    // ---- affiliation ----
    NationValue { field: NationField, op: Cmp, value: i64 },

    // ---- location ----
    LocationFriendly,
    LocationNeutral,
    LocationHostile,
    LocationSupplied,
    LocationIsCapital,
    LocationNotCapital,
    LocationValue { stat: CityStatKind, op: Cmp, value: i64 },
    LocationHasHeadroom { stat: CityStatKind },

    // ---- target ----
    TargetActorExists,
    TargetLocationExists,
    TargetNationExists,
    TargetSameNation,
    TargetDifferentNation,
    TargetNationAtWar,

    // ---- map ----
    ReachableWithin {
        limit: u32,
        /// When set, intermediate cities must be owned by one of these
        /// nations; `None` ignores ownership.
        allowed_owners: Option<Vec<NationId>>,
    },

    // ---- diplomacy ----
    DiplomacyIn { states: Vec<RelationState> },
    DiplomacyNotIn {
        states: Vec<RelationState>,
        /// When set, the current standing must also have held at least
        /// this many turns.
        min_elapsed: Option<u32>,
    },

    // ---- sentinel ----
    AlwaysFail { reason: String },
}

impl Constraint {
    // Convenience factories for the most common resource checks.

    pub fn actor_gold_at_least(value: i64) -> Self {
        Constraint::ActorValue {
            field: ActorField::Gold,
            op: Cmp::Ge,
            value,
        }
    }

    pub fn actor_rice_at_least(value: i64) -> Self {
        Constraint::ActorValue {
            field: ActorField::Rice,
            op: Cmp::Ge,
            value,
        }
    }

    pub fn nation_gold_at_least(value: i64) -> Self {
        Constraint::NationValue {
            field: NationField::Gold,
            op: Cmp::Ge,
            value,
        }
    }

    pub fn nation_rice_at_least(value: i64) -> Self {
        Constraint::NationValue {
            field: NationField::Rice,
            op: Cmp::Ge,
            value,
        }
    }

    pub fn trust_below_max() -> Self {
        Constraint::LocationHasHeadroom {
            stat: CityStatKind::Trust,
        }
    }

    pub fn always_fail(reason: impl Into<String>) -> Self {
        Constraint::AlwaysFail {
            reason: reason.into(),
        }
    }

    /// Stable name for logging and tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::HasNation => "has_nation",
            Constraint::NoNation => "no_nation",
            Constraint::IsLeader => "is_leader",
            Constraint::IsNotLeader => "is_not_leader",
            Constraint::RankAtLeast { .. } => "rank_at_least",
            Constraint::ActorValue { .. } => "actor_value",
            Constraint::NationValue { .. } => "nation_value",
            Constraint::LocationFriendly => "location_friendly",
            Constraint::LocationNeutral => "location_neutral",
            Constraint::LocationHostile => "location_hostile",
            Constraint::LocationSupplied => "location_supplied",
            Constraint::LocationIsCapital => "location_is_capital",
            Constraint::LocationNotCapital => "location_not_capital",
            Constraint::LocationValue { .. } => "location_value",
            Constraint::LocationHasHeadroom { .. } => "location_has_headroom",
            Constraint::TargetActorExists => "target_actor_exists",
            Constraint::TargetLocationExists => "target_location_exists",
            Constraint::TargetNationExists => "target_nation_exists",
            Constraint::TargetSameNation => "target_same_nation",
            Constraint::TargetDifferentNation => "target_different_nation",
            Constraint::TargetNationAtWar => "target_nation_at_war",
            Constraint::ReachableWithin { .. } => "reachable_within",
            Constraint::DiplomacyIn { .. } => "diplomacy_in",
            Constraint::DiplomacyNotIn { .. } => "diplomacy_not_in",
            Constraint::AlwaysFail { .. } => "always_fail",
        }
    }

    /// Evaluate against a context. Pure: no mutation, no randomness.
    pub fn test(&self, ctx: &ConstraintContext) -> ConstraintResult {
        use ConstraintResult::{Fail, Pass};

        match self {
            Constraint::HasNation => {
                if ctx.actor.has_nation() {
                    Pass
                } else {
                    Fail(format!("{} serves no nation", ctx.actor.name))
                }
            }
            Constraint::NoNation => {
                if ctx.actor.has_nation() {
                    Fail(format!("{} already serves a nation", ctx.actor.name))
                } else {
                    Pass
                }
            }
            Constraint::IsLeader => match &ctx.affiliation {
                None => Fail(format!("{} serves no nation", ctx.actor.name)),
                Some(nation) if ctx.actor.rank >= nation.top_rank => Pass,
                Some(nation) => Fail(format!("only the leader of {} may do this", nation.name)),
            },
            Constraint::IsNotLeader => match &ctx.affiliation {
                // A general without a nation leads no one.
                None => Pass,
                Some(nation) if ctx.actor.rank >= nation.top_rank => Fail(format!(
                    "the leader of {} must delegate this",
                    nation.name
                )),
                Some(_) => Pass,
            },
            Constraint::RankAtLeast { rank } => {
                if ctx.actor.rank >= *rank {
                    Pass
                } else {
                    Fail(format!(
                        "{} lacks the rank for this (needs {rank})",
                        ctx.actor.name
                    ))
                }
            }
            Constraint::ActorValue { field, op, value } => {
                let have = field.get(&ctx.actor);
                if op.holds(have, *value) {
                    Pass
                } else {
                    Fail(format!(
                        "{} {op} {value} required ({} on hand: {have})",
                        field.label(),
                        field.label()
                    ))
                }
            }
            Constraint::NationValue { field, op, value } => match &ctx.affiliation {
                None => Fail(format!("{} serves no nation", ctx.actor.name)),
                Some(nation) => {
                    let have = field.get(nation);
                    if op.holds(have, *value) {
                        Pass
                    } else {
                        Fail(format!(
                            "national {} {op} {value} required (current: {have})",
                            field.label()
                        ))
                    }
                }
            },
            Constraint::LocationFriendly => match self.location(ctx) {
                Err(fail) => fail,
                Ok(city) if city.nation == ctx.actor.nation && ctx.actor.has_nation() => Pass,
                Ok(city) => Fail(format!("{} is not under your banner", city.name)),
            },
            Constraint::LocationNeutral => match self.location(ctx) {
                Err(fail) => fail,
                Ok(city) if city.nation == NO_NATION => Pass,
                Ok(city) => Fail(format!("{} is already claimed", city.name)),
            },
            Constraint::LocationHostile => match self.location(ctx) {
                Err(fail) => fail,
                Ok(city) if city.nation != NO_NATION && city.nation != ctx.actor.nation => Pass,
                Ok(city) => Fail(format!("{} is not enemy ground", city.name)),
            },
            Constraint::LocationSupplied => match self.location(ctx) {
                Err(fail) => fail,
                Ok(city) if city.supply => Pass,
                Ok(city) => Fail(format!("{} is cut off from supply", city.name)),
            },
            Constraint::LocationIsCapital => match self.location(ctx) {
                Err(fail) => fail,
                Ok(city) if city.capital => Pass,
                Ok(city) => Fail(format!("{} is not a capital", city.name)),
            },
            Constraint::LocationNotCapital => match self.location(ctx) {
                Err(fail) => fail,
                Ok(city) if city.capital => {
                    Fail(format!("this cannot be done in the capital {}", city.name))
                }
                Ok(_) => Pass,
            },
            Constraint::LocationValue { stat, op, value } => match self.location(ctx) {
                Err(fail) => fail,
                Ok(city) => {
                    let have = city.stat_value(*stat);
                    if op.holds(have, *value) {
                        Pass
                    } else {
                        Fail(format!("city stat {stat:?} {op} {value} required (current: {have})"))
                    }
                }
            },
            Constraint::LocationHasHeadroom { stat } => match self.location(ctx) {
                Err(fail) => fail,
                Ok(city) if city.stat_has_headroom(*stat) => Pass,
                Ok(city) => Fail(match stat {
                    CityStatKind::Trust => format!(
                        "trust in {} already stands at {}",
                        city.name,
                        domestic::TRUST_MAX
                    ),
                    _ => format!("{} has no room to grow there", city.name),
                }),
            },
            Constraint::TargetActorExists => {
                if ctx.target_actor.is_some() {
                    Pass
                } else {
                    Fail("no target general selected".to_string())
                }
            }
            Constraint::TargetLocationExists => {
                if ctx.target_location.is_some() {
                    Pass
                } else {
                    Fail("no target city selected".to_string())
                }
            }
            Constraint::TargetNationExists => {
                if ctx.target_nation_id().is_some_and(|id| id != NO_NATION) {
                    Pass
                } else {
                    Fail("no target nation selected".to_string())
                }
            }
            Constraint::TargetSameNation => match ctx.target_nation_id() {
                None => Fail("no target selected".to_string()),
                Some(id) if id == ctx.actor.nation => Pass,
                Some(_) => Fail("the target does not serve your nation".to_string()),
            },
            Constraint::TargetDifferentNation => match ctx.target_nation_id() {
                None => Fail("no target selected".to_string()),
                Some(id) if id != ctx.actor.nation => Pass,
                Some(_) => Fail("the target serves your own nation".to_string()),
            },
            Constraint::TargetNationAtWar => match ctx.target_nation_id() {
                None => Fail("no target selected".to_string()),
                Some(id) if ctx.env.relation(ctx.actor.nation, id) == RelationState::War => Pass,
                Some(_) => Fail("you are not at war with the target".to_string()),
            },
            Constraint::ReachableWithin {
                limit,
                allowed_owners,
            } => {
                let Some(goal) = ctx.target_location.as_ref().map(|c| c.id) else {
                    return Fail("no target city selected".to_string());
                };
                let start = ctx.origin_city();
                match route_distance(&ctx.env, start, goal, allowed_owners.as_deref()) {
                    Some(dist) if dist <= *limit => Pass,
                    Some(dist) => Fail(format!(
                        "the target is {dist} marches away (at most {limit} allowed)"
                    )),
                    None => Fail("no usable route reaches the target".to_string()),
                }
            }
            Constraint::DiplomacyIn { states } => match ctx.target_nation_id() {
                None => Fail("no target nation selected".to_string()),
                Some(id) => {
                    let rel = ctx.env.relation(ctx.actor.nation, id);
                    if states.contains(&rel) {
                        Pass
                    } else {
                        Fail(format!("current standing ({rel:?}) does not permit this"))
                    }
                }
            },
            Constraint::DiplomacyNotIn {
                states,
                min_elapsed,
            } => match ctx.target_nation_id() {
                None => Fail("no target nation selected".to_string()),
                Some(id) => {
                    let rel = ctx.env.relation(ctx.actor.nation, id);
                    if states.contains(&rel) {
                        return Fail(format!("current standing ({rel:?}) forbids this"));
                    }
                    if let Some(min) = min_elapsed {
                        let age = ctx
                            .env
                            .relation_age(ctx.actor.nation, id)
                            .unwrap_or(u32::MAX);
                        if age < *min {
                            return Fail(format!(
                                "the current standing is too fresh ({age} of {min} turns)"
                            ));
                        }
                    }
                    Pass
                }
            },
            Constraint::AlwaysFail { reason } => Fail(reason.clone()),
        }
    }

    fn location<'a>(&self, ctx: &'a ConstraintContext) -> Result<&'a City, ConstraintResult> {
        ctx.location.as_ref().ok_or_else(|| {
            ConstraintResult::Fail(format!("{} is nowhere in particular", ctx.actor.name))
        })
    }
}
