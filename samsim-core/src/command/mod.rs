//! The command contract.
//!
//! A command is a value: its typed arguments are fields, its eligibility
//! is a constraint list built per invocation, and its `run` is
//! deterministic given the context and the roll source. Execution never
//! mutates world state directly; it returns a [`CommandResult`] whose
//! [`EffectLog`] the turn driver applies.

mod diplomacy;
mod domestic;
mod military;
mod strategic;

pub use diplomacy::ProposeNonAggression;
pub use domestic::{DomesticCommand, DomesticProfile};
pub use military::{Move, Recruit};
pub use strategic::Sabotage;

use crate::constraint::{Constraint, ConstraintChain, ConstraintResult};
use crate::context::ConstraintContext;
use crate::fixed::Fixed;
use crate::registry::Registries;
use crate::rng::RollSource;
use crate::state::{CityId, CityStatKind, NationId, RelationState, UnitKind};
use serde::{Deserialize, Serialize};

/// Resources an invocation charges the acting general.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommandCost {
    pub gold: i64,
    pub rice: i64,
}

impl CommandCost {
    pub fn gold(gold: i64) -> Self {
        CommandCost { gold, rice: 0 }
    }

    pub fn rice(rice: i64) -> Self {
        CommandCost { gold: 0, rice }
    }

    /// Scale both resources by a multiplier, flooring.
    pub fn scaled(self, multiplier: Fixed) -> Self {
        CommandCost {
            gold: Fixed::from_int(self.gold).mul(multiplier).to_int(),
            rice: Fixed::from_int(self.rice).mul(multiplier).to_int(),
        }
    }
}

/// One structured state change. The turn driver is the only consumer;
/// commands never apply these themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Gold/rice delta on the acting general.
    ActorResource { gold: i64, rice: i64 },
    /// Experience/dedication gains for the acting general.
    ActorProgress { experience: i64, dedication: i64 },
    /// The acting general relocates.
    ActorMoved { to: CityId },
    /// Crew joins or leaves the acting general's command.
    ActorCrew { delta: i64, unit: UnitKind },
    /// Drill levels of the acting general's crew are reset.
    ActorDrill { train: i64, morale: i64 },
    /// Whole-unit delta on a city stat.
    CityStat {
        city: CityId,
        stat: CityStatKind,
        delta: i64,
    },
    /// Fractional delta on a city's trust.
    CityTrust { city: CityId, delta: Fixed },
    /// Gold/rice delta on a nation's treasury.
    NationResource {
        nation: NationId,
        gold: i64,
        rice: i64,
    },
    /// Diplomatic standing between two nations changes.
    Diplomacy {
        a: NationId,
        b: NationId,
        state: RelationState,
    },
}

/// Ordered intent payload of a successful execution.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EffectLog {
    pub effects: Vec<Effect>,
}

impl EffectLog {
    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

/// Outcome of one `run`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResult {
    /// Whether the command executed. An unfavorable roll is still a
    /// successful execution; only a context the command cannot act on
    /// (defense in depth behind the constraint tiers) yields `false`.
    pub success: bool,
    /// Player-facing log lines, in emission order.
    pub logs: Vec<String>,
    /// Structured changes for the turn driver; absent when nothing
    /// happened.
    pub message: Option<EffectLog>,
}

impl CommandResult {
    pub fn failed(reason: impl Into<String>) -> Self {
        CommandResult {
            success: false,
            logs: vec![reason.into()],
            message: None,
        }
    }
}

/// The contract every command implements.
///
/// `full_constraints` gates execution; `min_constraints` is the looser
/// tier interfaces use to decide whether the command is worth offering
/// at all. Both are rebuilt per invocation because costs (and therefore
/// resource predicates) can depend on the context and the modifier
/// registries.
pub trait Command {
    /// Stable label; also the key modifier category matching runs on.
    fn name(&self) -> &'static str;

    fn full_constraints(&self, ctx: &ConstraintContext, reg: &Registries) -> Vec<Constraint>;

    fn min_constraints(&self, ctx: &ConstraintContext, reg: &Registries) -> Vec<Constraint> {
        self.full_constraints(ctx, reg)
    }

    /// Resource charge for this invocation. Pure; never rolls.
    fn cost(&self, ctx: &ConstraintContext, reg: &Registries) -> CommandCost {
        let _ = (ctx, reg);
        CommandCost::default()
    }

    /// Turns the actor is committed before execution.
    fn pre_req_turns(&self, ctx: &ConstraintContext, reg: &Registries) -> u32 {
        let _ = (ctx, reg);
        0
    }

    /// Turns the actor remains committed after execution.
    fn post_req_turns(&self, ctx: &ConstraintContext, reg: &Registries) -> u32 {
        let _ = (ctx, reg);
        0
    }

    /// Execute. Deterministic given `ctx` and the roll stream.
    fn run(
        &self,
        ctx: &ConstraintContext,
        reg: &Registries,
        rolls: &mut dyn RollSource,
    ) -> CommandResult;
}

/// Test a command's execution tier against a context.
pub fn check_full<C: Command + ?Sized>(
    cmd: &C,
    ctx: &ConstraintContext,
    reg: &Registries,
) -> ConstraintResult {
    ConstraintChain::test_all(&cmd.full_constraints(ctx, reg), ctx)
}

/// Test a command's display tier against a context.
pub fn check_min<C: Command + ?Sized>(
    cmd: &C,
    ctx: &ConstraintContext,
    reg: &Registries,
) -> ConstraintResult {
    ConstraintChain::test_all(&cmd.min_constraints(ctx, reg), ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_scaling_floors() {
        let cost = CommandCost { gold: 50, rice: 10 };
        let scaled = cost.scaled(Fixed::from_raw(8_000));
        assert_eq!(scaled, CommandCost { gold: 40, rice: 8 });
        // 10 * 1.25 = 12.5, floored
        let scaled = CommandCost::rice(10).scaled(Fixed::from_raw(12_500));
        assert_eq!(scaled.rice, 12);
    }

    #[test]
    fn test_effect_log_serializes_tagged() {
        let mut log = EffectLog::default();
        log.push(Effect::ActorResource { gold: -50, rice: 0 });
        let json = serde_json::to_string(&log).unwrap();
        assert!(json.contains(r#""type":"actor_resource""#));
        let back: EffectLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }

    #[test]
    fn test_failed_result_has_no_message() {
        let res = CommandResult::failed("nope");
        assert!(!res.success);
        assert!(res.message.is_none());
        assert_eq!(res.logs, vec!["nope".to_string()]);
    }
}
