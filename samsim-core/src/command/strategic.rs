//! Strategic (covert) commands.

use super::{Command, CommandCost, CommandResult, Effect, EffectLog};
use crate::constraint::Constraint;
use crate::context::ConstraintContext;
use crate::fixed::Fixed;
use crate::modifier::{ModifierStack, StrategicContext};
use crate::registry::Registries;
use crate::rng::RollSource;
use crate::state::{CityStatKind, RelationState};
use samdata::defines::strategic as defines;
use tracing::instrument;

const SABOTAGE_BASE_COST: CommandCost = CommandCost { gold: 200, rice: 0 };
const SABOTAGE_RANGE: u32 = 3;
const SABOTAGE_BASE_TURNS: i64 = 2;

/// Chance floor and ceiling: a sabotage attempt is never certain either way.
const CHANCE_MIN: Fixed = Fixed::from_raw(500);
const CHANCE_MAX: Fixed = Fixed::from_raw(9_500);

/// Infiltrate a hostile city and tear down its wall and watch.
pub struct Sabotage;

impl Sabotage {
    fn fold(&self, ctx: &ConstraintContext, reg: &Registries) -> StrategicContext {
        ModifierStack::for_general(&ctx.actor, ctx.affiliation.as_ref(), reg)
            .fold_strategic(self.name(), StrategicContext::default())
    }

    /// Odds of slipping past the watch: base chance swung by the gap
    /// between the agent's intel and the city's watch (security / 10).
    #[instrument(skip_all, name = "sabotage_chance")]
    fn chance(&self, ctx: &ConstraintContext, sctx: &StrategicContext) -> Fixed {
        let watch = ctx
            .target_location
            .as_ref()
            .map(|c| c.security.value() / 10)
            .unwrap_or(0);
        let swing = ctx.actor.intel - watch;
        (Fixed::from_raw(defines::SABOTAGE_BASE_CHANCE)
            + Fixed::from_raw(defines::SABOTAGE_INTEL_STEP).mul_int(swing))
        .mul(sctx.success_multiplier)
        .clamp(CHANCE_MIN, CHANCE_MAX)
    }
}

impl Command for Sabotage {
    fn name(&self) -> &'static str {
        "sabotage"
    }

    fn full_constraints(&self, ctx: &ConstraintContext, reg: &Registries) -> Vec<Constraint> {
        let cost = self.cost(ctx, reg);
        vec![
            Constraint::HasNation,
            Constraint::TargetLocationExists,
            Constraint::TargetDifferentNation,
            Constraint::DiplomacyNotIn {
                states: vec![RelationState::NonAggression, RelationState::Alliance],
                min_elapsed: None,
            },
            Constraint::actor_gold_at_least(cost.gold),
            Constraint::ReachableWithin {
                limit: SABOTAGE_RANGE,
                allowed_owners: None,
            },
        ]
    }

    fn min_constraints(&self, _ctx: &ConstraintContext, _reg: &Registries) -> Vec<Constraint> {
        vec![Constraint::HasNation, Constraint::TargetLocationExists]
    }

    fn cost(&self, ctx: &ConstraintContext, reg: &Registries) -> CommandCost {
        SABOTAGE_BASE_COST.scaled(self.fold(ctx, reg).cost_multiplier)
    }

    fn post_req_turns(&self, ctx: &ConstraintContext, reg: &Registries) -> u32 {
        let delay = self.fold(ctx, reg).delay_multiplier;
        Fixed::from_int(SABOTAGE_BASE_TURNS)
            .mul(delay)
            .to_int()
            .max(1) as u32
    }

    fn run(
        &self,
        ctx: &ConstraintContext,
        reg: &Registries,
        rolls: &mut dyn RollSource,
    ) -> CommandResult {
        let Some(target) = ctx.target_location.as_ref() else {
            log::warn!("{} ran 'sabotage' with no target", ctx.actor.name);
            return CommandResult::failed("there is no city to sabotage");
        };

        let sctx = self.fold(ctx, reg);
        let cost = SABOTAGE_BASE_COST.scaled(sctx.cost_multiplier);
        let chance = self.chance(ctx, &sctx);

        let mut message = EffectLog::default();
        message.push(Effect::ActorResource {
            gold: -cost.gold,
            rice: -cost.rice,
        });

        let roll = rolls.unit();
        let line = if roll < chance {
            let ratio = Fixed::from_raw(defines::SABOTAGE_DAMAGE_RATIO);
            let wall_damage = Fixed::from_int(target.wall.value()).mul(ratio).to_int();
            let watch_damage = Fixed::from_int(target.security.value()).mul(ratio).to_int();
            message.push(Effect::CityStat {
                city: target.id,
                stat: CityStatKind::Wall,
                delta: -wall_damage.min(target.wall.value()),
            });
            message.push(Effect::CityStat {
                city: target.id,
                stat: CityStatKind::Security,
                delta: -watch_damage.min(target.security.value()),
            });
            message.push(Effect::ActorProgress {
                experience: wall_damage + watch_damage,
                dedication: wall_damage + watch_damage,
            });
            format!(
                "Saboteurs lit fires in {}: walls -{wall_damage}, security -{watch_damage}.",
                target.name
            )
        } else {
            log::debug!(
                "{} sabotage of {} foiled (chance {chance})",
                ctx.actor.name,
                target.name
            );
            format!("The infiltrators were spotted at the gates of {}.", target.name)
        };

        CommandResult {
            success: true,
            logs: vec![line],
            message: Some(message),
        }
    }
}
