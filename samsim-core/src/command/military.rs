//! Troop and movement commands.

use super::{Command, CommandCost, CommandResult, Effect, EffectLog};
use crate::constraint::{ActorField, Cmp, Constraint};
use crate::context::ConstraintContext;
use crate::fixed::Fixed;
use crate::modifier::{DomesticContext, ModifierStack};
use crate::registry::Registries;
use crate::rng::RollSource;
use crate::state::{CityId, CityStatKind, UnitKind};
use samdata::defines::military as defines;

/// Raise crew from the local population.
pub struct Recruit {
    pub amount: i64,
    pub unit: UnitKind,
}

impl Recruit {
    fn fold(&self, ctx: &ConstraintContext, reg: &Registries) -> DomesticContext {
        ModifierStack::for_general(&ctx.actor, ctx.affiliation.as_ref(), reg)
            .fold_domestic(self.name(), DomesticContext::default())
    }
}

impl Command for Recruit {
    fn name(&self) -> &'static str {
        "recruit"
    }

    fn full_constraints(&self, ctx: &ConstraintContext, reg: &Registries) -> Vec<Constraint> {
        if self.amount <= 0 {
            return vec![Constraint::always_fail("recruit at least one soldier")];
        }
        let headroom = ctx.actor.crew_cap() - ctx.actor.crew;
        if self.amount > headroom {
            return vec![Constraint::always_fail(format!(
                "{} can lead only {} more",
                ctx.actor.name, headroom
            ))];
        }
        let cost = self.cost(ctx, reg);
        vec![
            Constraint::HasNation,
            Constraint::LocationFriendly,
            Constraint::LocationSupplied,
            Constraint::LocationValue {
                stat: CityStatKind::Population,
                op: Cmp::Ge,
                value: self.amount,
            },
            Constraint::actor_gold_at_least(cost.gold),
            Constraint::actor_rice_at_least(cost.rice),
        ]
    }

    fn min_constraints(&self, ctx: &ConstraintContext, _reg: &Registries) -> Vec<Constraint> {
        vec![
            Constraint::HasNation,
            Constraint::LocationFriendly,
            Constraint::ActorValue {
                field: ActorField::Crew,
                op: Cmp::Lt,
                value: ctx.actor.crew_cap(),
            },
        ]
    }

    fn cost(&self, ctx: &ConstraintContext, reg: &Registries) -> CommandCost {
        let per_head = CommandCost {
            gold: Fixed::from_raw(defines::RECRUIT_GOLD_PER_HEAD)
                .mul_int(self.amount)
                .to_int(),
            rice: Fixed::from_raw(defines::RECRUIT_RICE_PER_HEAD)
                .mul_int(self.amount)
                .to_int(),
        };
        per_head.scaled(self.fold(ctx, reg).cost_multiplier)
    }

    fn run(
        &self,
        ctx: &ConstraintContext,
        reg: &Registries,
        _rolls: &mut dyn RollSource,
    ) -> CommandResult {
        let Some(city) = ctx.location.as_ref() else {
            log::warn!("{} ran 'recruit' with no location", ctx.actor.name);
            return CommandResult::failed("there is no city to recruit in");
        };

        let cost = self.cost(ctx, reg);
        let mut message = EffectLog::default();
        message.push(Effect::ActorResource {
            gold: -cost.gold,
            rice: -cost.rice,
        });
        message.push(Effect::ActorCrew {
            delta: self.amount,
            unit: self.unit,
        });
        // Fresh levies dilute the ranks back toward parade-ground drill.
        message.push(Effect::ActorDrill {
            train: defines::TRAIN_BASE,
            morale: defines::MORALE_BASE,
        });
        message.push(Effect::CityStat {
            city: city.id,
            stat: CityStatKind::Population,
            delta: -self.amount,
        });

        CommandResult {
            success: true,
            logs: vec![format!(
                "{} raised {} {:?} troops in {}.",
                ctx.actor.name, self.amount, self.unit, city.name
            )],
            message: Some(message),
        }
    }
}

/// March to an adjacent city.
pub struct Move {
    pub to: CityId,
}

impl Command for Move {
    fn name(&self) -> &'static str {
        "move"
    }

    fn full_constraints(&self, ctx: &ConstraintContext, _reg: &Registries) -> Vec<Constraint> {
        if ctx.target_location.as_ref().map(|c| c.id) != Some(self.to) {
            return vec![Constraint::always_fail("destination is not resolved")];
        }
        vec![
            Constraint::TargetLocationExists,
            Constraint::ReachableWithin {
                limit: 1,
                allowed_owners: None,
            },
        ]
    }

    fn run(
        &self,
        ctx: &ConstraintContext,
        _reg: &Registries,
        _rolls: &mut dyn RollSource,
    ) -> CommandResult {
        let Some(dest) = ctx.target_location.as_ref() else {
            return CommandResult::failed("there is nowhere to march to");
        };
        if dest.id != self.to {
            log::warn!(
                "{} ordered to {} but the context resolved {}",
                ctx.actor.name,
                self.to,
                dest.id
            );
            return CommandResult::failed("the marching orders no longer match the map");
        }

        let mut message = EffectLog::default();
        message.push(Effect::ActorMoved { to: dest.id });

        CommandResult {
            success: true,
            logs: vec![format!("{} marched to {}.", ctx.actor.name, dest.name)],
            message: Some(message),
        }
    }
}
