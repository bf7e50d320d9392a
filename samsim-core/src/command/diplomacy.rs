//! Diplomatic commands.

use super::{Command, CommandResult, Effect, EffectLog};
use crate::constraint::Constraint;
use crate::context::ConstraintContext;
use crate::registry::Registries;
use crate::rng::RollSource;
use crate::state::RelationState;
use samdata::defines::diplomacy as defines;

/// Seal a non-aggression pact with another nation.
///
/// Only the nation's leader may commit it, the pact is paid from the
/// treasury, and a standing that was renegotiated recently cannot be
/// overturned again at once.
pub struct ProposeNonAggression;

impl Command for ProposeNonAggression {
    fn name(&self) -> &'static str {
        "propose_non_aggression"
    }

    fn full_constraints(&self, _ctx: &ConstraintContext, _reg: &Registries) -> Vec<Constraint> {
        vec![
            Constraint::HasNation,
            Constraint::IsLeader,
            Constraint::TargetNationExists,
            Constraint::TargetDifferentNation,
            Constraint::DiplomacyNotIn {
                states: vec![
                    RelationState::War,
                    RelationState::NonAggression,
                    RelationState::Alliance,
                ],
                min_elapsed: Some(defines::MIN_STANDING_TURNS as u32),
            },
            Constraint::nation_gold_at_least(defines::PROPOSAL_GOLD),
        ]
    }

    fn min_constraints(&self, _ctx: &ConstraintContext, _reg: &Registries) -> Vec<Constraint> {
        vec![
            Constraint::HasNation,
            Constraint::IsLeader,
            Constraint::TargetNationExists,
        ]
    }

    fn post_req_turns(&self, _ctx: &ConstraintContext, _reg: &Registries) -> u32 {
        1
    }

    fn run(
        &self,
        ctx: &ConstraintContext,
        _reg: &Registries,
        _rolls: &mut dyn RollSource,
    ) -> CommandResult {
        let (Some(own), Some(other)) = (ctx.affiliation.as_ref(), ctx.target_nation_id()) else {
            log::warn!(
                "{} proposed a pact without both nations resolved",
                ctx.actor.name
            );
            return CommandResult::failed("both nations must be known to treat");
        };

        let other_name = ctx
            .target_affiliation
            .as_ref()
            .map(|n| n.name.as_str())
            .unwrap_or("the other court");

        let mut message = EffectLog::default();
        message.push(Effect::NationResource {
            nation: own.id,
            gold: -defines::PROPOSAL_GOLD,
            rice: 0,
        });
        message.push(Effect::Diplomacy {
            a: own.id,
            b: other,
            state: RelationState::NonAggression,
        });

        CommandResult {
            success: true,
            logs: vec![format!(
                "{} sealed a non-aggression pact between {} and {}.",
                ctx.actor.name, own.name, other_name
            )],
            message: Some(message),
        }
    }
}
