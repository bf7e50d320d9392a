//! Effective battle-stat computation.
//!
//! Folds a general's modifier stack over a base stat, then lets the
//! opponent's stack apply its debuffs. Pure; engagement resolution
//! (who rolls what) lives with the caller.

use crate::fixed::Fixed;
use crate::modifier::{ModifierStack, StatContext, StatInput};
use crate::registry::Registries;
use crate::state::{General, GeneralStat, Nation};
use tracing::instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleStats {
    /// Base stat plus flat bonuses.
    pub stat: i64,
    /// Product of every multiplicative war-power contribution.
    pub war_power: Fixed,
    /// Additive critical-hit chance.
    pub critical_chance: Fixed,
}

/// Compute one side's effective battle stats.
///
/// `defender` supplies the opposing general (and their nation) so that
/// type-advantage triggers and opposing-stat debuffs see the engagement.
#[instrument(skip_all, name = "battle_stats")]
pub fn battle_stats(
    attacker: &General,
    attacker_nation: Option<&Nation>,
    battle_stat: GeneralStat,
    defender: Option<(&General, Option<&Nation>)>,
    elapsed_years: u32,
    reg: &Registries,
) -> BattleStats {
    let input = StatInput {
        actor: attacker,
        battle_stat,
        opponent_unit: defender.map(|(d, _)| d.unit),
        elapsed_years,
    };
    let stack = ModifierStack::for_general(attacker, attacker_nation, reg);
    let mut ctx = stack.fold_stat(&input, StatContext::default());
    ctx = ctx.with_war_power(stack.war_power_product(&input));

    if let Some((opponent, opponent_nation)) = defender {
        let opponent_input = StatInput {
            actor: opponent,
            battle_stat,
            opponent_unit: Some(attacker.unit),
            elapsed_years,
        };
        let opponent_stack = ModifierStack::for_general(opponent, opponent_nation, reg);
        ctx = opponent_stack.fold_opposing_stat(&opponent_input, ctx);
    }

    BattleStats {
        stat: attacker.stat(battle_stat) + ctx.stat_bonus,
        war_power: ctx.war_power,
        critical_chance: ctx.critical_chance,
    }
}
