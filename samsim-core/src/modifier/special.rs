//! Personal-specialty modifiers.

use super::{
    ActionModifier, DomesticContext, StatContext, StatInput, StrategicContext,
};
use crate::fixed::Fixed;
use crate::state::GeneralStat;
use anyhow::bail;
use samdata::categories;
use samdata::defines::modifier as defines;
use samdata::specials::SpecialDef;

pub struct SpecialModifier {
    code: String,
    name: String,
    domestic: Vec<String>,
    war_power: Fixed,
    critical_bonus: Fixed,
    opposing_war_power: Fixed,
    strategic_delay: Fixed,
    /// `(stat, flat bonus)`, sorted by stat name from the table.
    stat_bonus: Vec<(GeneralStat, i64)>,
}

fn parse_stat(name: &str) -> anyhow::Result<GeneralStat> {
    Ok(match name {
        "leadership" => GeneralStat::Leadership,
        "strength" => GeneralStat::Strength,
        "intel" => GeneralStat::Intel,
        "politics" => GeneralStat::Politics,
        "charm" => GeneralStat::Charm,
        other => bail!("unknown stat name '{other}' in specialty table"),
    })
}

impl SpecialModifier {
    /// Convert a table row; rejects rows naming unknown stats so a bad
    /// table aborts startup instead of silently dropping bonuses.
    pub fn from_def(def: &SpecialDef) -> anyhow::Result<Self> {
        let mut names: Vec<&String> = def.stat_bonus.keys().collect();
        names.sort();
        let mut stat_bonus = Vec::with_capacity(names.len());
        for name in names {
            stat_bonus.push((parse_stat(name)?, def.stat_bonus[name] as i64));
        }

        Ok(SpecialModifier {
            code: def.code.clone(),
            name: def.name.clone(),
            domestic: def.domestic.clone(),
            war_power: Fixed::from_f32(def.war_power),
            critical_bonus: Fixed::from_f32(def.critical_bonus),
            opposing_war_power: Fixed::from_f32(def.opposing_war_power),
            strategic_delay: Fixed::from_f32(def.strategic_delay),
            stat_bonus,
        })
    }

    fn covers(&self, action: &str) -> bool {
        self.domestic
            .iter()
            .any(|g| categories::group_contains(g, action))
    }
}

impl ActionModifier for SpecialModifier {
    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn adjust_domestic(&self, action: &str, ctx: DomesticContext) -> DomesticContext {
        if self.covers(action) {
            ctx.with_score_multiplier(Fixed::from_raw(defines::BOOST))
                .with_cost_multiplier(Fixed::from_raw(defines::DISCOUNT))
        } else {
            ctx
        }
    }

    fn adjust_stat(&self, input: &StatInput<'_>, mut ctx: StatContext) -> StatContext {
        for (stat, bonus) in &self.stat_bonus {
            if *stat == input.battle_stat {
                ctx = ctx.with_stat_bonus(*bonus);
            }
        }
        ctx.with_critical_chance(self.critical_bonus)
    }

    fn adjust_opposing_stat(&self, _input: &StatInput<'_>, ctx: StatContext) -> StatContext {
        ctx.with_war_power(self.opposing_war_power)
    }

    fn war_power(&self, _input: &StatInput<'_>) -> Fixed {
        self.war_power
    }

    fn adjust_strategic(&self, action: &str, mut ctx: StrategicContext) -> StrategicContext {
        ctx = ctx.with_delay_multiplier(self.strategic_delay);
        if self.covers(action) {
            ctx = ctx.with_success_multiplier(Fixed::from_raw(defines::BOOST));
        }
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use samdata::specials::load_specials;

    fn special(code: &str) -> SpecialModifier {
        let defs = load_specials().unwrap();
        let def = defs.iter().find(|d| d.code == code).unwrap();
        SpecialModifier::from_def(def).unwrap()
    }

    #[test]
    fn test_domestic_specialty_boosts_its_category() {
        let husbandry = special("husbandry");
        let ctx = husbandry.adjust_domestic("agriculture", DomesticContext::default());
        assert_eq!(ctx.score_multiplier, Fixed::from_raw(defines::BOOST));
        let ctx = husbandry.adjust_domestic("security", DomesticContext::default());
        assert_eq!(ctx, DomesticContext::default());
    }

    #[test]
    fn test_duelist_combat_package() {
        let duelist = special("duelist");
        let g = testing::general();
        let input = StatInput {
            actor: &g,
            battle_stat: GeneralStat::Strength,
            opponent_unit: None,
            elapsed_years: 0,
        };
        let ctx = duelist.adjust_stat(&input, StatContext::default());
        assert_eq!(ctx.stat_bonus, 2);
        assert_eq!(ctx.critical_chance, Fixed::from_raw(500));
        assert_eq!(duelist.war_power(&input), Fixed::from_raw(11_000));
    }

    #[test]
    fn test_tactician_debuffs_opponent() {
        let tactician = special("tactician");
        let g = testing::general();
        let input = StatInput {
            actor: &g,
            battle_stat: GeneralStat::Leadership,
            opponent_unit: None,
            elapsed_years: 0,
        };
        let ctx = tactician.adjust_opposing_stat(&input, StatContext::default());
        assert_eq!(ctx.war_power, Fixed::from_raw(9_000));
    }

    #[test]
    fn test_infiltrator_speeds_covert_work() {
        let infiltrator = special("infiltrator");
        let ctx = infiltrator.adjust_strategic("sabotage", StrategicContext::default());
        assert_eq!(ctx.delay_multiplier, Fixed::from_raw(7_500));
        assert_eq!(ctx.success_multiplier, Fixed::from_raw(defines::BOOST));
    }

    #[test]
    fn test_unknown_stat_name_rejected() {
        let def: SpecialDef = serde_json::from_str(
            r#"{"code":"x","name":"X","stat_bonus":{"luck":5}}"#,
        )
        .unwrap();
        assert!(SpecialModifier::from_def(&def).is_err());
    }
}
