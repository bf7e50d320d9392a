//! Item-backed modifiers.
//!
//! Equipment (weapon/book/horse) contributes a grade-scaled flat bonus to
//! the matching battle stat. Misc items carry per-category domestic
//! multipliers, strategic-delay multipliers, and optionally a trigger
//! with a non-linear war-power curve.

use super::{
    ActionModifier, DomesticContext, StatContext, StatInput, StrategicContext,
};
use crate::fixed::Fixed;
use crate::state::GeneralStat;
use samdata::categories;
use samdata::defines::{equipment, modifier as defines};
use samdata::items::{ItemDef, ItemSlot, TriggerKind};

pub struct ItemModifier {
    code: String,
    name: String,
    slot: ItemSlot,
    grade: u8,
    /// `(group, score multiplier)`, sorted by group for a stable fold.
    domestic: Vec<(String, Fixed)>,
    strategic_delay: Option<Fixed>,
    /// Plain war-power multiplier, or the trigger's scaling coefficient.
    war_power: Option<Fixed>,
    trigger: Option<TriggerKind>,
}

impl ItemModifier {
    /// Convert a table row. This is the only place item floats cross
    /// into fixed-point.
    pub fn from_def(def: &ItemDef) -> Self {
        let mut domestic: Vec<(String, Fixed)> = def
            .domestic
            .iter()
            .map(|(group, mult)| (group.clone(), Fixed::from_f32(*mult)))
            .collect();
        domestic.sort_by(|a, b| a.0.cmp(&b.0));

        ItemModifier {
            code: def.code.clone(),
            name: def.name.clone(),
            slot: def.slot,
            grade: def.grade,
            domestic,
            strategic_delay: def.strategic_delay.map(Fixed::from_f32),
            war_power: def.war_power.map(Fixed::from_f32),
            trigger: def.trigger,
        }
    }

    /// The battle stat this slot strengthens, if any.
    fn boosted_stat(&self) -> Option<GeneralStat> {
        match self.slot {
            ItemSlot::Weapon => Some(GeneralStat::Strength),
            ItemSlot::Book => Some(GeneralStat::Intel),
            ItemSlot::Horse => Some(GeneralStat::Leadership),
            ItemSlot::Misc => None,
        }
    }
}

impl ActionModifier for ItemModifier {
    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn adjust_domestic(&self, action: &str, mut ctx: DomesticContext) -> DomesticContext {
        for (group, mult) in &self.domestic {
            if categories::group_contains(group, action) {
                ctx = ctx.with_score_multiplier(*mult);
            }
        }
        ctx
    }

    fn adjust_stat(&self, input: &StatInput<'_>, ctx: StatContext) -> StatContext {
        match self.boosted_stat() {
            Some(stat) if stat == input.battle_stat => {
                ctx.with_stat_bonus(self.grade as i64 * equipment::STAT_PER_GRADE)
            }
            _ => ctx,
        }
    }

    fn war_power(&self, input: &StatInput<'_>) -> Fixed {
        let Some(coeff) = self.war_power else {
            return Fixed::ONE;
        };
        match self.trigger {
            // Untriggered war power is a flat multiplier.
            None => coeff,
            Some(TriggerKind::VeteranYears) => {
                let years = (input.elapsed_years as i64).min(defines::VETERAN_CAP_YEARS);
                Fixed::ONE + coeff.mul_int(years)
            }
            Some(TriggerKind::TypeAdvantage) => match input.opponent_unit {
                Some(op) if input.actor.unit.has_advantage_over(op) => coeff,
                _ => Fixed::ONE,
            },
            Some(TriggerKind::WoundedFury) => {
                let missing = Fixed::ONE - input.actor.health_ratio();
                let scaled = missing.div(Fixed::from_raw(defines::FURY_HEALTH_PIVOT));
                Fixed::ONE + coeff.mul(scaled)
            }
        }
    }

    fn adjust_strategic(&self, _action: &str, ctx: StrategicContext) -> StrategicContext {
        match self.strategic_delay {
            Some(delay) => ctx.with_delay_multiplier(delay),
            None => ctx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::UnitKind;
    use crate::testing;
    use samdata::items::load_items;

    fn item(code: &str) -> ItemModifier {
        let defs = load_items().unwrap();
        let def = defs.iter().find(|d| d.code == code).unwrap();
        ItemModifier::from_def(def)
    }

    fn input<'a>(
        actor: &'a crate::state::General,
        stat: GeneralStat,
        opponent: Option<UnitKind>,
        years: u32,
    ) -> StatInput<'a> {
        StatInput {
            actor,
            battle_stat: stat,
            opponent_unit: opponent,
            elapsed_years: years,
        }
    }

    #[test]
    fn test_weapon_boosts_strength_only() {
        let blade = item("seven_star_blade"); // grade 6 weapon
        let g = testing::general();
        let ctx = blade.adjust_stat(
            &input(&g, GeneralStat::Strength, None, 0),
            StatContext::default(),
        );
        assert_eq!(ctx.stat_bonus, 6);
        let ctx = blade.adjust_stat(
            &input(&g, GeneralStat::Intel, None, 0),
            StatContext::default(),
        );
        assert_eq!(ctx.stat_bonus, 0);
    }

    #[test]
    fn test_misc_item_boosts_its_category() {
        let almanac = item("farmers_almanac");
        let ctx = almanac.adjust_domestic("agriculture", DomesticContext::default());
        assert_eq!(ctx.score_multiplier, Fixed::from_raw(11_500));
        let ctx = almanac.adjust_domestic("commerce", DomesticContext::default());
        assert_eq!(ctx.score_multiplier, Fixed::ONE);
    }

    #[test]
    fn test_veteran_years_trigger_caps() {
        let banner = item("veteran_banner"); // 0.01 per year, cap 20
        let g = testing::general();
        let wp = banner.war_power(&input(&g, GeneralStat::Strength, None, 10));
        assert_eq!(wp, Fixed::from_raw(11_000));
        let capped = banner.war_power(&input(&g, GeneralStat::Strength, None, 50));
        assert_eq!(capped, Fixed::from_raw(12_000));
    }

    #[test]
    fn test_type_advantage_trigger() {
        let halberd = item("hooked_halberd"); // 1.3 vs disadvantaged unit
        let mut g = testing::general();
        g.unit = UnitKind::Cavalry;
        let wp = halberd.war_power(&input(
            &g,
            GeneralStat::Strength,
            Some(UnitKind::Footman),
            0,
        ));
        assert_eq!(wp, Fixed::from_raw(13_000));
        let wp = halberd.war_power(&input(
            &g,
            GeneralStat::Strength,
            Some(UnitKind::Archer),
            0,
        ));
        assert_eq!(wp, Fixed::ONE);
        let wp = halberd.war_power(&input(&g, GeneralStat::Strength, None, 0));
        assert_eq!(wp, Fixed::ONE);
    }

    #[test]
    fn test_wounded_fury_scales_with_missing_health() {
        let charm = item("blood_oath_charm"); // coefficient 0.5
        let mut g = testing::general();
        let wp = charm.war_power(&input(&g, GeneralStat::Strength, None, 0));
        assert_eq!(wp, Fixed::ONE);
        g.injury = 80; // health 0.2, missing 0.8
        let wp = charm.war_power(&input(&g, GeneralStat::Strength, None, 0));
        assert_eq!(wp, Fixed::from_raw(14_000));
    }

    #[test]
    fn test_strategic_delay_item() {
        let maps = item("campaign_maps"); // 0.8 delay
        let ctx = maps.adjust_strategic("sabotage", StrategicContext::default());
        assert_eq!(ctx.delay_multiplier, Fixed::from_raw(8_000));
    }
}
