//! National revenue computation.

use crate::fixed::Fixed;
use crate::modifier::{IncomeContext, IncomeSource, ModifierStack};
use crate::registry::Registries;
use crate::state::{City, Nation};
use samdata::defines::domestic;
use tracing::instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NationIncome {
    pub gold: i64,
    pub rice: i64,
}

/// Base revenue of one city: markets yield gold, fields yield rice,
/// both scaled by how much the populace trusts its governor.
pub fn city_revenue(city: &City) -> NationIncome {
    let trust_scale = city.trust.div(Fixed::from_int(domestic::TRUST_MAX));
    NationIncome {
        gold: Fixed::from_int(city.commerce.value())
            .mul(trust_scale)
            .to_int(),
        rice: Fixed::from_int(city.agriculture.value())
            .mul(trust_scale)
            .to_int(),
    }
}

/// Sum the revenue of a nation's cities and fold the archetype's income
/// multipliers over the totals.
#[instrument(skip_all, name = "nation_income")]
pub fn nation_income<'a>(
    nation: &Nation,
    cities: impl IntoIterator<Item = &'a City>,
    reg: &Registries,
) -> NationIncome {
    let mut base = NationIncome::default();
    for city in cities {
        if city.nation != nation.id {
            continue;
        }
        let revenue = city_revenue(city);
        base.gold += revenue.gold;
        base.rice += revenue.rice;
    }

    let stack = ModifierStack::for_nation(nation, reg);
    let gold_ctx = stack.fold_income(IncomeSource::Commerce, IncomeContext::default());
    let rice_ctx = stack.fold_income(IncomeSource::Farming, IncomeContext::default());

    NationIncome {
        gold: Fixed::from_int(base.gold)
            .mul(gold_ctx.gold_multiplier)
            .to_int(),
        rice: Fixed::from_int(base.rice)
            .mul(rice_ctx.rice_multiplier)
            .to_int(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Capped;
    use crate::testing;

    fn revenue_city(commerce: i64, agriculture: i64, trust: i64) -> City {
        testing::city_with(|c| {
            c.commerce = Capped::new(commerce, 1_000);
            c.agriculture = Capped::new(agriculture, 1_000);
            c.trust = Fixed::from_int(trust);
        })
    }

    #[test]
    fn test_city_revenue_scales_with_trust() {
        let city = revenue_city(400, 600, 50);
        let revenue = city_revenue(&city);
        assert_eq!(revenue.gold, 200);
        assert_eq!(revenue.rice, 300);
    }

    #[test]
    fn test_nation_income_sums_own_cities_only() {
        let reg = testing::registries();
        let nation = testing::nation();
        let own = revenue_city(400, 600, 100);
        let foreign = testing::city_with(|c| {
            c.nation = 9;
            c.commerce = Capped::new(900, 1_000);
        });
        let income = nation_income(&nation, [&own, &foreign], &reg);
        assert_eq!(income.gold, 400);
        assert_eq!(income.rice, 600);
    }

    #[test]
    fn test_archetype_income_multiplier() {
        let reg = testing::registries();
        let nation = testing::nation_with(|n| n.archetype = "agrarian".to_string());
        let city = revenue_city(400, 600, 100);
        let income = nation_income(&nation, [&city], &reg);
        assert_eq!(income.gold, 400);
        assert_eq!(income.rice, 750); // 600 * 1.25
    }
}
