//! Nation-archetype modifiers.
//!
//! An archetype biases whole action categories (boosted categories score
//! higher and cost less, weakened the inverse) and scales the nation's
//! revenue streams.

use super::{
    ActionModifier, DomesticContext, IncomeContext, IncomeSource, StrategicContext,
};
use crate::fixed::Fixed;
use samdata::categories;
use samdata::defines::modifier as defines;
use samdata::nation_types::NationTypeDef;

pub struct NationTypeModifier {
    code: String,
    name: String,
    boosted: Vec<String>,
    weakened: Vec<String>,
    gold_income: Fixed,
    rice_income: Fixed,
}

impl NationTypeModifier {
    pub fn from_def(def: &NationTypeDef) -> Self {
        NationTypeModifier {
            code: def.code.clone(),
            name: def.name.clone(),
            boosted: def.boosted.clone(),
            weakened: def.weakened.clone(),
            gold_income: Fixed::from_f32(def.gold_income),
            rice_income: Fixed::from_f32(def.rice_income),
        }
    }

    fn boosts(&self, action: &str) -> bool {
        self.boosted
            .iter()
            .any(|g| categories::group_contains(g, action))
    }

    fn weakens(&self, action: &str) -> bool {
        self.weakened
            .iter()
            .any(|g| categories::group_contains(g, action))
    }
}

impl ActionModifier for NationTypeModifier {
    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn adjust_domestic(&self, action: &str, mut ctx: DomesticContext) -> DomesticContext {
        if self.boosts(action) {
            ctx = ctx
                .with_score_multiplier(Fixed::from_raw(defines::BOOST))
                .with_cost_multiplier(Fixed::from_raw(defines::DISCOUNT));
        }
        if self.weakens(action) {
            ctx = ctx
                .with_score_multiplier(Fixed::from_raw(defines::PENALTY))
                .with_cost_multiplier(Fixed::from_raw(defines::SURCHARGE));
        }
        ctx
    }

    fn adjust_strategic(&self, action: &str, mut ctx: StrategicContext) -> StrategicContext {
        if self.boosts(action) {
            ctx = ctx
                .with_success_multiplier(Fixed::from_raw(defines::BOOST))
                .with_cost_multiplier(Fixed::from_raw(defines::DISCOUNT));
        }
        if self.weakens(action) {
            ctx = ctx
                .with_success_multiplier(Fixed::from_raw(defines::PENALTY))
                .with_cost_multiplier(Fixed::from_raw(defines::SURCHARGE));
        }
        ctx
    }

    fn adjust_income(&self, source: IncomeSource, ctx: IncomeContext) -> IncomeContext {
        match source {
            IncomeSource::Commerce => ctx.with_gold_multiplier(self.gold_income),
            IncomeSource::Farming => ctx.with_rice_multiplier(self.rice_income),
        }
    }
}
