//! Passive effect hooks layered onto command execution.
//!
//! An [`ActionModifier`] is one passive influence (an item, a personal
//! specialty, a nation archetype). Every hook defaults to the identity,
//! so a modifier only overrides the hooks it cares about. A
//! [`ModifierStack`] assembles the influences bearing on one actor in a
//! fixed composition order and folds a context through them.

mod context;
mod item;
mod nation_type;
mod special;

pub use context::{DomesticContext, IncomeContext, StatContext, StrategicContext};
pub use item::ItemModifier;
pub use nation_type::NationTypeModifier;
pub use special::SpecialModifier;

use crate::fixed::Fixed;
use crate::registry::Registries;
use crate::state::{General, GeneralStat, Nation, UnitKind};

/// Which revenue stream an income hook is adjusting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeSource {
    Commerce,
    Farming,
}

/// Inputs to the battle-stat hooks.
pub struct StatInput<'a> {
    pub actor: &'a General,
    /// Which personal stat the engagement runs on.
    pub battle_stat: GeneralStat,
    pub opponent_unit: Option<UnitKind>,
    pub elapsed_years: u32,
}

/// One passive influence. All hooks default to the identity.
pub trait ActionModifier {
    fn code(&self) -> &str;
    fn name(&self) -> &str;

    /// Adjust a domestic action, identified by its stable label.
    fn adjust_domestic(&self, action: &str, ctx: DomesticContext) -> DomesticContext {
        let _ = action;
        ctx
    }

    /// Adjust the bearer's own battle stats.
    fn adjust_stat(&self, input: &StatInput<'_>, ctx: StatContext) -> StatContext {
        let _ = input;
        ctx
    }

    /// Adjust an *opponent's* battle stats (debuffs). `input` describes
    /// the bearer, `ctx` accumulates for the opponent.
    fn adjust_opposing_stat(&self, input: &StatInput<'_>, ctx: StatContext) -> StatContext {
        let _ = input;
        ctx
    }

    /// Multiplicative war-power contribution, possibly conditional on the
    /// engagement described by `input`.
    fn war_power(&self, input: &StatInput<'_>) -> Fixed {
        let _ = input;
        Fixed::ONE
    }

    /// Adjust a strategic command, identified by its stable label.
    fn adjust_strategic(&self, action: &str, ctx: StrategicContext) -> StrategicContext {
        let _ = action;
        ctx
    }

    /// Adjust a national revenue stream.
    fn adjust_income(&self, source: IncomeSource, ctx: IncomeContext) -> IncomeContext {
        let _ = source;
        ctx
    }
}

/// The modifiers bearing on one computation, in composition order:
/// carried items first, then personal specialties, then the nation
/// archetype. The order is part of the engine contract; folds are kept
/// commutative-safe regardless (products and sums only).
pub struct ModifierStack<'a> {
    layers: Vec<&'a dyn ActionModifier>,
}

impl<'a> ModifierStack<'a> {
    /// Stack for a general acting under an (optional) nation.
    ///
    /// Codes that no longer resolve against a registry are skipped with a
    /// warning; stale state must not abort a turn.
    pub fn for_general(
        general: &General,
        nation: Option<&Nation>,
        reg: &'a Registries,
    ) -> Self {
        let mut layers: Vec<&'a dyn ActionModifier> = Vec::new();

        for code in &general.items {
            match reg.items.get(code) {
                Some(item) => layers.push(item),
                None => log::warn!("{} carries unknown item '{code}'", general.name),
            }
        }
        for code in &general.specials {
            match reg.specials.get(code) {
                Some(special) => layers.push(special),
                None => log::warn!("{} has unknown specialty '{code}'", general.name),
            }
        }
        if let Some(nation) = nation {
            match reg.nation_types.get(&nation.archetype) {
                Some(archetype) => layers.push(archetype),
                None => log::warn!(
                    "nation {} has unknown archetype '{}'",
                    nation.name,
                    nation.archetype
                ),
            }
        }

        ModifierStack { layers }
    }

    /// Stack holding only a nation's archetype (income folds).
    pub fn for_nation(nation: &Nation, reg: &'a Registries) -> Self {
        let mut layers: Vec<&'a dyn ActionModifier> = Vec::new();
        match reg.nation_types.get(&nation.archetype) {
            Some(archetype) => layers.push(archetype),
            None => log::warn!(
                "nation {} has unknown archetype '{}'",
                nation.name,
                nation.archetype
            ),
        }
        ModifierStack { layers }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn fold_domestic(&self, action: &str, mut ctx: DomesticContext) -> DomesticContext {
        for layer in &self.layers {
            ctx = layer.adjust_domestic(action, ctx);
        }
        ctx
    }

    pub fn fold_stat(&self, input: &StatInput<'_>, mut ctx: StatContext) -> StatContext {
        for layer in &self.layers {
            ctx = layer.adjust_stat(input, ctx);
        }
        ctx
    }

    pub fn fold_opposing_stat(&self, input: &StatInput<'_>, mut ctx: StatContext) -> StatContext {
        for layer in &self.layers {
            ctx = layer.adjust_opposing_stat(input, ctx);
        }
        ctx
    }

    /// Product of every layer's war-power contribution.
    pub fn war_power_product(&self, input: &StatInput<'_>) -> Fixed {
        self.layers
            .iter()
            .fold(Fixed::ONE, |acc, layer| acc.mul(layer.war_power(input)))
    }

    pub fn fold_strategic(&self, action: &str, mut ctx: StrategicContext) -> StrategicContext {
        for layer in &self.layers {
            ctx = layer.adjust_strategic(action, ctx);
        }
        ctx
    }

    pub fn fold_income(&self, source: IncomeSource, mut ctx: IncomeContext) -> IncomeContext {
        for layer in &self.layers {
            ctx = layer.adjust_income(source, ctx);
        }
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    struct Doubler;

    impl ActionModifier for Doubler {
        fn code(&self) -> &str {
            "doubler"
        }
        fn name(&self) -> &str {
            "Doubler"
        }
        fn adjust_domestic(&self, _action: &str, ctx: DomesticContext) -> DomesticContext {
            ctx.with_score_multiplier(Fixed::from_int(2))
        }
    }

    struct Inert;

    impl ActionModifier for Inert {
        fn code(&self) -> &str {
            "inert"
        }
        fn name(&self) -> &str {
            "Inert"
        }
    }

    #[test]
    fn test_identity_defaults() {
        let inert = Inert;
        let ctx = inert.adjust_domestic("agriculture", DomesticContext::default());
        assert_eq!(ctx, DomesticContext::default());
        let g = testing::general();
        let input = StatInput {
            actor: &g,
            battle_stat: GeneralStat::Strength,
            opponent_unit: None,
            elapsed_years: 0,
        };
        assert_eq!(inert.war_power(&input), Fixed::ONE);
        assert_eq!(
            inert.adjust_stat(&input, StatContext::default()),
            StatContext::default()
        );
    }

    #[test]
    fn test_fold_applies_each_layer() {
        let a = Doubler;
        let b = Doubler;
        let stack = ModifierStack {
            layers: vec![&a, &b],
        };
        let ctx = stack.fold_domestic("agriculture", DomesticContext::default());
        assert_eq!(ctx.score_multiplier, Fixed::from_int(4));
    }

    #[test]
    fn test_stack_order_items_specials_archetype() {
        let reg = testing::registries();
        let mut g = testing::general();
        g.items = vec!["farmers_almanac".to_string()];
        g.specials = vec!["husbandry".to_string()];
        let nation = testing::nation();
        let stack = ModifierStack::for_general(&g, Some(&nation), &reg);
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.layers[0].code(), "farmers_almanac");
        assert_eq!(stack.layers[1].code(), "husbandry");
        assert_eq!(stack.layers[2].code(), nation.archetype.as_str());
    }

    #[test]
    fn test_unknown_codes_are_skipped() {
        let reg = testing::registries();
        let mut g = testing::general();
        g.items = vec!["excalibur".to_string()];
        let stack = ModifierStack::for_general(&g, None, &reg);
        assert!(stack.is_empty());
    }
}
