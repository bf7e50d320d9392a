//! Accumulator contexts threaded through modifier folds.
//!
//! Each context is a small immutable value; a modifier hook receives one
//! and returns an adjusted copy via the `with_*` builders. Defaults are
//! the identity (multipliers 1.0, additive terms 0), so a modifier that
//! ignores a hook changes nothing.

use crate::fixed::Fixed;

/// Accumulator for domestic-action adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomesticContext {
    pub score_multiplier: Fixed,
    pub cost_multiplier: Fixed,
    pub success_multiplier: Fixed,
}

impl Default for DomesticContext {
    fn default() -> Self {
        DomesticContext {
            score_multiplier: Fixed::ONE,
            cost_multiplier: Fixed::ONE,
            success_multiplier: Fixed::ONE,
        }
    }
}

impl DomesticContext {
    pub fn with_score_multiplier(self, m: Fixed) -> Self {
        DomesticContext {
            score_multiplier: self.score_multiplier.mul(m),
            ..self
        }
    }

    pub fn with_cost_multiplier(self, m: Fixed) -> Self {
        DomesticContext {
            cost_multiplier: self.cost_multiplier.mul(m),
            ..self
        }
    }

    pub fn with_success_multiplier(self, m: Fixed) -> Self {
        DomesticContext {
            success_multiplier: self.success_multiplier.mul(m),
            ..self
        }
    }
}

/// Accumulator for battle-stat adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatContext {
    /// Flat bonus added to the effective battle stat.
    pub stat_bonus: i64,
    /// Multiplicative war-power factor.
    pub war_power: Fixed,
    /// Additive critical-hit chance.
    pub critical_chance: Fixed,
}

impl Default for StatContext {
    fn default() -> Self {
        StatContext {
            stat_bonus: 0,
            war_power: Fixed::ONE,
            critical_chance: Fixed::ZERO,
        }
    }
}

impl StatContext {
    pub fn with_stat_bonus(self, bonus: i64) -> Self {
        StatContext {
            stat_bonus: self.stat_bonus + bonus,
            ..self
        }
    }

    pub fn with_war_power(self, m: Fixed) -> Self {
        StatContext {
            war_power: self.war_power.mul(m),
            ..self
        }
    }

    pub fn with_critical_chance(self, c: Fixed) -> Self {
        StatContext {
            critical_chance: self.critical_chance + c,
            ..self
        }
    }
}

/// Accumulator for strategic-command adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategicContext {
    pub delay_multiplier: Fixed,
    pub cost_multiplier: Fixed,
    pub success_multiplier: Fixed,
}

impl Default for StrategicContext {
    fn default() -> Self {
        StrategicContext {
            delay_multiplier: Fixed::ONE,
            cost_multiplier: Fixed::ONE,
            success_multiplier: Fixed::ONE,
        }
    }
}

impl StrategicContext {
    pub fn with_delay_multiplier(self, m: Fixed) -> Self {
        StrategicContext {
            delay_multiplier: self.delay_multiplier.mul(m),
            ..self
        }
    }

    pub fn with_cost_multiplier(self, m: Fixed) -> Self {
        StrategicContext {
            cost_multiplier: self.cost_multiplier.mul(m),
            ..self
        }
    }

    pub fn with_success_multiplier(self, m: Fixed) -> Self {
        StrategicContext {
            success_multiplier: self.success_multiplier.mul(m),
            ..self
        }
    }
}

/// Accumulator for national-income adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomeContext {
    pub gold_multiplier: Fixed,
    pub rice_multiplier: Fixed,
}

impl Default for IncomeContext {
    fn default() -> Self {
        IncomeContext {
            gold_multiplier: Fixed::ONE,
            rice_multiplier: Fixed::ONE,
        }
    }
}

impl IncomeContext {
    pub fn with_gold_multiplier(self, m: Fixed) -> Self {
        IncomeContext {
            gold_multiplier: self.gold_multiplier.mul(m),
            ..self
        }
    }

    pub fn with_rice_multiplier(self, m: Fixed) -> Self {
        IncomeContext {
            rice_multiplier: self.rice_multiplier.mul(m),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_identity() {
        let d = DomesticContext::default();
        assert_eq!(d.score_multiplier, Fixed::ONE);
        assert_eq!(d.cost_multiplier, Fixed::ONE);
        let s = StatContext::default();
        assert_eq!(s.stat_bonus, 0);
        assert_eq!(s.war_power, Fixed::ONE);
        assert_eq!(s.critical_chance, Fixed::ZERO);
    }

    #[test]
    fn test_multipliers_compose_multiplicatively() {
        let d = DomesticContext::default()
            .with_score_multiplier(Fixed::from_raw(12_000))
            .with_score_multiplier(Fixed::from_raw(12_000));
        assert_eq!(d.score_multiplier, Fixed::from_raw(14_400));
    }

    #[test]
    fn test_bonuses_compose_additively() {
        let s = StatContext::default().with_stat_bonus(2).with_stat_bonus(3);
        assert_eq!(s.stat_bonus, 5);
    }
}
