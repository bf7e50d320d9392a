//! Game mechanic constants (defines).
//!
//! Ratio-valued constants are expressed in fixed-point myriads
//! (10_000 = 1.0), matching the simulation core's scalar scale, so that no
//! float ever enters effect arithmetic.

/// Domestic-action constants (develop a city stat with a general's stat).
pub mod domestic {
    /// Trust below this is floored for score computation only
    pub const TRUST_FLOOR: i64 = 50;

    /// Trust ceiling (city trust is 0..=100)
    pub const TRUST_MAX: i64 = 100;

    /// Lower bound of the score jitter draw (0.8)
    pub const JITTER_LO: i64 = 8_000;

    /// Upper bound of the score jitter draw (1.2)
    pub const JITTER_HI: i64 = 12_000;

    /// Base success ratio before trust scaling (0.1)
    pub const SUCCESS_BASE: i64 = 1_000;

    /// Trust value at which the success ratio equals SUCCESS_BASE
    pub const SUCCESS_TRUST_PIVOT: i64 = 80;

    /// Cap on the failure ratio (0.1)
    pub const FAIL_CAP: i64 = 1_000;

    /// Score multiplier on a failed outcome (0.5)
    pub const FAIL_MULT: i64 = 5_000;

    /// Score multiplier on a critical-success outcome (1.5)
    pub const SUCCESS_MULT: i64 = 15_000;

    /// Experience reward as a fraction of the pre-clamp score (0.7)
    pub const EXP_RATIO: i64 = 7_000;

    /// Dedication reward as a fraction of the pre-clamp score (1.0)
    pub const DEDICATION_RATIO: i64 = 10_000;

    /// Front-line debuff for wall and defense work (0.25)
    pub const FRONT_DEBUFF_HEAVY: i64 = 2_500;

    /// Front-line debuff for farming, trade and scholarship (0.5)
    pub const FRONT_DEBUFF_LIGHT: i64 = 5_000;

    /// No front-line debuff (security work is never debuffed)
    pub const FRONT_DEBUFF_NONE: i64 = 10_000;

    /// Population gained per point of domestic score
    pub const POP_SCALE: i64 = 100;

    /// Trust gained per 10 points of domestic score (0.1 per point)
    pub const TRUST_SCALE: i64 = 1_000;
}

/// Modifier-composition constants.
pub mod modifier {
    /// Category boost applied to the score multiplier (1.2)
    pub const BOOST: i64 = 12_000;

    /// Category discount applied to the cost multiplier (0.8)
    pub const DISCOUNT: i64 = 8_000;

    /// Inverse penalty for weakened categories (0.8 score, 1.2 cost)
    pub const PENALTY: i64 = 8_000;
    pub const SURCHARGE: i64 = 12_000;

    /// Veteran-years trigger: years after which the bonus stops growing
    pub const VETERAN_CAP_YEARS: i64 = 20;

    /// Wounded-fury trigger: full bonus is reached at zero remaining health
    pub const FURY_HEALTH_PIVOT: i64 = 10_000;
}

/// Equipment constants.
pub mod equipment {
    /// Lowest and highest forgeable grade
    pub const GRADE_MIN: u8 = 1;
    pub const GRADE_MAX: u8 = 9;

    /// Flat stat bonus per grade point
    pub const STAT_PER_GRADE: i64 = 1;
}

/// Military-command constants.
pub mod military {
    /// Gold cost per soldier recruited, in myriads (0.1 gold per head)
    pub const RECRUIT_GOLD_PER_HEAD: i64 = 1_000;

    /// Rice cost per soldier recruited, in myriads (0.05 rice per head)
    pub const RECRUIT_RICE_PER_HEAD: i64 = 500;

    /// Crew capacity per point of leadership
    pub const CREW_PER_LEADERSHIP: i64 = 100;

    /// Drill levels fresh recruits start at
    pub const TRAIN_BASE: i64 = 30;
    pub const MORALE_BASE: i64 = 50;

    /// Injury ceiling; a general never drops below 20% health
    pub const INJURY_MAX: i64 = 80;
}

/// Diplomatic-command constants.
pub mod diplomacy {
    /// Gold a nation pays to float a non-aggression proposal
    pub const PROPOSAL_GOLD: i64 = 1_000;

    /// Turns a fresh relation must stand before it can be renegotiated
    pub const MIN_STANDING_TURNS: i64 = 12;
}

/// Strategic-command constants.
pub mod strategic {
    /// Base chance for a sabotage attempt to slip past the watch (0.4)
    pub const SABOTAGE_BASE_CHANCE: i64 = 4_000;

    /// Per-intel-point swing on the sabotage chance (0.002)
    pub const SABOTAGE_INTEL_STEP: i64 = 20;

    /// Fraction of a city stat torn down by a successful sabotage (0.15)
    pub const SABOTAGE_DAMAGE_RATIO: i64 = 1_500;
}
