//! Entity state snapshots: generals, cities, nations, relations.
//!
//! These are the immutable inputs to constraint evaluation and command
//! execution. Commands never mutate them; the turn driver applies the
//! structured effects a command emits.

use crate::fixed::Fixed;
use samdata::defines::{domestic, military};
use serde::{Deserialize, Serialize};

pub type GeneralId = u32;
pub type CityId = u32;
pub type NationId = u32;

/// Nation id of the wilderness / an unaffiliated general.
pub const NO_NATION: NationId = 0;

/// The five personal stats a general carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneralStat {
    Leadership,
    Strength,
    Intel,
    Politics,
    Charm,
}

/// Troop category a general commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Footman,
    Archer,
    Cavalry,
}

impl UnitKind {
    /// The category this one is strong against (footman > archer >
    /// cavalry > footman).
    pub fn prey(self) -> UnitKind {
        match self {
            UnitKind::Footman => UnitKind::Archer,
            UnitKind::Archer => UnitKind::Cavalry,
            UnitKind::Cavalry => UnitKind::Footman,
        }
    }

    pub fn has_advantage_over(self, other: UnitKind) -> bool {
        self.prey() == other
    }
}

/// An integer value pinned to `0..=max`.
///
/// City stats use this so capacity clamping is a property of the value,
/// not a convention each command reimplements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capped {
    value: i64,
    max: i64,
}

impl Capped {
    pub fn new(value: i64, max: i64) -> Self {
        let max = max.max(0);
        Capped {
            value: value.clamp(0, max),
            max,
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn headroom(&self) -> i64 {
        self.max - self.value
    }

    pub fn has_headroom(&self) -> bool {
        self.value < self.max
    }

    /// The portion of `amount` that actually fits under the cap.
    pub fn clamped_gain(&self, amount: i64) -> i64 {
        (self.value + amount).clamp(0, self.max) - self.value
    }
}

/// A general: the acting unit of every command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct General {
    pub id: GeneralId,
    pub name: String,
    pub nation: NationId,
    pub city: CityId,
    /// Seniority; a general whose rank reaches the nation's `top_rank`
    /// is its leader.
    pub rank: u8,
    pub gold: i64,
    pub rice: i64,
    pub leadership: i64,
    pub strength: i64,
    pub intel: i64,
    pub politics: i64,
    pub charm: i64,
    pub experience: i64,
    pub dedication: i64,
    pub crew: i64,
    pub train: i64,
    pub morale: i64,
    /// Accumulated injury, `0..=INJURY_MAX`. Health is `100 - injury`.
    pub injury: i64,
    pub unit: UnitKind,
    /// Item codes carried, in acquisition order.
    pub items: Vec<String>,
    /// Specialty codes, in acquisition order.
    pub specials: Vec<String>,
}

impl General {
    pub fn stat(&self, which: GeneralStat) -> i64 {
        match which {
            GeneralStat::Leadership => self.leadership,
            GeneralStat::Strength => self.strength,
            GeneralStat::Intel => self.intel,
            GeneralStat::Politics => self.politics,
            GeneralStat::Charm => self.charm,
        }
    }

    /// Largest crew this general can lead.
    pub fn crew_cap(&self) -> i64 {
        self.leadership * military::CREW_PER_LEADERSHIP
    }

    pub fn has_nation(&self) -> bool {
        self.nation != NO_NATION
    }

    /// Remaining health as a unit-interval fraction.
    pub fn health_ratio(&self) -> Fixed {
        Fixed::ratio(100 - self.injury.clamp(0, military::INJURY_MAX), 100)
    }
}

/// Strategic posture of a city relative to the war map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontState {
    #[default]
    Rear,
    Border,
    Front,
}

/// The developable stats of a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CityStatKind {
    Population,
    Agriculture,
    Commerce,
    Security,
    Defense,
    Wall,
    Tech,
    Trust,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub nation: NationId,
    pub population: Capped,
    pub agriculture: Capped,
    pub commerce: Capped,
    pub security: Capped,
    pub defense: Capped,
    pub wall: Capped,
    pub tech: Capped,
    /// Public trust, `0..=100`, carried at fixed-point precision because
    /// domestic work raises it in 0.1 steps.
    pub trust: Fixed,
    pub supply: bool,
    pub front: FrontState,
    pub capital: bool,
}

impl City {
    /// Current whole-unit value of a stat (trust is floored).
    pub fn stat_value(&self, kind: CityStatKind) -> i64 {
        match kind {
            CityStatKind::Population => self.population.value(),
            CityStatKind::Agriculture => self.agriculture.value(),
            CityStatKind::Commerce => self.commerce.value(),
            CityStatKind::Security => self.security.value(),
            CityStatKind::Defense => self.defense.value(),
            CityStatKind::Wall => self.wall.value(),
            CityStatKind::Tech => self.tech.value(),
            CityStatKind::Trust => self.trust.to_int(),
        }
    }

    pub fn stat_max(&self, kind: CityStatKind) -> i64 {
        match kind {
            CityStatKind::Population => self.population.max(),
            CityStatKind::Agriculture => self.agriculture.max(),
            CityStatKind::Commerce => self.commerce.max(),
            CityStatKind::Security => self.security.max(),
            CityStatKind::Defense => self.defense.max(),
            CityStatKind::Wall => self.wall.max(),
            CityStatKind::Tech => self.tech.max(),
            CityStatKind::Trust => domestic::TRUST_MAX,
        }
    }

    pub fn stat_has_headroom(&self, kind: CityStatKind) -> bool {
        match kind {
            CityStatKind::Trust => self.trust < Fixed::from_int(domestic::TRUST_MAX),
            _ => self.stat_value(kind) < self.stat_max(kind),
        }
    }

    pub fn is_front(&self) -> bool {
        self.front == FrontState::Front
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nation {
    pub id: NationId,
    pub name: String,
    pub gold: i64,
    pub rice: i64,
    /// Archetype code resolved against the nation-type registry.
    pub archetype: String,
    pub capital: CityId,
    /// Rank a general must hold to count as this nation's leader.
    pub top_rank: u8,
}

/// Standing between two nations. Ordering of the pair is normalized by
/// the environment snapshot, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationState {
    War,
    Ceasefire,
    Neutral,
    NonAggression,
    Alliance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub state: RelationState,
    /// Turn the current state was entered.
    pub since_turn: u32,
}
