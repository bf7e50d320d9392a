//! Builders and doubles for tests.
//!
//! Defaults are deliberately plain: a mid-rank general with even stats,
//! a rear-area city with room to grow, a balanced nation. Tests mutate
//! only what they exercise.

use crate::context::{ConstraintContext, EnvSnapshot};
use crate::fixed::Fixed;
use crate::registry::Registries;
use crate::rng::RollSource;
use crate::state::{Capped, City, FrontState, General, Nation, UnitKind};

pub fn general() -> General {
    General {
        id: 1,
        name: "Zhao Lin".to_string(),
        nation: 1,
        city: 1,
        rank: 5,
        gold: 100,
        rice: 100,
        leadership: 50,
        strength: 50,
        intel: 50,
        politics: 50,
        charm: 50,
        experience: 0,
        dedication: 0,
        crew: 0,
        train: 0,
        morale: 0,
        injury: 0,
        unit: UnitKind::Footman,
        items: Vec::new(),
        specials: Vec::new(),
    }
}

pub fn general_with(mutate: impl FnOnce(&mut General)) -> General {
    let mut g = general();
    mutate(&mut g);
    g
}

pub fn city() -> City {
    City {
        id: 1,
        name: "Wan".to_string(),
        nation: 1,
        population: Capped::new(5_000, 10_000),
        agriculture: Capped::new(300, 1_000),
        commerce: Capped::new(300, 1_000),
        security: Capped::new(400, 1_000),
        defense: Capped::new(300, 1_000),
        wall: Capped::new(500, 1_000),
        tech: Capped::new(100, 1_000),
        trust: Fixed::from_int(60),
        supply: true,
        front: FrontState::Rear,
        capital: false,
    }
}

pub fn city_with(mutate: impl FnOnce(&mut City)) -> City {
    let mut c = city();
    mutate(&mut c);
    c
}

pub fn nation() -> Nation {
    Nation {
        id: 1,
        name: "Shu".to_string(),
        gold: 1_000,
        rice: 1_000,
        archetype: "balanced".to_string(),
        capital: 1,
        top_rank: 12,
    }
}

pub fn nation_with(mutate: impl FnOnce(&mut Nation)) -> Nation {
    let mut n = nation();
    mutate(&mut n);
    n
}

/// A context with the default actor standing in their own city, no
/// targets resolved, and a minimal one-city map.
pub fn context() -> ConstraintContext {
    let mut env = EnvSnapshot {
        current_turn: 1,
        elapsed_years: 0,
        ..Default::default()
    };
    env.owners.insert(1, 1);

    ConstraintContext {
        actor: general(),
        location: Some(city()),
        affiliation: Some(nation()),
        target_actor: None,
        target_location: None,
        target_affiliation: None,
        env,
    }
}

pub fn registries() -> Registries {
    Registries::load_default().expect("embedded tables must build")
}

/// Roll source that replays a fixed script; draws past the end of the
/// script return 0.5.
pub struct ScriptedRolls {
    rolls: Vec<Fixed>,
    next: usize,
}

impl ScriptedRolls {
    pub fn new(rolls: &[Fixed]) -> Self {
        ScriptedRolls {
            rolls: rolls.to_vec(),
            next: 0,
        }
    }
}

impl RollSource for ScriptedRolls {
    fn unit(&mut self) -> Fixed {
        let value = self.rolls.get(self.next).copied().unwrap_or(Fixed::HALF);
        self.next += 1;
        value
    }
}
