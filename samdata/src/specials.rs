//! Personal specialty definition table.
//!
//! Same shape as a nation archetype but scoped to the individual general,
//! covering both combat and domestic hooks.

use crate::categories;
use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

const SPECIALS_JSON: &str = include_str!("../data/specials.json");

fn one() -> f32 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialDef {
    pub code: String,
    pub name: String,
    /// Category groups this specialty is better at.
    #[serde(default)]
    pub domestic: Vec<String>,
    /// Multiplier on own war power.
    #[serde(default = "one")]
    pub war_power: f32,
    /// Additive critical-hit chance.
    #[serde(default)]
    pub critical_bonus: f32,
    /// Multiplier applied to the opponent's war power (below 1.0 = debuff).
    #[serde(default = "one")]
    pub opposing_war_power: f32,
    /// Multiplier on strategic-command delay.
    #[serde(default = "one")]
    pub strategic_delay: f32,
    /// Battle stat name -> flat bonus.
    #[serde(default)]
    pub stat_bonus: HashMap<String, i32>,
}

/// Parse and validate the embedded specialty table.
pub fn load_specials() -> Result<Vec<SpecialDef>, DataError> {
    let defs: Vec<SpecialDef> = serde_json::from_str(SPECIALS_JSON)?;
    let mut codes: HashSet<&str> = HashSet::new();

    for def in &defs {
        if !codes.insert(&def.code) {
            return Err(DataError::DuplicateCode {
                kind: "special",
                code: def.code.clone(),
            });
        }
        for group in &def.domestic {
            if !categories::is_known_group(group) {
                return Err(DataError::UnknownGroup {
                    kind: "special",
                    code: def.code.clone(),
                    group: group.clone(),
                });
            }
        }
    }

    log::debug!("loaded {} specialty definitions", defs.len());
    Ok(defs)
}
