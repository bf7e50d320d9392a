//! Nation-archetype definition table.
//!
//! One entry per nation "type" code. An archetype biases which domestic
//! action categories are cheaper or more effective and which income streams
//! are amplified.

use crate::categories;
use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const NATION_TYPES_JSON: &str = include_str!("../data/nation_types.json");

fn one() -> f32 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NationTypeDef {
    pub code: String,
    pub name: String,
    /// Category groups this archetype is better at.
    #[serde(default)]
    pub boosted: Vec<String>,
    /// Category groups this archetype is worse at.
    #[serde(default)]
    pub weakened: Vec<String>,
    /// Multiplier on gold income streams.
    #[serde(default = "one")]
    pub gold_income: f32,
    /// Multiplier on rice income streams.
    #[serde(default = "one")]
    pub rice_income: f32,
}

/// Parse and validate the embedded nation-archetype table.
pub fn load_nation_types() -> Result<Vec<NationTypeDef>, DataError> {
    let defs: Vec<NationTypeDef> = serde_json::from_str(NATION_TYPES_JSON)?;
    let mut codes: HashSet<&str> = HashSet::new();

    for def in &defs {
        if !codes.insert(&def.code) {
            return Err(DataError::DuplicateCode {
                kind: "nation type",
                code: def.code.clone(),
            });
        }
        for group in def.boosted.iter().chain(def.weakened.iter()) {
            if !categories::is_known_group(group) {
                return Err(DataError::UnknownGroup {
                    kind: "nation type",
                    code: def.code.clone(),
                    group: group.clone(),
                });
            }
        }
    }

    log::debug!("loaded {} nation archetypes", defs.len());
    Ok(defs)
}
