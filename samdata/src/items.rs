//! Item definition table.
//!
//! Equipment (weapon/book/horse) carries a grade-scaled flat stat bonus.
//! Misc items carry arbitrary named multiplier maps and may declare a
//! `trigger` selecting a non-linear behavior computed at fold time.

use crate::categories;
use crate::defines::equipment;
use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

const ITEMS_JSON: &str = include_str!("../data/items.json");

/// Which slot an item occupies on a general.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSlot {
    Weapon,
    Book,
    Horse,
    Misc,
}

/// Non-linear behavior tag for misc items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Bonus grows with elapsed game-years, up to a cap.
    VeteranYears,
    /// Bonus applies only against a disadvantaged opponent unit category.
    TypeAdvantage,
    /// Bonus grows as the bearer's remaining health falls.
    WoundedFury,
}

/// One entry of the item table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub code: String,
    pub name: String,
    pub slot: ItemSlot,
    /// Equipment grade (1..=9); zero for misc items.
    #[serde(default)]
    pub grade: u8,
    /// Category group -> domestic score multiplier.
    #[serde(default)]
    pub domestic: HashMap<String, f32>,
    /// Multiplier on strategic-command delay (e.g. 0.8 = faster).
    #[serde(default)]
    pub strategic_delay: Option<f32>,
    /// War-power multiplier, or the trigger's scaling coefficient when a
    /// `trigger` is set.
    #[serde(default)]
    pub war_power: Option<f32>,
    #[serde(default)]
    pub trigger: Option<TriggerKind>,
}

impl ItemDef {
    pub fn is_equipment(&self) -> bool {
        self.slot != ItemSlot::Misc
    }
}

/// Parse and validate the embedded item table.
pub fn load_items() -> Result<Vec<ItemDef>, DataError> {
    let defs: Vec<ItemDef> = serde_json::from_str(ITEMS_JSON)?;
    let mut codes: HashSet<&str> = HashSet::new();

    for def in &defs {
        if !codes.insert(&def.code) {
            return Err(DataError::DuplicateCode {
                kind: "item",
                code: def.code.clone(),
            });
        }
        if def.is_equipment()
            && !(equipment::GRADE_MIN..=equipment::GRADE_MAX).contains(&def.grade)
        {
            return Err(DataError::BadGrade {
                code: def.code.clone(),
                grade: def.grade,
            });
        }
        if def.trigger.is_some() && def.is_equipment() {
            return Err(DataError::MisplacedTrigger {
                code: def.code.clone(),
            });
        }
        for group in def.domestic.keys() {
            if !categories::is_known_group(group) {
                return Err(DataError::UnknownGroup {
                    kind: "item",
                    code: def.code.clone(),
                    group: group.clone(),
                });
            }
        }
    }

    log::debug!("loaded {} item definitions", defs.len());
    Ok(defs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_table_loads() {
        let defs = load_items().expect("embedded item table must be valid");
        assert!(!defs.is_empty());
    }

    #[test]
    fn test_equipment_has_valid_grades() {
        for def in load_items().unwrap() {
            if def.is_equipment() {
                assert!((1..=9).contains(&def.grade), "{} grade", def.code);
                assert!(def.trigger.is_none());
            }
        }
    }

    #[test]
    fn test_bad_grade_rejected() {
        let json = r#"[{"code":"x","name":"X","slot":"weapon","grade":12}]"#;
        let defs: Vec<ItemDef> = serde_json::from_str(json).unwrap();
        assert_eq!(defs[0].grade, 12);
        // load_items validates the embedded table; replicate its check here
        assert!(!(1..=9).contains(&defs[0].grade));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = serde_json::from_str::<Vec<ItemDef>>("[{\"code\":1}]").unwrap_err();
        let err: DataError = err.into();
        assert!(matches!(err, DataError::Parse(_)));
    }
}
