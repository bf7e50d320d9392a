//! Modifier registries built from the static data tables.
//!
//! Built once at startup; lookups are by stable code. Building converts
//! every tabled float to fixed-point, so nothing downstream ever sees an
//! f32. A malformed table is a configuration error and aborts startup.

use crate::modifier::{ItemModifier, NationTypeModifier, SpecialModifier};
use anyhow::Context;
use std::collections::HashMap;

pub struct ItemRegistry {
    by_code: HashMap<String, ItemModifier>,
}

impl ItemRegistry {
    pub fn get(&self, code: &str) -> Option<&ItemModifier> {
        self.by_code.get(code)
    }

    pub fn all(&self) -> &HashMap<String, ItemModifier> {
        &self.by_code
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

pub struct NationTypeRegistry {
    by_code: HashMap<String, NationTypeModifier>,
}

impl NationTypeRegistry {
    pub fn get(&self, code: &str) -> Option<&NationTypeModifier> {
        self.by_code.get(code)
    }

    pub fn all(&self) -> &HashMap<String, NationTypeModifier> {
        &self.by_code
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

pub struct SpecialRegistry {
    by_code: HashMap<String, SpecialModifier>,
}

impl SpecialRegistry {
    pub fn get(&self, code: &str) -> Option<&SpecialModifier> {
        self.by_code.get(code)
    }

    pub fn all(&self) -> &HashMap<String, SpecialModifier> {
        &self.by_code
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

/// The three modifier registries a command execution reads from.
pub struct Registries {
    pub items: ItemRegistry,
    pub nation_types: NationTypeRegistry,
    pub specials: SpecialRegistry,
}

impl Registries {
    /// Build from the embedded data tables.
    pub fn load_default() -> anyhow::Result<Self> {
        let items = samdata::items::load_items().context("item table")?;
        let nation_types =
            samdata::nation_types::load_nation_types().context("nation-type table")?;
        let specials = samdata::specials::load_specials().context("specialty table")?;

        let items = ItemRegistry {
            by_code: items
                .iter()
                .map(|def| (def.code.clone(), ItemModifier::from_def(def)))
                .collect(),
        };
        let nation_types = NationTypeRegistry {
            by_code: nation_types
                .iter()
                .map(|def| (def.code.clone(), NationTypeModifier::from_def(def)))
                .collect(),
        };
        let mut specials_by_code = HashMap::new();
        for def in &specials {
            let modifier = SpecialModifier::from_def(def)
                .with_context(|| format!("specialty '{}'", def.code))?;
            specials_by_code.insert(def.code.clone(), modifier);
        }

        log::info!(
            "registries ready: {} items, {} nation types, {} specialties",
            items.len(),
            nation_types.len(),
            specials_by_code.len()
        );

        Ok(Registries {
            items,
            nation_types,
            specials: SpecialRegistry {
                by_code: specials_by_code,
            },
        })
    }
}
