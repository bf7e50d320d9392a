//! Fixed action-category groups.
//!
//! Nation archetypes and special abilities bias whole categories of actions
//! rather than single commands; a command's stable label is matched against
//! these groups when a modifier stack is folded.

/// Farming-related development (also covers settlement growth).
pub const FARMING: &[&str] = &["agriculture", "population"];

/// Market development.
pub const TRADE: &[&str] = &["commerce"];

/// Public order and morale of a city.
pub const ORDER: &[&str] = &["security", "trust"];

/// Fortification and troop drill.
pub const MILITARY: &[&str] = &["wall_repair", "defense_training", "recruit"];

/// Research.
pub const SCHOLARSHIP: &[&str] = &["technology"];

/// Covert strategic actions.
pub const COVERT: &[&str] = &["sabotage"];

/// All groups by name, in a fixed order.
pub const ALL: &[(&str, &[&str])] = &[
    ("farming", FARMING),
    ("trade", TRADE),
    ("order", ORDER),
    ("military", MILITARY),
    ("scholarship", SCHOLARSHIP),
    ("covert", COVERT),
];

/// Whether `group` is a known category-group name.
pub fn is_known_group(group: &str) -> bool {
    ALL.iter().any(|(name, _)| *name == group)
}

/// Whether the action label belongs to the named group.
pub fn group_contains(group: &str, action: &str) -> bool {
    ALL.iter()
        .find(|(name, _)| *name == group)
        .is_some_and(|(_, labels)| labels.contains(&action))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_groups() {
        assert!(is_known_group("farming"));
        assert!(is_known_group("covert"));
        assert!(!is_known_group("piracy"));
    }

    #[test]
    fn test_group_membership() {
        assert!(group_contains("farming", "agriculture"));
        assert!(group_contains("farming", "population"));
        assert!(!group_contains("farming", "commerce"));
        assert!(group_contains("military", "recruit"));
    }

    #[test]
    fn test_labels_appear_in_exactly_one_group() {
        let mut seen = std::collections::HashSet::new();
        for (_, labels) in ALL {
            for label in *labels {
                assert!(seen.insert(*label), "label {label} listed twice");
            }
        }
    }
}
