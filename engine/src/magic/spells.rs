use serde::Serialize;

/// Broad grouping used for display and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpellCategory {
    Offensive,
    Defensive,
    Navigation,
    Tactical,
    Recovery,
}

/// One entry of the fixed ten-spell catalog. Static data, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Spell {
    pub name: &'static str,
    pub power_cost: i32,
    pub description: &'static str,
    pub category: SpellCategory,
    /// Castable only during combat.
    pub combat_only: bool,
    /// Castable only at 0 LP or below (RESURRECTION).
    pub death_only: bool,
}

/// The ten spells of the ruleset, in catalog order.
pub const ALL_SPELLS: [Spell; 10] = [
    Spell {
        name: "ARMOUR",
        power_cost: 25,
        description: "Creates magical armor. Reduces incoming damage by 10 points.",
        category: SpellCategory::Defensive,
        combat_only: false,
        death_only: false,
    },
    Spell {
        name: "CRYPT",
        power_cost: 150,
        description: "Returns you to the Crypts for POWER restoration.",
        category: SpellCategory::Navigation,
        combat_only: false,
        death_only: false,
    },
    Spell {
        name: "FIREBALL",
        power_cost: 15,
        description: "Hurls a ball of flame. Deals 50 LP damage to enemy.",
        category: SpellCategory::Offensive,
        combat_only: true,
        death_only: false,
    },
    Spell {
        name: "INVISIBILITY",
        power_cost: 30,
        description: "Renders you invisible. Avoid combat and proceed as if victorious.",
        category: SpellCategory::Tactical,
        combat_only: false,
        death_only: false,
    },
    Spell {
        name: "PARALYSIS",
        power_cost: 30,
        description: "Paralyzes enemy. Escape combat immediately without victory.",
        category: SpellCategory::Tactical,
        combat_only: true,
        death_only: false,
    },
    Spell {
        name: "POISON NEEDLE",
        power_cost: 25,
        description: "Shoots poisoned needle. Roll 1d6: 4-6 kills enemy, 1-3 immune.",
        category: SpellCategory::Offensive,
        combat_only: true,
        death_only: false,
    },
    Spell {
        name: "RESURRECTION",
        power_cost: 50,
        description: "Returns to section start when killed. Reroll all stats.",
        category: SpellCategory::Recovery,
        combat_only: false,
        death_only: true,
    },
    Spell {
        name: "RETRACE",
        power_cost: 20,
        description: "Returns to any previously visited section.",
        category: SpellCategory::Navigation,
        combat_only: false,
        death_only: false,
    },
    Spell {
        name: "TIMEWARP",
        power_cost: 10,
        description: "Resets section to starting state. Restores all LP.",
        category: SpellCategory::Navigation,
        combat_only: false,
        death_only: false,
    },
    Spell {
        name: "XENOPHOBIA",
        power_cost: 15,
        description: "Causes enemy to fear you. Reduces their damage by 5 points.",
        category: SpellCategory::Offensive,
        combat_only: true,
        death_only: false,
    },
];

/// Look a spell up by its exact catalog name.
pub fn spell_by_name(name: &str) -> Option<&'static Spell> {
    ALL_SPELLS.iter().find(|s| s.name == name)
}

/// Catalog-ordered spells castable in the given context. A dead character
/// sees only death-only spells; a living one never does.
pub fn available_spells(in_combat: bool, is_dead: bool) -> Vec<&'static Spell> {
    ALL_SPELLS
        .iter()
        .filter(|spell| {
            if spell.death_only != is_dead {
                return false;
            }
            if spell.combat_only && !in_combat {
                return false;
            }
            true
        })
        .collect()
}
