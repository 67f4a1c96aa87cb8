use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Shield damage reduction when worn without armor.
pub const SHIELD_PROTECTION: i32 = 7;
/// Shield damage reduction when worn together with armor.
pub const SHIELD_PROTECTION_WITH_ARMOR: i32 = 5;

pub const DOOMBRINGER_NAME: &str = "Doombringer";

/// A weapon that can be equipped and adds its bonus to damage rolls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Weapon {
    pub name: String,
    pub damage_bonus: i32,
    #[serde(default)]
    pub description: String,
    /// Weapons with extra rules layered by the caller (Doombringer).
    #[serde(default)]
    pub special: bool,
}

/// Armor that reduces incoming damage by a flat amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Armor {
    pub name: String,
    pub protection: i32,
    #[serde(default)]
    pub description: String,
}

pub fn load_weapons(json: &str) -> Result<Vec<Weapon>> {
    serde_json::from_str(json).context("failed to parse weapons JSON")
}

pub fn load_armor(json: &str) -> Result<Vec<Armor>> {
    serde_json::from_str(json).context("failed to parse armor JSON")
}

pub fn find_weapon<'a>(weapons: &'a [Weapon], name: &str) -> Option<&'a Weapon> {
    weapons.iter().find(|w| w.name.eq_ignore_ascii_case(name))
}

pub fn find_armor<'a>(armor: &'a [Armor], name: &str) -> Option<&'a Armor> {
    armor.iter().find(|a| a.name.eq_ignore_ascii_case(name))
}
