use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::items::{Armor, SHIELD_PROTECTION, SHIELD_PROTECTION_WITH_ARMOR, Weapon};

/// Healing Stone capacity in charges.
pub const HEALING_STONE_MAX_CHARGES: i32 = 50;

/// Creation-time ceiling for a single characteristic.
pub const CHARACTERISTIC_MAX: i32 = 999;

/// The seven rolled characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Characteristic {
    Strength,
    Speed,
    Stamina,
    Courage,
    Luck,
    Charm,
    Attraction,
}

impl Characteristic {
    pub const ALL: [Characteristic; 7] = [
        Characteristic::Strength,
        Characteristic::Speed,
        Characteristic::Stamina,
        Characteristic::Courage,
        Characteristic::Luck,
        Characteristic::Charm,
        Characteristic::Attraction,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Characteristic::Strength => "strength",
            Characteristic::Speed => "speed",
            Characteristic::Stamina => "stamina",
            Characteristic::Courage => "courage",
            Characteristic::Luck => "luck",
            Characteristic::Charm => "charm",
            Characteristic::Attraction => "attraction",
        }
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The player character: stats, resources, equipment, and special items.
///
/// The engine mutates a `Character` through the operations below but does not
/// own its lifecycle; creation happens here, persistence belongs to the
/// caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub strength: i32,
    pub speed: i32,
    pub stamina: i32,
    pub courage: i32,
    pub luck: i32,
    pub charm: i32,
    pub attraction: i32,

    pub current_lp: i32,
    pub maximum_lp: i32,
    pub skill: i32,

    pub current_pow: i32,
    pub maximum_pow: i32,
    pub magic_unlocked: bool,
    /// Buff bookkeeping by effect name. Recorded by the caller on a
    /// successful cast; the combat damage formulas do not read it.
    pub active_spell_effects: IndexMap<String, i32>,

    pub equipped_weapon: Option<Weapon>,
    pub equipped_armor: Option<Armor>,
    pub has_shield: bool,

    pub healing_stone_charges: i32,
    pub doombringer_possessed: bool,
    pub orb_possessed: bool,
    pub orb_equipped: bool,
    pub orb_destroyed: bool,

    pub enemies_defeated: i32,
}

impl Character {
    /// Create a character from the seven rolled characteristics.
    ///
    /// Maximum and current LP are the sum of all seven; skill and POW start
    /// at zero with magic locked.
    pub fn new(
        strength: i32,
        speed: i32,
        stamina: i32,
        courage: i32,
        luck: i32,
        charm: i32,
        attraction: i32,
    ) -> Result<Self, EngineError> {
        let values = [
            (Characteristic::Strength, strength),
            (Characteristic::Speed, speed),
            (Characteristic::Stamina, stamina),
            (Characteristic::Courage, courage),
            (Characteristic::Luck, luck),
            (Characteristic::Charm, charm),
            (Characteristic::Attraction, attraction),
        ];
        for (which, value) in values {
            validate_characteristic(which, value)?;
        }

        let max_lp = strength + speed + stamina + courage + luck + charm + attraction;

        Ok(Self {
            strength,
            speed,
            stamina,
            courage,
            luck,
            charm,
            attraction,
            current_lp: max_lp,
            maximum_lp: max_lp,
            skill: 0,
            current_pow: 0,
            maximum_pow: 0,
            magic_unlocked: false,
            active_spell_effects: IndexMap::new(),
            equipped_weapon: None,
            equipped_armor: None,
            has_shield: false,
            healing_stone_charges: 0,
            doombringer_possessed: false,
            orb_possessed: false,
            orb_equipped: false,
            orb_destroyed: false,
            enemies_defeated: 0,
        })
    }

    pub fn characteristic(&self, which: Characteristic) -> i32 {
        match which {
            Characteristic::Strength => self.strength,
            Characteristic::Speed => self.speed,
            Characteristic::Stamina => self.stamina,
            Characteristic::Courage => self.courage,
            Characteristic::Luck => self.luck,
            Characteristic::Charm => self.charm,
            Characteristic::Attraction => self.attraction,
        }
    }

    /// Adjust a characteristic; rejected if the result would be negative.
    pub fn modify_characteristic(
        &mut self,
        which: Characteristic,
        delta: i32,
    ) -> Result<(), EngineError> {
        let slot = match which {
            Characteristic::Strength => &mut self.strength,
            Characteristic::Speed => &mut self.speed,
            Characteristic::Stamina => &mut self.stamina,
            Characteristic::Courage => &mut self.courage,
            Characteristic::Luck => &mut self.luck,
            Characteristic::Charm => &mut self.charm,
            Characteristic::Attraction => &mut self.attraction,
        };
        let new_val = *slot + delta;
        if new_val < 0 {
            return Err(EngineError::CharacteristicUnderflow(which, new_val));
        }
        *slot = new_val;
        Ok(())
    }

    /// Change current LP. May go negative; a negative total signals death
    /// and death-save eligibility.
    pub fn modify_lp(&mut self, delta: i32) {
        self.current_lp += delta;
    }

    pub fn set_lp(&mut self, value: i32) {
        self.current_lp = value;
    }

    pub fn set_max_lp(&mut self, value: i32) -> Result<(), EngineError> {
        if value < 0 {
            return Err(EngineError::NegativeValue {
                what: "maximum LP",
                value,
            });
        }
        self.maximum_lp = value;
        Ok(())
    }

    pub fn modify_skill(&mut self, delta: i32) -> Result<(), EngineError> {
        let new_val = self.skill + delta;
        if new_val < 0 {
            return Err(EngineError::SkillUnderflow(new_val));
        }
        self.skill = new_val;
        Ok(())
    }

    pub fn set_skill(&mut self, value: i32) -> Result<(), EngineError> {
        if value < 0 {
            return Err(EngineError::NegativeValue {
                what: "skill",
                value,
            });
        }
        self.skill = value;
        Ok(())
    }

    /// Activate the magic system with the given starting POW.
    pub fn unlock_magic(&mut self, initial_pow: i32) -> Result<(), EngineError> {
        if initial_pow < 0 {
            return Err(EngineError::NegativeValue {
                what: "initial POW",
                value: initial_pow,
            });
        }
        self.magic_unlocked = true;
        self.current_pow = initial_pow;
        self.maximum_pow = initial_pow;
        Ok(())
    }

    /// Change current POW, clamped at zero.
    pub fn modify_pow(&mut self, delta: i32) {
        self.current_pow = (self.current_pow + delta).max(0);
    }

    pub fn set_pow(&mut self, value: i32) {
        self.current_pow = value.max(0);
    }

    pub fn set_max_pow(&mut self, value: i32) -> Result<(), EngineError> {
        if value < 0 {
            return Err(EngineError::NegativeValue {
                what: "maximum POW",
                value,
            });
        }
        self.maximum_pow = value;
        Ok(())
    }

    pub fn equip_weapon(&mut self, weapon: Option<Weapon>) {
        self.equipped_weapon = weapon;
    }

    pub fn equip_armor(&mut self, armor: Option<Armor>) {
        self.equipped_armor = armor;
    }

    pub fn toggle_shield(&mut self) {
        self.has_shield = !self.has_shield;
    }

    /// Total damage reduction from armor and shield. The shield's own
    /// contribution drops from 7 to 5 when armor is worn.
    pub fn armor_protection(&self) -> i32 {
        let mut protection = 0;
        if let Some(armor) = &self.equipped_armor {
            protection += armor.protection;
        }
        if self.has_shield {
            protection += if self.equipped_armor.is_some() {
                SHIELD_PROTECTION_WITH_ARMOR
            } else {
                SHIELD_PROTECTION
            };
        }
        protection
    }

    pub fn weapon_damage_bonus(&self) -> i32 {
        self.equipped_weapon
            .as_ref()
            .map_or(0, |w| w.damage_bonus)
    }

    pub fn acquire_healing_stone(&mut self) {
        self.healing_stone_charges = HEALING_STONE_MAX_CHARGES;
    }

    pub fn recharge_healing_stone(&mut self) -> Result<(), EngineError> {
        if self.healing_stone_charges >= HEALING_STONE_MAX_CHARGES {
            return Err(EngineError::HealingStoneFull);
        }
        self.healing_stone_charges = HEALING_STONE_MAX_CHARGES;
        Ok(())
    }

    /// Heal with the Healing Stone. Returns the LP actually restored.
    ///
    /// Healing is capped by the remaining charges and by maximum LP, but the
    /// stone is always depleted by the full rolled amount (floored at zero).
    pub fn use_healing_stone(&mut self, heal_amount: i32) -> Result<i32, EngineError> {
        if self.healing_stone_charges <= 0 {
            return Err(EngineError::HealingStoneDepleted);
        }
        if self.current_lp >= self.maximum_lp {
            return Err(EngineError::AlreadyAtFullHealth);
        }

        let mut actual = heal_amount.min(self.healing_stone_charges);
        if self.current_lp + actual > self.maximum_lp {
            actual = self.maximum_lp - self.current_lp;
        }

        self.current_lp += actual;
        self.healing_stone_charges = (self.healing_stone_charges - heal_amount).max(0);

        Ok(actual)
    }

    pub fn acquire_doombringer(&mut self) {
        self.doombringer_possessed = true;
    }

    pub fn acquire_orb(&mut self) {
        self.orb_possessed = true;
        self.orb_destroyed = false;
        self.orb_equipped = false;
    }

    /// Hold The Orb in the left hand.
    pub fn equip_orb(&mut self) -> Result<(), EngineError> {
        if !self.orb_possessed {
            return Err(EngineError::OrbNotPossessed);
        }
        if self.orb_destroyed {
            return Err(EngineError::OrbDestroyed);
        }
        self.orb_equipped = true;
        Ok(())
    }

    pub fn unequip_orb(&mut self) {
        self.orb_equipped = false;
    }

    /// Destroy The Orb after throwing it. It cannot be thrown while held.
    pub fn destroy_orb(&mut self) -> Result<(), EngineError> {
        if !self.orb_possessed {
            return Err(EngineError::OrbNotPossessed);
        }
        if self.orb_destroyed {
            return Err(EngineError::OrbDestroyed);
        }
        if self.orb_equipped {
            return Err(EngineError::OrbStillEquipped);
        }
        self.orb_destroyed = true;
        Ok(())
    }

    pub fn increment_enemies_defeated(&mut self) {
        self.enemies_defeated += 1;
    }

    pub fn is_alive(&self) -> bool {
        self.current_lp > 0
    }

    pub fn add_spell_effect(&mut self, name: &str, value: i32) {
        self.active_spell_effects.insert(name.to_string(), value);
    }

    pub fn remove_spell_effect(&mut self, name: &str) {
        self.active_spell_effects.shift_remove(name);
    }

    pub fn spell_effect(&self, name: &str) -> i32 {
        self.active_spell_effects.get(name).copied().unwrap_or(0)
    }

    pub fn has_spell_effect(&self, name: &str) -> bool {
        self.active_spell_effects.contains_key(name)
    }

    pub fn clear_spell_effects(&mut self) {
        self.active_spell_effects.clear();
    }
}

fn validate_characteristic(which: Characteristic, value: i32) -> Result<(), EngineError> {
    if value < 0 {
        return Err(EngineError::NegativeCharacteristic(which, value));
    }
    if value > CHARACTERISTIC_MAX {
        return Err(EngineError::CharacteristicTooHigh(which, value));
    }
    Ok(())
}
