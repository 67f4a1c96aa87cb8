use engine::character::HEALING_STONE_MAX_CHARGES;
use engine::items::{Armor, Weapon};
use engine::{Character, Characteristic, EngineError};

fn firewolf() -> Character {
    Character::new(64, 56, 72, 48, 80, 40, 56).unwrap()
}

fn leather() -> Armor {
    Armor {
        name: "Leather Armor".to_string(),
        protection: 5,
        description: String::new(),
    }
}

#[test]
fn creation_derives_lp_from_characteristic_sum() {
    let c = firewolf();
    assert_eq!(c.maximum_lp, 64 + 56 + 72 + 48 + 80 + 40 + 56);
    assert_eq!(c.current_lp, c.maximum_lp);
    assert_eq!(c.skill, 0);
    assert_eq!(c.current_pow, 0);
    assert!(!c.magic_unlocked);
    assert!(c.equipped_weapon.is_none());
    assert!(c.equipped_armor.is_none());
}

#[test]
fn creation_rejects_out_of_range_characteristics() {
    assert_eq!(
        Character::new(-1, 0, 0, 0, 0, 0, 0),
        Err(EngineError::NegativeCharacteristic(
            Characteristic::Strength,
            -1
        ))
    );
    assert_eq!(
        Character::new(0, 0, 0, 0, 0, 0, 1000),
        Err(EngineError::CharacteristicTooHigh(
            Characteristic::Attraction,
            1000
        ))
    );
    // All-zero is legal, just unplayable.
    let zero = Character::new(0, 0, 0, 0, 0, 0, 0).unwrap();
    assert_eq!(zero.maximum_lp, 0);
}

#[test]
fn modify_characteristic_rejects_underflow_and_leaves_value_unchanged() {
    let mut c = firewolf();
    let err = c.modify_characteristic(Characteristic::Luck, -81);
    assert_eq!(
        err,
        Err(EngineError::CharacteristicUnderflow(Characteristic::Luck, -1))
    );
    assert_eq!(c.luck, 80);

    c.modify_characteristic(Characteristic::Luck, -80).unwrap();
    assert_eq!(c.luck, 0);
}

#[test]
fn lp_may_go_negative_but_skill_may_not() {
    let mut c = firewolf();
    c.modify_lp(-(c.maximum_lp + 25));
    assert_eq!(c.current_lp, -25);

    assert_eq!(c.modify_skill(-1), Err(EngineError::SkillUnderflow(-1)));
    assert_eq!(c.skill, 0);
    c.modify_skill(3).unwrap();
    assert_eq!(c.skill, 3);
}

#[test]
fn pow_is_clamped_at_zero() {
    let mut c = firewolf();
    c.unlock_magic(40).unwrap();
    assert_eq!((c.current_pow, c.maximum_pow), (40, 40));

    c.modify_pow(-100);
    assert_eq!(c.current_pow, 0);
    c.set_pow(-5);
    assert_eq!(c.current_pow, 0);
    c.modify_pow(15);
    assert_eq!(c.current_pow, 15);

    assert!(c.unlock_magic(-1).is_err());
}

#[test]
fn armor_protection_stacks_shield_by_the_seven_or_five_rule() {
    let mut c = firewolf();
    assert_eq!(c.armor_protection(), 0);

    c.toggle_shield();
    assert_eq!(c.armor_protection(), 7);

    c.equip_armor(Some(leather()));
    assert_eq!(c.armor_protection(), 5 + 5);

    c.toggle_shield();
    assert_eq!(c.armor_protection(), 5);
}

#[test]
fn weapon_bonus_defaults_to_zero_when_unarmed() {
    let mut c = firewolf();
    assert_eq!(c.weapon_damage_bonus(), 0);
    c.equip_weapon(Some(Weapon {
        name: "Sword".to_string(),
        damage_bonus: 10,
        description: String::new(),
        special: false,
    }));
    assert_eq!(c.weapon_damage_bonus(), 10);
}

#[test]
fn healing_stone_caps_healing_but_depletes_by_the_rolled_amount() {
    let mut c = firewolf();
    assert_eq!(
        c.use_healing_stone(30),
        Err(EngineError::HealingStoneDepleted)
    );

    c.acquire_healing_stone();
    assert_eq!(c.healing_stone_charges, HEALING_STONE_MAX_CHARGES);
    assert_eq!(c.use_healing_stone(30), Err(EngineError::AlreadyAtFullHealth));

    c.modify_lp(-10);
    let healed = c.use_healing_stone(30).unwrap();
    assert_eq!(healed, 10);
    assert_eq!(c.current_lp, c.maximum_lp);
    // Full roll depleted even though only 10 LP were missing.
    assert_eq!(c.healing_stone_charges, 20);

    c.modify_lp(-100);
    let healed = c.use_healing_stone(60).unwrap();
    assert_eq!(healed, 20);
    assert_eq!(c.healing_stone_charges, 0);

    assert_eq!(c.recharge_healing_stone(), Ok(()));
    assert_eq!(c.healing_stone_charges, HEALING_STONE_MAX_CHARGES);
    assert_eq!(c.recharge_healing_stone(), Err(EngineError::HealingStoneFull));
}

#[test]
fn orb_transitions_enforce_possession_and_destruction_rules() {
    let mut c = firewolf();
    assert_eq!(c.equip_orb(), Err(EngineError::OrbNotPossessed));
    assert_eq!(c.destroy_orb(), Err(EngineError::OrbNotPossessed));

    c.acquire_orb();
    c.equip_orb().unwrap();
    assert!(c.orb_equipped);
    // Cannot throw while held in the left hand.
    assert_eq!(c.destroy_orb(), Err(EngineError::OrbStillEquipped));

    c.unequip_orb();
    c.destroy_orb().unwrap();
    assert!(c.orb_destroyed && !c.orb_equipped);
    assert_eq!(c.equip_orb(), Err(EngineError::OrbDestroyed));
    assert_eq!(c.destroy_orb(), Err(EngineError::OrbDestroyed));

    // Re-acquiring restores a usable orb.
    c.acquire_orb();
    assert!(!c.orb_destroyed);
    c.equip_orb().unwrap();
}

#[test]
fn spell_effect_bookkeeping_is_by_name() {
    let mut c = firewolf();
    assert!(!c.has_spell_effect("ARMOUR"));
    assert_eq!(c.spell_effect("ARMOUR"), 0);

    c.add_spell_effect("ARMOUR", 10);
    c.add_spell_effect("XENOPHOBIA", 5);
    assert!(c.has_spell_effect("ARMOUR"));
    assert_eq!(c.spell_effect("ARMOUR"), 10);

    c.remove_spell_effect("ARMOUR");
    assert!(!c.has_spell_effect("ARMOUR"));
    assert_eq!(c.spell_effect("XENOPHOBIA"), 5);

    c.clear_spell_effects();
    assert!(c.active_spell_effects.is_empty());
}
