use serde::Serialize;

use crate::dice::Roller;
use crate::magic::spells::Spell;

/// FIREBALL always deals this much LP damage.
pub const FIREBALL_DAMAGE: i32 = 50;
/// Damage reduction recorded by ARMOUR.
pub const ARMOUR_REDUCTION: i32 = 10;
/// Enemy damage reduction recorded by XENOPHOBIA.
pub const XENOPHOBIA_REDUCTION: i32 = 5;

/// What a successfully cast spell does, for the caller to apply and render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpellEffect {
    pub success: bool,
    pub message: String,
    /// LP damage to the enemy (FIREBALL).
    pub damage_dealt: i32,
    pub lp_restored: i32,
    /// Combat ends now (INVISIBILITY, PARALYSIS).
    pub combat_ended: bool,
    /// The ended combat counts as a victory (INVISIBILITY yes, PARALYSIS no).
    pub victory: bool,
    /// The enemy dies outright (POISON NEEDLE on 4-6).
    pub enemy_killed: bool,
    /// All characteristics must be rerolled (RESURRECTION).
    pub requires_reroll: bool,
    /// Caller-resolved navigation target (CRYPT, RETRACE).
    pub navigate_to: Option<String>,
}

pub fn apply_armour() -> SpellEffect {
    SpellEffect {
        success: true,
        message: "Magical armor of light surrounds you! Incoming damage reduced by 10 points."
            .to_string(),
        ..SpellEffect::default()
    }
}

/// CRYPT sends the caster back to the Crypts; the caller restores POW to
/// maximum on arrival.
pub fn apply_crypt() -> SpellEffect {
    SpellEffect {
        success: true,
        message: "You are transported to the Crypts. Your POWER is fully restored!".to_string(),
        navigate_to: Some("CRYPT".to_string()),
        ..SpellEffect::default()
    }
}

pub fn apply_fireball() -> SpellEffect {
    SpellEffect {
        success: true,
        message: "A ball of flame strikes the enemy!".to_string(),
        damage_dealt: FIREBALL_DAMAGE,
        ..SpellEffect::default()
    }
}

/// In combat, INVISIBILITY ends the fight as if won; outside combat it is
/// pure evasion flavor.
pub fn apply_invisibility(in_combat: bool) -> SpellEffect {
    if in_combat {
        SpellEffect {
            success: true,
            message: "You fade from sight. The enemy cannot see you!".to_string(),
            combat_ended: true,
            victory: true,
            ..SpellEffect::default()
        }
    } else {
        SpellEffect {
            success: true,
            message: "You become invisible, avoiding danger ahead.".to_string(),
            ..SpellEffect::default()
        }
    }
}

/// PARALYSIS is an escape: combat ends with no victory credit.
pub fn apply_paralysis() -> SpellEffect {
    SpellEffect {
        success: true,
        message: "The enemy is paralyzed! You escape combat.".to_string(),
        combat_ended: true,
        victory: false,
        ..SpellEffect::default()
    }
}

/// Roll 1d6: 4-6 the poison is invariably fatal, 1-3 the enemy is immune.
pub fn apply_poison_needle(roller: &mut impl Roller) -> SpellEffect {
    let roll = roller.roll_1d6();

    if roll >= 4 {
        SpellEffect {
            success: true,
            message: format!(
                "The poisoned needle strikes! (rolled {roll}) The poison is invariably fatal!"
            ),
            enemy_killed: true,
            ..SpellEffect::default()
        }
    } else {
        SpellEffect {
            success: true,
            message: format!(
                "The poisoned needle strikes! (rolled {roll}) But the enemy is immune to the poison."
            ),
            ..SpellEffect::default()
        }
    }
}

pub fn apply_resurrection() -> SpellEffect {
    SpellEffect {
        success: true,
        message: "Death is not your fate! You are resurrected at the start of this section."
            .to_string(),
        requires_reroll: true,
        ..SpellEffect::default()
    }
}

pub fn apply_retrace(section_name: &str) -> SpellEffect {
    SpellEffect {
        success: true,
        message: format!("You trace your steps back to: {section_name}"),
        navigate_to: Some(section_name.to_string()),
        ..SpellEffect::default()
    }
}

pub fn apply_timewarp() -> SpellEffect {
    SpellEffect {
        success: true,
        message: "Time warps around you! You return to the beginning of this section.".to_string(),
        ..SpellEffect::default()
    }
}

pub fn apply_xenophobia() -> SpellEffect {
    SpellEffect {
        success: true,
        message: "The enemy is gripped by fear! Their damage is reduced by 5 points.".to_string(),
        ..SpellEffect::default()
    }
}

/// Dispatch a confirmed, FFR-passed cast to its effect function.
/// `retrace_target` names the destination for RETRACE; it defaults to the
/// previous section marker when the caller has none.
pub fn resolve_effect(
    spell: &Spell,
    in_combat: bool,
    retrace_target: Option<&str>,
    roller: &mut impl Roller,
) -> SpellEffect {
    match spell.name {
        "ARMOUR" => apply_armour(),
        "CRYPT" => apply_crypt(),
        "FIREBALL" => apply_fireball(),
        "INVISIBILITY" => apply_invisibility(in_combat),
        "PARALYSIS" => apply_paralysis(),
        "POISON NEEDLE" => apply_poison_needle(roller),
        "RESURRECTION" => apply_resurrection(),
        "RETRACE" => apply_retrace(retrace_target.unwrap_or("previous section")),
        "TIMEWARP" => apply_timewarp(),
        "XENOPHOBIA" => apply_xenophobia(),
        other => SpellEffect {
            message: format!("Unknown spell: {other}"),
            ..SpellEffect::default()
        },
    }
}
