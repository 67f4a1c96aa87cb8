use serde::Serialize;

use crate::dice::Roller;
use crate::magic::spells::Spell;

/// The spell fizzles on a 2d6 below this.
pub const FFR_SUCCESS_THRESHOLD: i32 = 6;
/// Natural inclination roll succeeds at this or above.
pub const INCLINATION_SUCCESS_THRESHOLD: i32 = 4;

/// Outcome of a validation or cast attempt. Insufficient power and FFR
/// failure are expected, player-facing results, not errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CastResult {
    pub success: bool,
    /// The Fundamental Failure Rate check failed; POW was still spent.
    pub ffr_failed: bool,
    /// Not enough POW and the LP sacrifice would be fatal.
    pub insufficient_power: bool,
    pub message: String,
    pub power_spent: i32,
    /// The cast can proceed only if the caller confirms an LP sacrifice.
    pub requires_sacrifice: bool,
    pub sacrifice_amount: i32,
}

/// Fire*Wolf's aversion to magic: roll 2d6, overcome on 4 or better.
/// Informational only; nothing gates on the result.
pub fn natural_inclination_check(roller: &mut impl Roller) -> (bool, i32) {
    let roll = roller.roll_2d6();
    (roll >= INCLINATION_SUCCESS_THRESHOLD, roll)
}

pub fn can_afford_spell(current_pow: i32, spell_cost: i32) -> bool {
    current_pow >= spell_cost
}

/// LP that must be sacrificed to cover the POW shortfall.
pub fn calculate_sacrifice_needed(current_pow: i32, spell_cost: i32) -> i32 {
    if current_pow >= spell_cost {
        0
    } else {
        spell_cost - current_pow
    }
}

/// The sacrifice must leave at least 1 LP.
pub fn can_sacrifice_lp(current_lp: i32, sacrifice_amount: i32) -> bool {
    current_lp > sacrifice_amount
}

/// Fundamental Failure Rate check: every confirmed cast rolls 2d6 and
/// succeeds on 6 or better.
pub fn fundamental_failure_rate(roller: &mut impl Roller) -> (bool, i32) {
    let roll = roller.roll_2d6();
    (roll >= FFR_SUCCESS_THRESHOLD, roll)
}

/// Check whether a spell may be cast in the current context. A successful
/// validation deducts nothing; the caller confirms any sacrifice and then
/// calls [`perform_cast`].
pub fn validate_cast(
    spell: &Spell,
    current_pow: i32,
    current_lp: i32,
    in_combat: bool,
    is_dead: bool,
) -> CastResult {
    let mut result = CastResult::default();

    if spell.death_only && !is_dead {
        result.message = "This spell can only be cast when you are dead".to_string();
        return result;
    }

    if !spell.death_only && is_dead {
        result.message = "Only RESURRECTION can be cast while dead".to_string();
        return result;
    }

    if spell.combat_only && !in_combat {
        result.message = "This spell can only be cast during combat".to_string();
        return result;
    }

    // CRYPT and RETRACE are barred in combat by name, not by flag.
    if in_combat && (spell.name == "CRYPT" || spell.name == "RETRACE") {
        result.message = "This spell cannot be cast during combat".to_string();
        return result;
    }

    if !can_afford_spell(current_pow, spell.power_cost) {
        let sacrifice_needed = calculate_sacrifice_needed(current_pow, spell.power_cost);
        if !can_sacrifice_lp(current_lp, sacrifice_needed) {
            result.insufficient_power = true;
            result.message = format!(
                "Insufficient POWER ({}/{}). Cannot sacrifice {} LP without dying.",
                current_pow, spell.power_cost, sacrifice_needed
            );
            return result;
        }
        result.requires_sacrifice = true;
        result.sacrifice_amount = sacrifice_needed;
        result.message = format!(
            "Insufficient POWER ({}/{}). Sacrifice {} LP for {} POW?",
            current_pow, spell.power_cost, sacrifice_needed, sacrifice_needed
        );
        return result;
    }

    result.success = true;
    result
}

/// Execute a validated (and, if needed, sacrifice-confirmed) cast. The POW
/// cost is committed either way; only the FFR check decides whether the
/// effect lands.
pub fn perform_cast(spell: &Spell, roller: &mut impl Roller) -> CastResult {
    let mut result = CastResult {
        power_spent: spell.power_cost,
        ..CastResult::default()
    };

    let (ffr_success, ffr_roll) = fundamental_failure_rate(roller);
    if !ffr_success {
        result.ffr_failed = true;
        result.message = format!("The spell fizzles and fails! (rolled {ffr_roll}, needed 6+)");
        return result;
    }

    result.success = true;
    result.message = format!("Spell cast successfully! (FFR roll: {ffr_roll})");
    result
}
