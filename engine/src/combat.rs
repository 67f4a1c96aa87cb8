use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::dice::Roller;
use crate::error::EngineError;

/// Base number needed on 2d6 to land a hit, before skill and luck.
pub const BASE_TO_HIT: i32 = 7;
/// The to-hit requirement never drops below this.
pub const MIN_TO_HIT: i32 = 2;
/// Luck at or above this grants a −1 to-hit bonus.
pub const LUCK_TO_HIT_THRESHOLD: i32 = 72;

/// An opponent in a single encounter. Owned by the `CombatState` for that
/// encounter's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub strength: i32,
    pub speed: i32,
    pub stamina: i32,
    pub courage: i32,
    pub luck: i32,
    pub skill: i32,
    pub current_lp: i32,
    pub maximum_lp: i32,
    pub weapon_bonus: i32,
    pub armor_protection: i32,
    pub is_demonspawn: bool,
}

impl Enemy {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        strength: i32,
        speed: i32,
        stamina: i32,
        courage: i32,
        luck: i32,
        skill: i32,
        current_lp: i32,
        maximum_lp: i32,
        weapon_bonus: i32,
        armor_protection: i32,
        is_demonspawn: bool,
    ) -> Result<Self, EngineError> {
        let enemy = Self {
            name: name.into(),
            strength,
            speed,
            stamina,
            courage,
            luck,
            skill,
            current_lp,
            maximum_lp,
            weapon_bonus,
            armor_protection,
            is_demonspawn,
        };
        enemy.validate()?;
        Ok(enemy)
    }

    /// Reject empty names, negative stats, and a non-positive LP pool.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.name.is_empty() {
            return Err(EngineError::EmptyEnemyName);
        }
        let stats = [
            ("strength", self.strength),
            ("speed", self.speed),
            ("stamina", self.stamina),
            ("courage", self.courage),
            ("luck", self.luck),
            ("skill", self.skill),
            ("current LP", self.current_lp),
            ("weapon bonus", self.weapon_bonus),
            ("armor protection", self.armor_protection),
        ];
        for (what, value) in stats {
            if value < 0 {
                return Err(EngineError::NegativeEnemyStat { what, value });
            }
        }
        if self.maximum_lp <= 0 {
            return Err(EngineError::NonPositiveMaximumLp(self.maximum_lp));
        }
        Ok(())
    }
}

/// How a finished encounter ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatOutcome {
    Victory,
    Defeat,
    Fled,
}

/// Where the encounter stands, derived from the live state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatPhase {
    /// Player acts this turn.
    PlayerActing,
    /// Enemy acts this turn.
    EnemyActing,
    /// The player has fought past their endurance limit and must rest.
    PlayerRestPending,
    /// The enemy has fought past its endurance limit and must rest.
    EnemyRestPending,
    /// Player LP is 0 or below with the one-shot death save still unspent.
    DeathSaveOffered,
    /// Enemy LP reached 0; resolve victory.
    VictoryPending,
    /// Player is down and the death save is spent.
    DefeatPending,
    /// Combat has been closed out.
    Ended(CombatOutcome),
}

/// Transient state of one combat encounter. Created by [`start_combat`],
/// discarded when the encounter ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    pub is_active: bool,
    pub current_round: i32,
    pub player_turn: bool,
    /// Who won initiative; fixed for the encounter except on a successful
    /// death save, which re-rolls it.
    pub player_first_strike: bool,
    pub death_save_used: bool,
    /// Player stamina / 10, fixed at creation. Zero never forces rest.
    pub endurance_limit: i32,
    pub rounds_since_last_rest: i32,
    /// Enemy stamina / 10, fixed at creation.
    pub enemy_endurance_limit: i32,
    pub enemy_rounds_since_last_rest: i32,
    pub enemy: Enemy,
    pub combat_log: Vec<String>,
    pub player_initiative: i32,
    pub enemy_initiative: i32,
    pub outcome: Option<CombatOutcome>,
}

impl CombatState {
    pub fn new(enemy: Enemy, endurance_limit: i32) -> Self {
        let enemy_endurance_limit = enemy.stamina / 10;
        Self {
            is_active: true,
            current_round: 1,
            player_turn: false,
            player_first_strike: false,
            death_save_used: false,
            endurance_limit,
            rounds_since_last_rest: 0,
            enemy_endurance_limit,
            enemy_rounds_since_last_rest: 0,
            enemy,
            combat_log: Vec::new(),
            player_initiative: 0,
            enemy_initiative: 0,
            outcome: None,
        }
    }

    /// Append a message to the encounter's log.
    pub fn add_log_entry(&mut self, message: impl Into<String>) {
        self.combat_log.push(message.into());
    }

    /// Close the encounter with a terminal outcome.
    pub fn end_combat(&mut self, outcome: CombatOutcome) {
        self.is_active = false;
        self.outcome = Some(outcome);
    }

    /// Derive the current phase of the state machine.
    pub fn phase(&self, player: &Character) -> CombatPhase {
        if let Some(outcome) = self.outcome {
            return CombatPhase::Ended(outcome);
        }
        if self.enemy.current_lp <= 0 {
            return CombatPhase::VictoryPending;
        }
        if player.current_lp <= 0 {
            return if self.death_save_used {
                CombatPhase::DefeatPending
            } else {
                CombatPhase::DeathSaveOffered
            };
        }
        if self.player_turn {
            if check_endurance(self.rounds_since_last_rest, self.endurance_limit) {
                CombatPhase::PlayerRestPending
            } else {
                CombatPhase::PlayerActing
            }
        } else if check_endurance(self.enemy_rounds_since_last_rest, self.enemy_endurance_limit) {
            CombatPhase::EnemyRestPending
        } else {
            CombatPhase::EnemyActing
        }
    }
}

/// Roll initiative for both sides: 2d6 + Speed + Courage + Luck each.
/// The player strikes first only on a strictly higher score; ties favor
/// the enemy.
pub fn calculate_initiative(
    player: &Character,
    enemy: &Enemy,
    roller: &mut impl Roller,
) -> (i32, i32, bool) {
    let player_roll = roller.roll_2d6();
    let enemy_roll = roller.roll_2d6();

    let player_initiative = player_roll + player.speed + player.courage + player.luck;
    let enemy_initiative = enemy_roll + enemy.speed + enemy.courage + enemy.luck;

    (
        player_initiative,
        enemy_initiative,
        player_initiative > enemy_initiative,
    )
}

/// Number needed on 2d6 to hit: 7, −1 per full 10 points of skill, −1 when
/// luck ≥ 72, never below 2.
pub fn calculate_to_hit_requirement(skill: i32, luck: i32) -> i32 {
    let mut requirement = BASE_TO_HIT - skill / 10;
    if luck >= LUCK_TO_HIT_THRESHOLD {
        requirement -= 1;
    }
    requirement.max(MIN_TO_HIT)
}

/// Damage before armor: (roll × 5) + (STR ÷ 10 × 5) + weapon bonus.
pub fn calculate_damage(roll: i32, strength: i32, weapon_bonus: i32) -> i32 {
    roll * 5 + (strength / 10) * 5 + weapon_bonus
}

/// Subtract armor protection, floored at zero.
pub fn apply_armor_reduction(damage: i32, armor_protection: i32) -> i32 {
    (damage - armor_protection).max(0)
}

/// True when the side has fought `endurance_limit` or more rounds since its
/// last rest. A zero limit never forces rest.
pub fn check_endurance(rounds_since_last_rest: i32, endurance_limit: i32) -> bool {
    rounds_since_last_rest >= endurance_limit && endurance_limit > 0
}

/// Roll the death save: 2d6 × 10, success when the result is at most the
/// player's luck.
pub fn execute_death_save(luck: i32, roller: &mut impl Roller) -> (i32, bool) {
    let roll = roller.roll_2d6() * 10;
    (roll, roll <= luck)
}

/// Outcome of a single attack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttackResult {
    pub roll: i32,
    pub requirement: i32,
    pub hit: bool,
    pub damage_before_armor: i32,
    pub final_damage: i32,
    /// Target LP after the damage was applied. Only meaningful on a hit.
    pub target_lp: i32,
}

/// Begin an encounter: fix endurance limits, roll initiative, and hand the
/// first turn to the initiative winner.
pub fn start_combat(player: &Character, enemy: Enemy, roller: &mut impl Roller) -> CombatState {
    let endurance_limit = player.stamina / 10;
    let mut cs = CombatState::new(enemy, endurance_limit);

    let (player_init, enemy_init, player_first) = calculate_initiative(player, &cs.enemy, roller);
    cs.player_initiative = player_init;
    cs.enemy_initiative = enemy_init;
    cs.player_first_strike = player_first;
    cs.player_turn = player_first;

    cs
}

/// Resolve one player attack against the enemy. On a hit the enemy's LP is
/// reduced, floored at zero.
pub fn execute_player_attack(
    cs: &mut CombatState,
    player: &Character,
    roller: &mut impl Roller,
) -> AttackResult {
    let requirement = calculate_to_hit_requirement(player.skill, player.luck);
    let roll = roller.roll_2d6();
    let hit = roll >= requirement;

    let mut result = AttackResult {
        roll,
        requirement,
        hit,
        ..AttackResult::default()
    };

    if hit {
        let damage_before_armor =
            calculate_damage(roll, player.strength, player.weapon_damage_bonus());
        let final_damage = apply_armor_reduction(damage_before_armor, cs.enemy.armor_protection);

        cs.enemy.current_lp = (cs.enemy.current_lp - final_damage).max(0);

        result.damage_before_armor = damage_before_armor;
        result.final_damage = final_damage;
        result.target_lp = cs.enemy.current_lp;
    }

    result
}

/// Resolve one enemy attack against the player. On a hit the player's LP is
/// reduced and may go negative, which signals death-save eligibility.
pub fn execute_enemy_attack(
    cs: &mut CombatState,
    player: &mut Character,
    roller: &mut impl Roller,
) -> AttackResult {
    let requirement = calculate_to_hit_requirement(cs.enemy.skill, cs.enemy.luck);
    let roll = roller.roll_2d6();
    let hit = roll >= requirement;

    let mut result = AttackResult {
        roll,
        requirement,
        hit,
        ..AttackResult::default()
    };

    if hit {
        let damage_before_armor =
            calculate_damage(roll, cs.enemy.strength, cs.enemy.weapon_bonus);
        let final_damage = apply_armor_reduction(damage_before_armor, player.armor_protection());

        player.modify_lp(-final_damage);

        result.damage_before_armor = damage_before_armor;
        result.final_damage = final_damage;
        result.target_lp = player.current_lp;
    }

    result
}

/// Hand the turn to the other side. When control returns to whichever side
/// struck first, a full round has elapsed: the round counter and both
/// endurance trackers advance.
pub fn next_turn(cs: &mut CombatState) {
    cs.player_turn = !cs.player_turn;

    if cs.player_turn == cs.player_first_strike {
        cs.current_round += 1;
        cs.rounds_since_last_rest += 1;
        cs.enemy_rounds_since_last_rest += 1;
    }
}

/// The player forgoes attacking to rest, resetting their endurance counter.
pub fn process_rest(cs: &mut CombatState) {
    cs.rounds_since_last_rest = 0;
}

/// The enemy forgoes attacking to rest, resetting its endurance counter.
pub fn process_enemy_rest(cs: &mut CombatState) {
    cs.enemy_rounds_since_last_rest = 0;
}

/// True when the enemy has been beaten down to zero LP.
pub fn check_victory(cs: &CombatState) -> bool {
    cs.enemy.current_lp <= 0
}

/// True when the player is at zero LP or below.
pub fn check_defeat(player: &Character) -> bool {
    player.current_lp <= 0
}

/// Award the spoils of victory: one more enemy defeated, one more skill.
pub fn resolve_combat_victory(player: &mut Character) {
    player.increment_enemies_defeated();
    // Skill starts non-negative and only grows here; +1 cannot underflow.
    let _ = player.modify_skill(1);
}

/// Attempt the one-per-combat death save. A second attempt returns
/// `(0, false)` without consuming a roll.
///
/// On success the player returns to full LP and the encounter restarts:
/// round 1, both endurance counters cleared, initiative re-rolled (the
/// first striker may change). The enemy keeps its current LP.
pub fn attempt_death_save(
    player: &mut Character,
    cs: &mut CombatState,
    roller: &mut impl Roller,
) -> (i32, bool) {
    if cs.death_save_used {
        return (0, false);
    }

    let (roll, success) = execute_death_save(player.luck, roller);
    cs.death_save_used = true;

    if success {
        player.set_lp(player.maximum_lp);

        cs.current_round = 1;
        cs.rounds_since_last_rest = 0;
        cs.enemy_rounds_since_last_rest = 0;

        let (player_init, enemy_init, player_first) =
            calculate_initiative(player, &cs.enemy, roller);
        cs.player_initiative = player_init;
        cs.enemy_initiative = enemy_init;
        cs.player_first_strike = player_first;
        cs.player_turn = player_first;
    }

    (roll, success)
}
