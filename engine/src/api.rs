use std::fs;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::character::Character;
use crate::combat::{
    AttackResult, CombatOutcome, CombatPhase, CombatState, Enemy, attempt_death_save,
    execute_enemy_attack, execute_player_attack, next_turn, process_enemy_rest, process_rest,
    resolve_combat_victory, start_combat,
};
use crate::content;
use crate::dice::Dice;
use crate::items::{DOOMBRINGER_NAME, find_armor, find_weapon, load_armor, load_weapons};

pub const PLAYER_NAME: &str = "Fire*Wolf";

/// LP drained by Doombringer before every swing.
pub const DOOMBRINGER_BLOOD_PRICE: i32 = 10;

const DEFAULT_MAX_ROUNDS: i32 = 100;

fn default_weapon() -> String {
    "Sword".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_rounds() -> i32 {
    DEFAULT_MAX_ROUNDS
}

/// Configuration for an automatic encounter run.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EncounterConfig {
    /// Builtin enemy id (see [`content::builtin_enemies`]).
    pub enemy_id: Option<String>,
    /// Path to an enemy JSON file; takes precedence over `enemy_id`.
    pub enemy_path: Option<String>,
    #[serde(default)]
    pub seed: u64,
    /// Weapon the player wields, by catalog name.
    #[serde(default = "default_weapon")]
    pub weapon: String,
    /// Armor worn, by catalog name; none when absent.
    #[serde(default)]
    pub armor: Option<String>,
    #[serde(default)]
    pub shield: bool,
    /// Wield Doombringer instead of `weapon` (blood price and on-hit heal).
    #[serde(default)]
    pub doombringer: bool,
    /// Hold The Orb in the left hand (doubles damage against Demonspawn).
    #[serde(default)]
    pub orb_equipped: bool,
    #[serde(default = "default_true")]
    pub allow_death_save: bool,
    #[serde(default = "default_max_rounds")]
    pub max_rounds: i32,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            enemy_id: Some("goblin".to_string()),
            enemy_path: None,
            seed: 0,
            weapon: default_weapon(),
            armor: None,
            shield: false,
            doombringer: false,
            orb_equipped: false,
            allow_death_save: true,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

/// Summary of a finished encounter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EncounterResult {
    pub winner: String,
    pub outcome: CombatOutcome,
    pub rounds: i32,
    pub player_lp_end: i32,
    pub enemy_lp_end: i32,
    pub death_save_spent: bool,
    pub log: Vec<String>,
}

/// The baked-in sample player used by the CLI harness and tests.
pub fn sample_firewolf() -> Character {
    // Validated literal ranges; cannot fail.
    Character::new(64, 56, 72, 48, 80, 40, 56).expect("sample characteristics are in range")
}

/// Load an enemy from a JSON file path or a builtin id.
pub fn load_enemy(cfg: &EncounterConfig) -> Result<Enemy> {
    let text: String = if let Some(path) = &cfg.enemy_path {
        fs::read_to_string(path).with_context(|| format!("failed to read enemy JSON: {path}"))?
    } else if let Some(id) = &cfg.enemy_id {
        match content::builtin_enemies().get(id.as_str()) {
            Some(json) => (*json).to_string(),
            None => bail!("unknown builtin enemy '{id}'"),
        }
    } else {
        bail!("encounter config names no enemy");
    };

    let enemy: Enemy = serde_json::from_str(&text).context("failed to parse enemy JSON")?;
    enemy.validate()?;
    Ok(enemy)
}

fn outfit_player(player: &mut Character, cfg: &EncounterConfig) -> Result<()> {
    let weapons = load_weapons(content::builtin_weapons())?;

    if cfg.doombringer {
        player.acquire_doombringer();
        let doombringer = find_weapon(&weapons, DOOMBRINGER_NAME)
            .cloned()
            .context("Doombringer missing from weapon catalog")?;
        player.equip_weapon(Some(doombringer));
    } else {
        let weapon = find_weapon(&weapons, &cfg.weapon)
            .cloned()
            .with_context(|| format!("weapon '{}' not found", cfg.weapon))?;
        player.equip_weapon(Some(weapon));
    }

    if let Some(name) = &cfg.armor {
        let catalog = load_armor(content::builtin_armor())?;
        let armor = find_armor(&catalog, name)
            .cloned()
            .with_context(|| format!("armor '{name}' not found"))?;
        player.equip_armor(Some(armor));
    }

    if cfg.shield {
        player.toggle_shield();
    }

    if cfg.orb_equipped {
        player.acquire_orb();
        player.equip_orb()?;
    }

    Ok(())
}

/// Run a whole encounter between the sample player and the configured
/// enemy, driving the combat state machine to a terminal outcome.
///
/// The base engine exposes only hit/damage primitives; the item layers live
/// here: Doombringer's blood price and on-hit heal, and The Orb's damage
/// doubling against Demonspawn.
pub fn simulate_encounter(cfg: EncounterConfig) -> Result<EncounterResult> {
    let mut player = sample_firewolf();
    outfit_player(&mut player, &cfg)?;

    let enemy = load_enemy(&cfg)?;
    let enemy_name = enemy.name.clone();

    let mut rng = Dice::from_seed(cfg.seed);
    let mut cs = start_combat(&player, enemy, &mut rng);

    cs.add_log_entry(format!(
        "[START] {} (LP {}/{}) vs {} (LP {}/{})",
        PLAYER_NAME,
        player.current_lp,
        player.maximum_lp,
        enemy_name,
        cs.enemy.current_lp,
        cs.enemy.maximum_lp
    ));
    log_initiative(&mut cs, &enemy_name);

    loop {
        let phase = cs.phase(&player);
        debug!(round = cs.current_round, ?phase, "combat step");

        match phase {
            CombatPhase::Ended(_) => break,
            CombatPhase::VictoryPending => {
                resolve_combat_victory(&mut player);
                cs.end_combat(CombatOutcome::Victory);
                let round = cs.current_round;
                let skill = player.skill;
                cs.add_log_entry(format!(
                    "[VICTORY] {enemy_name} falls in round {round}! Skill rises to {skill}."
                ));
            }
            CombatPhase::DeathSaveOffered => {
                if !cfg.allow_death_save {
                    cs.end_combat(CombatOutcome::Defeat);
                    cs.add_log_entry(format!("[DEFEAT] {PLAYER_NAME} has been slain!"));
                    continue;
                }
                let (roll, success) = attempt_death_save(&mut player, &mut cs, &mut rng);
                let luck = player.luck;
                if success {
                    cs.add_log_entry(format!(
                        "[DEATHSAVE] roll={roll} vs luck {luck} → the gods relent! LP restored, combat begins anew."
                    ));
                    log_initiative(&mut cs, &enemy_name);
                } else {
                    cs.add_log_entry(format!(
                        "[DEATHSAVE] roll={roll} vs luck {luck} → no reprieve."
                    ));
                }
            }
            CombatPhase::DefeatPending => {
                cs.end_combat(CombatOutcome::Defeat);
                cs.add_log_entry(format!("[DEFEAT] {PLAYER_NAME} has been slain!"));
            }
            CombatPhase::PlayerRestPending => {
                let round = cs.current_round;
                cs.add_log_entry(format!(
                    "[REST][{PLAYER_NAME}] R{round}: exhausted, forgoes the attack to rest"
                ));
                process_rest(&mut cs);
                next_turn(&mut cs);
            }
            CombatPhase::EnemyRestPending => {
                let round = cs.current_round;
                cs.add_log_entry(format!(
                    "[REST][{enemy_name}] R{round}: exhausted, forgoes the attack to rest"
                ));
                process_enemy_rest(&mut cs);
                next_turn(&mut cs);
            }
            CombatPhase::PlayerActing => {
                if player_swing(&mut cs, &mut player, &mut rng, &cfg, &enemy_name) {
                    next_turn(&mut cs);
                }
            }
            CombatPhase::EnemyActing => {
                let result = execute_enemy_attack(&mut cs, &mut player, &mut rng);
                log_attack(&mut cs, &enemy_name, PLAYER_NAME, &result);
                next_turn(&mut cs);
            }
        }

        if cs.is_active && cs.current_round > cfg.max_rounds {
            cs.end_combat(CombatOutcome::Fled);
            cs.add_log_entry(format!(
                "[FLEE] {} rounds without a decision; {} breaks off the fight",
                cfg.max_rounds, PLAYER_NAME
            ));
        }
    }

    let outcome = cs.outcome.unwrap_or(CombatOutcome::Fled);
    let winner = match outcome {
        CombatOutcome::Victory => "player",
        CombatOutcome::Defeat => "enemy",
        CombatOutcome::Fled => "none",
    };

    Ok(EncounterResult {
        winner: winner.to_string(),
        outcome,
        rounds: cs.current_round,
        player_lp_end: player.current_lp,
        enemy_lp_end: cs.enemy.current_lp,
        death_save_spent: cs.death_save_used,
        log: cs.combat_log,
    })
}

/// One player attack with the item layers applied around the base
/// primitive. Returns false when the player fell to the blood price and
/// the turn must not advance normally.
fn player_swing(
    cs: &mut CombatState,
    player: &mut Character,
    rng: &mut Dice,
    cfg: &EncounterConfig,
    enemy_name: &str,
) -> bool {
    let doombringer_wielded = cfg.doombringer
        && player.equipped_weapon.as_ref().is_some_and(|w| w.special);

    if doombringer_wielded {
        player.modify_lp(-DOOMBRINGER_BLOOD_PRICE);
        let round = cs.current_round;
        cs.add_log_entry(format!(
            "[R{round}] Doombringer thirsts for blood... -{DOOMBRINGER_BLOOD_PRICE} LP"
        ));
        if player.current_lp <= 0 {
            cs.add_log_entry("[Doombringer] The blade has drained your life!".to_string());
            return false;
        }
    }

    let enemy_lp_before = cs.enemy.current_lp;
    let mut result = execute_player_attack(cs, player, rng);

    if result.hit {
        // The Orb: damage doubled while held against a Demonspawn.
        if player.orb_equipped && cs.enemy.is_demonspawn && result.final_damage > 0 {
            let extra = result.final_damage;
            cs.enemy.current_lp = (cs.enemy.current_lp - extra).max(0);
            let round = cs.current_round;
            let doubled = result.final_damage * 2;
            cs.add_log_entry(format!(
                "[R{round}] The Orb pulses with power! Damage doubled: {} → {doubled}",
                result.final_damage
            ));
            result.final_damage = doubled;
            result.target_lp = cs.enemy.current_lp;
        }

        log_attack(cs, PLAYER_NAME, enemy_name, &result);

        // Doombringer soul thirst: heal LP equal to the damage dealt,
        // capped at the enemy's pre-hit LP and the player's maximum.
        if doombringer_wielded && result.final_damage > 0 {
            let mut heal = result.final_damage.min(enemy_lp_before);
            heal = heal.min(player.maximum_lp - player.current_lp);
            let round = cs.current_round;
            if heal > 0 {
                player.modify_lp(heal);
                cs.add_log_entry(format!(
                    "[R{round}] Doombringer feeds on pain... +{heal} LP healed!"
                ));
            } else {
                cs.add_log_entry(format!(
                    "[R{round}] Doombringer feeds on pain... (already at maximum LP)"
                ));
            }
        }
    } else {
        log_attack(cs, PLAYER_NAME, enemy_name, &result);
        if doombringer_wielded {
            let round = cs.current_round;
            cs.add_log_entry(format!("[R{round}] No healing from Doombringer on miss"));
        }
    }

    true
}

fn log_initiative(cs: &mut CombatState, enemy_name: &str) {
    let (pi, ei) = (cs.player_initiative, cs.enemy_initiative);
    let first = if cs.player_first_strike {
        PLAYER_NAME
    } else {
        enemy_name
    };
    cs.add_log_entry(format!(
        "[INIT] {PLAYER_NAME} {pi} vs {enemy_name} {ei} → {first} strikes first"
    ));
}

fn log_attack(cs: &mut CombatState, attacker: &str, target: &str, result: &AttackResult) {
    let round = cs.current_round;
    if result.hit {
        cs.add_log_entry(format!(
            "[ATTACK][{attacker}] R{round}: roll={} vs need {} → HIT for {} ({} before armor); {target} at {} LP",
            result.roll,
            result.requirement,
            result.final_damage,
            result.damage_before_armor,
            result.target_lp
        ));
    } else {
        cs.add_log_entry(format!(
            "[ATTACK][{attacker}] R{round}: roll={} vs need {} → MISS",
            result.roll, result.requirement
        ));
    }
}
