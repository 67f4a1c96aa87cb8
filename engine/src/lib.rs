//! Rules engine for a "Sagas of the Demonspawn" companion: characteristic
//! generation, turn-based combat adjudication, and the ten-spell magic
//! system. Presentation and persistence live with the caller; this crate
//! only reads and mutates the state it is handed.

pub mod api;
pub mod character;
pub mod combat;
pub mod content;
pub mod dice;
pub mod error;
pub mod items;
pub mod magic;

pub use character::{Character, Characteristic};
pub use combat::{
    AttackResult, CombatOutcome, CombatPhase, CombatState, Enemy, apply_armor_reduction,
    attempt_death_save, calculate_damage, calculate_initiative, calculate_to_hit_requirement,
    check_defeat, check_endurance, check_victory, execute_death_save, execute_enemy_attack,
    execute_player_attack, next_turn, process_enemy_rest, process_rest, resolve_combat_victory,
    start_combat,
};
pub use dice::{Dice, Roller, ScriptedRoller};
pub use error::EngineError;
pub use items::{Armor, Weapon};
pub use magic::{CastResult, Spell, SpellCategory, SpellEffect};
