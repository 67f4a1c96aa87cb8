use thiserror::Error;

use crate::character::Characteristic;

/// Rejections from constructors and domain-rule mutators.
///
/// Every variant leaves the state it guarded unchanged. Combat misses, FFR
/// fizzles, and insufficient-power outcomes are NOT errors; they travel in
/// the result records the caller renders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{0} cannot be negative: {1}")]
    NegativeCharacteristic(Characteristic, i32),

    #[error("{0} exceeds maximum (999): {1}")]
    CharacteristicTooHigh(Characteristic, i32),

    #[error("{0} cannot be negative (would be {1})")]
    CharacteristicUnderflow(Characteristic, i32),

    #[error("skill cannot be negative (would be {0})")]
    SkillUnderflow(i32),

    #[error("{what} cannot be negative: {value}")]
    NegativeValue { what: &'static str, value: i32 },

    #[error("enemy name cannot be empty")]
    EmptyEnemyName,

    #[error("enemy {what} cannot be negative: {value}")]
    NegativeEnemyStat { what: &'static str, value: i32 },

    #[error("enemy maximum LP must be positive: {0}")]
    NonPositiveMaximumLp(i32),

    #[error("healing stone is already fully charged")]
    HealingStoneFull,

    #[error("healing stone is depleted")]
    HealingStoneDepleted,

    #[error("already at full health")]
    AlreadyAtFullHealth,

    #[error("the orb is not possessed")]
    OrbNotPossessed,

    #[error("the orb has been destroyed")]
    OrbDestroyed,

    #[error("unequip the orb before throwing it")]
    OrbStillEquipped,
}
