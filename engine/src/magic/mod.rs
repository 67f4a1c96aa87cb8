//! The spell catalog, cast validation, and per-spell effect resolution.

pub mod casting;
pub mod effects;
pub mod spells;

pub use casting::{
    CastResult, calculate_sacrifice_needed, can_afford_spell, can_sacrifice_lp,
    fundamental_failure_rate, natural_inclination_check, perform_cast, validate_cast,
};
pub use effects::{SpellEffect, resolve_effect};
pub use spells::{ALL_SPELLS, Spell, SpellCategory, available_spells, spell_by_name};
