use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Dice-rolling capability consumed by the combat and magic engines.
///
/// The generator is the only shared mutable resource in the core; inject a
/// single instance per session so a fixed seed reproduces a whole game.
pub trait Roller {
    /// Two six-sided dice summed (2..=12).
    fn roll_2d6(&mut self) -> i32;

    /// One six-sided die (1..=6).
    fn roll_1d6(&mut self) -> i32;

    /// Characteristic generation roll: 2d6 × 8 (16..=96, multiple of 8).
    /// Percentage-style values where 100 is unattainable.
    fn roll_characteristic(&mut self) -> i32 {
        self.roll_2d6() * 8
    }

    /// Reset the generator to a deterministic state.
    fn set_seed(&mut self, seed: u64);
}

/// Production roller backed by ChaCha8.
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    fn roll_die(&mut self, sides: i32) -> i32 {
        self.rng.gen_range(1..=sides)
    }
}

impl Roller for Dice {
    fn roll_2d6(&mut self) -> i32 {
        self.roll_die(6) + self.roll_die(6)
    }

    fn roll_1d6(&mut self) -> i32 {
        self.roll_die(6)
    }

    fn set_seed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }
}

/// Test roller replaying a fixed queue of results.
///
/// Every `roll_2d6`/`roll_1d6` call pops the front of the script; the roller
/// panics when the script runs dry, so a test also asserts exactly how many
/// rolls the code under test consumed.
pub struct ScriptedRoller {
    script: VecDeque<i32>,
}

impl ScriptedRoller {
    pub fn new(script: impl IntoIterator<Item = i32>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Rolls left in the script.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    fn next(&mut self) -> i32 {
        self.script.pop_front().expect("scripted roller exhausted")
    }
}

impl Roller for ScriptedRoller {
    fn roll_2d6(&mut self) -> i32 {
        self.next()
    }

    fn roll_1d6(&mut self) -> i32 {
        self.next()
    }

    fn set_seed(&mut self, _seed: u64) {}
}
