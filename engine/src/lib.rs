use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod abilities;
pub mod actor;
pub mod api;
pub mod builder;
pub mod combat;
pub mod conditions;
pub mod content;
pub mod error;
pub mod life;
pub mod spells;

pub use abilities::{Ability, AbilityScores};
pub use actor::{Actor, ActorKind, Archetype};
pub use combat::encounter::{Encounter, EncounterOutcome, SurvivorHp, Survivors};
pub use combat::state::{ActorKey, CombatState, Side};
pub use conditions::{Affliction, Status};
pub use error::EncounterError;

enum Source {
    Seeded(ChaCha8Rng),
    /// Replays a fixed roll list, cycling once exhausted.
    Scripted { rolls: VecDeque<i32>, played: Vec<i32> },
}

/// The single source of randomness for an encounter.
pub struct Dice {
    source: Source,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: Source::Seeded(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Dice that return `rolls` in order regardless of the die size asked for.
    pub fn from_scripted(rolls: Vec<i32>) -> Self {
        Self {
            source: Source::Scripted {
                rolls: rolls.into(),
                played: Vec::new(),
            },
        }
    }

    /// Uniform roll in `1..=sides`.
    pub fn roll_die(&mut self, sides: u32) -> i32 {
        let sides = sides.max(1);
        match &mut self.source {
            Source::Seeded(rng) => rng.gen_range(1..=sides) as i32,
            Source::Scripted { rolls, played } => {
                if rolls.is_empty() {
                    rolls.extend(played.drain(..));
                }
                match rolls.pop_front() {
                    Some(roll) => {
                        played.push(roll);
                        roll
                    }
                    None => 1,
                }
            }
        }
    }

    /// Sum of `count` independent rolls of a `sides`-sided die.
    pub fn roll_sum(&mut self, count: u32, sides: u32) -> i32 {
        (0..count).map(|_| self.roll_die(sides)).sum()
    }

    pub fn d20(&mut self) -> i32 {
        self.roll_die(20)
    }

    /// Uniform index into a collection of `len` candidates. A single
    /// candidate is returned without consuming a roll.
    pub fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let roll = self.roll_die(len as u32) - 1;
        (roll.max(0) as usize).min(len - 1)
    }
}

/// Ability bonus: floor((score - 10) / 2), collapsed into -5..=5.
pub fn ability_bonus(score: i32) -> i32 {
    // `div_euclid` with positive divisor matches mathematical floor division.
    (score - 10).div_euclid(2).clamp(-5, 5)
}
