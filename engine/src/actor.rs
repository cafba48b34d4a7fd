use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::conditions::{Affliction, Status};
use crate::error::EncounterError;
use crate::{Ability, AbilityScores};

/// The four player character classes a party can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Cleric,
    Fighter,
    Rogue,
    Wizard,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [
        Archetype::Cleric,
        Archetype::Fighter,
        Archetype::Rogue,
        Archetype::Wizard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Cleric => "cleric",
            Archetype::Fighter => "fighter",
            Archetype::Rogue => "rogue",
            Archetype::Wizard => "wizard",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = EncounterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cleric" => Ok(Archetype::Cleric),
            "fighter" => Ok(Archetype::Fighter),
            "rogue" => Ok(Archetype::Rogue),
            "wizard" => Ok(Archetype::Wizard),
            _ => Err(EncounterError::UnknownArchetype(s.to_string())),
        }
    }
}

/// Spell slots per spell level; index 0 holds cantrip uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spellbook {
    pub slots: Vec<u32>,
    pub spell_attack: i32,
    pub spell_dc: i32,
}

impl Spellbook {
    /// Highest spell level the wizard progression still has a slot for.
    pub fn top_level(&self) -> Option<usize> {
        self.slots.len().checked_sub(1)
    }

    /// Spell levels that still hold at least one slot, ascending.
    pub fn available_levels(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, n)| **n > 0)
            .map(|(lvl, _)| lvl)
            .collect()
    }

    pub fn has_slot(&self, level: usize) -> bool {
        self.slots.get(level).is_some_and(|n| *n > 0)
    }

    pub fn spend(&mut self, level: usize) {
        if let Some(n) = self.slots.get_mut(level) {
            *n = n.saturating_sub(1);
        }
    }

    /// Spend one slot of the top level; the level disappears once exhausted.
    pub fn spend_top(&mut self) {
        match self.slots.last_mut() {
            Some(n) if *n > 1 => *n -= 1,
            Some(_) => {
                self.slots.pop();
            }
            None => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterPool {
    /// Failed saving throws that may be rerolled.
    pub rerolls: u32,
    /// Actions that may be refunded after being spent.
    pub surges: u32,
    /// One-shot heal applied instead of an attack while injured.
    pub banked_heal: i32,
    /// Free heal taken at the start of a turn below half HP.
    pub rally: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClericPool {
    pub book: Spellbook,
    /// Extra weapon damage from divine strikes.
    pub bonus_damage: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoguePool {
    /// d6 dice of precision damage.
    pub precision_dice: u32,
    /// Precision dice plus attack bonus, rolled once when the rogue is built
    /// and added to every hit.
    pub precision_damage: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialTarget {
    #[serde(rename = "self")]
    SelfOnly,
    One,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialAbility {
    pub name: String,
    /// Usable on rounds that are a multiple of this.
    pub cooldown: u32,
    pub targets: SpecialTarget,
    #[serde(default)]
    pub dc: i32,
    #[serde(default)]
    pub save: Option<Ability>,
    /// Damage dealt, or HP restored for self-targeted abilities.
    #[serde(rename = "dmg", default)]
    pub damage: i32,
    #[serde(default)]
    pub effect: Option<Status>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterKit {
    /// Damage of each attack slot, spent in order each turn.
    pub attacks: Vec<i32>,
    pub special: Option<SpecialAbility>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ActorKind {
    Wizard(Spellbook),
    Fighter(FighterPool),
    Cleric(ClericPool),
    Rogue(RoguePool),
    Monster(MonsterKit),
}

impl ActorKind {
    pub fn archetype(&self) -> Option<Archetype> {
        match self {
            ActorKind::Wizard(_) => Some(Archetype::Wizard),
            ActorKind::Fighter(_) => Some(Archetype::Fighter),
            ActorKind::Cleric(_) => Some(Archetype::Cleric),
            ActorKind::Rogue(_) => Some(Archetype::Rogue),
            ActorKind::Monster(_) => None,
        }
    }

    /// Save rerolls available to this kind; only fighters carry any.
    pub fn rerolls_mut(&mut self) -> Option<&mut u32> {
        match self {
            ActorKind::Fighter(pool) => Some(&mut pool.rerolls),
            _ => None,
        }
    }
}

/// A combatant on either side of an encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub level: u32,
    pub scores: AbilityScores,
    pub bonus: AbilityScores,
    pub saves: AbilityScores,
    pub hp: i32,
    pub max_hp: i32,
    pub ac: i32,
    #[serde(default)]
    pub affliction: Affliction,
    pub attack_bonus: i32,
    pub actions: u32,
    pub crit: i32,
    #[serde(default)]
    pub dodge: bool,
    #[serde(flatten)]
    pub kind: ActorKind,
}

impl Actor {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_injured(&self) -> bool {
        self.hp < self.max_hp
    }

    pub fn archetype(&self) -> Option<Archetype> {
        self.kind.archetype()
    }
}
