use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::actor::{MonsterKit, SpecialAbility, SpecialTarget};
use crate::conditions::Affliction;
use crate::error::EncounterError;
use crate::{AbilityScores, Actor, ActorKind};

const BUILTIN_BESTIARY: &str = include_str!("../content/monsters.json");

/// Stat block of one adversary type as stored in a bestiary file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterRecord {
    pub stats: AbilityScores,
    /// Proficiency added on top of the ability bonus for each save.
    #[serde(default)]
    pub saves: AbilityScores,
    pub ac: i32,
    pub hp: i32,
    #[serde(default)]
    pub status: Affliction,
    pub atk: i32,
    pub actions: u32,
    /// Damage of each attack, in the order the monster uses them.
    pub attacks: Vec<i32>,
    #[serde(default)]
    pub special: Option<SpecialAbility>,
    #[serde(default)]
    pub dodge: bool,
}

impl MonsterRecord {
    /// Reject records the combat rules cannot run safely.
    pub fn validate(&self, name: &str) -> Result<(), EncounterError> {
        if self.actions == 0 {
            return Err(EncounterError::monster(name, "actions must be at least 1"));
        }
        if self.attacks.len() < self.actions as usize {
            return Err(EncounterError::monster(
                name,
                format!(
                    "{} actions but only {} attack entries",
                    self.actions,
                    self.attacks.len()
                ),
            ));
        }
        if !self.status.status.is_normal() && self.status.save.is_none() {
            return Err(EncounterError::monster(
                name,
                "starting status needs a save ability to clear it",
            ));
        }
        if let Some(special) = &self.special {
            if special.cooldown == 0 {
                return Err(EncounterError::monster(
                    name,
                    format!("special '{}' has a cooldown of 0", special.name),
                ));
            }
            if special.targets != SpecialTarget::SelfOnly && special.save.is_none() {
                return Err(EncounterError::monster(
                    name,
                    format!("special '{}' forces a save but names no ability", special.name),
                ));
            }
        }
        Ok(())
    }

    /// Instantiate one combatant called `name` from this record.
    pub fn spawn(&self, name: &str) -> Actor {
        let bonus = self.stats.bonuses();
        Actor {
            name: name.to_string(),
            level: 0,
            scores: self.stats,
            bonus,
            saves: bonus.plus(&self.saves),
            hp: self.hp,
            max_hp: self.hp,
            ac: self.ac,
            affliction: self.status.clone(),
            attack_bonus: self.atk,
            actions: self.actions,
            crit: 20,
            dodge: self.dodge,
            kind: ActorKind::Monster(MonsterKit {
                attacks: self.attacks.clone(),
                special: self.special.clone(),
            }),
        }
    }
}

/// Adversary stat blocks by type name, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bestiary {
    monsters: IndexMap<String, MonsterRecord>,
}

impl Bestiary {
    pub fn builtin() -> Result<Self, EncounterError> {
        Self::from_json_str(BUILTIN_BESTIARY)
    }

    pub fn from_json_str(text: &str) -> Result<Self, EncounterError> {
        let bestiary: Bestiary = serde_json::from_str(text)?;
        bestiary.validate()?;
        Ok(bestiary)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, EncounterError> {
        let bestiary: Bestiary = serde_yaml::from_str(text)?;
        bestiary.validate()?;
        Ok(bestiary)
    }

    pub fn validate(&self) -> Result<(), EncounterError> {
        for (name, record) in &self.monsters {
            record.validate(name)?;
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&MonsterRecord> {
        self.monsters.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, record: MonsterRecord) {
        self.monsters.insert(name.into(), record);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.monsters.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MonsterRecord)> {
        self.monsters.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }
}
