use serde::{Deserialize, Serialize};

use crate::ability_bonus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Str,
        Ability::Dex,
        Ability::Con,
        Ability::Int,
        Ability::Wis,
        Ability::Cha,
    ];
}

/// One integer per ability. Used for raw scores as well as the derived
/// bonus and saving-throw tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AbilityScores {
    #[serde(rename = "str")]
    pub str_: i32,
    pub dex: i32,
    pub con: i32,
    #[serde(rename = "int")]
    pub int_: i32,
    pub wis: i32,
    pub cha: i32,
}

impl AbilityScores {
    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Str => self.str_,
            Ability::Dex => self.dex,
            Ability::Con => self.con,
            Ability::Int => self.int_,
            Ability::Wis => self.wis,
            Ability::Cha => self.cha,
        }
    }

    pub fn get_mut(&mut self, ability: Ability) -> &mut i32 {
        match ability {
            Ability::Str => &mut self.str_,
            Ability::Dex => &mut self.dex,
            Ability::Con => &mut self.con,
            Ability::Int => &mut self.int_,
            Ability::Wis => &mut self.wis,
            Ability::Cha => &mut self.cha,
        }
    }

    pub fn bonuses(&self) -> AbilityScores {
        self.map(ability_bonus)
    }

    pub fn map(&self, f: impl Fn(i32) -> i32) -> AbilityScores {
        AbilityScores {
            str_: f(self.str_),
            dex: f(self.dex),
            con: f(self.con),
            int_: f(self.int_),
            wis: f(self.wis),
            cha: f(self.cha),
        }
    }

    /// Element-wise sum, e.g. ability bonus plus save proficiency.
    pub fn plus(&self, other: &AbilityScores) -> AbilityScores {
        let mut out = *self;
        for ability in Ability::ALL {
            *out.get_mut(ability) += other.get(ability);
        }
        out
    }
}
