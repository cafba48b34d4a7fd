//! Fixed spell tables. Damage and healing figures are the averaged values
//! the simulator uses instead of rolling spell dice.

use crate::Ability;

/// Wizard slots per spell level, indexed by character level.
const WIZARD_SLOTS: [&[u32]; 21] = [
    &[0],
    &[3, 1],
    &[3, 2],
    &[3, 2, 2],
    &[4, 2, 3, 2],
    &[4, 2, 3, 3],
    &[4, 2, 3, 3],
    &[4, 2, 3, 3, 1],
    &[4, 2, 3, 3, 2],
    &[4, 2, 3, 3, 3, 1],
    &[5, 2, 3, 3, 3, 2],
    &[5, 2, 3, 3, 3, 2, 1],
    &[5, 2, 3, 3, 3, 2, 1],
    &[5, 2, 3, 3, 3, 2, 1, 1],
    &[5, 2, 3, 3, 3, 2, 1, 1],
    &[5, 2, 3, 3, 3, 2, 1, 1, 1],
    &[5, 2, 3, 3, 3, 2, 1, 1, 1],
    &[5, 2, 3, 3, 3, 2, 1, 1, 1, 1],
    &[5, 2, 3, 3, 3, 3, 1, 1, 1, 1],
    &[5, 2, 3, 3, 3, 3, 2, 1, 1, 1],
    &[5, 2, 3, 3, 3, 3, 2, 2, 1, 1],
];

/// Cleric slots per spell level, indexed by character level.
const CLERIC_SLOTS: [&[u32]; 21] = [
    &[0],
    &[3, 2],
    &[3, 3],
    &[3, 4, 2],
    &[4, 4, 3],
    &[4, 4, 3, 2],
    &[4, 4, 3, 3],
    &[4, 4, 3, 3, 1],
    &[4, 4, 3, 3, 2],
    &[4, 4, 3, 3, 3],
    &[5, 4, 3, 3, 3, 1],
    &[5, 4, 3, 3, 3, 1, 1],
    &[5, 4, 3, 3, 3, 1, 1],
    &[5, 4, 3, 3, 3, 1, 1, 1],
    &[5, 4, 3, 3, 3, 1, 1, 1],
    &[5, 4, 3, 3, 3, 1, 1, 1, 1],
    &[5, 4, 3, 3, 3, 1, 1, 1, 1],
    &[5, 4, 3, 3, 3, 1, 1, 1, 1, 1],
    &[5, 4, 3, 3, 3, 2, 1, 1, 1, 1],
    &[5, 4, 3, 3, 3, 2, 2, 1, 1, 1],
    &[5, 4, 3, 3, 3, 2, 2, 2, 1, 1],
];

pub fn wizard_slots(level: u32) -> Vec<u32> {
    WIZARD_SLOTS[(level as usize).min(20)].to_vec()
}

pub fn cleric_slots(level: u32) -> Vec<u32> {
    CLERIC_SLOTS[(level as usize).min(20)].to_vec()
}

/// How a single-target spell lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Spell attack roll against AC.
    Attack,
    /// Target saves with the given ability.
    Save(Ability),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageSpell {
    pub name: &'static str,
    pub damage: i32,
    pub delivery: Delivery,
}

/// Area spells start at 3rd level; every opponent saves.
pub fn wizard_area(level: usize) -> Option<DamageSpell> {
    let (name, damage, save) = match level {
        3 => ("Fireball", 28, Ability::Dex),
        4 => ("Fireball", 31, Ability::Dex),
        5 => ("Cone of Cold", 36, Ability::Con),
        6 => ("Cone of Cold", 40, Ability::Con),
        7 => ("Delayed Blast Fireball", 49, Ability::Dex),
        8 => ("Delayed Blast Fireball", 63, Ability::Dex),
        9 => ("Meteor Swarm", 140, Ability::Dex),
        _ => return None,
    };
    Some(DamageSpell {
        name,
        damage,
        delivery: Delivery::Save(save),
    })
}

pub fn wizard_single(level: usize) -> DamageSpell {
    use Delivery::*;
    let (name, damage, delivery) = match level {
        0 => ("Fire Bolt", 6, Attack),
        1 => ("Magic Missile", 12, Attack),
        2 => ("Acid Arrow", 15, Attack),
        3 => ("Acid Arrow", 20, Attack),
        4 => ("Blight", 36, Save(Ability::Con)),
        5 => ("Blight", 41, Save(Ability::Con)),
        6 => ("Disintegrate", 75, Save(Ability::Dex)),
        7 => ("Disintegrate", 85, Save(Ability::Dex)),
        8 => ("Disintegrate", 96, Save(Ability::Dex)),
        _ => ("Disintegrate", 107, Save(Ability::Dex)),
    };
    DamageSpell {
        name,
        damage,
        delivery,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealSpell {
    pub name: &'static str,
    pub heal: i32,
}

/// Party-wide healing, available from 3rd-level slots.
pub fn cleric_mass_heal(level: usize) -> Option<HealSpell> {
    let (name, heal) = match level {
        3 => ("Mass Healing Word", 3),
        4 => ("Mass Healing Word", 5),
        5 => ("Mass Cure Wounds", 14),
        6 => ("Mass Cure Wounds", 18),
        7 => ("Mass Cure Wounds", 23),
        8 => ("Mass Cure Wounds", 27),
        9 => ("Mass Heal", 700),
        _ => return None,
    };
    Some(HealSpell { name, heal })
}

pub fn cleric_single_heal(level: usize) -> HealSpell {
    let (name, heal) = match level {
        0 => ("Virtue", 3),
        1 => ("Cure Wounds", 5),
        2 => ("Cure Wounds", 9),
        3 => ("Cure Wounds", 14),
        4 => ("Cure Wounds", 18),
        5 => ("Cure Wounds", 23),
        6 => ("Heal", 70),
        7 => ("Heal", 80),
        8 => ("Heal", 90),
        _ => ("Heal", 100),
    };
    HealSpell { name, heal }
}

/// Slot level spent to bring a fallen ally back.
pub const REVIVAL_SLOT: usize = 4;
