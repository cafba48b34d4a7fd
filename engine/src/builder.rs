//! Builds level-appropriate player characters from a fixed stat array.

use crate::actor::{ClericPool, FighterPool, RoguePool, Spellbook};
use crate::conditions::Affliction;
use crate::error::EncounterError;
use crate::spells::{cleric_slots, wizard_slots};
use crate::{Ability, AbilityScores, Actor, ActorKind, Archetype, Dice};

/// Standard array every class starts from, best score first.
const BASE_ARRAY: [i32; 6] = [17, 14, 14, 12, 12, 9];

pub const MAX_LEVEL: u32 = 20;

pub fn proficiency(level: u32) -> i32 {
    2 + (level.min(19) / 4) as i32
}

/// Base array after ability score improvements for `level`.
fn improved_array(level: u32) -> [i32; 6] {
    let mut array = BASE_ARRAY;
    let (first, second, fifth) = match level {
        17.. => (3, 3, 2),
        14..=16 => (3, 2, 1),
        8..=13 => (3, 1, 0),
        4..=7 => (2, 0, 0),
        _ => (0, 0, 0),
    };
    array[0] += first;
    array[1] += second;
    array[4] += fifth;
    array
}

/// Assign the improved array to abilities in priority order.
fn assign(level: u32, order: [Ability; 6]) -> AbilityScores {
    let array = improved_array(level);
    let mut scores = AbilityScores::default();
    for (ability, score) in order.into_iter().zip(array) {
        *scores.get_mut(ability) = score;
    }
    scores
}

fn save_table(bonus: &AbilityScores, proficient: &[Ability], pro: i32) -> AbilityScores {
    let mut saves = *bonus;
    for ability in proficient {
        *saves.get_mut(*ability) += pro;
    }
    saves
}

fn roll_hp(dice: &mut Dice, level: u32, hit_die: u32, con: i32) -> i32 {
    hit_die as i32 + con + dice.roll_sum(level, hit_die) + level as i32 * con
}

/// Build a fresh character of `archetype` at `level`. Hit points are rolled
/// on `dice`.
pub fn build_character(
    archetype: Archetype,
    level: u32,
    name: &str,
    dice: &mut Dice,
) -> Result<Actor, EncounterError> {
    if !(1..=MAX_LEVEL).contains(&level) {
        return Err(EncounterError::LevelOutOfRange(level));
    }
    let actor = match archetype {
        Archetype::Wizard => wizard(level, name, dice),
        Archetype::Fighter => fighter(level, name, dice),
        Archetype::Cleric => cleric(level, name, dice),
        Archetype::Rogue => rogue(level, name, dice),
    };
    tracing::debug!(
        name,
        %archetype,
        level,
        hp = actor.hp,
        ac = actor.ac,
        "built character"
    );
    Ok(actor)
}

fn blank(name: &str, level: u32, scores: AbilityScores, saves: AbilityScores, kind: ActorKind) -> Actor {
    Actor {
        name: name.to_string(),
        level,
        scores,
        bonus: scores.bonuses(),
        saves,
        hp: 0,
        max_hp: 0,
        ac: 10,
        affliction: Affliction::default(),
        attack_bonus: 0,
        actions: 1,
        crit: 20,
        dodge: false,
        kind,
    }
}

fn wizard(level: u32, name: &str, dice: &mut Dice) -> Actor {
    use Ability::*;
    let pro = proficiency(level);
    let scores = assign(level, [Int, Wis, Con, Cha, Dex, Str]);
    let bonus = scores.bonuses();
    let saves = save_table(&bonus, &[Int, Wis], pro);

    let spell_attack = pro + bonus.int_;
    let mut slots = wizard_slots(level);
    if level >= 18 {
        slots[0] += 1;
        slots[1] += 1;
    }
    if level == 20 {
        slots[3] += 2;
    }

    let mut actor = blank(
        name,
        level,
        scores,
        saves,
        ActorKind::Wizard(Spellbook {
            slots,
            spell_attack,
            spell_dc: 8 + spell_attack,
        }),
    );
    actor.max_hp = roll_hp(dice, level, 6, bonus.con);
    actor.hp = actor.max_hp;
    actor.ac = 17 + bonus.dex;
    actor.attack_bonus = pro + bonus.str_;
    actor
}

fn fighter(level: u32, name: &str, dice: &mut Dice) -> Actor {
    use Ability::*;
    let pro = proficiency(level);
    let scores = assign(level, [Str, Con, Dex, Cha, Wis, Int]);
    let bonus = scores.bonuses();
    let saves = save_table(&bonus, &[Str, Con], pro);

    // (armor base, shield+style, extra actions, surges, rerolls, crit)
    let (armor, shield, extra, surges, rerolls, crit) = match level {
        17..=20 => (18, 4, 2, 1, 3, 18),
        15..=16 => (18, 4, 2, 1, 2, 18),
        13..=14 => (17, 4, 2, 1, 2, 19),
        11..=12 => (17, 4, 2, 1, 1, 19),
        10 => (17, 4, 1, 1, 1, 19),
        9 => (16, 3, 1, 1, 1, 19),
        5..=8 => (16, 3, 1, 1, 0, 19),
        3..=4 => (14, 3, 0, 1, 0, 19),
        2 => (14, 3, 0, 1, 0, 20),
        _ => (14, 3, 0, 0, 0, 20),
    };
    let (extra, surges) = if level == 20 {
        (extra + 1, surges + 1)
    } else {
        (extra, surges)
    };
    let rally = (level >= 18).then_some(bonus.con + 5);
    let max_hp = roll_hp(dice, level, 8, bonus.con);
    let banked_heal = if level == 20 {
        dice.roll_die(10) + level as i32
    } else {
        0
    };

    let mut actor = blank(
        name,
        level,
        scores,
        saves,
        ActorKind::Fighter(FighterPool {
            rerolls,
            surges,
            banked_heal,
            rally,
        }),
    );
    actor.max_hp = max_hp;
    actor.hp = max_hp;
    actor.ac = armor + bonus.dex + shield;
    actor.attack_bonus = pro + bonus.str_;
    actor.actions = 1 + extra;
    actor.crit = crit;
    actor
}

fn cleric(level: u32, name: &str, dice: &mut Dice) -> Actor {
    use Ability::*;
    let pro = proficiency(level);
    let scores = assign(level, [Wis, Con, Cha, Str, Int, Dex]);
    let bonus = scores.bonuses();
    let saves = save_table(&bonus, &[Con, Wis], pro);

    let spell_attack = pro + bonus.wis;
    let bonus_damage = match level {
        14.. => 14,
        8..=13 => 8,
        _ => 0,
    };

    let mut actor = blank(
        name,
        level,
        scores,
        saves,
        ActorKind::Cleric(ClericPool {
            book: Spellbook {
                slots: cleric_slots(level),
                spell_attack,
                spell_dc: 8 + spell_attack,
            },
            bonus_damage,
        }),
    );
    actor.max_hp = roll_hp(dice, level, 8, bonus.con);
    actor.hp = actor.max_hp;
    actor.ac = 14 + bonus.dex + 4;
    actor.attack_bonus = pro + bonus.str_;
    actor
}

fn rogue(level: u32, name: &str, dice: &mut Dice) -> Actor {
    use Ability::*;
    let pro = proficiency(level);
    let scores = assign(level, [Dex, Str, Con, Cha, Int, Wis]);
    let bonus = scores.bonuses();
    let mut saves = save_table(&bonus, &[Dex, Int], pro);
    if level >= 15 {
        saves.wis += pro;
    }

    let precision_dice = match level {
        19.. => 10,
        17..=18 => 9,
        15..=16 => 8,
        13..=14 => 7,
        11..=12 => 6,
        9..=10 => 5,
        7..=8 => 4,
        5..=6 => 3,
        3..=4 => 2,
        _ => 1,
    };

    let max_hp = roll_hp(dice, level, 8, bonus.con);
    let attack_bonus = pro + bonus.dex;
    let precision_damage = dice.roll_sum(precision_dice, 6) + attack_bonus;

    let mut actor = blank(
        name,
        level,
        scores,
        saves,
        ActorKind::Rogue(RoguePool {
            precision_dice,
            precision_damage,
        }),
    );
    actor.max_hp = max_hp;
    actor.hp = max_hp;
    actor.ac = 12 + bonus.dex;
    actor.attack_bonus = attack_bonus;
    actor.dodge = level >= 5;
    actor
}
