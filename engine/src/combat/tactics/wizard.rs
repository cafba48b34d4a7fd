use crate::actor::Spellbook;
use crate::combat::attack::Strike;
use crate::combat::save::SaveThreat;
use crate::spells::{wizard_area, wizard_single, Delivery};
use crate::{Ability, ActorKind};

use super::{Tactics, Turn};

/// Level from which a wizard with no slots left still has an area blast.
pub const OVERCHANNEL_LEVEL: u32 = 13;
/// Opponents needed before an area spell beats a single-target one.
const AREA_CROWD: usize = 3;

pub struct WizardTactics;

impl Tactics for WizardTactics {
    fn take_action(&self, turn: &mut Turn<'_>) {
        let Some(me) = turn.me() else {
            return;
        };
        let ActorKind::Wizard(book) = &me.kind else {
            return;
        };
        let book = book.clone();
        let (level, bonus, crit) = (me.level, me.attack_bonus, me.crit);

        match book.top_level() {
            Some(spell_level) => {
                cast(turn, &book, spell_level);
                if let Some(me) = turn.me_mut() {
                    if let ActorKind::Wizard(book) = &mut me.kind {
                        book.spend_top();
                    }
                }
            }
            None if level >= OVERCHANNEL_LEVEL => {
                let damage = 30 + book.spell_attack + turn.dice.roll_sum(7, 8);
                turn.note(format!("[SPELL][{}] overchannels for {}", turn.key.name, damage));
                for target in turn.opponents() {
                    turn.force_save(
                        &target,
                        SaveThreat::damage(book.spell_dc, Ability::Con, damage),
                    );
                }
            }
            None => {
                turn.weapon_attack(bonus, 8, crit, 0);
            }
        }
    }
}

fn cast(turn: &mut Turn<'_>, book: &Spellbook, spell_level: usize) {
    let power = book.spell_attack;
    let opponents = turn.opponents();

    if opponents.len() >= AREA_CROWD {
        if let Some(spell) = wizard_area(spell_level) {
            let Delivery::Save(ability) = spell.delivery else {
                return;
            };
            turn.note(format!("[SPELL][{}] casts {}", turn.key.name, spell.name));
            for target in opponents {
                turn.force_save(
                    &target,
                    SaveThreat::damage(book.spell_dc, ability, spell.damage + power),
                );
            }
            return;
        }
    }

    let spell = wizard_single(spell_level);
    let Some(target) = turn.random_opponent() else {
        return;
    };
    turn.note(format!(
        "[SPELL][{}] casts {} at {}",
        turn.key.name, spell.name, target.name
    ));
    match spell.delivery {
        Delivery::Attack => {
            turn.attack(&target, Strike::new(power, spell.damage + power));
        }
        Delivery::Save(ability) => {
            turn.force_save(
                &target,
                SaveThreat::damage(book.spell_dc, ability, spell.damage + power),
            );
        }
    }
}
