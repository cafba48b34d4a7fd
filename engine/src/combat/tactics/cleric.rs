use crate::combat::state::ActorKey;
use crate::life::revive;
use crate::spells::{cleric_mass_heal, cleric_single_heal, REVIVAL_SLOT};
use crate::ActorKind;

use super::{Tactics, Turn};

/// Level from which a cleric pairs healing with divine strikes.
pub const BATTLE_PRIEST_LEVEL: u32 = 3;

pub struct ClericTactics;

impl Tactics for ClericTactics {
    fn take_action(&self, turn: &mut Turn<'_>) {
        let Some(me) = turn.me() else {
            return;
        };
        let ActorKind::Cleric(pool) = &me.kind else {
            return;
        };
        let pool = pool.clone();
        let (level, bonus, crit) = (me.level, me.attack_bonus, me.crit);
        let power = pool.book.spell_attack;
        let side = turn.key.side;

        let patients = injured_allies(turn);
        let top_slot = pool.book.available_levels().last().copied();

        if pool.book.has_slot(REVIVAL_SLOT) && !turn.state.registry(side).is_empty() {
            turn.weapon_attack(power, 8, crit, 0);
            let fallen = turn.state.registry(side).keys().next().cloned();
            if let Some(name) = fallen {
                revive(turn.state, side, &name);
            }
            spend_slot(turn, REVIVAL_SLOT);
            return;
        }

        if level >= BATTLE_PRIEST_LEVEL {
            match (top_slot, patients.is_empty()) {
                (Some(slot), false) => {
                    let mass = cleric_mass_heal(slot).filter(|_| patients.len() > 2);
                    match mass {
                        Some(spell) => {
                            turn.note(format!("[SPELL][{}] casts {}", turn.key.name, spell.name));
                            for patient in &patients {
                                turn.heal(patient, spell.heal + power);
                            }
                        }
                        None => heal_most_injured(turn, &patients, slot, power),
                    }
                    spend_slot(turn, slot);
                    turn.weapon_attack(bonus, 8, crit, pool.bonus_damage);
                }
                _ => {
                    for _ in 0..2 {
                        if turn
                            .weapon_attack(bonus, 8, crit, pool.bonus_damage)
                            .is_none()
                        {
                            break;
                        }
                    }
                }
            }
        } else {
            match (top_slot, patients.is_empty()) {
                (Some(slot), false) => {
                    heal_most_injured(turn, &patients, slot, power);
                    spend_slot(turn, slot);
                }
                _ => {
                    turn.weapon_attack(bonus, 8, crit, 0);
                }
            }
        }
    }
}

fn injured_allies(turn: &Turn<'_>) -> Vec<ActorKey> {
    turn.allies()
        .into_iter()
        .filter(|key| turn.state.actor(key).is_some_and(|a| a.is_injured()))
        .collect()
}

/// The patient with the lowest current HP; earliest wins ties.
fn most_injured(turn: &Turn<'_>, patients: &[ActorKey]) -> Option<ActorKey> {
    let mut worst: Option<(&ActorKey, i32)> = None;
    for key in patients {
        let Some(hp) = turn.state.actor(key).map(|a| a.hp) else {
            continue;
        };
        if worst.is_none_or(|(_, worst_hp)| hp < worst_hp) {
            worst = Some((key, hp));
        }
    }
    worst.map(|(key, _)| key.clone())
}

fn heal_most_injured(turn: &mut Turn<'_>, patients: &[ActorKey], slot: usize, power: i32) {
    let spell = cleric_single_heal(slot);
    if let Some(patient) = most_injured(turn, patients) {
        turn.note(format!(
            "[SPELL][{}] casts {} on {}",
            turn.key.name, spell.name, patient.name
        ));
        turn.heal(&patient, spell.heal + power);
    }
}

fn spend_slot(turn: &mut Turn<'_>, slot: usize) {
    if let Some(me) = turn.me_mut() {
        if let ActorKind::Cleric(pool) = &mut me.kind {
            pool.book.spend(slot);
        }
    }
}
