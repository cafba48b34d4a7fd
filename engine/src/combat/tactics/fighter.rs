use crate::ActorKind;

use super::{Tactics, Turn};

pub struct FighterTactics;

impl Tactics for FighterTactics {
    fn take_action(&self, turn: &mut Turn<'_>) {
        let Some(me) = turn.me() else {
            return;
        };
        let ActorKind::Fighter(pool) = &me.kind else {
            return;
        };
        let (bonus, crit, actions) = (me.attack_bonus, me.crit, me.actions);
        let key = turn.key.clone();

        // Rally costs no action.
        if let Some(amount) = pool.rally {
            if me.hp * 2 < me.max_hp {
                turn.heal(&key, amount);
            }
        }

        let mut acts = 0;
        while acts < actions {
            let Some(me) = turn.me_mut() else {
                return;
            };
            let injured = me.is_injured();
            let ActorKind::Fighter(pool) = &mut me.kind else {
                return;
            };
            let surged = acts > 0 && pool.surges > 0;
            if surged {
                pool.surges -= 1;
            }
            let banked = pool.banked_heal;
            if injured && banked > 0 {
                pool.banked_heal = 0;
            }

            if surged {
                acts -= 1;
                turn.note(format!("[SURGE][{}] refunds an action", key.name));
            }
            if injured && banked > 0 {
                turn.heal(&key, banked);
            } else {
                turn.weapon_attack(bonus, 10, crit, 0);
            }
            acts += 1;
        }
    }
}
