use crate::actor::{SpecialAbility, SpecialTarget};
use crate::combat::attack::Strike;
use crate::combat::save::SaveThreat;
use crate::ActorKind;

use super::{Tactics, Turn};

pub struct MonsterTactics;

impl Tactics for MonsterTactics {
    fn take_action(&self, turn: &mut Turn<'_>) {
        let Some(me) = turn.me() else {
            return;
        };
        let ActorKind::Monster(kit) = &me.kind else {
            return;
        };
        let kit = kit.clone();
        let (hp, max_hp, bonus, crit, actions) =
            (me.hp, me.max_hp, me.attack_bonus, me.crit, me.actions);

        if let Some(special) = kit.special.as_ref() {
            let ready = special.cooldown > 0 && turn.round() % special.cooldown == 0;
            if special.targets != SpecialTarget::SelfOnly && ready {
                unleash(turn, special);
                return;
            }
            if special.targets == SpecialTarget::SelfOnly && hp <= max_hp / 2 {
                turn.note(format!("[SPECIAL][{}] uses {}", turn.key.name, special.name));
                let key = turn.key.clone();
                turn.heal(&key, special.damage);
                return;
            }
        }

        for slot in 0..actions as usize {
            let Some(&damage) = kit.attacks.get(slot).or(kit.attacks.last()) else {
                break;
            };
            let Some(target) = turn.random_opponent() else {
                break;
            };
            turn.attack(&target, Strike::new(bonus, damage).crit(crit));
        }
    }
}

fn unleash(turn: &mut Turn<'_>, special: &SpecialAbility) {
    let Some(ability) = special.save else {
        return;
    };
    turn.note(format!("[SPECIAL][{}] uses {}", turn.key.name, special.name));
    let threat = SaveThreat::damage(special.dc, ability, special.damage)
        .with_status(special.effect.clone());
    match special.targets {
        SpecialTarget::All => {
            for target in turn.opponents() {
                turn.force_save(&target, threat.clone());
            }
        }
        SpecialTarget::One => {
            if let Some(target) = turn.random_opponent() {
                turn.force_save(&target, threat);
            }
        }
        SpecialTarget::SelfOnly => {}
    }
}
