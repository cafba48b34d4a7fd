use crate::combat::attack::Strike;
use crate::ActorKind;

use super::{Tactics, Turn};

/// Level from which a rogue strikes twice in the opening round.
pub const AMBUSH_LEVEL: u32 = 17;

pub struct RogueTactics;

impl Tactics for RogueTactics {
    fn take_action(&self, turn: &mut Turn<'_>) {
        let Some(me) = turn.me() else {
            return;
        };
        let ActorKind::Rogue(pool) = &me.kind else {
            return;
        };
        let (level, bonus, crit, extra) =
            (me.level, me.attack_bonus, me.crit, pool.precision_damage);

        let attacks = if turn.round() == 0 && level >= AMBUSH_LEVEL {
            2
        } else {
            1
        };
        for _ in 0..attacks {
            let Some(target) = turn.random_opponent() else {
                break;
            };
            let damage = turn.dice.roll_die(8);
            turn.attack(&target, Strike::new(bonus, damage).crit(crit).extra(extra));
        }
    }
}
