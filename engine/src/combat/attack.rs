use crate::combat::state::{ActorKey, CombatState};
use crate::life::death_sweep;
use crate::Dice;

/// Parameters of one weapon or spell attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    pub bonus: i32,
    pub damage: i32,
    /// Natural roll at or above which the attack hits regardless of AC.
    pub crit: i32,
    pub extra: i32,
}

impl Strike {
    pub fn new(bonus: i32, damage: i32) -> Self {
        Self {
            bonus,
            damage,
            crit: 20,
            extra: 0,
        }
    }

    pub fn crit(mut self, crit: i32) -> Self {
        self.crit = crit;
        self
    }

    pub fn extra(mut self, extra: i32) -> Self {
        self.extra = extra;
        self
    }

    /// Damage landed on a hit before dodging. Never negative.
    pub fn raw_damage(&self) -> i32 {
        (self.damage + self.bonus + self.extra).max(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackOutcome {
    pub roll: i32,
    pub total: i32,
    pub ac: i32,
    pub crit: bool,
    pub hit: bool,
    pub dealt: i32,
}

/// Damage after the target's dodge: half (rounded down) plus one.
pub fn dodged(raw: i32, dodge: bool) -> i32 {
    if dodge { raw / 2 + 1 } else { raw }
}

/// Roll one attack against the living actor at `target`, apply damage on a
/// hit and sweep the dead. A roll at or above the crit threshold always
/// hits; a natural 1 otherwise always misses. `None` if the target is gone.
pub fn resolve_attack(
    state: &mut CombatState,
    dice: &mut Dice,
    target: &ActorKey,
    strike: Strike,
) -> Option<AttackOutcome> {
    let roll = dice.d20();
    let defender = state.actor_mut(target)?;
    let total = roll + strike.bonus;
    let ac = defender.ac;
    let crit = roll >= strike.crit;
    let hit = crit || (roll != 1 && total >= ac);

    let before = defender.hp;
    let dealt = if hit {
        dodged(strike.raw_damage(), defender.dodge)
    } else {
        0
    };
    defender.hp -= dealt;
    let after = defender.hp;

    let outcome = if crit {
        "CRIT!"
    } else if hit {
        "HIT"
    } else if roll == 1 {
        "MISS (NAT1)"
    } else {
        "MISS"
    };
    state.note(format!(
        "[ATTACK][{}] d20={} to-hit={} vs AC={} → {}",
        target.name, roll, total, ac, outcome
    ));
    if hit {
        state.note(format!("[HP][{}] {} → {} (−{})", target.name, before, after, dealt));
    }

    death_sweep(state);
    Some(AttackOutcome {
        roll,
        total,
        ac,
        crit,
        hit,
        dealt,
    })
}
