use crate::combat::state::{ActorKey, CombatState};
use crate::conditions::{Affliction, Status};
use crate::life::death_sweep;
use crate::{Ability, Dice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveRoll {
    pub roll: i32,
    pub total: i32,
    pub dc: i32,
    pub success: bool,
}

/// Roll a d20, add `bonus`, compare vs DC. A natural 20 always succeeds.
pub fn saving_throw(dice: &mut Dice, bonus: i32, dc: i32) -> SaveRoll {
    let roll = dice.d20();
    let total = roll + bonus;
    SaveRoll {
        roll,
        total,
        dc,
        success: roll == 20 || total >= dc,
    }
}

/// What a failed save costs the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveThreat {
    pub dc: i32,
    pub ability: Ability,
    pub damage: i32,
    pub inflict: Option<Status>,
}

impl SaveThreat {
    pub fn damage(dc: i32, ability: Ability, damage: i32) -> Self {
        Self {
            dc,
            ability,
            damage,
            inflict: None,
        }
    }

    pub fn with_status(mut self, status: Option<Status>) -> Self {
        self.inflict = status.filter(|s| !s.is_normal());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub success: bool,
    /// Failed rolls replaced by rerolls.
    pub rerolls_used: u32,
    pub damage_taken: i32,
    pub afflicted: bool,
}

/// Force the living actor at `target` to save against `threat`.
///
/// A success halves damage (rounded down, plus one) and always wards off the
/// status. A failure takes full damage and picks up the status, if any.
/// Actors with reroll charges spend them on failed rolls until one succeeds.
pub fn resolve_save(
    state: &mut CombatState,
    dice: &mut Dice,
    target: &ActorKey,
    threat: SaveThreat,
) -> Option<SaveOutcome> {
    let actor = state.actor_mut(target)?;
    let bonus = actor.saves.get(threat.ability);

    let mut save = saving_throw(dice, bonus, threat.dc);
    let mut rerolls_used = 0;
    if let Some(charges) = actor.kind.rerolls_mut() {
        while !save.success && *charges > 0 {
            *charges -= 1;
            rerolls_used += 1;
            save = saving_throw(dice, bonus, threat.dc);
        }
    }

    let damage_taken = match (save.success, threat.damage > 0) {
        (true, true) => threat.damage / 2 + 1,
        (false, true) => threat.damage,
        (_, false) => 0,
    };
    actor.hp -= damage_taken;

    let afflicted = !save.success && threat.inflict.is_some();
    if let (false, Some(status)) = (save.success, threat.inflict.clone()) {
        actor.affliction = Affliction::new(status, threat.dc, threat.ability);
    }
    let hp = actor.hp;

    state.note(format!(
        "[SAVE][{}] {:?} save DC {}: roll={} total={} rerolls={} → {}",
        target.name,
        threat.ability,
        threat.dc,
        save.roll,
        save.total,
        rerolls_used,
        if save.success { "SUCCESS" } else { "FAIL" }
    ));
    if damage_taken > 0 {
        state.note(format!(
            "[HP][{}] {} → {} (−{})",
            target.name,
            hp + damage_taken,
            hp,
            damage_taken
        ));
    }
    if afflicted {
        if let Some(status) = threat.inflict.as_ref() {
            state.note(format!("[COND][{}] gains {}", target.name, status));
        }
    }

    death_sweep(state);
    Some(SaveOutcome {
        success: save.success,
        rerolls_used,
        damage_taken,
        afflicted,
    })
}
