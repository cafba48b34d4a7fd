use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combat::attack::{resolve_attack, Strike};
use crate::combat::save::saving_throw;
use crate::combat::state::{ActorKey, CombatState};
use crate::{Ability, ActorKind, Dice};

/// Damage dealt by a charmed player character turned on its own side.
pub const CHARMED_STRIKE_DAMAGE: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    #[default]
    Normal,
    Charmed,
    Stunned,
    /// Monster-specific affliction (e.g. "paralyzed", "frightened").
    Other(String),
}

impl Status {
    pub fn is_normal(&self) -> bool {
        matches!(self, Status::Normal)
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "" | "normal" => Status::Normal,
            "charmed" => Status::Charmed,
            "stunned" => Status::Stunned,
            other => Status::Other(other.to_string()),
        }
    }
}

impl From<Status> for String {
    fn from(s: Status) -> Self {
        s.to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Normal => f.write_str("normal"),
            Status::Charmed => f.write_str("charmed"),
            Status::Stunned => f.write_str("stunned"),
            Status::Other(name) => f.write_str(name),
        }
    }
}

/// The status an actor carries plus the save that ends it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Affliction {
    #[serde(rename = "current")]
    pub status: Status,
    #[serde(default)]
    pub dc: i32,
    #[serde(default)]
    pub save: Option<Ability>,
}

impl Affliction {
    pub fn new(status: Status, dc: i32, save: Ability) -> Self {
        Self {
            status,
            dc,
            save: Some(save),
        }
    }

    pub fn clear(&mut self) {
        *self = Affliction::default();
    }
}

/// What the start-of-turn status check allows the actor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnGate {
    /// No status, or the clearing save succeeded: take the normal action.
    Act,
    /// Still afflicted; the turn is lost.
    Suppressed,
    /// Still charmed; struck an ally instead of acting.
    TurnedOnAllies,
}

/// Start-of-turn status check. Every non-normal status is handled the same
/// way: roll the clearing save, act on success, lose the turn on failure.
/// A charmed actor that fails swings at a random living ally instead, using
/// base attack stats (crit only on a natural 20).
pub fn start_of_turn(state: &mut CombatState, dice: &mut Dice, key: &ActorKey) -> TurnGate {
    let Some(actor) = state.actor(key) else {
        return TurnGate::Suppressed;
    };
    if actor.affliction.status.is_normal() {
        return TurnGate::Act;
    }

    let affliction = actor.affliction.clone();
    let bonus = affliction.save.map(|a| actor.saves.get(a)).unwrap_or(0);
    let attack_bonus = actor.attack_bonus;
    let charmed_damage = match &actor.kind {
        ActorKind::Monster(kit) => kit.attacks.first().copied().unwrap_or(0),
        _ => CHARMED_STRIKE_DAMAGE,
    };

    let save = saving_throw(dice, bonus, affliction.dc);
    state.note(format!(
        "[SAVE][{}] shakes off {} DC {}: roll={} total={} → {}",
        key.name,
        affliction.status,
        affliction.dc,
        save.roll,
        save.total,
        if save.success { "SUCCESS" } else { "FAIL" }
    ));

    if save.success {
        if let Some(actor) = state.actor_mut(key) {
            actor.affliction.clear();
        }
        state.note(format!("[COND][{}] is no longer {}", key.name, affliction.status));
        return TurnGate::Act;
    }

    if affliction.status != Status::Charmed {
        return TurnGate::Suppressed;
    }

    let allies: Vec<String> = state
        .living(key.side)
        .into_iter()
        .filter(|name| name != &key.name)
        .collect();
    if allies.is_empty() {
        return TurnGate::Suppressed;
    }
    let victim = ActorKey::new(key.side, allies[dice.pick(allies.len())].clone());
    state.note(format!(
        "[COND][{}] is charmed and turns on {}",
        key.name, victim.name
    ));
    resolve_attack(
        state,
        dice,
        &victim,
        Strike {
            bonus: attack_bonus,
            damage: charmed_damage,
            crit: 20,
            extra: 0,
        },
    );
    TurnGate::TurnedOnAllies
}
