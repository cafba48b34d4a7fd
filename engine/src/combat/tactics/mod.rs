//! Per-kind turn logic. Each actor kind gets a unit struct implementing
//! [`Tactics`]; [`tactics_for`] picks it from the actor's tag.

mod cleric;
mod fighter;
mod monster;
mod rogue;
mod wizard;

pub use cleric::ClericTactics;
pub use fighter::FighterTactics;
pub use monster::MonsterTactics;
pub use rogue::RogueTactics;
pub use wizard::WizardTactics;

use crate::combat::attack::{resolve_attack, AttackOutcome, Strike};
use crate::combat::save::{resolve_save, SaveOutcome, SaveThreat};
use crate::combat::state::{ActorKey, CombatState};
use crate::life::heal_actor;
use crate::{Actor, ActorKind, Dice};

/// Decides and carries out what an actor does with its turn.
pub trait Tactics {
    fn take_action(&self, turn: &mut Turn<'_>);
}

pub fn tactics_for(kind: &ActorKind) -> &'static dyn Tactics {
    match kind {
        ActorKind::Wizard(_) => &WizardTactics,
        ActorKind::Fighter(_) => &FighterTactics,
        ActorKind::Cleric(_) => &ClericTactics,
        ActorKind::Rogue(_) => &RogueTactics,
        ActorKind::Monster(_) => &MonsterTactics,
    }
}

/// Run the normal action of the living actor at `key`.
pub fn take_action(state: &mut CombatState, dice: &mut Dice, key: &ActorKey) {
    let Some(actor) = state.actor(key) else {
        return;
    };
    let tactics = tactics_for(&actor.kind);
    let mut turn = Turn {
        state,
        dice,
        key: key.clone(),
    };
    tactics.take_action(&mut turn);
}

/// The acting actor plus everything it may touch during its turn.
pub struct Turn<'a> {
    pub state: &'a mut CombatState,
    pub dice: &'a mut Dice,
    pub key: ActorKey,
}

impl Turn<'_> {
    pub fn me(&self) -> Option<&Actor> {
        self.state.actor(&self.key)
    }

    pub fn me_mut(&mut self) -> Option<&mut Actor> {
        self.state.actor_mut(&self.key)
    }

    pub fn round(&self) -> u32 {
        self.state.round()
    }

    pub fn opponents(&self) -> Vec<ActorKey> {
        self.state.keys(self.key.side.opponent())
    }

    /// Living members of the actor's own side, itself included.
    pub fn allies(&self) -> Vec<ActorKey> {
        self.state.keys(self.key.side)
    }

    pub fn random_opponent(&mut self) -> Option<ActorKey> {
        let mut opponents = self.opponents();
        if opponents.is_empty() {
            return None;
        }
        let idx = self.dice.pick(opponents.len());
        Some(opponents.swap_remove(idx))
    }

    pub fn attack(&mut self, target: &ActorKey, strike: Strike) -> Option<AttackOutcome> {
        resolve_attack(self.state, self.dice, target, strike)
    }

    /// Pick a random opponent, roll a `d<sides>` for damage and attack it.
    pub fn weapon_attack(
        &mut self,
        bonus: i32,
        sides: u32,
        crit: i32,
        extra: i32,
    ) -> Option<AttackOutcome> {
        let target = self.random_opponent()?;
        let damage = self.dice.roll_die(sides);
        self.attack(&target, Strike::new(bonus, damage).crit(crit).extra(extra))
    }

    pub fn force_save(&mut self, target: &ActorKey, threat: SaveThreat) -> Option<SaveOutcome> {
        resolve_save(self.state, self.dice, target, threat)
    }

    pub fn heal(&mut self, target: &ActorKey, amount: i32) -> i32 {
        heal_actor(self.state, target, amount)
    }

    pub fn note(&mut self, line: String) {
        self.state.note(line);
    }
}
