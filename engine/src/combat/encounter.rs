use indexmap::IndexMap;
use serde::Serialize;

use crate::combat::initiative;
use crate::combat::state::{CombatState, Side};
use crate::combat::tactics::take_action;
use crate::conditions::{start_of_turn, TurnGate};
use crate::life::death_sweep;
use crate::{Actor, Dice};

/// Default cap on rounds before an encounter is called off.
pub const DEFAULT_MAX_ROUNDS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SurvivorHp {
    pub hp: i32,
    pub max_hp: i32,
}

/// Surviving party members by name.
pub type Survivors = IndexMap<String, SurvivorHp>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "winner", rename_all = "snake_case")]
pub enum EncounterOutcome {
    PartyWon { survivors: Survivors },
    /// Includes the case where both sides fall together.
    AdversariesWon,
    /// Neither side fell before the round cap.
    RoundLimit,
}

impl EncounterOutcome {
    pub fn survivors(&self) -> Option<&Survivors> {
        match self {
            EncounterOutcome::PartyWon { survivors } => Some(survivors),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterStatus {
    Running,
    PartyWon,
    AdversariesWon,
}

/// One fight, from initiative to the last actor standing.
pub struct Encounter {
    state: CombatState,
    max_rounds: u32,
}

impl Encounter {
    /// Roll initiative once for everyone present and clear anyone who
    /// starts the fight already at 0 HP.
    pub fn new(mut state: CombatState, dice: &mut Dice) -> Self {
        let order = initiative::build(
            state.keys(Side::Party),
            state.keys(Side::Adversaries),
            dice,
        );
        state.note(format!(
            "[INIT] {}",
            order
                .iter()
                .map(|k| k.name.as_str())
                .collect::<Vec<_>>()
                .join(" → ")
        ));
        state.set_initiative(order);
        death_sweep(&mut state);
        Self {
            state,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    pub fn from_actors(party: Vec<Actor>, adversaries: Vec<Actor>, dice: &mut Dice) -> Self {
        Self::new(CombatState::new(party, adversaries), dice)
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CombatState {
        &mut self.state
    }

    pub fn into_state(self) -> CombatState {
        self.state
    }

    pub fn status(&self) -> EncounterStatus {
        let party = !self.state.live(Side::Party).is_empty();
        let adversaries = !self.state.live(Side::Adversaries).is_empty();
        match (party, adversaries) {
            (true, true) => EncounterStatus::Running,
            (true, false) => EncounterStatus::PartyWon,
            (false, _) => EncounterStatus::AdversariesWon,
        }
    }

    /// Play the current initiative slot and move the turn pointer on.
    /// Slots whose actor is no longer alive pass without effect.
    pub fn tick(&mut self, dice: &mut Dice) {
        let Some(key) = self.state.current().cloned() else {
            return;
        };
        if self.state.turn() == 0 {
            self.state.note(format!("[ROUND] {}", self.state.round()));
        }

        if self.state.is_alive(&key) {
            tracing::debug!(actor = %key.name, round = self.state.round(), "turn");
            match start_of_turn(&mut self.state, dice, &key) {
                TurnGate::Act => take_action(&mut self.state, dice, &key),
                TurnGate::Suppressed => {
                    self.state
                        .note(format!("[TURN][{}] is afflicted; skipping", key.name));
                }
                TurnGate::TurnedOnAllies => {}
            }
        }
        death_sweep(&mut self.state);

        let (turn, round) = initiative::advance(
            self.state.turn(),
            self.state.round(),
            self.state.initiative().len(),
        );
        self.state.set_clock(turn, round);
    }

    /// Run until one side is gone or the round cap is reached.
    pub fn run(&mut self, dice: &mut Dice) -> EncounterOutcome {
        while self.status() == EncounterStatus::Running && self.state.round() < self.max_rounds {
            self.tick(dice);
        }
        let outcome = self.outcome();
        tracing::debug!(rounds = self.state.round(), ?outcome, "encounter over");
        outcome
    }

    pub fn outcome(&self) -> EncounterOutcome {
        match self.status() {
            EncounterStatus::PartyWon => EncounterOutcome::PartyWon {
                survivors: self
                    .state
                    .live(Side::Party)
                    .iter()
                    .filter(|(_, actor)| actor.hp > 0)
                    .map(|(name, actor)| {
                        (
                            name.clone(),
                            SurvivorHp {
                                hp: actor.hp,
                                max_hp: actor.max_hp,
                            },
                        )
                    })
                    .collect(),
            },
            EncounterStatus::AdversariesWon => EncounterOutcome::AdversariesWon,
            EncounterStatus::Running => EncounterOutcome::RoundLimit,
        }
    }
}
