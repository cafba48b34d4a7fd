use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Actor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Party,
    Adversaries,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Party => Side::Adversaries,
            Side::Adversaries => Side::Party,
        }
    }
}

/// Stable identity of a combatant for the whole encounter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorKey {
    pub side: Side,
    pub name: String,
}

impl ActorKey {
    pub fn new(side: Side, name: impl Into<String>) -> Self {
        Self {
            side,
            name: name.into(),
        }
    }
}

impl fmt::Display for ActorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Everything that changes while an encounter runs.
///
/// An actor lives in exactly one of four maps: `party` / `adversaries` while
/// alive, `fallen` / `defeated` once the death sweep has moved it out.
#[derive(Debug, Clone, Default)]
pub struct CombatState {
    party: IndexMap<String, Actor>,
    adversaries: IndexMap<String, Actor>,
    fallen: IndexMap<String, Actor>,
    defeated: IndexMap<String, Actor>,
    initiative: Vec<ActorKey>,
    turn: usize,
    round: u32,
    log: Option<Vec<String>>,
}

impl CombatState {
    pub fn new(party: Vec<Actor>, adversaries: Vec<Actor>) -> Self {
        Self {
            party: party.into_iter().map(|a| (a.name.clone(), a)).collect(),
            adversaries: adversaries
                .into_iter()
                .map(|a| (a.name.clone(), a))
                .collect(),
            ..Self::default()
        }
    }

    /// Keep every log line in memory in addition to emitting it as a trace event.
    pub fn record_log(mut self) -> Self {
        self.log = Some(Vec::new());
        self
    }

    pub fn note(&mut self, line: String) {
        tracing::trace!(target: "skirmish::combat", "{}", line);
        if let Some(log) = self.log.as_mut() {
            log.push(line);
        }
    }

    pub fn take_log(&mut self) -> Vec<String> {
        self.log.as_mut().map(std::mem::take).unwrap_or_default()
    }

    pub fn live(&self, side: Side) -> &IndexMap<String, Actor> {
        match side {
            Side::Party => &self.party,
            Side::Adversaries => &self.adversaries,
        }
    }

    pub(crate) fn live_mut(&mut self, side: Side) -> &mut IndexMap<String, Actor> {
        match side {
            Side::Party => &mut self.party,
            Side::Adversaries => &mut self.adversaries,
        }
    }

    /// Terminal registry for `side`: fallen party members or defeated adversaries.
    pub fn registry(&self, side: Side) -> &IndexMap<String, Actor> {
        match side {
            Side::Party => &self.fallen,
            Side::Adversaries => &self.defeated,
        }
    }

    pub(crate) fn registry_mut(&mut self, side: Side) -> &mut IndexMap<String, Actor> {
        match side {
            Side::Party => &mut self.fallen,
            Side::Adversaries => &mut self.defeated,
        }
    }

    pub fn actor(&self, key: &ActorKey) -> Option<&Actor> {
        self.live(key.side).get(&key.name)
    }

    pub fn actor_mut(&mut self, key: &ActorKey) -> Option<&mut Actor> {
        self.live_mut(key.side).get_mut(&key.name)
    }

    pub fn is_alive(&self, key: &ActorKey) -> bool {
        self.live(key.side).contains_key(&key.name)
    }

    /// Names of the living members of `side`, in insertion order.
    pub fn living(&self, side: Side) -> Vec<String> {
        self.live(side).keys().cloned().collect()
    }

    pub fn keys(&self, side: Side) -> Vec<ActorKey> {
        self.live(side)
            .keys()
            .map(|name| ActorKey::new(side, name.clone()))
            .collect()
    }

    pub fn initiative(&self) -> &[ActorKey] {
        &self.initiative
    }

    pub(crate) fn set_initiative(&mut self, order: Vec<ActorKey>) {
        self.initiative = order;
        self.turn = 0;
        self.round = 0;
    }

    pub fn current(&self) -> Option<&ActorKey> {
        self.initiative.get(self.turn)
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub(crate) fn set_clock(&mut self, turn: usize, round: u32) {
        self.turn = turn;
        self.round = round;
    }
}
