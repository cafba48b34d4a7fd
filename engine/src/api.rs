use std::collections::BTreeMap;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::builder::{build_character, MAX_LEVEL};
use crate::combat::encounter::{Encounter, EncounterOutcome, DEFAULT_MAX_ROUNDS};
use crate::content::Bestiary;
use crate::error::EncounterError;
use crate::{Actor, Archetype, CombatState, Dice};

fn default_max_rounds() -> u32 {
    DEFAULT_MAX_ROUNDS
}

/// A requested encounter: who fights, at what level, against what.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EncounterConfig {
    pub party: Vec<String>,
    pub level: u32,
    /// Adversary type name → how many of them.
    pub adversaries: IndexMap<String, u32>,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
    #[serde(default)]
    pub record_log: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EncounterReport {
    pub outcome: EncounterOutcome,
    pub rounds: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub log: Vec<String>,
}

/// A validated encounter request; nothing has been rolled yet.
#[derive(Debug, Clone)]
struct Roster {
    party: Vec<(Archetype, String)>,
    adversaries: Vec<(String, String)>,
}

impl Roster {
    fn check(cfg: &EncounterConfig, bestiary: &Bestiary) -> Result<Self, EncounterError> {
        if cfg.party.is_empty() {
            return Err(EncounterError::NoParty);
        }
        let archetypes = cfg
            .party
            .iter()
            .map(|name| name.parse::<Archetype>())
            .collect::<Result<Vec<_>, _>>()?;
        if !(1..=MAX_LEVEL).contains(&cfg.level) {
            return Err(EncounterError::LevelOutOfRange(cfg.level));
        }
        if cfg.adversaries.is_empty() {
            return Err(EncounterError::NoAdversaries);
        }
        for (kind, count) in &cfg.adversaries {
            if *count == 0 {
                return Err(EncounterError::EmptyGroup(kind.clone()));
            }
            if bestiary.get(kind).is_none() {
                return Err(EncounterError::UnknownAdversary(kind.clone()));
            }
        }

        Ok(Self {
            party: party_names(&archetypes),
            adversaries: cfg
                .adversaries
                .iter()
                .flat_map(|(kind, count)| {
                    (0..*count).map(move |i| (kind.clone(), format!("{} ({})", kind, i)))
                })
                .collect(),
        })
    }

    fn assemble(
        &self,
        level: u32,
        bestiary: &Bestiary,
        dice: &mut Dice,
    ) -> Result<(Vec<Actor>, Vec<Actor>), EncounterError> {
        let party = self
            .party
            .iter()
            .map(|(archetype, name)| build_character(*archetype, level, name, dice))
            .collect::<Result<Vec<_>, _>>()?;
        let adversaries = self
            .adversaries
            .iter()
            .map(|(kind, name)| {
                bestiary
                    .get(kind)
                    .map(|record| record.spawn(name))
                    .ok_or_else(|| EncounterError::UnknownAdversary(kind.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok((party, adversaries))
    }
}

/// Party member names: the class name, suffixed from the second copy on.
fn party_names(archetypes: &[Archetype]) -> Vec<(Archetype, String)> {
    let mut seen: IndexMap<Archetype, u32> = IndexMap::new();
    archetypes
        .iter()
        .map(|archetype| {
            let n = seen.entry(*archetype).or_insert(0);
            *n += 1;
            let name = if *n == 1 {
                archetype.to_string()
            } else {
                format!("{} ({})", archetype, n)
            };
            (*archetype, name)
        })
        .collect()
}

/// Names the party in `cfg` will use, in order.
pub fn party_member_names(cfg: &EncounterConfig) -> Result<Vec<String>, EncounterError> {
    let archetypes = cfg
        .party
        .iter()
        .map(|name| name.parse::<Archetype>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(party_names(&archetypes)
        .into_iter()
        .map(|(_, name)| name)
        .collect())
}

/// Run one encounter. Configuration problems are reported before any
/// character is built or die rolled.
pub fn simulate_encounter(
    cfg: &EncounterConfig,
    bestiary: &Bestiary,
) -> Result<EncounterReport, EncounterError> {
    let roster = Roster::check(cfg, bestiary)?;
    let mut dice = Dice::from_seed(cfg.seed);
    let (party, adversaries) = roster.assemble(cfg.level, bestiary, &mut dice)?;

    let mut state = CombatState::new(party, adversaries);
    if cfg.record_log {
        state = state.record_log();
    }
    let mut encounter = Encounter::new(state, &mut dice).with_max_rounds(cfg.max_rounds);
    let outcome = encounter.run(&mut dice);
    let mut state = encounter.into_state();

    Ok(EncounterReport {
        outcome,
        rounds: state.round(),
        log: state.take_log(),
    })
}

/// Aggregate results of many independent encounters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchStats {
    pub trials: u32,
    pub party_wins: u32,
    pub adversary_wins: u32,
    pub round_limits: u32,
    /// Number of surviving party members → wins with that many survivors.
    pub survivor_counts: BTreeMap<usize, u32>,
    /// Party member → wins it survived.
    pub member_survivals: IndexMap<String, u32>,
}

impl BatchStats {
    fn new(members: Vec<String>) -> Self {
        Self {
            member_survivals: members.into_iter().map(|m| (m, 0)).collect(),
            ..Self::default()
        }
    }

    fn record(&mut self, outcome: &EncounterOutcome) {
        self.trials += 1;
        match outcome {
            EncounterOutcome::PartyWon { survivors } => {
                self.party_wins += 1;
                *self.survivor_counts.entry(survivors.len()).or_insert(0) += 1;
                for name in survivors.keys() {
                    *self.member_survivals.entry(name.clone()).or_insert(0) += 1;
                }
            }
            EncounterOutcome::AdversariesWon => self.adversary_wins += 1,
            EncounterOutcome::RoundLimit => self.round_limits += 1,
        }
    }

    /// `count` as a percentage of all trials.
    pub fn percent(&self, count: u32) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.trials as f64
        }
    }

    pub fn win_rate(&self) -> f64 {
        self.percent(self.party_wins)
    }

    /// Wins in which exactly `alive` party members were still standing.
    pub fn wins_with_survivors(&self, alive: usize) -> u32 {
        self.survivor_counts.get(&alive).copied().unwrap_or(0)
    }

    /// One row per possible survivor count, largest first: the share of the
    /// party standing (as a percentage) and the wins that ended that way.
    /// The rows sum to `party_wins`.
    pub fn survival_buckets(&self) -> Vec<(f64, u32)> {
        let size = self.member_survivals.len();
        (1..=size)
            .rev()
            .map(|alive| {
                (
                    alive as f64 * 100.0 / size as f64,
                    self.wins_with_survivors(alive),
                )
            })
            .collect()
    }
}

/// Run `trials` encounters in parallel; trial `i` uses seed `cfg.seed + i`.
/// `workers == 0` uses every core.
pub fn simulate_many(
    cfg: &EncounterConfig,
    bestiary: &Bestiary,
    trials: u32,
    workers: usize,
) -> Result<BatchStats, EncounterError> {
    Roster::check(cfg, bestiary)?;
    let members = party_member_names(cfg)?;

    let run = || {
        (0..trials)
            .into_par_iter()
            .map(|i| {
                let mut trial = cfg.clone();
                trial.seed = cfg.seed.wrapping_add(i as u64);
                trial.record_log = false;
                simulate_encounter(&trial, bestiary).map(|report| report.outcome)
            })
            .collect::<Result<Vec<_>, _>>()
    };
    let outcomes = if workers == 0 {
        run()?
    } else {
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?
            .install(run)?
    };

    let mut stats = BatchStats::new(members);
    for outcome in &outcomes {
        stats.record(outcome);
    }
    tracing::debug!(trials, wins = stats.party_wins, "batch finished");
    Ok(stats)
}

/// Parse a `Name=count` adversary group, e.g. `Goblin=7`.
pub fn parse_adversary_group(group: &str) -> Result<(String, u32), EncounterError> {
    let malformed = || EncounterError::MalformedGroup(group.to_string());
    let (name, count) = group.rsplit_once('=').ok_or_else(malformed)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(malformed());
    }
    let count = count.trim().parse::<u32>().map_err(|_| malformed())?;
    Ok((name.to_string(), count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SurvivorHp;

    const NAMES: [&str; 4] = ["fighter", "cleric", "rogue", "wizard"];

    fn party_of_four() -> BatchStats {
        BatchStats::new(NAMES.iter().map(|n| n.to_string()).collect())
    }

    #[test]
    fn survival_rows_are_exact_counts() {
        let mut stats = party_of_four();
        stats.trials = 3;
        stats.party_wins = 2;
        stats.survivor_counts.insert(4, 1);
        stats.survivor_counts.insert(3, 1);

        assert_eq!(stats.wins_with_survivors(3), 1);
        assert_eq!(stats.wins_with_survivors(1), 0);
        assert_eq!(
            stats.survival_buckets(),
            vec![(100.0, 1), (75.0, 1), (50.0, 0), (25.0, 0)]
        );
    }

    #[test]
    fn survival_rows_sum_to_wins() {
        let mut stats = party_of_four();
        let win = |alive: usize| EncounterOutcome::PartyWon {
            survivors: NAMES[..alive]
                .iter()
                .map(|name| (name.to_string(), SurvivorHp { hp: 1, max_hp: 1 }))
                .collect(),
        };
        for outcome in [win(4), win(2), win(2), win(1), EncounterOutcome::AdversariesWon] {
            stats.record(&outcome);
        }
        let rows = stats.survival_buckets();
        assert_eq!(rows.iter().map(|(_, wins)| wins).sum::<u32>(), stats.party_wins);
        assert_eq!(rows[2], (50.0, 2));
        assert_eq!(stats.member_survivals["fighter"], 4);
        assert_eq!(stats.member_survivals["wizard"], 1);
    }
}
