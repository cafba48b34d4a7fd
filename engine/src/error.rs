use thiserror::Error;

/// Everything that can stop an encounter from being assembled. Once an
/// encounter is running it always reaches a terminal state, so there are no
/// mid-fight errors.
#[derive(Debug, Error)]
pub enum EncounterError {
    #[error("unknown character class '{0}' (expected cleric, fighter, rogue or wizard)")]
    UnknownArchetype(String),
    #[error("unknown adversary '{0}'")]
    UnknownAdversary(String),
    #[error("adversary group '{0}' has a count of zero")]
    EmptyGroup(String),
    #[error("encounter has no adversaries")]
    NoAdversaries,
    #[error("encounter has no party members")]
    NoParty,
    #[error("party level {0} is outside 1..=20")]
    LevelOutOfRange(u32),
    #[error("invalid adversary group '{0}' (expected Name=count)")]
    MalformedGroup(String),

    #[error("monster '{name}': {reason}")]
    InvalidMonster { name: String, reason: String },
    #[error("failed to parse bestiary JSON")]
    ParseJson(#[from] serde_json::Error),
    #[error("failed to parse bestiary YAML")]
    ParseYaml(#[from] serde_yaml::Error),
    #[error("failed to start worker pool")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl EncounterError {
    pub(crate) fn monster(name: &str, reason: impl Into<String>) -> Self {
        EncounterError::InvalidMonster {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// True for problems with the requested encounter rather than with the
    /// monster data backing it.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            EncounterError::UnknownArchetype(_)
                | EncounterError::UnknownAdversary(_)
                | EncounterError::EmptyGroup(_)
                | EncounterError::NoAdversaries
                | EncounterError::NoParty
                | EncounterError::LevelOutOfRange(_)
                | EncounterError::MalformedGroup(_)
        )
    }
}
