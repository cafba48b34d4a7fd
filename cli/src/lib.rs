use std::{fs, path::Path, path::PathBuf};

use anyhow::Context;
use encoding_rs::Encoding;
use indexmap::IndexMap;
use skirmish_engine::api::{parse_adversary_group, EncounterConfig};
use skirmish_engine::combat::encounter::DEFAULT_MAX_ROUNDS;
use skirmish_engine::content::Bestiary;
use tracing_subscriber::filter::LevelFilter;

/// Who fights whom, from a JSON config file or from flags.
#[derive(clap::Args, Debug)]
pub struct EncounterArgs {
    /// Encounter config JSON (party, level, adversaries, seed, max_rounds)
    #[arg(long, conflicts_with_all = ["party", "level", "mob"])]
    pub config: Option<PathBuf>,

    /// Party classes, comma separated (cleric, fighter, rogue, wizard)
    #[arg(long, value_delimiter = ',')]
    pub party: Vec<String>,

    /// Party level (1-20)
    #[arg(long)]
    pub level: Option<u32>,

    /// Adversary group as Name=count; repeat for more groups
    #[arg(long = "mob")]
    pub mob: Vec<String>,

    /// RNG seed; overrides the config file
    #[arg(long)]
    pub seed: Option<u64>,

    /// Round cap before the fight is called off; overrides the config file
    #[arg(long)]
    pub max_rounds: Option<u32>,

    /// Bestiary JSON or YAML file (defaults to the built-in monsters)
    #[arg(long)]
    pub monsters: Option<PathBuf>,
}

impl EncounterArgs {
    pub fn resolve(&self, default_seed: u64) -> anyhow::Result<EncounterConfig> {
        let mut cfg = match &self.config {
            Some(path) => {
                let text = read_text_auto(path)?;
                serde_json::from_str::<EncounterConfig>(&text)
                    .with_context(|| format!("parsing encounter config {}", path.display()))?
            }
            None => {
                let level = self
                    .level
                    .context("--level is required when no --config is given")?;
                let mut adversaries: IndexMap<String, u32> = IndexMap::new();
                for group in &self.mob {
                    let (name, count) = parse_adversary_group(group)?;
                    *adversaries.entry(name).or_insert(0) += count;
                }
                EncounterConfig {
                    party: self.party.clone(),
                    level,
                    adversaries,
                    seed: default_seed,
                    max_rounds: DEFAULT_MAX_ROUNDS,
                    record_log: false,
                }
            }
        };
        if let Some(seed) = self.seed {
            cfg.seed = seed;
        }
        if let Some(max_rounds) = self.max_rounds {
            cfg.max_rounds = max_rounds;
        }
        Ok(cfg)
    }

    pub fn bestiary(&self) -> anyhow::Result<Bestiary> {
        load_bestiary(self.monsters.as_deref())
    }
}

/// Read a text file, honoring a UTF-8/UTF-16 byte order mark if present.
pub fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

pub fn load_bestiary(path: Option<&Path>) -> anyhow::Result<Bestiary> {
    let Some(path) = path else {
        return Ok(Bestiary::builtin()?);
    };
    let text = read_text_auto(path)?;
    let bestiary = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Bestiary::from_yaml_str(&text),
        _ => Bestiary::from_json_str(&text),
    }
    .with_context(|| format!("loading bestiary {}", path.display()))?;
    Ok(bestiary)
}

/// Send tracing output to stderr. Each `-v` opens one more level; `-vvv`
/// prints every combat log line as it happens.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
