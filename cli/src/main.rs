use clap::{Parser, Subcommand};
use skirmish_cli::{init_tracing, load_bestiary, EncounterArgs};
use skirmish_engine::api::simulate_encounter;
use skirmish_engine::builder::build_character;
use skirmish_engine::{Archetype, Dice, EncounterOutcome};
use std::path::PathBuf;

#[derive(Subcommand)]
enum Cmd {
    /// Roll a die multiple times
    Roll {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Sides on the die
        #[arg(long, default_value_t = 20)]
        sides: u32,
        /// Number of rolls
        #[arg(long, default_value_t = 5)]
        rolls: u32,
    },
    /// Run one encounter and report the outcome
    Run {
        #[command(flatten)]
        encounter: EncounterArgs,
        /// Print the full combat log
        #[arg(long, default_value_t = false)]
        log: bool,
        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Build a character and print it as JSON
    Build {
        /// Class: cleric, fighter, rogue or wizard
        #[arg(long)]
        class: Archetype,
        /// Character level (1-20)
        #[arg(long, default_value_t = 1)]
        level: u32,
        /// RNG seed for the hit point roll
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Pretty-print JSON
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// List the adversaries a bestiary offers
    Bestiary {
        /// Bestiary JSON or YAML file (defaults to the built-in monsters)
        #[arg(long)]
        monsters: Option<PathBuf>,
    },
}

#[derive(Parser)]
#[command(name = "skirmish")]
#[command(about = "Party-versus-monsters encounter simulator")]
struct Cli {
    /// More diagnostics on stderr (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Cmd,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Cmd::Roll { seed, sides, rolls } => {
            let mut dice = Dice::from_seed(seed);
            for _ in 0..rolls {
                println!("{}", dice.roll_die(sides));
            }
        }
        Cmd::Run {
            encounter,
            log,
            json,
        } => {
            let mut cfg = encounter.resolve(0)?;
            cfg.record_log = log;
            let bestiary = encounter.bestiary()?;
            tracing::info!(
                seed = cfg.seed,
                party = ?cfg.party,
                level = cfg.level,
                "running encounter"
            );
            let report = simulate_encounter(&cfg, &bestiary)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }
            for line in &report.log {
                println!("{}", line);
            }
            match &report.outcome {
                EncounterOutcome::PartyWon { survivors } => {
                    println!("party wins after {} rounds", report.rounds + 1);
                    for (name, hp) in survivors {
                        println!("  {:<16} {}/{} HP", name, hp.hp, hp.max_hp);
                    }
                }
                EncounterOutcome::AdversariesWon => {
                    println!("adversaries win after {} rounds", report.rounds + 1);
                }
                EncounterOutcome::RoundLimit => {
                    println!("no winner after {} rounds", report.rounds);
                }
            }
        }
        Cmd::Build {
            class,
            level,
            seed,
            pretty,
        } => {
            let mut dice = Dice::from_seed(seed);
            let actor = build_character(class, level, class.as_str(), &mut dice)?;
            if pretty {
                println!("{}", serde_json::to_string_pretty(&actor)?);
            } else {
                println!("{}", serde_json::to_string(&actor)?);
            }
        }
        Cmd::Bestiary { monsters } => {
            let bestiary = load_bestiary(monsters.as_deref())?;
            for (name, record) in bestiary.iter() {
                let special = record
                    .special
                    .as_ref()
                    .map(|s| format!(" [{}]", s.name))
                    .unwrap_or_default();
                println!(
                    "{:<20} AC {:>2}  HP {:>3}  x{} attacks{}",
                    name, record.ac, record.hp, record.actions, special
                );
            }
        }
    }
    Ok(())
}
