use clap::Parser;
use skirmish_cli::{init_tracing, EncounterArgs};
use skirmish_engine::api::simulate_many;

#[derive(Parser)]
#[command(name = "simulate-party")]
#[command(about = "Monte Carlo sim: many encounters for one party")]
struct Args {
    #[command(flatten)]
    encounter: EncounterArgs,

    /// Number of trials
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// Worker threads (0 = one per core)
    #[arg(long, default_value_t = 0)]
    workers: usize,

    /// More diagnostics on stderr (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    // Base seed; trial i uses seed+i
    let cfg = args.encounter.resolve(12345)?;
    let bestiary = args.encounter.bestiary()?;
    tracing::info!(trials = args.trials, workers = args.workers, "starting batch");
    let stats = simulate_many(&cfg, &bestiary, args.trials, args.workers)?;

    let adversaries = cfg
        .adversaries
        .iter()
        .map(|(name, count)| format!("{} x{}", name, count))
        .collect::<Vec<_>>()
        .join(", ");

    println!("simulate-party results");
    println!("----------------------");
    println!("trials:             {}", stats.trials);
    println!(
        "party:              {} (level {})",
        cfg.party.join(", "),
        cfg.level
    );
    println!("adversaries:        {}", adversaries);
    println!("seed:               {}", cfg.seed);
    println!();
    println!("party win rate:     {:.1}%", stats.win_rate());
    for (share, wins) in stats.survival_buckets() {
        let label = format!("{:.0}% standing:", share);
        println!("{:<20}{:.1}%", label, stats.percent(wins));
    }
    println!("round limit hits:   {}", stats.round_limits);
    println!();
    println!("survival by member:");
    for (name, survived) in &stats.member_survivals {
        println!("  {:<18}{:.1}%", name, stats.percent(*survived));
    }

    Ok(())
}
