//! Werewolf simulator CLI - runs whole games against the random provider.
//!
//! Useful for smoke-testing setups and watching the transcript of a game
//! without any external decision provider.

use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use werewolf_engine::{GameConfig, GameOrchestrator, GameResult, NullSink, RandomProvider, Team, TracingSink};

#[derive(Parser)]
#[command(name = "werewolf-sim")]
#[command(about = "Run simulated werewolf games with random players")]
struct Args {
    /// Number of players
    #[arg(short, long, default_value = "6")]
    players: usize,

    /// Number of games to simulate (seeds increase by one per game)
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Seed for the first game
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Round cap per game
    #[arg(long, default_value = "10")]
    max_rounds: u32,

    /// Werewolf discussion rounds per night
    #[arg(long, default_value = "3")]
    discussion_rounds: u32,

    /// Per-decision timeout in seconds
    #[arg(long, default_value = "60")]
    timeout_secs: u64,

    /// Probability that a random player gives no answer
    #[arg(long, default_value = "0.0")]
    abstain: f64,

    /// Print each game's outcome as JSON
    #[arg(long)]
    json: bool,

    /// Log the transcript and per-decision detail
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        players = args.players,
        games = args.games,
        seed = args.seed,
        "Starting werewolf simulator"
    );

    let start = Instant::now();
    let (mut good, mut werewolves, mut unresolved) = (0u32, 0u32, 0u32);

    for game in 0..args.games {
        let seed = args.seed.wrapping_add(u64::from(game));
        let config = GameConfig::new(args.players)
            .with_max_rounds(args.max_rounds)
            .with_werewolf_discussion_rounds(args.discussion_rounds)
            .with_decision_timeout(Duration::from_secs(args.timeout_secs))
            .with_seed(seed);

        let provider = Arc::new(RandomProvider::new(seed).with_abstain_probability(args.abstain));
        let mut orchestrator = if args.games == 1 {
            GameOrchestrator::new(config, provider, Arc::new(TracingSink))?
        } else {
            GameOrchestrator::new(config, provider, Arc::new(NullSink))?
        };

        let outcome = match orchestrator.run().await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(game, seed, error = %err, "Game aborted");
                continue;
            }
        };

        match outcome.result {
            GameResult::Winner(Team::Good) => good += 1,
            GameResult::Winner(Team::Werewolves) => werewolves += 1,
            GameResult::NoResolution => unresolved += 1,
        }

        if args.json {
            println!("{}", serde_json::to_string(&outcome)?);
        } else {
            info!(
                game,
                seed,
                rounds = outcome.rounds_played,
                survivors = ?outcome.survivors,
                "{}",
                outcome.result
            );
        }
    }

    info!(
        good,
        werewolves,
        unresolved,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Simulation complete"
    );
    Ok(())
}
